use crate::board::drivers::DriverDirectory;
use crate::board::jobs::JobBoard;
use crate::board::seed;
use crate::observability::metrics::Metrics;

pub struct AppState {
    pub jobs: JobBoard,
    pub drivers: DriverDirectory,
    pub metrics: Metrics,
}

impl AppState {
    pub fn new(jobs: JobBoard, drivers: DriverDirectory) -> Self {
        Self {
            jobs,
            drivers,
            metrics: Metrics::new(),
        }
    }

    /// State preloaded with the demo jobs and drivers.
    pub fn seeded() -> Self {
        Self::new(
            JobBoard::with_jobs(seed::jobs()),
            DriverDirectory::new(seed::drivers()),
        )
    }

    pub fn empty() -> Self {
        Self::new(JobBoard::new(), DriverDirectory::default())
    }
}
