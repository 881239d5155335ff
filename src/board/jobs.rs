use std::sync::{PoisonError, RwLock};

use dashmap::DashMap;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::job::{Job, JobStatus, NewJob};

/// In-memory job repository.
///
/// Every status change holds the entry's write guard for the whole
/// read-check-write sequence, so concurrent accepts of one job cannot both
/// succeed. Id allocation and insertion happen under the `next_id` write
/// lock and listing holds its read lock, so a listing never shows a job
/// without every job created before it.
#[derive(Debug)]
pub struct JobBoard {
    jobs: DashMap<i64, Job>,
    next_id: RwLock<i64>,
}

impl JobBoard {
    pub fn new() -> Self {
        Self::with_jobs(Vec::new())
    }

    /// Builds a board from existing jobs. New ids continue after the highest
    /// id present.
    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let next_id = jobs.iter().map(|job| job.id).max().unwrap_or(0) + 1;

        Self {
            jobs: jobs.into_iter().map(|job| (job.id, job)).collect(),
            next_id: RwLock::new(next_id),
        }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// All jobs in creation order.
    pub fn list(&self) -> Vec<Job> {
        let _creating = self.next_id.read().unwrap_or_else(PoisonError::into_inner);

        let mut jobs: Vec<Job> = self
            .jobs
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        jobs.sort_by_key(|job| job.id);
        jobs
    }

    pub fn get(&self, job_id: i64) -> Option<Job> {
        self.jobs.get(&job_id).map(|entry| entry.value().clone())
    }

    pub fn create(&self, payload: NewJob) -> Job {
        let mut next_id = self.next_id.write().unwrap_or_else(PoisonError::into_inner);
        let id = *next_id;
        *next_id += 1;

        let job = Job {
            id,
            pickup_location: payload.pickup_location,
            dropoff_location: payload.dropoff_location,
            load_description: payload.load_description,
            status: JobStatus::Available,
            driver_id: None,
        };

        self.jobs.insert(id, job.clone());
        drop(next_id);

        info!(job_id = id, "job posted");
        job
    }

    pub fn accept(&self, job_id: i64, driver_id: Option<i64>) -> Result<Job, AppError> {
        let mut job = self
            .jobs
            .get_mut(&job_id)
            .ok_or(AppError::JobNotFound(job_id))?;

        if job.status != JobStatus::Available {
            warn!(job_id, status = ?job.status, "job is not open for acceptance");
            return Err(AppError::JobUnavailable(job_id));
        }

        job.status = JobStatus::Assigned;
        job.driver_id = driver_id;

        info!(job_id, driver_id = ?driver_id, "job accepted");
        Ok(job.clone())
    }

    /// Assigns regardless of the current status, including completed jobs.
    pub fn assign(&self, job_id: i64, driver_id: i64) -> Result<Job, AppError> {
        let mut job = self
            .jobs
            .get_mut(&job_id)
            .ok_or(AppError::JobNotFound(job_id))?;

        let previous = job.status;
        job.status = JobStatus::Assigned;
        job.driver_id = Some(driver_id);

        info!(job_id, driver_id, previous = ?previous, "driver assigned");
        Ok(job.clone())
    }

    /// Completes regardless of the current status. `driver_id` is kept.
    pub fn complete(&self, job_id: i64) -> Result<Job, AppError> {
        let mut job = self
            .jobs
            .get_mut(&job_id)
            .ok_or(AppError::JobNotFound(job_id))?;

        let previous = job.status;
        job.status = JobStatus::Completed;

        info!(job_id, previous = ?previous, "job completed");
        Ok(job.clone())
    }
}

impl Default for JobBoard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::JobBoard;
    use crate::board::seed;
    use crate::error::AppError;
    use crate::models::job::{JobStatus, NewJob};

    fn new_job(load: &str) -> NewJob {
        NewJob {
            pickup_location: "Georgetown Yard".to_string(),
            dropoff_location: "Kent Valley".to_string(),
            load_description: load.to_string(),
        }
    }

    #[test]
    fn created_ids_continue_after_seed() {
        let board = JobBoard::with_jobs(seed::jobs());

        let first = board.create(new_job("Steel coils"));
        let second = board.create(new_job("Lumber"));

        assert_eq!(first.id, 3);
        assert_eq!(second.id, 4);
        assert_eq!(first.status, JobStatus::Available);
        assert!(first.driver_id.is_none());
    }

    #[test]
    fn empty_board_starts_at_one() {
        let board = JobBoard::new();
        assert_eq!(board.create(new_job("Produce")).id, 1);
    }

    #[test]
    fn list_returns_creation_order() {
        let board = JobBoard::new();
        for load in ["a", "b", "c", "d", "e"] {
            board.create(new_job(load));
        }

        let loads: Vec<String> = board
            .list()
            .into_iter()
            .map(|job| job.load_description)
            .collect();

        assert_eq!(loads, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn second_accept_fails_and_keeps_first_driver() {
        let board = JobBoard::with_jobs(seed::jobs());

        let accepted = board.accept(1, Some(2)).unwrap();
        assert_eq!(accepted.status, JobStatus::Assigned);
        assert_eq!(accepted.driver_id, Some(2));

        let err = board.accept(1, Some(1)).unwrap_err();
        assert!(matches!(err, AppError::JobUnavailable(1)));
        assert_eq!(board.get(1).unwrap().driver_id, Some(2));
    }

    #[test]
    fn accept_without_driver_leaves_driver_empty() {
        let board = JobBoard::with_jobs(seed::jobs());

        let accepted = board.accept(2, None).unwrap();

        assert_eq!(accepted.status, JobStatus::Assigned);
        assert!(accepted.driver_id.is_none());
    }

    #[test]
    fn accept_unknown_job_changes_nothing() {
        let board = JobBoard::with_jobs(seed::jobs());
        let before = board.list();

        let err = board.accept(9999, Some(1)).unwrap_err();

        assert!(matches!(err, AppError::JobNotFound(9999)));
        assert_eq!(board.list(), before);
    }

    #[test]
    fn assign_overrides_completed_job() {
        let board = JobBoard::with_jobs(seed::jobs());
        board.complete(1).unwrap();

        let job = board.assign(1, 7).unwrap();

        assert_eq!(job.status, JobStatus::Assigned);
        assert_eq!(job.driver_id, Some(7));
    }

    #[test]
    fn complete_skips_assignment() {
        let board = JobBoard::with_jobs(seed::jobs());

        let job = board.complete(2).unwrap();

        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.driver_id.is_none());
    }

    #[test]
    fn complete_keeps_assigned_driver() {
        let board = JobBoard::with_jobs(seed::jobs());
        board.accept(1, Some(2)).unwrap();

        assert_eq!(board.complete(1).unwrap().driver_id, Some(2));
    }

    #[test]
    fn concurrent_accepts_have_a_single_winner() {
        let board = Arc::new(JobBoard::with_jobs(seed::jobs()));

        let handles: Vec<_> = (0..16i64)
            .map(|driver_id| {
                let board = board.clone();
                thread::spawn(move || board.accept(1, Some(driver_id)).is_ok())
            })
            .collect();

        let winners = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(board.get(1).unwrap().status, JobStatus::Assigned);
    }

    #[test]
    fn listing_during_concurrent_creates_has_no_gaps() {
        let board = Arc::new(JobBoard::with_jobs(seed::jobs()));

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let board = board.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        board.create(new_job("Pallets"));
                    }
                })
            })
            .collect();

        let reader = {
            let board = board.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let ids: Vec<i64> = board.list().iter().map(|job| job.id).collect();
                    let expected: Vec<i64> = (1..=ids.len() as i64).collect();
                    assert_eq!(ids, expected);
                }
            })
        };

        for writer in writers {
            writer.join().unwrap();
        }
        reader.join().unwrap();

        assert_eq!(board.len(), 202);
    }

    #[test]
    fn negative_ids_are_plain_lookups() {
        let board = JobBoard::with_jobs(seed::jobs());

        assert!(matches!(board.accept(-1, None), Err(AppError::JobNotFound(-1))));
        assert!(matches!(board.complete(-1), Err(AppError::JobNotFound(-1))));

        let job = board.assign(1, -3).unwrap();
        assert_eq!(job.driver_id, Some(-3));
    }
}
