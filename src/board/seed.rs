use crate::models::driver::Driver;
use crate::models::job::{Job, JobStatus};

pub fn jobs() -> Vec<Job> {
    vec![
        job(1, "Amazon SODO", "Bellevue Downtown", "Pallet of boxes"),
        job(
            2,
            "Port of Seattle Terminal 18",
            "Redmond Microsoft Campus",
            "Electronics container",
        ),
    ]
}

pub fn drivers() -> Vec<Driver> {
    vec![
        Driver {
            id: 1,
            name: "John Doe".to_string(),
            current_location: "Seattle".to_string(),
        },
        Driver {
            id: 2,
            name: "Sarah Lee".to_string(),
            current_location: "Bellevue".to_string(),
        },
    ]
}

fn job(id: i64, pickup: &str, dropoff: &str, load: &str) -> Job {
    Job {
        id,
        pickup_location: pickup.to_string(),
        dropoff_location: dropoff.to_string(),
        load_description: load.to_string(),
        status: JobStatus::Available,
        driver_id: None,
    }
}
