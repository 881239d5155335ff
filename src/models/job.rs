use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Available,
    Assigned,
    Completed,
}

/// A unit of freight work moving a load from a pickup to a dropoff.
///
/// `driver_id` is whatever the caller supplied on accept/assign. It is not
/// checked against the driver directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Job {
    pub id: i64,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub load_description: String,
    pub status: JobStatus,
    pub driver_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewJob {
    pub pickup_location: String,
    pub dropoff_location: String,
    pub load_description: String,
}
