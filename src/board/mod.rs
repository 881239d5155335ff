pub mod drivers;
pub mod jobs;
pub mod seed;
