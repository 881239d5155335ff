pub mod driver;
pub mod job;
