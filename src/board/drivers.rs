use crate::models::driver::Driver;

/// Read-only roster of drivers, fixed for the lifetime of the process.
#[derive(Debug, Default)]
pub struct DriverDirectory {
    drivers: Vec<Driver>,
}

impl DriverDirectory {
    pub fn new(mut drivers: Vec<Driver>) -> Self {
        drivers.sort_by_key(|driver| driver.id);
        Self { drivers }
    }

    pub fn list(&self) -> Vec<Driver> {
        self.drivers.clone()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }
}
