use log::{debug, info, warn};

pub struct LogManager;

impl LogManager {
    pub fn new() -> Self {
        Self
    }

    pub fn record(&self, message: &str) {
        info!("[ringsweep] {}", message);
    }

    pub fn warn(&self, message: &str) {
        warn!("[ringsweep] {}", message);
    }

    pub fn trace(&self, message: &str) {
        debug!("[ringsweep] {}", message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new()
    }
}
