use log::{debug, info};

/// Thin wrapper over the `log` facade that tags messages with a component scope.
pub struct LogManager {
    scope: &'static str,
}

impl LogManager {
    pub fn new(scope: &'static str) -> Self {
        Self { scope }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.scope, message);
    }

    /// Data gaps are expected, so they stay at debug level.
    pub fn data_gap(&self, message: &str) {
        debug!("[{}] {}", self.scope, message);
    }
}

impl Default for LogManager {
    fn default() -> Self {
        Self::new("pitwall")
    }
}
