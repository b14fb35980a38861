use std::time::Instant;
use tracing::info;

/// Logs how long the enclosing command took when it goes out of scope,
/// including on early returns.
pub struct Stopwatch {
    command: &'static str,
    started: Instant,
}

impl Stopwatch {
    pub fn start(command: &'static str) -> Self {
        info!(command, "Command started");
        Self { command, started: Instant::now() }
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.started.elapsed().as_millis()
    }
}

impl Drop for Stopwatch {
    fn drop(&mut self) {
        info!(command = self.command, elapsed_ms = self.elapsed_ms() as u64, "Command finished");
    }
}
