//! Step timing.

use std::time::Instant;
use tracing::info;

/// Measures how long a publish step takes and logs it on `finish`.
pub struct Timer {
    name: String,
    start: Instant,
}

impl Timer {
    /// Start a new timer with the given step name.
    pub fn start(name: &str) -> Self {
        Self {
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    /// Finish the timer and log the elapsed time.
    pub fn finish(self) {
        let elapsed = self.start.elapsed();
        let secs = elapsed.as_secs_f64();
        if secs >= 1.0 {
            info!("[{:.1}s] {}", secs, self.name);
        } else {
            info!("[{}ms] {}", elapsed.as_millis(), self.name);
        }
    }
}
