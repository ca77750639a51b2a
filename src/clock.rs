use parking_lot::Mutex;
use std::time::Instant;

/// A monotonically advancing virtual-time source, in simulation seconds.
///
/// The clock is a collaborator owned by the host: a discrete-event core
/// passes its own implementation to
/// [`Logger::configure_with_clock`](crate::Logger::configure_with_clock),
/// and the formatter queries it once per rendered line when the clock
/// prefix is enabled.
pub trait SimClock: Send + Sync {
    /// Current simulation time.
    fn now(&self) -> f64;
}

/// Wall-clock fallback: seconds elapsed since the clock was created.
///
/// Used when the host configures the logger without supplying its own clock.
#[derive(Debug)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SimClock for SystemClock {
    fn now(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// A clock advanced explicitly by the host. Starts at 0.0.
#[derive(Debug, Default)]
pub struct ManualClock {
    time: Mutex<f64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the clock to an absolute simulation time.
    pub fn set(&self, time: f64) {
        *self.time.lock() = time;
    }

    /// Advance the clock by `delta` seconds.
    pub fn advance(&self, delta: f64) {
        *self.time.lock() += delta;
    }
}

impl SimClock for ManualClock {
    fn now(&self) -> f64 {
        *self.time.lock()
    }
}
