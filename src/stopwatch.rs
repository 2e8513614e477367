use std::time::{Duration, Instant};

/// Lap timer handed through the request instead of living in a global.
///
/// The first [`lap`](Stopwatch::lap) only sets the mark; each later call
/// returns the time since the previous one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stopwatch {
    last: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lap(&mut self) -> Option<Duration> {
        let now = Instant::now();
        let elapsed = self.last.map(|last| now.duration_since(last));
        self.last = Some(now);
        elapsed
    }
}
