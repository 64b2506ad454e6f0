use std::time::{Duration, Instant};

/// Measures single operations and accumulates their elapsed wall-clock durations.
#[derive(Debug, Default)]
pub struct BenchmarkTimer {
    started_at: Option<Instant>,
    durations: Vec<Duration>,
}

impl BenchmarkTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            started_at: None,
            durations: Vec::with_capacity(capacity),
        }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    /// Records the time elapsed since the last `start`.
    /// Without a pending `start` nothing is recorded and zero is returned.
    pub fn stop(&mut self) -> Duration {
        match self.started_at.take() {
            Some(started_at) => {
                let elapsed = started_at.elapsed();
                self.durations.push(elapsed);
                elapsed
            }
            None => Duration::ZERO,
        }
    }

    pub fn durations(&self) -> &[Duration] {
        &self.durations
    }

    pub fn len(&self) -> usize {
        self.durations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.durations.is_empty()
    }
}
