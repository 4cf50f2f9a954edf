// chrono.rs -- Pausable wall-clock timer.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChronoStatus {
    Start,
    Running,
    Paused,
    Stopped,
    Finalized,
}

/// Accumulates running time across pause/resume cycles.
#[derive(Debug, Clone)]
pub struct Chrono {
    status: ChronoStatus,
    started: Option<Instant>,
    accumulated: Duration,
}

impl Default for Chrono {
    fn default() -> Self {
        Self::new()
    }
}

impl Chrono {
    pub fn new() -> Self {
        Chrono {
            status: ChronoStatus::Start,
            started: None,
            accumulated: Duration::ZERO,
        }
    }

    pub fn status(&self) -> ChronoStatus {
        self.status
    }

    /// Start from zero. Discards previous measurements.
    pub fn run(&mut self) {
        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
        self.status = ChronoStatus::Running;
    }

    pub fn pause(&mut self) {
        if self.status == ChronoStatus::Running {
            self.bank();
            self.status = ChronoStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == ChronoStatus::Paused {
            self.started = Some(Instant::now());
            self.status = ChronoStatus::Running;
        }
    }

    /// Stop and return the accumulated seconds.
    pub fn stop(&mut self) -> f64 {
        if self.status == ChronoStatus::Running {
            self.bank();
        }
        if self.status == ChronoStatus::Running || self.status == ChronoStatus::Paused {
            self.status = ChronoStatus::Stopped;
        }
        self.accumulated.as_secs_f64()
    }

    /// Like `stop` but marks the measurement as complete.
    pub fn finalize(&mut self) -> f64 {
        let t = self.stop();
        self.status = ChronoStatus::Finalized;
        t
    }

    pub fn reset(&mut self) {
        *self = Chrono::new();
    }

    /// Seconds of running time so far, including the current span.
    pub fn elapsed(&self) -> f64 {
        let mut total = self.accumulated;
        if self.status == ChronoStatus::Running {
            if let Some(t0) = self.started {
                total += t0.elapsed();
            }
        }
        total.as_secs_f64()
    }

    fn bank(&mut self) {
        if let Some(t0) = self.started.take() {
            self.accumulated += t0.elapsed();
        }
    }
}
