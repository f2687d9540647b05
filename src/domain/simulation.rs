use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const MIN_INCREMENT: f64 = 3.0;
pub const MAX_INCREMENT: f64 = 15.0;

/// Supplies the per-tick increment of the cosmetic progress animation.
pub trait IncrementSource {
    fn next_increment(&mut self) -> f64;
}

/// Uniform increments in `[MIN_INCREMENT, MAX_INCREMENT)`.
pub struct RandomIncrements {
    rng: StdRng,
}

impl RandomIncrements {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl Default for RandomIncrements {
    fn default() -> Self {
        Self::new()
    }
}

impl IncrementSource for RandomIncrements {
    fn next_increment(&mut self) -> f64 {
        self.rng.gen_range(MIN_INCREMENT..MAX_INCREMENT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The run is not active; nothing changed.
    Ignored,
    Advanced(u8),
    Completed,
}

/// Accumulates increments for one run. The stored percentage is the floor of
/// the accumulator; the run ends once it reaches 100.
#[derive(Debug, Clone, Default)]
pub struct ProgressSimulation {
    accumulated: f64,
    running: bool,
}

impl ProgressSimulation {
    pub fn start(&mut self) {
        self.accumulated = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick(&mut self, increment: f64) -> TickOutcome {
        if !self.running {
            return TickOutcome::Ignored;
        }

        // Negative or NaN increments would break monotonicity.
        let increment = if increment.is_finite() {
            increment.max(0.0)
        } else {
            0.0
        };

        self.accumulated += increment;
        if self.accumulated >= 100.0 {
            self.accumulated = 100.0;
            self.running = false;
            TickOutcome::Completed
        } else {
            TickOutcome::Advanced(self.accumulated.floor() as u8)
        }
    }
}
