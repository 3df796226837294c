//! Simulation timing
//!
//! `Ticker` fires every N fixed ticks (spawning, the seconds counter).
//! `FrameClock` turns variable frame deltas into a bounded number of fixed steps.

use serde::{Deserialize, Serialize};

/// Repeating countdown measured in simulation ticks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticker {
    interval: u32,
    elapsed: u32,
}

impl Ticker {
    pub fn new(interval: u32) -> Self {
        Self {
            interval: interval.max(1),
            elapsed: 0,
        }
    }

    /// Advance one tick; true when the interval completes
    pub fn tick(&mut self) -> bool {
        self.elapsed += 1;
        if self.elapsed >= self.interval {
            self.elapsed = 0;
            true
        } else {
            false
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn reset(&mut self) {
        self.elapsed = 0;
    }
}

/// Fixed-timestep accumulator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameClock {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FrameClock {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
        }
    }

    /// Feed a frame delta (seconds) and return how many fixed steps to run
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Long stalls (tab switch) are not replayed; garbage deltas count as 0
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, 0.1)
        } else {
            0.0
        };
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
