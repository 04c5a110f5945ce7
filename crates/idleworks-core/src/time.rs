//! Simulation time
//!
//! - `Tick` - Number of completed passes
//! - `Speed` - Scale applied to live frame time
//! - `Clock` - Passes and simulated seconds so far

use serde::{Deserialize, Serialize};

/// A pass counter (logical time unit)
pub type Tick = u64;

/// Live simulation speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Speed {
    /// Live updates are ignored
    Paused,
    /// Half speed
    Slow,
    /// Real time
    #[default]
    Normal,
    /// Double speed
    Fast,
    /// Ten times real time
    VeryFast,
}

impl Speed {
    /// Factor applied to live frame time
    pub fn scale(&self) -> f64 {
        match self {
            Speed::Paused => 0.0,
            Speed::Slow => 0.5,
            Speed::Normal => 1.0,
            Speed::Fast => 2.0,
            Speed::VeryFast => 10.0,
        }
    }

    /// Check if live updates are paused
    pub fn is_paused(&self) -> bool {
        matches!(self, Speed::Paused)
    }
}

/// Simulation clock state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Clock {
    /// Passes run so far
    pub tick: Tick,
    /// Simulated seconds, live and offline
    pub elapsed: f64,
    /// Current live speed
    pub speed: Speed,
}

impl Clock {
    /// Create a clock at tick 0, running at normal speed
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pass covering `seconds`
    pub fn advance(&mut self, seconds: f64) {
        self.tick += 1;
        self.elapsed += seconds;
    }

    /// Set the live speed
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// Toggle pause, resuming at `previous_speed` (or normal)
    pub fn toggle_pause(&mut self, previous_speed: Speed) -> Speed {
        if self.speed.is_paused() {
            self.speed = if previous_speed.is_paused() {
                Speed::Normal
            } else {
                previous_speed
            };
        } else {
            self.speed = Speed::Paused;
        }
        self.speed
    }
}
