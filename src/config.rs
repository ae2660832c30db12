//! Settings for a randomly generated simulation run.

use crate::error::ConfigError;
use crate::generate::CommandWeights;
use std::ops::RangeInclusive;
use std::time::Duration;

/// Configuration for a full simulation: grid, obstacles, script and display.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Grid width in cells.
    pub width: u32,
    /// Grid height in cells.
    pub height: u32,
    /// Share of cells turned into obstacles, in `[0, 1]`.
    pub obstacle_ratio: f64,
    /// Number of random commands to generate when no script is given.
    pub command_count: usize,
    /// Relative frequencies of F/B/L/R in generated scripts.
    pub weights: CommandWeights,
    /// Both start coordinates are drawn from this range (clamped to the grid).
    pub start_range: RangeInclusive<u32>,
    /// Pause after each rendered frame.
    pub frame_delay: Duration,
    /// Clear the terminal before each frame.
    pub clear_screen: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: 30,
            height: 30,
            obstacle_ratio: 0.05,
            command_count: 1000,
            weights: CommandWeights::default(),
            start_range: 5..=25,
            frame_delay: Duration::from_millis(200),
            clear_screen: true,
        }
    }
}

impl SimulationConfig {
    /// Checks the settings that the generators would otherwise reject mid-run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.obstacle_ratio) {
            return Err(ConfigError::InvalidRatio(self.obstacle_ratio));
        }
        if self.weights.as_array().iter().all(|&w| w == 0) {
            return Err(ConfigError::InvalidWeights);
        }
        if self.start_range.is_empty() {
            return Err(ConfigError::InvalidStartRange {
                start: *self.start_range.start(),
                end: *self.start_range.end(),
            });
        }
        Ok(())
    }
}
