//! Randomized setup: obstacle placement, command scripts and starting poses.
//!
//! Every function takes its random source explicitly, so a seeded RNG such as
//! [`rand_chacha::ChaCha8Rng`] reproduces a run exactly.

use crate::command::Command;
use crate::error::{ConfigError, GridError};
use crate::grid::Grid;
use crate::rover::Heading;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use std::ops::RangeInclusive;
use tracing::debug;

/// Random draws before [`random_start`] gives up sampling and scans instead.
const START_ATTEMPTS: usize = 64;

/// Relative frequencies used by [`generate_commands`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandWeights {
    pub forward: u32,
    pub backward: u32,
    pub left: u32,
    pub right: u32,
}

impl Default for CommandWeights {
    fn default() -> Self {
        Self {
            forward: 60,
            backward: 20,
            left: 15,
            right: 5,
        }
    }
}

impl CommandWeights {
    /// Weight of each command, in [`Command::ALL`] order.
    pub fn as_array(&self) -> [u32; 4] {
        [self.forward, self.backward, self.left, self.right]
    }

    pub fn weight(&self, command: Command) -> u32 {
        match command {
            Command::Forward => self.forward,
            Command::Backward => self.backward,
            Command::TurnLeft => self.left,
            Command::TurnRight => self.right,
        }
    }
}

/// Flags `round(width * height * ratio)` distinct cells as obstacles.
///
/// Cells are sampled without replacement from the whole grid; a cell that is
/// already an obstacle still uses up one draw. Returns the number of cells
/// drawn.
pub fn generate_obstacles<R: Rng + ?Sized>(
    grid: &mut Grid,
    ratio: f64,
    rng: &mut R,
) -> Result<usize, GridError> {
    if !(0.0..=1.0).contains(&ratio) {
        return Err(GridError::InvalidRatio(ratio));
    }

    let total = grid.cell_count();
    let count = ((total as f64 * ratio).round() as usize).min(total);

    for index in rand::seq::index::sample(rng, total, count) {
        let (x, y) = grid.coords(index);
        grid.set_obstacle(x, y)?;
    }

    debug!(count, total, ratio, "placed obstacles");
    Ok(count)
}

/// Draws `len` commands with replacement according to `weights`.
pub fn generate_commands<R: Rng + ?Sized>(
    len: usize,
    weights: &CommandWeights,
    rng: &mut R,
) -> Result<Vec<Command>, ConfigError> {
    let dist = WeightedIndex::new(weights.as_array()).map_err(|_| ConfigError::InvalidWeights)?;
    Ok((0..len).map(|_| Command::ALL[dist.sample(rng)]).collect())
}

/// Picks one of the four headings uniformly.
pub fn random_heading<R: Rng + ?Sized>(rng: &mut R) -> Heading {
    Heading::ALL[rng.gen_range(0..Heading::ALL.len())]
}

/// Picks a free starting cell with both coordinates drawn from `range`.
///
/// The range is clamped to the grid. If no free cell turns up after a bounded
/// number of draws, the first free cell of the grid (row by row) is used.
pub fn random_start<R: Rng + ?Sized>(
    grid: &Grid,
    range: RangeInclusive<u32>,
    rng: &mut R,
) -> Result<(u32, u32), GridError> {
    let clamp = |limit: u32| {
        let lo = (*range.start()).min(limit - 1);
        let hi = (*range.end()).min(limit - 1);
        lo.min(hi)..=hi.max(lo)
    };
    let (xs, ys) = (clamp(grid.width()), clamp(grid.height()));

    for _ in 0..START_ATTEMPTS {
        let x = rng.gen_range(xs.clone());
        let y = rng.gen_range(ys.clone());
        if !grid.is_obstacle(x, y) {
            return Ok((x, y));
        }
    }

    (0..grid.cell_count())
        .map(|i| grid.coords(i))
        .find(|&(x, y)| !grid.is_obstacle(x, y))
        .ok_or(GridError::NoFreeCell)
}
