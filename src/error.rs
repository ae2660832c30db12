//! Error types for grid construction and simulation configuration.
//!
//! Collisions are not errors: a blocked move is reported through the rover's
//! boolean return value and an observer event.

/// Errors raised while building or populating a [`Grid`](crate::Grid).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Width or height does not fit signed coordinate arithmetic.
    #[error("grid dimension {0} exceeds the supported maximum of {max}", max = i32::MAX)]
    DimensionTooLarge(u32),

    /// A pre-seeded layout does not match the declared dimensions.
    #[error("layout is {rows} rows of {columns} cells, expected {height} rows of {width}")]
    DimensionMismatch {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
        /// Rows found in the layout.
        rows: usize,
        /// Length of the first offending row (or of the first row).
        columns: usize,
    },

    /// Rows of an inferred layout have different lengths.
    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedLayout {
        /// Index of the offending row.
        row: usize,
        /// Its length.
        len: usize,
        /// Length of the first row.
        expected: usize,
    },

    /// A coordinate lies outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        /// Column.
        x: u32,
        /// Row.
        y: u32,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },

    /// Obstacle ratio outside `[0, 1]`.
    #[error("obstacle ratio must lie in [0, 1] (got {0})")]
    InvalidRatio(f64),

    /// Every cell is an obstacle, so there is nowhere to put a rover.
    #[error("grid has no free cell")]
    NoFreeCell,
}

/// Errors raised by [`SimulationConfig::validate`](crate::SimulationConfig::validate)
/// and the generators that consume it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Obstacle ratio outside `[0, 1]`.
    #[error("obstacle ratio must lie in [0, 1] (got {0})")]
    InvalidRatio(f64),

    /// All command weights are zero.
    #[error("at least one command weight must be non-zero")]
    InvalidWeights,

    /// Width or height was zero.
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },

    /// The start range is empty.
    #[error("start range {start}..={end} is empty")]
    InvalidStartRange {
        /// Lower bound.
        start: u32,
        /// Upper bound.
        end: u32,
    },
}

/// A heading or command symbol could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} symbol {symbol:?}")]
pub struct ParseSymbolError {
    /// What was being parsed (`"heading"` or `"command"`).
    pub kind: &'static str,
    /// The offending input.
    pub symbol: String,
}
