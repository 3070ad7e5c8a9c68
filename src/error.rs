use thiserror::Error;

use crate::common::Cell;

/// Smallest height or width a maze may have.
pub const MIN_DIMENSION: usize = 5;

#[derive(Error, Debug)]
pub enum MazeError {
    #[error("maze must be at least {min}x{min}, got height {height} and width {width}")]
    InvalidDimensions {
        height: usize,
        width: usize,
        min: usize,
    },

    #[error("maze of {height}x{width} exceeds the configured limit of {max_height}x{max_width}")]
    DimensionsTooLarge {
        height: usize,
        width: usize,
        max_height: usize,
        max_width: usize,
    },

    #[error("{endpoint} {cell:?} lies outside the {height}x{width} grid")]
    OutOfBounds {
        endpoint: &'static str,
        cell: Cell,
        height: usize,
        width: usize,
    },

    #[error("pop called on an empty priority queue")]
    EmptyQueue,

    #[error("expanded cell {cell:?} has no recorded cost")]
    MissingCost { cell: Cell },

    #[error("parent chain from goal {goal:?} broke after {steps} steps")]
    BrokenChain { goal: Cell, steps: usize },

    #[error("map parse error at line {line}: {reason}")]
    MapParse { line: usize, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
