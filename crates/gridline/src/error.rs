use gridline_graph::Point;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("level segment {from:?} -> {to:?} is not axis-aligned")]
    DiagonalSegment { from: Point, to: Point },

    #[error("level contains no lines")]
    EmptyLevel,

    #[error("player spawn refers to line {index}, but the level has {count} lines")]
    InvalidSpawnLine { index: usize, count: usize },

    #[error("spawn position {position:?} is not on line {line}")]
    SpawnOffLine { line: usize, position: Point },

    #[error("grid size must be positive and finite, got {0}")]
    InvalidGridSize(f64),
}

pub type Result<T> = std::result::Result<T, Error>;
