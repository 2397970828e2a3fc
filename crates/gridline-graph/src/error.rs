use crate::{CornerId, Direction, LineId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("corner {corner:?} already holds a line at {direction:?}")]
    OccupiedSlot {
        corner: CornerId,
        direction: Direction,
    },

    #[error("line {line:?} does not leave corner {corner:?} along a single axis")]
    NotAxisAligned { corner: CornerId, line: LineId },

    #[error("corner {corner:?} does not sit on an endpoint of line {line:?}")]
    NotOnEndpoint { corner: CornerId, line: LineId },

    #[error("line {line:?} leaves corner {corner:?} towards {actual:?}, not {requested:?}")]
    SlotMismatch {
        corner: CornerId,
        line: LineId,
        requested: Direction,
        actual: Direction,
    },

    #[error("point ({x}, {y}) is not strictly inside line {line:?}")]
    NotInterior { line: LineId, x: f64, y: f64 },
}

pub type Result<T> = std::result::Result<T, GraphError>;
