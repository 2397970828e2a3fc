#![forbid(unsafe_code)]

//! Planar graph of axis-aligned lines joined at corners.
//!
//! Corners and lines live in a single [`Graph`] arena and refer to each other by id, so the
//! corner ↔ line back references never form ownership cycles. Each corner has one slot per
//! [`Direction`]; a line occupies the slot matching the heading from the corner to its far end.

mod corner;
mod direction;
pub mod error;
pub mod geom;
mod graph;
mod ids;
mod line;

pub use corner::Corner;
pub use direction::Direction;
pub use error::{GraphError, Result};
pub use geom::{Point, Rect, Size, Vector, point, vector};
pub use graph::{Graph, GraphEvent, Split};
pub use ids::{CornerId, LineId, PlayerId};
pub use line::Line;
