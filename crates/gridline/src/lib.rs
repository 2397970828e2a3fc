#![forbid(unsafe_code)]

//! Movement and line-drawing engine for Qix/Xonix style territory games.
//!
//! Players walk an axis-aligned graph of lines, never pass through one another, and can draw
//! new lines out into the play area:
//!
//! - [`level`] turns a waypoint list into the starting graph.
//! - [`movement`] resolves travel along existing lines, including the lookahead that keeps
//!   players a fixed distance apart.
//! - [`drawing`] runs the per-player Travelling / PreDrawing / Drawing state machine.
//! - [`World`] ties them together and advances every player once per tick.
//!
//! The graph itself lives in the [`graph`] crate re-export.

pub mod config;
pub mod drawing;
pub mod error;
pub mod input;
pub mod level;
pub mod movement;
mod player;
mod world;

pub use gridline_graph as graph;

pub use config::{LevelConfig, MovementOptions, PlayerSpawn, Rules, Waypoint};
pub use drawing::StepOutcome;
pub use error::{Error, Result};
pub use input::{HoldTracker, TickInput};
pub use movement::{Board, Lookahead, MoveOutcome};
pub use player::{Player, PlayerState};
pub use world::World;
