//! Level and movement configuration.
//!
//! Levels are plain JSON documents:
//!
//! ```json
//! {
//!   "waypoints": [[0, 0], [100, 0], [100, 100], [0, 100], [0, 0], null, [50, 0], [50, 100]],
//!   "gridSize": 5,
//!   "players": [{ "line": 0, "fraction": 0.5 }]
//! }
//! ```
//!
//! A `null` waypoint is a gap: the next position starts a new, unconnected run.

use gridline_graph::{Point, Rect, Size, point};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tuning for the movement resolver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MovementOptions {
    /// Extra distance searched past the requested travel when looking for other players. It is
    /// never added to committed motion.
    pub player_size_buffer: f64,
    /// How far along the current line a perpendicular input may look for a usable junction.
    pub snap_radius: f64,
    /// Upper bound on resolver iterations per player per tick.
    pub max_steps: usize,
    /// Upper bound on lines visited by a single lookahead.
    pub max_branch_items: usize,
}

impl Default for MovementOptions {
    fn default() -> Self {
        Self {
            player_size_buffer: 2.0,
            snap_radius: 1.0,
            max_steps: 64,
            max_branch_items: 256,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "Option<Point>", into = "Option<Point>")]
pub enum Waypoint {
    At(Point),
    Gap,
}

impl Waypoint {
    pub fn at(x: f64, y: f64) -> Self {
        Waypoint::At(point(x, y))
    }

    pub fn position(self) -> Option<Point> {
        match self {
            Waypoint::At(p) => Some(p),
            Waypoint::Gap => None,
        }
    }
}

impl From<Option<Point>> for Waypoint {
    fn from(value: Option<Point>) -> Self {
        value.map_or(Waypoint::Gap, Waypoint::At)
    }
}

impl From<Waypoint> for Option<Point> {
    fn from(value: Waypoint) -> Self {
        value.position()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSpawn {
    /// Index of the line, in level build order.
    pub line: usize,
    /// Where along the line to start, from 0 (start) to 1 (end).
    #[serde(default)]
    pub fraction: f64,
    #[serde(default = "default_speed")]
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelConfig {
    pub waypoints: Vec<Waypoint>,
    #[serde(default = "default_grid_size")]
    pub grid_size: f64,
    /// Play-area extents anchored at the origin. Defaults to the bounding box of the waypoints.
    #[serde(default)]
    pub area: Option<Size>,
    #[serde(default = "default_line_width")]
    pub line_width: f64,
    #[serde(default)]
    pub players: Vec<PlayerSpawn>,
    #[serde(default)]
    pub movement: MovementOptions,
}

fn default_grid_size() -> f64 {
    1.0
}

fn default_line_width() -> f64 {
    5.0
}

fn default_speed() -> f64 {
    5.0
}

impl LevelConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: LevelConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A rectangular play area bounded by four border lines, with no players.
    pub fn square(width: f64, height: f64, grid_size: f64) -> Self {
        Self {
            waypoints: vec![
                Waypoint::at(0.0, 0.0),
                Waypoint::at(width, 0.0),
                Waypoint::at(width, height),
                Waypoint::at(0.0, height),
                Waypoint::at(0.0, 0.0),
            ],
            grid_size,
            area: Some(Size::new(width, height)),
            line_width: default_line_width(),
            players: Vec::new(),
            movement: MovementOptions::default(),
        }
    }

    pub fn with_player(mut self, line: usize, fraction: f64, speed: f64) -> Self {
        self.players.push(PlayerSpawn {
            line,
            fraction,
            speed,
        });
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.grid_size > 0.0 && self.grid_size.is_finite()) {
            return Err(Error::InvalidGridSize(self.grid_size));
        }
        Ok(())
    }

    /// The configured area, or the bounding box of every waypoint.
    pub fn play_area(&self) -> Rect {
        match self.area {
            Some(size) => Rect::new(point(0.0, 0.0), size),
            None => Rect::from_points(self.waypoints.iter().filter_map(|w| w.position())),
        }
    }
}

/// Everything a tick needs to know about the level besides its topology.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub grid_size: f64,
    pub area: Rect,
    pub line_width: f64,
    pub movement: MovementOptions,
}

impl Rules {
    pub fn from_config(config: &LevelConfig) -> Self {
        Self {
            grid_size: config.grid_size,
            area: config.play_area(),
            line_width: config.line_width,
            movement: config.movement,
        }
    }
}
