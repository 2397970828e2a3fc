//! Axis-aligned segments and the geometric queries the movement code relies on.
//!
//! All comparisons are exact: the graph is built on exact axis-aligned coordinates and no
//! tolerance is applied when matching positions against endpoints.

use crate::geom::Point;
use crate::{CornerId, Direction, PlayerId};

#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) start: Point,
    pub(crate) end: Point,
    pub(crate) start_corner: Option<CornerId>,
    pub(crate) end_corner: Option<CornerId>,
    pub(crate) width: f64,
    pub(crate) players: Vec<PlayerId>,
}

impl Line {
    pub(crate) fn new(start: Point, end: Point, width: f64) -> Self {
        Self {
            start,
            end,
            start_corner: None,
            end_corner: None,
            width,
            players: Vec::new(),
        }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn start_corner(&self) -> Option<CornerId> {
        self.start_corner
    }

    pub fn end_corner(&self) -> Option<CornerId> {
        self.end_corner
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).length()
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y && self.start.x != self.end.x
    }

    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x && self.start.y != self.end.y
    }

    pub fn is_direction_parallel(&self, direction: Direction) -> bool {
        (self.is_horizontal() && direction.is_horizontal())
            || (self.is_vertical() && direction.is_vertical())
    }

    pub fn is_direction_perpendicular(&self, direction: Direction) -> bool {
        (self.is_horizontal() && direction.is_vertical())
            || (self.is_vertical() && direction.is_horizontal())
    }

    /// True when `p` lies on the segment, endpoints included.
    pub fn point_on_line(&self, p: Point) -> bool {
        if self.is_horizontal() {
            p.y == self.start.y
                && p.x >= self.start.x.min(self.end.x)
                && p.x <= self.start.x.max(self.end.x)
        } else if self.is_vertical() {
            p.x == self.start.x
                && p.y >= self.start.y.min(self.end.y)
                && p.y <= self.start.y.max(self.end.y)
        } else {
            p == self.start
        }
    }

    /// True when `p` lies on the segment but on neither endpoint.
    pub fn point_strictly_inside(&self, p: Point) -> bool {
        self.point_on_line(p) && p != self.start && p != self.end
    }

    /// The endpoint reached by travelling from the other endpoint towards `direction`.
    pub fn endpoint_toward(&self, direction: Direction) -> Option<Point> {
        if !self.is_direction_parallel(direction) {
            return None;
        }
        if direction.along(self.end - self.start) > 0.0 {
            Some(self.end)
        } else {
            Some(self.start)
        }
    }

    /// The corner sitting on [`Line::endpoint_toward`].
    pub fn corner_toward(&self, direction: Direction) -> Option<CornerId> {
        if !self.is_direction_parallel(direction) {
            return None;
        }
        if direction.along(self.end - self.start) > 0.0 {
            self.end_corner
        } else {
            self.start_corner
        }
    }

    /// Distance from `p` to the endpoint lying towards `direction`.
    ///
    /// Returns `0.0` (and logs) when `p` is off the line or `direction` does not follow it.
    pub fn distance_to_corner(&self, p: Point, direction: Direction) -> f64 {
        if !self.point_on_line(p) {
            tracing::warn!(x = p.x, y = p.y, "distance query for a point off the line");
            return 0.0;
        }
        match self.endpoint_toward(direction) {
            Some(endpoint) => direction.along(endpoint - p),
            None => {
                tracing::warn!(
                    ?direction,
                    "distance query along a direction not parallel to the line"
                );
                0.0
            }
        }
    }

    pub fn linked_players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn is_player_linked(&self, player: PlayerId) -> bool {
        self.players.contains(&player)
    }
}
