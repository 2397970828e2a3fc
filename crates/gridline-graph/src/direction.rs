//! Orthogonal headings.
//!
//! A `Direction` is both a compass heading for movement and the key of a corner's line slot.
//! "No direction" is expressed as `Option<Direction>::None` by callers.

use crate::geom::{Vector, vector};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Fixed scan order used wherever every slot of a corner is visited.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Right => Direction::Up,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Right | Direction::Left)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// `Down` and `Left` point along the negative half of their axis.
    pub fn is_negative(self) -> bool {
        matches!(self, Direction::Down | Direction::Left)
    }

    pub fn is_perpendicular(self, other: Direction) -> bool {
        self == other.next() || self == other.previous()
    }

    /// Same axis, either heading.
    pub fn is_parallel(self, other: Direction) -> bool {
        self.is_horizontal() == other.is_horizontal()
    }

    pub fn to_vector(self) -> Vector {
        match self {
            Direction::Up => vector(0.0, 1.0),
            Direction::Right => vector(1.0, 0.0),
            Direction::Down => vector(0.0, -1.0),
            Direction::Left => vector(-1.0, 0.0),
        }
    }

    /// Classifies a vector by normalizing it and matching one of the four unit axes exactly.
    ///
    /// Zero-length and diagonal vectors have no direction.
    pub fn from_vector(v: Vector) -> Option<Direction> {
        let len = v.length();
        if len == 0.0 || !len.is_finite() {
            return None;
        }
        let unit = v / len;
        Direction::ALL.into_iter().find(|d| d.to_vector() == unit)
    }

    /// Projects `v` onto the axis this direction lies on (x for horizontal, y for vertical).
    pub fn axis_value(self, v: Vector) -> f64 {
        if self.is_horizontal() { v.x } else { v.y }
    }

    /// Signed length of `v` measured along this heading.
    pub fn along(self, v: Vector) -> f64 {
        let value = self.axis_value(v);
        if self.is_negative() { -value } else { value }
    }

    /// Returns whichever of the two inputs is horizontal, preferring `a`.
    pub fn horizontal_of(a: Option<Direction>, b: Option<Direction>) -> Option<Direction> {
        a.filter(|d| d.is_horizontal())
            .or_else(|| b.filter(|d| d.is_horizontal()))
    }

    /// Returns whichever of the two inputs is vertical, preferring `a`.
    pub fn vertical_of(a: Option<Direction>, b: Option<Direction>) -> Option<Direction> {
        a.filter(|d| d.is_vertical())
            .or_else(|| b.filter(|d| d.is_vertical()))
    }
}
