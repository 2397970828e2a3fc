use crate::geom::Point;
use crate::{Direction, LineId};

/// A junction at a fixed position with one line slot per [`Direction`].
#[derive(Debug, Clone, PartialEq)]
pub struct Corner {
    position: Point,
    slots: [Option<LineId>; 4],
}

impl Corner {
    pub(crate) fn new(position: Point) -> Self {
        Self {
            position,
            slots: [None; 4],
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn attached_line_at(&self, direction: Direction) -> Option<LineId> {
        self.slots[direction.index()]
    }

    /// Convenience for callers holding an optional input direction.
    pub fn attached_line_toward(&self, direction: Option<Direction>) -> Option<LineId> {
        direction.and_then(|d| self.attached_line_at(d))
    }

    /// Attached lines in scan order (Up, Right, Down, Left).
    pub fn attached_lines(&self) -> impl Iterator<Item = (Direction, LineId)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(|d| self.attached_line_at(d).map(|l| (d, l)))
    }

    pub fn line_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// Slot currently holding `line`, if any.
    pub fn slot_of(&self, line: LineId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.slots[d.index()] == Some(line))
    }

    pub(crate) fn set_slot(&mut self, direction: Direction, line: LineId) {
        self.slots[direction.index()] = Some(line);
    }

    pub(crate) fn clear_slot(&mut self, direction: Direction) {
        self.slots[direction.index()] = None;
    }
}
