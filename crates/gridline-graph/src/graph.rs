//! The corner/line arena.
//!
//! `Graph` owns every [`Corner`] and [`Line`] and is the only place topology changes. Corners are
//! unique per exact position; lines are only ever added (splitting shortens an existing line and
//! registers the remainder as a new one).

use rustc_hash::FxBuildHasher;

use crate::error::{GraphError, Result};
use crate::geom::{Point, point_key};
use crate::{Corner, CornerId, Direction, Line, LineId, PlayerId};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Registration notices for whoever mirrors the graph (typically a renderer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphEvent {
    CornerAdded(CornerId),
    LineAdded(LineId),
}

/// Result of [`Graph::split_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Split {
    /// Junction created at the split point.
    pub corner: CornerId,
    /// The far half, running from the split point to the old end.
    pub new_line: LineId,
}

#[derive(Debug, Clone, Default)]
pub struct Graph {
    corners: Vec<Corner>,
    lines: Vec<Line>,
    corner_index: HashMap<(u64, u64), CornerId>,
    events: Vec<GraphEvent>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn corner(&self, id: CornerId) -> &Corner {
        &self.corners[id.0]
    }

    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    pub fn corner_count(&self) -> usize {
        self.corners.len()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn corners(&self) -> impl Iterator<Item = (CornerId, &Corner)> {
        self.corners.iter().enumerate().map(|(i, c)| (CornerId(i), c))
    }

    pub fn lines(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().enumerate().map(|(i, l)| (LineId(i), l))
    }

    pub fn corner_at(&self, position: Point) -> Option<CornerId> {
        self.corner_index.get(&point_key(position)).copied()
    }

    /// Returns the corner at `position`, creating it when none exists yet.
    pub fn add_corner(&mut self, position: Point) -> CornerId {
        let key = point_key(position);
        if let Some(&id) = self.corner_index.get(&key) {
            return id;
        }
        let id = CornerId(self.corners.len());
        self.corners.push(Corner::new(position));
        self.corner_index.insert(key, id);
        self.events.push(GraphEvent::CornerAdded(id));
        tracing::debug!(corner = id.0, x = position.x, y = position.y, "corner added");
        id
    }

    /// Registers a line without linking it to any corner.
    pub fn add_line(&mut self, start: Point, end: Point, width: f64) -> LineId {
        let id = LineId(self.lines.len());
        self.lines.push(Line::new(start, end, width));
        self.events.push(GraphEvent::LineAdded(id));
        tracing::debug!(line = id.0, ?start, ?end, "line added");
        id
    }

    /// Drains registration notices accumulated since the previous call.
    pub fn take_events(&mut self) -> Vec<GraphEvent> {
        std::mem::take(&mut self.events)
    }

    /// Which side of `corner` the line leaves from, derived from the line's geometry.
    pub fn line_side(&self, corner: CornerId, line: LineId) -> Option<Direction> {
        let position = self.corner(corner).position();
        let l = self.line(line);
        let far = if position == l.start {
            l.end
        } else if position == l.end {
            l.start
        } else {
            return None;
        };
        Direction::from_vector(far - position)
    }

    /// Attaches `line` to `corner` in the slot implied by the line's geometry.
    pub fn attach(&mut self, corner: CornerId, line: LineId) -> Result<Direction> {
        let Some(direction) = self.line_side(corner, line) else {
            let err = if self.touches_endpoint(corner, line) {
                GraphError::NotAxisAligned { corner, line }
            } else {
                GraphError::NotOnEndpoint { corner, line }
            };
            tracing::warn!(%err, "attach rejected");
            return Err(err);
        };
        self.attach_at(corner, line, direction)?;
        Ok(direction)
    }

    /// Attaches `line` to `corner` in the given slot.
    ///
    /// The slot must be free and must agree with the line's geometry; nothing changes on
    /// failure.
    pub fn attach_at(
        &mut self,
        corner: CornerId,
        line: LineId,
        direction: Direction,
    ) -> Result<()> {
        if !self.touches_endpoint(corner, line) {
            let err = GraphError::NotOnEndpoint { corner, line };
            tracing::warn!(%err, "attach rejected");
            return Err(err);
        }
        match self.line_side(corner, line) {
            Some(actual) if actual == direction => {}
            Some(actual) => {
                let err = GraphError::SlotMismatch {
                    corner,
                    line,
                    requested: direction,
                    actual,
                };
                tracing::warn!(%err, "attach rejected");
                return Err(err);
            }
            None => {
                let err = GraphError::NotAxisAligned { corner, line };
                tracing::warn!(%err, "attach rejected");
                return Err(err);
            }
        }
        if self.corner(corner).attached_line_at(direction).is_some() {
            let err = GraphError::OccupiedSlot { corner, direction };
            tracing::warn!(%err, "attach rejected");
            return Err(err);
        }

        let position = self.corner(corner).position();
        self.corners[corner.0].set_slot(direction, line);
        let l = &mut self.lines[line.0];
        if position == l.start {
            l.start_corner = Some(corner);
        } else {
            l.end_corner = Some(corner);
        }
        Ok(())
    }

    /// Unlinks `line` from `corner`. Returns `false` when the line was not attached there.
    pub fn detach(&mut self, corner: CornerId, line: LineId) -> bool {
        let Some(direction) = self.corner(corner).slot_of(line) else {
            return false;
        };
        self.corners[corner.0].clear_slot(direction);
        let l = &mut self.lines[line.0];
        if l.start_corner == Some(corner) {
            l.start_corner = None;
        } else if l.end_corner == Some(corner) {
            l.end_corner = None;
        }
        true
    }

    /// Cuts `line` at `point`, inserting a corner there.
    ///
    /// `line` keeps its start and now ends at `point`; the returned `new_line` runs from `point`
    /// to the old end and inherits the old end corner.
    pub fn split_line(&mut self, line: LineId, point: Point) -> Result<Split> {
        let l = self.line(line);
        if !l.point_strictly_inside(point) {
            let err = GraphError::NotInterior {
                line,
                x: point.x,
                y: point.y,
            };
            tracing::warn!(%err, "split rejected");
            return Err(err);
        }
        let (old_end, old_end_corner, width) = (l.end, l.end_corner, l.width);

        if let Some(existing) = self.corner_at(point) {
            let toward_start = Direction::from_vector(l.start - point);
            let toward_end = Direction::from_vector(old_end - point);
            for direction in [toward_start, toward_end].into_iter().flatten() {
                if self.corner(existing).attached_line_at(direction).is_some() {
                    let err = GraphError::OccupiedSlot {
                        corner: existing,
                        direction,
                    };
                    tracing::warn!(%err, "split rejected");
                    return Err(err);
                }
            }
        }

        let corner = self.add_corner(point);
        let new_line = self.add_line(point, old_end, width);
        if let Some(end_corner) = old_end_corner {
            self.detach(end_corner, line);
            self.attach(end_corner, new_line)?;
        }
        self.lines[line.0].end = point;
        self.attach(corner, line)?;
        self.attach(corner, new_line)?;

        tracing::debug!(line = line.0, new_line = new_line.0, corner = corner.0, "line split");
        Ok(Split { corner, new_line })
    }

    /// Moves the free end of a line that has no end corner yet (a line being drawn).
    pub fn set_line_end(&mut self, line: LineId, end: Point) -> bool {
        let l = &mut self.lines[line.0];
        if l.end_corner.is_some() {
            tracing::warn!(line = line.0, "refusing to move an end that is pinned to a corner");
            return false;
        }
        l.end = end;
        true
    }

    /// Records `player` as occupying `line`. Linking twice is a no-op.
    pub fn link_player(&mut self, line: LineId, player: PlayerId) {
        let players = &mut self.lines[line.0].players;
        if !players.contains(&player) {
            players.push(player);
        }
    }

    pub fn unlink_player(&mut self, line: LineId, player: PlayerId) -> bool {
        let players = &mut self.lines[line.0].players;
        match players.iter().position(|&p| p == player) {
            Some(ix) => {
                players.remove(ix);
                true
            }
            None => false,
        }
    }

    fn touches_endpoint(&self, corner: CornerId, line: LineId) -> bool {
        let position = self.corner(corner).position();
        let l = self.line(line);
        position == l.start || position == l.end
    }
}
