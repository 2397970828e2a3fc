//! Per-tick movement along the graph.
//!
//! A player's motion is planned before it is committed: [`lookahead`] walks forward from the
//! player's position (and past the next corner, into every branch) to find the first other
//! player in the way. Only the distance that keeps the two players apart is then applied.
//!
//! All geometry is compared exactly. Positions that reach a corner are set to the corner's
//! coordinates rather than accumulated, so later exact comparisons against it hold.

use gridline_graph::{CornerId, Direction, Graph, LineId, Point, PlayerId};

use crate::config::{MovementOptions, Rules};
use crate::player::Player;

/// Planned travel for one straight stretch of movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookahead {
    /// Distance the player may actually move.
    pub consumed: f64,
    /// Another player (or the branch limit) stops the player short of its request.
    pub blocked: bool,
    /// Line on which the blocking player was found.
    pub blocking_line: Option<LineId>,
}

impl Lookahead {
    fn free(consumed: f64) -> Self {
        Self {
            consumed,
            blocked: false,
            blocking_line: None,
        }
    }
}

/// Result of [`move_along_graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveOutcome {
    pub consumed: f64,
    pub blocked: bool,
    /// Heading of the last stretch travelled.
    pub direction: Option<Direction>,
}

/// Mutable view over everything one player's step may touch.
pub struct Board<'a> {
    pub(crate) graph: &'a mut Graph,
    pub(crate) players: &'a mut [Player],
    pub(crate) rules: &'a Rules,
}

impl<'a> Board<'a> {
    pub fn new(graph: &'a mut Graph, players: &'a mut [Player], rules: &'a Rules) -> Self {
        Self {
            graph,
            players,
            rules,
        }
    }

    pub fn graph(&self) -> &Graph {
        &*self.graph
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn rules(&self) -> &Rules {
        self.rules
    }

    pub(crate) fn corner_of(&self, id: PlayerId) -> Option<CornerId> {
        self.player(id).corner(self.graph())
    }

    /// Moves the player's occupancy over to `line`.
    pub(crate) fn set_current_line(&mut self, id: PlayerId, line: LineId) {
        let old = self.players[id.0].current_line;
        if old == line {
            return;
        }
        self.graph.unlink_player(old, id);
        self.graph.link_player(line, id);
        self.players[id.0].current_line = line;
        tracing::debug!(player = id.0, from = old.0, to = line.0, "changed current line");
    }

    pub(crate) fn set_position(&mut self, id: PlayerId, position: Point) {
        self.players[id.0].position = position;
    }

    /// If the player stands on a corner, switch to the line the inputs ask for.
    ///
    /// Holding a key perpendicular to the current line while reaching a corner means "turn here",
    /// so when both inputs are given and the primary one follows the current line, the secondary
    /// one is tried first.
    pub(crate) fn turn_at_corner(
        &mut self,
        id: PlayerId,
        primary: Option<Direction>,
        secondary: Option<Direction>,
    ) {
        let Some(corner) = self.corner_of(id) else {
            return;
        };
        let (mut first, mut second) = (primary, secondary);
        if let (Some(p), Some(_)) = (primary, secondary) {
            let line = self.graph.line(self.player(id).current_line);
            if (line.is_horizontal() && p.is_horizontal()) || (line.is_vertical() && p.is_vertical())
            {
                std::mem::swap(&mut first, &mut second);
            }
        }
        let c = self.graph.corner(corner);
        let target = c
            .attached_line_toward(first)
            .or_else(|| c.attached_line_toward(second));
        if let Some(line) = target {
            self.set_current_line(id, line);
        }
    }

    /// Looks along the current line, both ways and within the snap radius, for a corner that has
    /// a line leaving towards `wanted`. Returns the heading along the current line towards the
    /// nearest one.
    pub(crate) fn scan_for_line_toward(
        &self,
        id: PlayerId,
        wanted: Direction,
    ) -> Option<Direction> {
        let forward = self.closest_junction(id, wanted, wanted.next());
        let backward = self.closest_junction(id, wanted, wanted.previous());
        match (forward, backward) {
            (Some(f), Some(b)) if f < b => Some(wanted.next()),
            (Some(_), Some(_)) => Some(wanted.previous()),
            (Some(_), None) => Some(wanted.next()),
            (None, Some(_)) => Some(wanted.previous()),
            (None, None) => None,
        }
    }

    fn closest_junction(&self, id: PlayerId, wanted: Direction, along: Direction) -> Option<f64> {
        let player = self.player(id);
        let radius = self.rules.movement.snap_radius;
        let mut corner = self.graph.line(player.current_line).corner_toward(along);
        for _ in 0..self.rules.movement.max_steps {
            let c = self.graph.corner(corner?);
            let distance = (c.position() - player.position).length();
            if distance >= radius {
                return None;
            }
            if c.attached_line_at(wanted).is_some() {
                return Some(distance);
            }
            corner = c
                .attached_line_at(along)
                .and_then(|l| self.graph.line(l).corner_toward(along));
        }
        None
    }

    /// Plans and commits up to `limit` of travel along the current line towards `direction`,
    /// stopping at the line's far corner.
    pub(crate) fn step(&mut self, id: PlayerId, direction: Direction, limit: f64) -> Lookahead {
        let player = self.player(id);
        let (line, origin) = (player.current_line, player.position);
        let planned = lookahead(
            &*self.graph,
            &*self.players,
            id,
            line,
            origin,
            direction,
            limit,
            &self.rules.movement,
        );
        let l = self.graph.line(line);
        let to_corner = l.distance_to_corner(origin, direction);
        let target = match l.endpoint_toward(direction) {
            Some(endpoint) if planned.consumed == to_corner => endpoint,
            _ => origin + direction.to_vector() * planned.consumed,
        };
        self.set_position(id, target);
        tracing::trace!(
            player = id.0,
            ?direction,
            consumed = planned.consumed,
            blocked = planned.blocked,
            "step"
        );
        planned
    }
}

#[derive(Debug, Clone, Copy)]
struct BranchItem {
    line: LineId,
    from: Point,
    direction: Direction,
    /// Distance already covered past the first corner when this line starts.
    base: f64,
}

/// Plans how far player `mover` can travel from `origin` along `line` towards `direction`.
///
/// The requested travel is clamped to the far corner of `line`. The search reaches a further
/// `player_size_buffer`, and whatever part of that reach crosses the corner is pushed into every
/// other line at that corner, and on past their own corners. A player found at offset `t` from
/// `origin` (ends inclusive) limits travel to `t - player_size_buffer`, floored at zero.
///
/// Branches are visited depth-first in corner scan order. Every branch is searched only as far as
/// the usable distance past the corner still reaches, and a collision found on it shrinks that
/// distance. Branches visited later therefore see the limit set by earlier ones.
#[allow(clippy::too_many_arguments)]
pub fn lookahead(
    graph: &Graph,
    players: &[Player],
    mover: PlayerId,
    line: LineId,
    origin: Point,
    direction: Direction,
    budget: f64,
    options: &MovementOptions,
) -> Lookahead {
    let l = graph.line(line);
    let to_corner = l.distance_to_corner(origin, direction);
    let desired = budget.min(to_corner).max(0.0);
    let buffer = options.player_size_buffer;
    let reach = desired + buffer;

    if let Some(offset) = first_occupant(graph, players, mover, line, origin, direction, reach) {
        return Lookahead {
            consumed: (offset - buffer).max(0.0),
            blocked: true,
            blocking_line: Some(line),
        };
    }
    if reach <= to_corner {
        return Lookahead::free(desired);
    }
    let Some(corner) = l.corner_toward(direction) else {
        return Lookahead::free(desired);
    };

    let mut usable = reach - to_corner;
    let mut blocking_line = None;
    let mut stack = Vec::new();
    push_branches(graph, corner, line, 0.0, &mut stack);

    let mut visited = 0;
    while let Some(item) = stack.pop() {
        visited += 1;
        if visited > options.max_branch_items {
            tracing::warn!(player = mover.0, "lookahead branch limit reached, treating as blocked");
            return Lookahead {
                consumed: (to_corner - buffer).max(0.0).min(desired),
                blocked: true,
                blocking_line: None,
            };
        }

        let span = usable - item.base;
        if let Some(offset) =
            first_occupant(graph, players, mover, item.line, item.from, item.direction, span)
        {
            if item.base + offset < usable || blocking_line.is_none() {
                usable = item.base + offset;
                blocking_line = Some(item.line);
            }
            continue;
        }

        let branch = graph.line(item.line);
        let length = branch.distance_to_corner(item.from, item.direction);
        if span > length {
            if let Some(next) = branch.corner_toward(item.direction) {
                push_branches(graph, next, item.line, item.base + length, &mut stack);
            }
        }
    }

    match blocking_line {
        Some(_) => Lookahead {
            consumed: (to_corner + usable - buffer).max(0.0).min(desired),
            blocked: true,
            blocking_line,
        },
        None => Lookahead::free(desired),
    }
}

/// Queues every line at `corner` except `came_from`, so that they pop in scan order.
fn push_branches(
    graph: &Graph,
    corner: CornerId,
    came_from: LineId,
    base: f64,
    stack: &mut Vec<BranchItem>,
) {
    let c = graph.corner(corner);
    let from = c.position();
    let branches: Vec<_> = c.attached_lines().filter(|&(_, l)| l != came_from).collect();
    for (direction, line) in branches.into_iter().rev() {
        stack.push(BranchItem {
            line,
            from,
            direction,
            base,
        });
    }
}

/// Offset of the nearest other player linked to `line` within `[0, span]` of `from`.
fn first_occupant(
    graph: &Graph,
    players: &[Player],
    mover: PlayerId,
    line: LineId,
    from: Point,
    direction: Direction,
    span: f64,
) -> Option<f64> {
    graph
        .line(line)
        .linked_players()
        .iter()
        .filter(|&&p| p != mover)
        .filter_map(|p| players.get(p.0))
        .map(|p| direction.along(p.position - from))
        .filter(|&t| t >= 0.0 && t <= span)
        .min_by(|a, b| a.total_cmp(b))
}

/// Moves a travelling player along the graph for up to `budget`.
///
/// Each iteration picks the line and heading from the inputs, plans the stretch up to the next
/// corner with [`lookahead`], commits it, and carries on past the corner only if one of the
/// inputs names a line there. Hitting `max_steps` iterations counts as blocked.
pub fn move_along_graph(
    board: &mut Board<'_>,
    id: PlayerId,
    primary: Option<Direction>,
    secondary: Option<Direction>,
    budget: f64,
) -> MoveOutcome {
    let mut remaining = budget;
    let mut outcome = MoveOutcome {
        consumed: 0.0,
        blocked: false,
        direction: None,
    };

    for _ in 0..board.rules.movement.max_steps {
        if remaining <= 0.0 {
            return outcome;
        }

        board.turn_at_corner(id, primary, secondary);

        let line = board.graph.line(board.player(id).current_line);
        let parallel = if line.is_horizontal() {
            Direction::horizontal_of(primary, secondary)
        } else if line.is_vertical() {
            Direction::vertical_of(primary, secondary)
        } else {
            None
        };
        let Some(mut direction) = parallel.or(primary) else {
            outcome.blocked = true;
            return outcome;
        };

        if line.is_direction_perpendicular(direction) {
            if let Some(toward) = board.scan_for_line_toward(id, direction) {
                direction = toward;
                board.turn_at_corner(id, Some(toward), None);
            }
        }
        if !board
            .graph
            .line(board.player(id).current_line)
            .is_direction_parallel(direction)
        {
            tracing::trace!(player = id.0, ?direction, "input does not follow the line");
            outcome.blocked = true;
            return outcome;
        }

        let planned = board.step(id, direction, remaining);
        remaining -= planned.consumed;
        outcome.consumed += planned.consumed;
        outcome.direction = Some(direction);
        if planned.blocked {
            outcome.blocked = true;
            return outcome;
        }

        if remaining > 0.0 {
            let continues = board.corner_of(id).is_some_and(|c| {
                let corner = board.graph.corner(c);
                corner.attached_line_toward(primary).is_some()
                    || corner.attached_line_toward(secondary).is_some()
            });
            if !continues {
                tracing::trace!(player = id.0, "corner has no line for the held inputs");
                outcome.blocked = true;
                return outcome;
            }
        }
    }

    if remaining > 0.0 {
        tracing::warn!(
            player = id.0,
            remaining,
            "movement step limit reached, treating as blocked"
        );
        outcome.blocked = true;
    }
    outcome
}
