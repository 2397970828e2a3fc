//! The Travelling / PreDrawing / Drawing state machine.
//!
//! Each state has one handler and every handler returns a [`StepOutcome`]. Travelling players
//! are handed to the movement resolver. PreDrawing players still follow the graph but stop at
//! the first point a new line may start from. Drawing players extend the line they are drawing
//! and may only turn on grid marks.
//!
//! There is no transition out of Drawing: closing a drawn line back into the graph is not
//! handled here.

use gridline_graph::{CornerId, Direction, LineId, Point, PlayerId, Rect};

use crate::input::TickInput;
use crate::movement::{Board, move_along_graph};
use crate::player::PlayerState;

/// What one handler did with one player for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    /// Heading of the last stretch travelled.
    pub direction: Option<Direction>,
    pub consumed: f64,
    pub blocked: bool,
    /// State the player ends the tick in.
    pub next: PlayerState,
}

impl StepOutcome {
    fn idle(next: PlayerState) -> Self {
        Self {
            direction: None,
            consumed: 0.0,
            blocked: false,
            next,
        }
    }

    fn blocked(mut self) -> Self {
        self.blocked = true;
        self
    }

    fn then(self, later: StepOutcome) -> Self {
        Self {
            direction: later.direction.or(self.direction),
            consumed: self.consumed + later.consumed,
            blocked: later.blocked,
            next: later.next,
        }
    }
}

/// Applies the draw button to the current state.
pub fn apply_draw_button(state: PlayerState, draw: bool) -> PlayerState {
    match (state, draw) {
        (PlayerState::Travelling, true) => PlayerState::PreDrawing,
        (PlayerState::PreDrawing, false) => PlayerState::Travelling,
        (state, _) => state,
    }
}

/// Runs one tick for one player: button transition, then the handler for the resulting state.
pub fn step_player(
    board: &mut Board<'_>,
    id: PlayerId,
    input: TickInput,
    budget: f64,
) -> StepOutcome {
    let previous = board.player(id).state();
    let state = apply_draw_button(previous, input.draw);
    if state != previous {
        tracing::debug!(player = id.0, ?previous, ?state, "draw button changed state");
    }

    let outcome = match state {
        PlayerState::Travelling => travelling(board, id, input, budget),
        PlayerState::PreDrawing => pre_drawing(board, id, input, budget),
        PlayerState::Drawing { heading } => drawing(board, id, heading, input, budget),
    };
    board.players[id.0].state = outcome.next;
    outcome
}

fn travelling(board: &mut Board<'_>, id: PlayerId, input: TickInput, budget: f64) -> StepOutcome {
    let moved = move_along_graph(board, id, input.primary, input.secondary, budget);
    StepOutcome {
        direction: moved.direction,
        consumed: moved.consumed,
        blocked: moved.blocked,
        next: PlayerState::Travelling,
    }
}

fn pre_drawing(board: &mut Board<'_>, id: PlayerId, input: TickInput, budget: f64) -> StepOutcome {
    let mut out = StepOutcome::idle(PlayerState::PreDrawing);
    let Some(primary) = input.primary else {
        return out;
    };
    let grid = board.rules().grid_size;
    let mut remaining = budget;

    for _ in 0..board.rules().movement.max_steps {
        if remaining <= 0.0 {
            return out;
        }

        if let Some(corner) = board.corner_of(id) {
            match board.graph().corner(corner).attached_line_at(primary) {
                Some(line) => board.set_current_line(id, line),
                None => {
                    if enter_drawing(board, id, primary, remaining) {
                        let drawn = drawing(board, id, primary, input, remaining);
                        return out.then(drawn);
                    }
                    return out.blocked();
                }
            }
        }

        let player = board.player(id);
        let position = player.position();
        let line = board.graph().line(player.current_line());
        if line.is_direction_parallel(primary) {
            let planned = board.step(id, primary, remaining);
            remaining -= planned.consumed;
            out.consumed += planned.consumed;
            out.direction = Some(primary);
            if planned.blocked {
                return out.blocked();
            }
            continue;
        }

        // Perpendicular input in the middle of a line: head for the next grid mark.
        let along = if line.is_horizontal() {
            Direction::horizontal_of(input.secondary, None).unwrap_or(Direction::Right)
        } else {
            Direction::vertical_of(input.secondary, None).unwrap_or(Direction::Up)
        };
        let to_grid = distance_to_next_grid(position, along, grid);
        if to_grid == 0.0 {
            if enter_drawing(board, id, primary, remaining) {
                let drawn = drawing(board, id, primary, input, remaining);
                return out.then(drawn);
            }
            return out.blocked();
        }

        // The turn itself waits for the next tick.
        let planned = board.step(id, along, to_grid.min(remaining));
        out.consumed += planned.consumed;
        out.direction = Some(along);
        out.blocked = planned.blocked;
        return out;
    }

    tracing::warn!(player = id.0, "pre-drawing step limit reached, treating as blocked");
    out.blocked()
}

fn drawing(
    board: &mut Board<'_>,
    id: PlayerId,
    heading: Direction,
    input: TickInput,
    budget: f64,
) -> StepOutcome {
    let mut heading = heading;
    let mut out = StepOutcome::idle(PlayerState::Drawing { heading });
    let Some(primary) = input.primary else {
        return out;
    };
    let rules = *board.rules();
    let mut remaining = budget;

    for _ in 0..rules.movement.max_steps {
        if remaining <= 0.0 {
            return out;
        }
        let position = board.player(id).position();
        let to_edge = distance_to_area_edge(rules.area, position, heading);

        if primary == heading {
            let travel = remaining.min(to_edge);
            if travel <= 0.0 {
                return out.blocked();
            }
            if !extend_drawing_line(board, id, heading, travel) {
                return out.blocked();
            }
            remaining -= travel;
            out.consumed += travel;
            out.direction = Some(heading);
            continue;
        }

        if primary == heading.opposite() {
            tracing::trace!(player = id.0, ?heading, "cannot reverse while drawing");
            return out.blocked();
        }

        let to_grid = distance_to_next_grid(position, heading, rules.grid_size);
        if to_grid == 0.0 {
            if !turn_drawing_line(board, id, primary) {
                return out.blocked();
            }
            heading = primary;
            out.next = PlayerState::Drawing { heading };
            continue;
        }

        // Off the grid: run on to the next mark and turn next tick.
        let travel = to_grid.min(remaining).min(to_edge);
        if travel <= 0.0 {
            return out.blocked();
        }
        if !extend_drawing_line(board, id, heading, travel) {
            return out.blocked();
        }
        out.consumed += travel;
        out.direction = Some(heading);
        return out;
    }

    tracing::warn!(player = id.0, "drawing step limit reached, treating as blocked");
    out.blocked()
}

/// Moves the player into the Drawing state heading towards `direction`.
///
/// # Panics
///
/// Panics when `remaining` is not positive: entering Drawing with no travel left would commit a
/// zero-length line, and callers must never get here in that situation.
pub fn enter_drawing(
    board: &mut Board<'_>,
    id: PlayerId,
    direction: Direction,
    remaining: f64,
) -> bool {
    assert!(
        remaining > 0.0,
        "player {} entered the drawing state with no travel left this tick",
        id.0
    );
    if !pre_enter_drawing_check(board, id, direction) {
        return false;
    }
    tracing::debug!(player = id.0, ?direction, "started drawing");
    true
}

/// Prepares the graph for drawing from the player's position towards `direction`.
///
/// Splits the current line first when the player is not on a corner, then starts a new
/// drawing line unless the corner already has a line that way.
pub fn pre_enter_drawing_check(board: &mut Board<'_>, id: PlayerId, direction: Direction) -> bool {
    let position = board.player(id).position();
    if distance_to_area_edge(board.rules().area, position, direction) <= 0.0 {
        tracing::debug!(player = id.0, ?direction, "drawing would leave the play area");
        return false;
    }

    let corner = match board.corner_of(id) {
        Some(corner) => corner,
        None => match split_at_player(board, id) {
            Some(corner) => corner,
            None => return false,
        },
    };
    if board.graph().corner(corner).attached_line_at(direction).is_some() {
        return false;
    }
    new_drawing_line(board, id, direction, false).is_some()
}

/// Starts a new line at the player's position leaving towards `direction`.
///
/// With `add_corner`, the player's current line (the one being drawn) is first pinned to a
/// corner at the player's position. Nothing changes when that corner already has a line on
/// either side the turn needs. The new line starts zero-length; its nominal end is placed
/// one grid unit ahead so it already reads as horizontal or vertical.
pub fn new_drawing_line(
    board: &mut Board<'_>,
    id: PlayerId,
    direction: Direction,
    add_corner: bool,
) -> Option<LineId> {
    let player = board.player(id);
    let (position, current) = (player.position(), player.current_line());
    let rules = *board.rules();

    let corner = if add_corner {
        let start = board.graph().line(current).start();
        let Some(back) = Direction::from_vector(start - position) else {
            tracing::warn!(line = current.0, "drawing line has no length to pin");
            return None;
        };
        if let Some(existing) = board.graph().corner_at(position) {
            let c = board.graph().corner(existing);
            if c.attached_line_at(back).is_some() || c.attached_line_at(direction).is_some() {
                tracing::debug!(corner = existing.0, ?direction, "turn blocked by existing lines");
                return None;
            }
        }
        if !board.graph.set_line_end(current, position) {
            return None;
        }
        let corner = board.graph.add_corner(position);
        board.graph.attach_at(corner, current, back).ok()?;
        corner
    } else {
        board.corner_of(id)?
    };
    if board.graph().corner(corner).attached_line_at(direction).is_some() {
        tracing::warn!(corner = corner.0, ?direction, "corner already has a line that way");
        return None;
    }

    let line = board.graph.add_line(position, position, rules.line_width);
    board
        .graph
        .set_line_end(line, position + direction.to_vector() * rules.grid_size);
    board.graph.attach_at(corner, line, direction).ok()?;
    board.set_current_line(id, line);
    Some(line)
}

/// Turns the line being drawn at the player's position.
fn turn_drawing_line(board: &mut Board<'_>, id: PlayerId, direction: Direction) -> bool {
    let player = board.player(id);
    let position = player.position();
    if board.graph().line(player.current_line()).start() == position {
        tracing::trace!(player = id.0, "nothing drawn yet, cannot turn");
        return false;
    }
    if distance_to_area_edge(board.rules().area, position, direction) <= 0.0 {
        return false;
    }
    new_drawing_line(board, id, direction, true).is_some()
}

/// Moves the player and the free end of its line together. Fails when the end is pinned.
fn extend_drawing_line(
    board: &mut Board<'_>,
    id: PlayerId,
    heading: Direction,
    travel: f64,
) -> bool {
    let player = board.player(id);
    let (line, target) = (
        player.current_line(),
        player.position() + heading.to_vector() * travel,
    );
    if !board.graph.set_line_end(line, target) {
        return false;
    }
    board.set_position(id, target);
    true
}

/// Splits the player's line at the player's position. Players left on the far half move to
/// the new line.
fn split_at_player(board: &mut Board<'_>, id: PlayerId) -> Option<CornerId> {
    let player = board.player(id);
    let (line, position) = (player.current_line(), player.position());
    let split = board.graph.split_line(line, position).ok()?;

    let shortened = board.graph().line(line);
    let moved: Vec<PlayerId> = shortened
        .linked_players()
        .iter()
        .copied()
        .filter(|p| !shortened.point_on_line(board.player(*p).position()))
        .collect();
    for p in moved {
        board.set_current_line(p, split.new_line);
    }
    Some(split.corner)
}

/// Distance from `position` to the next grid mark met travelling towards `direction`. Zero when
/// `position` is already on a mark along that axis.
pub fn distance_to_next_grid(position: Point, direction: Direction, grid_size: f64) -> f64 {
    let value = direction.axis_value(position.to_vector());
    let cells = value / grid_size;
    let mark = if direction.is_negative() {
        cells.floor()
    } else {
        cells.ceil()
    } * grid_size;
    (mark - value).abs()
}

/// How far `position` may travel towards `direction` before leaving `area`.
pub fn distance_to_area_edge(area: Rect, position: Point, direction: Direction) -> f64 {
    let distance = match direction {
        Direction::Up => area.max_y() - position.y,
        Direction::Right => area.max_x() - position.x,
        Direction::Down => position.y - area.min_y(),
        Direction::Left => position.x - area.min_x(),
    };
    distance.max(0.0)
}
