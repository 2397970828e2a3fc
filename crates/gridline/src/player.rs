use gridline_graph::{CornerId, Direction, Graph, LineId, Point, PlayerId};

/// Drawing state of a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    /// Moving along existing lines only.
    #[default]
    Travelling,
    /// Draw button held; looking for a point to start a new line from.
    PreDrawing,
    /// Extending a new line; `heading` is the direction of the line being drawn.
    Drawing { heading: Direction },
}

impl PlayerState {
    pub fn is_drawing(self) -> bool {
        matches!(self, PlayerState::Drawing { .. })
    }
}

/// A player on the graph. Its position always lies on `current_line`.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) position: Point,
    pub(crate) current_line: LineId,
    pub(crate) state: PlayerState,
    pub(crate) speed: f64,
}

impl Player {
    pub(crate) fn new(id: PlayerId, line: LineId, position: Point, speed: f64) -> Self {
        Self {
            id,
            position,
            current_line: line,
            state: PlayerState::Travelling,
            speed,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn current_line(&self) -> LineId {
        self.current_line
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    /// Distance the player may cover per second of simulated time.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The corner the player stands on, if it sits exactly on an end of its line.
    pub fn corner(&self, graph: &Graph) -> Option<CornerId> {
        let line = graph.line(self.current_line);
        [line.start_corner(), line.end_corner()]
            .into_iter()
            .flatten()
            .find(|&c| graph.corner(c).position() == self.position)
    }
}
