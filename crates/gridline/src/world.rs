use gridline_graph::{Graph, GraphEvent, Line, LineId, Point, PlayerId};

use crate::config::{LevelConfig, Rules};
use crate::drawing::{StepOutcome, step_player};
use crate::error::{Error, Result};
use crate::input::TickInput;
use crate::level::build_graph;
use crate::movement::Board;
use crate::player::Player;

/// A loaded level: the graph, the players on it, and the rules they move by.
#[derive(Debug, Clone)]
pub struct World {
    graph: Graph,
    players: Vec<Player>,
    rules: Rules,
}

impl World {
    /// Builds the level graph and spawns the configured players.
    pub fn from_level(config: &LevelConfig) -> Result<Self> {
        config.validate()?;
        let graph = build_graph(&config.waypoints, config.line_width)?;
        let mut world = Self {
            graph,
            players: Vec::new(),
            rules: Rules::from_config(config),
        };
        for spawn in &config.players {
            world.spawn_player(spawn.line, spawn.fraction, spawn.speed)?;
        }
        tracing::info!(
            corners = world.graph.corner_count(),
            lines = world.graph.line_count(),
            players = world.players.len(),
            "level loaded"
        );
        Ok(world)
    }

    /// Spawns a player `fraction` of the way along line `line` (in level build order).
    pub fn spawn_player(&mut self, line: usize, fraction: f64, speed: f64) -> Result<PlayerId> {
        let l = self.line_by_index(line)?;
        let position = l.start() + (l.end() - l.start()) * fraction.clamp(0.0, 1.0);
        self.spawn_player_at(line, position, speed)
    }

    pub fn spawn_player_at(&mut self, line: usize, position: Point, speed: f64) -> Result<PlayerId> {
        if !self.line_by_index(line)?.point_on_line(position) {
            return Err(Error::SpawnOffLine { line, position });
        }
        let id = PlayerId(self.players.len());
        self.graph.link_player(LineId(line), id);
        self.players.push(Player::new(id, LineId(line), position, speed));
        tracing::debug!(player = id.0, line, ?position, "spawned player");
        Ok(id)
    }

    fn line_by_index(&self, line: usize) -> Result<&Line> {
        let count = self.graph.line_count();
        if line >= count {
            return Err(Error::InvalidSpawnLine { index: line, count });
        }
        Ok(self.graph.line(LineId(line)))
    }

    /// Advances every player by `dt` seconds.
    ///
    /// Players are stepped one after another in id order against the live graph, so a player
    /// sees the moves already made this tick by players before it. `inputs[i]` drives player
    /// `i`; missing entries count as no input.
    pub fn tick(&mut self, inputs: &[TickInput], dt: f64) -> Vec<StepOutcome> {
        let mut outcomes = Vec::with_capacity(self.players.len());
        for index in 0..self.players.len() {
            let id = PlayerId(index);
            let input = inputs.get(index).copied().unwrap_or_default();
            let budget = self.players[index].speed() * dt;
            let mut board = Board::new(&mut self.graph, &mut self.players, &self.rules);
            outcomes.push(step_player(&mut board, id, input, budget));
        }
        outcomes
    }

    /// A mutable view for driving single players directly.
    pub fn board(&mut self) -> Board<'_> {
        Board::new(&mut self.graph, &mut self.players, &self.rules)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.0]
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Corners and lines created since the last call, for a renderer to pick up.
    pub fn take_graph_events(&mut self) -> Vec<GraphEvent> {
        self.graph.take_events()
    }
}
