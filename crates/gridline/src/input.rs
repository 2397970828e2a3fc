//! Ranked directional input.
//!
//! Raw key polling lives outside the engine. Callers feed the pressed state of the four
//! direction keys to a [`HoldTracker`] once per tick and pass the resulting [`TickInput`]
//! snapshot to the world.

use gridline_graph::Direction;

/// What one player asks for during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickInput {
    /// Longest-held direction.
    pub primary: Option<Direction>,
    /// Longest-held direction on the axis perpendicular to `primary`.
    pub secondary: Option<Direction>,
    /// Draw button state.
    pub draw: bool,
}

impl TickInput {
    pub fn new(primary: Option<Direction>, secondary: Option<Direction>, draw: bool) -> Self {
        Self {
            primary,
            secondary,
            draw,
        }
    }

    pub fn toward(direction: Direction) -> Self {
        Self::new(Some(direction), None, false)
    }
}

/// Per-player hold durations, in ticks, indexed by [`Direction::index`].
#[derive(Debug, Clone, Default)]
pub struct HoldTracker {
    held: [u32; 4],
}

impl HoldTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the hold counters and returns the ranked input for this tick.
    ///
    /// `pressed` follows scan order: up, right, down, left.
    pub fn update(&mut self, pressed: [bool; 4], draw: bool) -> TickInput {
        for (held, down) in self.held.iter_mut().zip(pressed) {
            *held = if down { held.saturating_add(1) } else { 0 };
        }
        let primary = self.primary();
        TickInput {
            primary,
            secondary: self.secondary(primary),
            draw,
        }
    }

    pub fn held_ticks(&self, direction: Direction) -> u32 {
        self.held[direction.index()]
    }

    fn primary(&self) -> Option<Direction> {
        let mut best: Option<Direction> = None;
        let mut longest = 0;
        for d in Direction::ALL {
            if self.held_ticks(d) > longest {
                longest = self.held_ticks(d);
                best = Some(d);
            }
        }
        best
    }

    fn secondary(&self, primary: Option<Direction>) -> Option<Direction> {
        let primary = primary?;
        let (a, b) = if primary.is_vertical() {
            (Direction::Right, Direction::Left)
        } else {
            (Direction::Up, Direction::Down)
        };
        let (ha, hb) = (self.held_ticks(a), self.held_ticks(b));
        if ha == 0 && hb == 0 {
            None
        } else if ha >= hb {
            Some(a)
        } else {
            Some(b)
        }
    }
}
