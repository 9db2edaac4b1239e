//! Player — the controlled actor.
//!
//! The player lives at a logical position inside its current chunk. A step
//! either stays in the chunk (the cheap redraw path), crosses into the
//! neighbouring chunk (full recomposition), or is refused.
//!
//! # Bounds
//!
//! `x ∈ [-60, 60]` and `y ∈ [-16, 16]` keep the actor inside the canvas
//! interior, clear of the frame border, the separator and the hotbar strip.
//! Stepping past a bound enters the neighbour chunk on the opposite edge.

use std::ops::RangeInclusive;

use dodjo_term::compose::ActorView;
use dodjo_term::glyph::Glyph;
use dodjo_term::input::Direction;

use crate::chunk::ChunkCoord;
use crate::hotbar::Hotbar;
use crate::world::World;

/// Horizontal extent of a chunk.
pub const X_RANGE: RangeInclusive<i32> = -60..=60;

/// Vertical extent of a chunk.
pub const Y_RANGE: RangeInclusive<i32> = -16..=16;

/// What a step did, and therefore what needs redrawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved one cell inside the current chunk.
    MovedWithinContext,
    /// Entered a neighbouring chunk.
    MovedAcrossContext,
    /// Blocked by a solid object or the world edge; nothing changed.
    Rejected,
}

#[derive(Debug, Clone)]
pub struct Player {
    x: i32,
    y: i32,
    previous: (i32, i32),
    chunk: ChunkCoord,
    glyph: Glyph,
    hotbar: Hotbar,
}

impl Player {
    /// A player at the origin of `chunk` with an empty hotbar.
    #[must_use]
    pub fn new(chunk: ChunkCoord) -> Self {
        Self {
            x: 0,
            y: 0,
            previous: (0, 0),
            chunk,
            glyph: Glyph::new('@'),
            hotbar: Hotbar::new(),
        }
    }

    /// The chunk the player is in.
    #[must_use]
    pub const fn chunk(&self) -> ChunkCoord {
        self.chunk
    }

    #[must_use]
    pub const fn hotbar(&self) -> &Hotbar {
        &self.hotbar
    }

    pub const fn hotbar_mut(&mut self) -> &mut Hotbar {
        &mut self.hotbar
    }

    /// Try to move one cell in `dir`.
    pub fn step(&mut self, dir: Direction, world: &mut World) -> MoveOutcome {
        let (dx, dy) = dir.delta();
        let (nx, ny) = (self.x + dx, self.y + dy);

        if X_RANGE.contains(&nx) && Y_RANGE.contains(&ny) {
            if world.chunk(self.chunk).is_blocked(nx, ny) {
                return MoveOutcome::Rejected;
            }
            self.previous = (self.x, self.y);
            (self.x, self.y) = (nx, ny);
            return MoveOutcome::MovedWithinContext;
        }

        let Some(next) = world.neighbour(self.chunk, dir) else {
            tracing::debug!(x = self.chunk.x, y = self.chunk.y, ?dir, "world edge");
            return MoveOutcome::Rejected;
        };

        let (wx, wy) = (wrap(nx, &X_RANGE), wrap(ny, &Y_RANGE));
        if world.chunk(next).is_blocked(wx, wy) {
            return MoveOutcome::Rejected;
        }

        self.chunk = next;
        (self.x, self.y) = (wx, wy);
        self.previous = (wx, wy);
        tracing::info!(x = next.x, y = next.y, "entered chunk");
        MoveOutcome::MovedAcrossContext
    }
}

/// Map a coordinate one past either end of `range` to the opposite end.
fn wrap(value: i32, range: &RangeInclusive<i32>) -> i32 {
    if value > *range.end() {
        *range.start()
    } else if value < *range.start() {
        *range.end()
    } else {
        value
    }
}

impl ActorView for Player {
    fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    fn previous_position(&self) -> (i32, i32) {
        self.previous
    }

    fn glyph(&self) -> Glyph {
        self.glyph
    }
}
