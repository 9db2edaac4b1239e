//! Items — anything placed in a chunk or carried in the hotbar.
//!
//! Decoration files describe items as four integers: position, type and
//! glyph code point. Type `0` is walk-through decoration; every other type
//! blocks movement.

use dodjo_term::frame::Placement;
use dodjo_term::glyph::Glyph;

/// Whether an item blocks the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Drawn but walkable (grass, flowers).
    Decoration,
    /// Drawn and impassable (trees, water).
    Solid,
}

impl ItemKind {
    /// Kind for a raw record type code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        if code == 0 { Self::Decoration } else { Self::Solid }
    }

    #[must_use]
    pub const fn is_solid(self) -> bool {
        matches!(self, Self::Solid)
    }
}

/// A glyph at a logical position within its chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub x: i32,
    pub y: i32,
    pub kind: ItemKind,
    pub glyph: Glyph,
}

impl Item {
    #[must_use]
    pub const fn new(x: i32, y: i32, kind: ItemKind, glyph: Glyph) -> Self {
        Self { x, y, kind, glyph }
    }

    /// Build from a raw record. Code points that are not a single-cell
    /// glyph are drawn as the replacement glyph.
    #[must_use]
    pub fn from_record(x: i32, y: i32, kind: i32, code: i32) -> Self {
        let glyph = u32::try_from(code).map_or(Glyph::REPLACEMENT, Glyph::from_u32);
        Self::new(x, y, ItemKind::from_code(kind), glyph)
    }

    /// Whether the item sits at `(x, y)`.
    #[inline]
    #[must_use]
    pub const fn is_at(&self, x: i32, y: i32) -> bool {
        self.x == x && self.y == y
    }

    /// The renderer's view of this item.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement::new(self.x, self.y, self.glyph)
    }
}
