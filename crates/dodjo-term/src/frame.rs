// SPDX-License-Identifier: MIT
//
// Frame store — all render state in one explicitly owned value.
//
//   current  the canvas the game draws into; may lead `shown` by any number
//            of edits that have not reached the terminal yet
//   shown    exactly what the terminal displays as of the last completed
//            update; only the diff engine writes it
//   dirty    one flag per row, set by `mark_dirty_rows`, cleared by
//            `emit_updates`
//
// A fresh store holds the decorative frame in `current` and a blank `shown`,
// so the very first update flushes the whole screen.
//
// Placement: game code never addresses canvas cells directly. It calls
// `place(x, y, glyph)` with actor-centred logical coordinates and this module
// translates them. Moving the logical origin means touching one function.

use crate::canvas::{Canvas, HEIGHT, WIDTH};
use crate::glyph::Glyph;

/// A single "draw this glyph here" request in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Logical column, 0 at the anchor, growing to the right.
    pub x: i32,
    /// Logical row, 0 at the anchor, growing upward.
    pub y: i32,
    /// What to draw.
    pub glyph: Glyph,
}

impl Placement {
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, glyph: Glyph) -> Self {
        Self { x, y, glyph }
    }
}

/// The double-buffered render context.
///
/// # Examples
///
/// ```
/// use dodjo_term::frame::FrameStore;
/// use dodjo_term::glyph::Glyph;
///
/// let mut store = FrameStore::new();
/// store.place(0, 0, Glyph::new('@'));
/// let (col, row) = store.anchor();
/// assert_eq!(store.current().get(col, row), Some(Glyph::new('@')));
/// ```
pub struct FrameStore {
    pub(crate) current: Canvas,
    pub(crate) shown: Canvas,
    pub(crate) dirty: Vec<bool>,
}

impl FrameStore {
    /// Create a store at the reference size (130×40).
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(WIDTH, HEIGHT)
    }

    /// Create a store of any size (mostly for tests).
    #[must_use]
    pub fn with_size(width: u16, height: u16) -> Self {
        Self {
            current: Canvas::decorated(width, height),
            shown: Canvas::new(width, height),
            dirty: vec![false; usize::from(height)],
        }
    }

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.current.width()
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.current.height()
    }

    /// The drawing surface.
    #[inline]
    #[must_use]
    pub const fn current(&self) -> &Canvas {
        &self.current
    }

    /// The drawing surface, mutably.
    #[inline]
    pub const fn current_mut(&mut self) -> &mut Canvas {
        &mut self.current
    }

    /// What the terminal currently displays.
    #[inline]
    #[must_use]
    pub const fn shown(&self) -> &Canvas {
        &self.shown
    }

    /// Whether `row` was marked dirty by the last `mark_dirty_rows` and has
    /// not been emitted since.
    #[inline]
    #[must_use]
    pub fn is_dirty(&self, row: u16) -> bool {
        self.dirty.get(usize::from(row)).copied().unwrap_or(false)
    }

    /// Indices of all rows currently flagged dirty.
    #[must_use]
    pub fn dirty_rows(&self) -> Vec<u16> {
        (0..self.height()).filter(|&row| self.is_dirty(row)).collect()
    }

    // ── Placement ───────────────────────────────────────────────────

    /// The absolute cell that logical `(0, 0)` maps to: `(WIDTH/2, HEIGHT/2 + 1)`.
    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> (u16, u16) {
        (self.width() / 2, self.height() / 2 + 1)
    }

    /// Translate logical `(x, y)` to absolute `(col, row)`.
    ///
    /// Returns `None` when the result falls outside the canvas.
    #[must_use]
    pub fn to_absolute(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        let (anchor_col, anchor_row) = self.anchor();
        let col = i32::from(anchor_col).checked_add(x)?;
        let row = i32::from(anchor_row).checked_add(y)?;
        let col = u16::try_from(col).ok()?;
        let row = u16::try_from(row).ok()?;
        self.current.in_bounds(col, row).then_some((col, row))
    }

    /// Write `glyph` into the current canvas at logical `(x, y)`.
    ///
    /// Writes that would land outside the canvas are dropped.
    pub fn place(&mut self, x: i32, y: i32, glyph: Glyph) {
        match self.to_absolute(x, y) {
            Some((col, row)) => {
                self.current.set(col, row, glyph);
            }
            None => tracing::debug!(x, y, glyph = %glyph, "placement outside canvas dropped"),
        }
    }

    /// [`place`](Self::place) for a [`Placement`] value.
    #[inline]
    pub fn place_at(&mut self, placement: Placement) {
        self.place(placement.x, placement.y, placement.glyph);
    }

    /// The decorative-frame glyph under logical `(x, y)`, if on the canvas.
    #[must_use]
    pub fn background_at(&self, x: i32, y: i32) -> Option<Glyph> {
        let (col, row) = self.to_absolute(x, y)?;
        Some(crate::canvas::decorative_glyph(
            col,
            row,
            self.width(),
            self.height(),
        ))
    }
}

impl Default for FrameStore {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
