// SPDX-License-Identifier: MIT
//
// Canvas — the 2D glyph grid that everything paints to.
//
// Flat `Vec<Glyph>` with row-major indexing: `index = row * width + col`.
// A row's cells are contiguous, so the diff engine compares whole rows as
// slices and the emitter copies spans with a single `copy_from_slice`.
//
// Rows are numbered from the bottom of the screen: row 0 is the last
// terminal line. The emitter does the flip; everything above it thinks in
// canvas rows.
//
// Memory: 130×40 = 5,200 cells × 4 bytes ≈ 20 KB per canvas.

use crate::glyph::Glyph;

/// Reference canvas width in columns.
pub const WIDTH: u16 = 130;

/// Reference canvas height in rows.
pub const HEIGHT: u16 = 40;

/// Canvas row holding the separator between the hotbar strip and the play area.
pub const SEPARATOR_ROW: u16 = 3;

/// Canvas row carrying the decorative marker (and the hotbar items).
pub const MARKER_ROW: u16 = 2;

/// Markers are drawn on even columns strictly closer than this to the centre.
const MARKER_RADIUS: u16 = 10;

// ─── Decorative frame ────────────────────────────────────────────────────────

/// The decorative-frame glyph for one cell of a `width × height` canvas.
///
/// Double-line border on the outer rows and columns, a separator on
/// [`SEPARATOR_ROW`] with tees into the side borders, and a marker on the
/// even columns of [`MARKER_ROW`] within [`MARKER_RADIUS`] of the centre.
/// Everything else is a space.
#[must_use]
pub fn decorative_glyph(col: u16, row: u16, width: u16, height: u16) -> Glyph {
    let last_col = width.saturating_sub(1);
    let last_row = height.saturating_sub(1);
    let side = col == 0 || col == last_col;

    if row > 0 && side {
        let left = col == 0;
        return if row == SEPARATOR_ROW {
            if left { Glyph::TEE_LEFT } else { Glyph::TEE_RIGHT }
        } else if row == last_row {
            if left { Glyph::CORNER_TOP_LEFT } else { Glyph::CORNER_TOP_RIGHT }
        } else {
            Glyph::VERTICAL
        };
    }

    if row == 0 || row == last_row || row == SEPARATOR_ROW {
        return if !side {
            Glyph::HORIZONTAL
        } else if col == 0 {
            Glyph::CORNER_BOTTOM_LEFT
        } else {
            Glyph::CORNER_BOTTOM_RIGHT
        };
    }

    if row == MARKER_ROW && (width / 2).abs_diff(col) < MARKER_RADIUS && col % 2 == 0 {
        return Glyph::MARKER;
    }

    Glyph::SPACE
}

// ─── Canvas ──────────────────────────────────────────────────────────────────

/// A fixed-size grid of glyphs.
///
/// # Examples
///
/// ```
/// use dodjo_term::canvas::Canvas;
/// use dodjo_term::glyph::Glyph;
///
/// let mut canvas = Canvas::new(10, 4);
/// assert!(canvas.set(3, 1, Glyph::new('#')));
/// assert_eq!(canvas.get(3, 1), Some(Glyph::new('#')));
/// assert_eq!(canvas.get(10, 1), None);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Glyph>,
}

impl Canvas {
    /// Create a blank canvas (every cell a space).
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        let size = usize::from(width) * usize::from(height);
        Self {
            width,
            height,
            cells: vec![Glyph::SPACE; size],
        }
    }

    /// Create a canvas already holding the decorative frame.
    #[must_use]
    pub fn decorated(width: u16, height: u16) -> Self {
        let mut canvas = Self::new(width, height);
        canvas.decorate();
        canvas
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Whether `(col, row)` is inside the canvas.
    #[inline]
    #[must_use]
    pub const fn in_bounds(&self, col: u16, row: u16) -> bool {
        col < self.width && row < self.height
    }

    #[inline]
    const fn index(&self, col: u16, row: u16) -> usize {
        row as usize * self.width as usize + col as usize
    }

    /// The glyph at `(col, row)`, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, col: u16, row: u16) -> Option<Glyph> {
        self.in_bounds(col, row)
            .then(|| self.cells[self.index(col, row)])
    }

    /// Write a glyph. Returns `false` (and writes nothing) when out of bounds.
    #[inline]
    pub fn set(&mut self, col: u16, row: u16, glyph: Glyph) -> bool {
        if !self.in_bounds(col, row) {
            return false;
        }
        let idx = self.index(col, row);
        self.cells[idx] = glyph;
        true
    }

    /// One row as a slice, or `None` if out of bounds.
    #[inline]
    #[must_use]
    pub fn row(&self, row: u16) -> Option<&[Glyph]> {
        if row >= self.height {
            return None;
        }
        let start = self.index(0, row);
        Some(&self.cells[start..start + usize::from(self.width)])
    }

    /// One row as a mutable slice, or `None` if out of bounds.
    #[inline]
    pub fn row_mut(&mut self, row: u16) -> Option<&mut [Glyph]> {
        if row >= self.height {
            return None;
        }
        let start = self.index(0, row);
        let end = start + usize::from(self.width);
        Some(&mut self.cells[start..end])
    }

    /// Iterate over rows, bottom (row 0) first.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Glyph]> {
        // chunks_exact on an empty Vec with width 0 would panic; guard it.
        self.cells.chunks_exact(usize::from(self.width.max(1)))
    }

    // ── Bulk operations ─────────────────────────────────────────────

    /// Set every cell to `glyph`.
    pub fn fill(&mut self, glyph: Glyph) {
        self.cells.fill(glyph);
    }

    /// Redraw the decorative frame over the whole canvas.
    pub fn decorate(&mut self) {
        let (width, height) = (self.width, self.height);
        for row in 0..height {
            for col in 0..width {
                let idx = self.index(col, row);
                self.cells[idx] = decorative_glyph(col, row, width, height);
            }
        }
    }

    /// Render one row to a `String` (tests and debugging).
    #[must_use]
    pub fn row_string(&self, row: u16) -> String {
        self.row(row)
            .map(|cells| cells.iter().map(|g| g.as_char()).collect())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Construction ────────────────────────────────────────────────

    #[test]
    fn new_is_blank() {
        let c = Canvas::new(8, 3);
        assert_eq!(c.width(), 8);
        assert_eq!(c.height(), 3);
        for row in 0..3 {
            assert_eq!(c.row_string(row), "        ");
        }
    }

    #[test]
    fn zero_size_canvas() {
        let c = Canvas::new(0, 0);
        assert_eq!(c.get(0, 0), None);
        assert_eq!(c.rows().len(), 0);
    }

    // ── Access ──────────────────────────────────────────────────────

    #[test]
    fn set_and_get() {
        let mut c = Canvas::new(5, 5);
        assert!(c.set(4, 4, Glyph::new('z')));
        assert_eq!(c.get(4, 4), Some(Glyph::new('z')));
    }

    #[test]
    fn set_out_of_bounds_is_rejected() {
        let mut c = Canvas::new(5, 5);
        assert!(!c.set(5, 0, Glyph::new('z')));
        assert!(!c.set(0, 5, Glyph::new('z')));
        assert_eq!(c, Canvas::new(5, 5));
    }

    #[test]
    fn rows_are_contiguous_and_independent() {
        let mut c = Canvas::new(4, 3);
        c.row_mut(1).unwrap().fill(Glyph::new('-'));
        assert_eq!(c.row_string(0), "    ");
        assert_eq!(c.row_string(1), "----");
        assert_eq!(c.row_string(2), "    ");
        assert!(c.row(3).is_none());
    }

    #[test]
    fn rows_iterates_bottom_first() {
        let mut c = Canvas::new(2, 3);
        c.set(0, 0, Glyph::new('a'));
        c.set(0, 2, Glyph::new('c'));
        let first: Vec<char> = c.rows().map(|r| r[0].as_char()).collect();
        assert_eq!(first, vec!['a', ' ', 'c']);
    }

    #[test]
    fn fill_sets_every_cell() {
        let mut c = Canvas::new(3, 2);
        c.fill(Glyph::new('.'));
        assert_eq!(c.row_string(0), "...");
        assert_eq!(c.row_string(1), "...");
    }

    // ── Decorative frame ────────────────────────────────────────────

    #[test]
    fn decorated_reference_corners() {
        let c = Canvas::decorated(WIDTH, HEIGHT);
        assert_eq!(c.get(0, 0), Some(Glyph::CORNER_BOTTOM_LEFT));
        assert_eq!(c.get(WIDTH - 1, 0), Some(Glyph::CORNER_BOTTOM_RIGHT));
        assert_eq!(c.get(0, HEIGHT - 1), Some(Glyph::CORNER_TOP_LEFT));
        assert_eq!(c.get(WIDTH - 1, HEIGHT - 1), Some(Glyph::CORNER_TOP_RIGHT));
    }

    #[test]
    fn decorated_separator_row() {
        let c = Canvas::decorated(WIDTH, HEIGHT);
        assert_eq!(c.get(0, SEPARATOR_ROW), Some(Glyph::TEE_LEFT));
        assert_eq!(c.get(WIDTH - 1, SEPARATOR_ROW), Some(Glyph::TEE_RIGHT));
        for col in 1..WIDTH - 1 {
            assert_eq!(c.get(col, SEPARATOR_ROW), Some(Glyph::HORIZONTAL));
        }
    }

    #[test]
    fn decorated_side_borders() {
        let c = Canvas::decorated(WIDTH, HEIGHT);
        for row in [1, 2, 4, 20, HEIGHT - 2] {
            assert_eq!(c.get(0, row), Some(Glyph::VERTICAL));
            assert_eq!(c.get(WIDTH - 1, row), Some(Glyph::VERTICAL));
        }
    }

    #[test]
    fn decorated_marker_positions() {
        let c = Canvas::decorated(WIDTH, HEIGHT);
        let markers: Vec<u16> = (0..WIDTH)
            .filter(|&col| c.get(col, MARKER_ROW) == Some(Glyph::MARKER))
            .collect();
        assert_eq!(markers, vec![56, 58, 60, 62, 64, 66, 68, 70, 72, 74]);
    }

    #[test]
    fn decorated_play_area_is_blank() {
        let c = Canvas::decorated(WIDTH, HEIGHT);
        assert_eq!(c.get(WIDTH / 2, HEIGHT / 2 + 1), Some(Glyph::SPACE));
        assert_eq!(c.get(1, 1), Some(Glyph::SPACE));
    }

    #[test]
    fn decorate_overwrites_drawing() {
        let mut c = Canvas::decorated(20, 10);
        let pristine = c.clone();
        c.set(5, 5, Glyph::new('@'));
        c.set(0, 0, Glyph::new('@'));
        c.decorate();
        assert_eq!(c, pristine);
    }

    #[test]
    fn decorative_glyph_matches_decorate() {
        let c = Canvas::decorated(30, 12);
        for row in 0..12 {
            for col in 0..30 {
                assert_eq!(c.get(col, row), Some(decorative_glyph(col, row, 30, 12)));
            }
        }
    }
}
