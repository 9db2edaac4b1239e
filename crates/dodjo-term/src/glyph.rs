// SPDX-License-Identifier: MIT
//
// Glyph — the atomic unit of the canvas.
//
// Every cell of a canvas holds exactly one Glyph: a single Unicode scalar
// that occupies exactly one terminal column. There is no color, no
// attribute, no continuation cell. Equality is a plain `char` compare, so
// the diff engine can compare whole rows as slices.
//
// Anything that would break the one-cell-per-column layout (wide CJK,
// combining marks, control bytes) is replaced by `?` at the boundary where
// raw characters enter the renderer.

use std::fmt;

use unicode_width::UnicodeWidthChar;

/// A single-column display glyph.
///
/// # Examples
///
/// ```
/// use dodjo_term::glyph::Glyph;
///
/// assert_eq!(Glyph::new('@').as_char(), '@');
/// assert_eq!(Glyph::new('界'), Glyph::REPLACEMENT); // two columns wide
/// assert_eq!(Glyph::from_u32(9733).as_char(), '★');
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Glyph(char);

impl Glyph {
    /// Blank cell.
    pub const SPACE: Self = Self(' ');

    /// Stand-in for characters that cannot occupy a single cell.
    pub const REPLACEMENT: Self = Self('?');

    // ── Decorative frame ────────────────────────────────────────────

    /// `═` horizontal double line.
    pub const HORIZONTAL: Self = Self('\u{2550}');
    /// `║` vertical double line.
    pub const VERTICAL: Self = Self('\u{2551}');
    /// `╔` corner (top-left on screen).
    pub const CORNER_TOP_LEFT: Self = Self('\u{2554}');
    /// `╗` corner (top-right on screen).
    pub const CORNER_TOP_RIGHT: Self = Self('\u{2557}');
    /// `╚` corner (bottom-left on screen).
    pub const CORNER_BOTTOM_LEFT: Self = Self('\u{255A}');
    /// `╝` corner (bottom-right on screen).
    pub const CORNER_BOTTOM_RIGHT: Self = Self('\u{255D}');
    /// `╠` left tee where the separator meets the border.
    pub const TEE_LEFT: Self = Self('\u{2560}');
    /// `╣` right tee where the separator meets the border.
    pub const TEE_RIGHT: Self = Self('\u{2563}');
    /// `⎹` marker drawn around the hotbar.
    pub const MARKER: Self = Self('\u{23B9}');

    // ── Hotbar ──────────────────────────────────────────────────────

    /// `△` selected-slot marker.
    pub const SELECTION: Self = Self('\u{25B3}');

    /// Create a glyph, replacing anything that is not exactly one column wide.
    #[must_use]
    pub fn new(ch: char) -> Self {
        Self::try_new(ch).unwrap_or(Self::REPLACEMENT)
    }

    /// Create a glyph, or `None` if `ch` does not occupy exactly one column.
    #[must_use]
    pub fn try_new(ch: char) -> Option<Self> {
        match ch.width() {
            Some(1) => Some(Self(ch)),
            _ => None,
        }
    }

    /// Create a glyph from a raw code point id (as stored in decoration files).
    ///
    /// Invalid scalars and non-single-width characters become [`Self::REPLACEMENT`].
    #[must_use]
    pub fn from_u32(code: u32) -> Self {
        char::from_u32(code).map_or(Self::REPLACEMENT, Self::new)
    }

    /// A glyph for a single decimal digit (`0`–`9`); larger values wrap.
    #[must_use]
    pub fn digit(value: u8) -> Self {
        char::from_digit(u32::from(value % 10), 10).map_or(Self::REPLACEMENT, Self)
    }

    /// The underlying character.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }

    /// Whether this is the blank glyph.
    #[inline]
    #[must_use]
    pub const fn is_space(self) -> bool {
        self.0 == ' '
    }

    /// Append the glyph's UTF-8 encoding to `out`.
    #[inline]
    pub fn encode_into(self, out: &mut Vec<u8>) {
        let mut enc = [0u8; 4];
        out.extend_from_slice(self.0.encode_utf8(&mut enc).as_bytes());
    }
}

impl Default for Glyph {
    fn default() -> Self {
        Self::SPACE
    }
}

impl fmt::Debug for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Glyph({:?})", self.0)
    }
}

impl fmt::Display for Glyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
