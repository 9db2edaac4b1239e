// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. The
// renderer needs very little: cursor positioning, cursor visibility, and a
// one-time screen clear. No colors, no attributes.
//
// Cursor positions are 0-indexed in our API and converted to 1-indexed for
// the terminal (ANSI CUP is 1-based).

use std::io::{self, Write};

/// Move the cursor to `(x, y)` using CUP (Cursor Position).
///
/// `x` is the screen column, `y` the screen line counted from the top.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", u32::from(y) + 1, u32::from(x) + 1)
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

/// Home the cursor and clear from there to the end of the screen.
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H\x1b[J")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn cursor_to_origin() {
        assert_eq!(capture(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
    }

    #[test]
    fn cursor_to_is_row_then_column() {
        assert_eq!(capture(|w| cursor_to(w, 9, 4)), "\x1b[5;10H");
    }

    #[test]
    fn cursor_to_max_does_not_overflow() {
        assert_eq!(capture(|w| cursor_to(w, u16::MAX, u16::MAX)), "\x1b[65536;65536H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(capture(|w| cursor_hide(w)), "\x1b[?25l");
        assert_eq!(capture(|w| cursor_show(w)), "\x1b[?25h");
    }

    #[test]
    fn clear_homes_first() {
        assert_eq!(capture(|w| clear_screen(w)), "\x1b[H\x1b[J");
    }
}
