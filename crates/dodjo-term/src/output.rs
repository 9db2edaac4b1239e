// SPDX-License-Identifier: MIT
//
// Output buffering.
//
// Every cursor move and glyph run of a frame is accumulated here, then the
// whole frame goes out in one `write_all` + `flush`. Spans never reach the
// terminal one at a time.

use std::io::{self, Write};

use crate::ansi;
use crate::glyph::Glyph;

const DEFAULT_CAPACITY: usize = 8_192;

/// A byte buffer that accumulates one frame of terminal output.
pub struct OutputBuffer {
    buf: Vec<u8>,
}

impl OutputBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Clear the buffer for reuse (keeps capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Position the cursor at screen `(x, y)` and write `glyphs` literally.
    pub fn write_run(&mut self, x: u16, y: u16, glyphs: &[Glyph]) {
        // Writing into a Vec cannot fail.
        let _ = ansi::cursor_to(&mut self.buf, x, y);
        for glyph in glyphs {
            glyph.encode_into(&mut self.buf);
        }
    }

    /// Write accumulated output to stdout and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush_stdout(&mut self) -> io::Result<()> {
        self.flush_to(&mut io::stdout().lock())
    }

    /// Write accumulated output to `w`, flush it, and clear the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for OutputBuffer {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Real flushing goes through flush_stdout() / flush_to().
        Ok(())
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs(s: &str) -> Vec<Glyph> {
        s.chars().map(Glyph::new).collect()
    }

    #[test]
    fn new_is_empty() {
        let out = OutputBuffer::new();
        assert!(out.is_empty());
        assert_eq!(out.len(), 0);
    }

    #[test]
    fn write_run_positions_then_writes() {
        let mut out = OutputBuffer::new();
        out.write_run(4, 0, &glyphs("ab"));
        assert_eq!(out.as_bytes(), b"\x1b[1;5Hab");
    }

    #[test]
    fn write_run_utf8() {
        let mut out = OutputBuffer::new();
        out.write_run(0, 2, &[Glyph::HORIZONTAL, Glyph::SELECTION]);
        assert_eq!(std::str::from_utf8(out.as_bytes()).unwrap(), "\x1b[3;1H═△");
    }

    #[test]
    fn runs_accumulate() {
        let mut out = OutputBuffer::new();
        out.write_run(0, 0, &glyphs("x"));
        out.write_run(9, 9, &glyphs("y"));
        assert_eq!(out.as_bytes(), b"\x1b[1;1Hx\x1b[10;10Hy");
    }

    #[test]
    fn flush_to_writes_and_clears() {
        let mut out = OutputBuffer::new();
        out.write_run(0, 0, &glyphs("hi"));
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"\x1b[1;1Hhi");
        assert!(out.is_empty());
    }

    #[test]
    fn flush_empty_writes_nothing() {
        let mut out = OutputBuffer::new();
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert!(sink.is_empty());
    }

    #[test]
    fn write_trait_appends() {
        let mut out = OutputBuffer::new();
        out.write_all(b"raw").unwrap();
        out.flush().unwrap();
        assert_eq!(out.as_bytes(), b"raw");
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut out = OutputBuffer::new();
        out.write_run(0, 0, &glyphs("abc"));
        out.clear();
        assert!(out.is_empty());
    }
}
