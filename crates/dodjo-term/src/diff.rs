// SPDX-License-Identifier: MIT
//
// Differential renderer — the core of frame rendering performance.
//
// Instead of redrawing the screen every tick, we compare the current canvas
// against the shown canvas and write only what differs. A typical tick moves
// the actor by one cell, so two cells out of 5,200 change.
//
// The pipeline per update:
//
//   1. mark_dirty_rows: one flag per row, true iff the row's slices differ.
//      Rows are disjoint memory and the pass only reads the canvases, so it
//      fans out across rows with rayon and joins before step 2.
//   2. emit_updates: for each dirty row, walk columns left to right and
//      coalesce differing columns into maximal spans. Each span costs one
//      cursor move and one literal glyph run, then is copied into `shown`.
//      Unchanged cells are never written and never copied.
//   3. One flush per update: the whole frame leaves in a single write.
//
// Terminal I/O is therefore bounded by the number of contiguous differing
// runs, not by the number of differing cells and never by the row width.
//
// Canvas row 0 is the bottom terminal line: row `r` is emitted at screen
// line `height - 1 - r` (0-based).

use std::io::{self, Write};
use std::ops::Range;

use rayon::prelude::*;

use crate::frame::FrameStore;
use crate::glyph::Glyph;
use crate::output::OutputBuffer;

// ─── Span ────────────────────────────────────────────────────────────────────

/// A maximal run of differing columns within one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Canvas row.
    pub row: u16,
    /// Columns `start..end` (end exclusive).
    pub cols: Range<u16>,
}

impl Span {
    /// Number of cells in the span.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.cols.end - self.cols.start)
    }

    /// Whether the span covers no cells (never produced by the scanner).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

/// Iterator over the maximal differing runs of two equal-length rows.
///
/// Yields column ranges left to right. Two yielded ranges are always
/// separated by at least one equal column.
pub struct RowSpans<'a> {
    current: &'a [Glyph],
    shown: &'a [Glyph],
    col: usize,
}

/// Detect the changed spans between one row of `current` and of `shown`.
///
/// # Examples
///
/// ```
/// use dodjo_term::diff::row_spans;
/// use dodjo_term::glyph::Glyph;
///
/// let a: Vec<Glyph> = "a..bc.".chars().map(Glyph::new).collect();
/// let b: Vec<Glyph> = "......".chars().map(Glyph::new).collect();
/// let spans: Vec<_> = row_spans(&a, &b).collect();
/// assert_eq!(spans, vec![0..1, 3..5]);
/// ```
#[must_use]
pub fn row_spans<'a>(current: &'a [Glyph], shown: &'a [Glyph]) -> RowSpans<'a> {
    debug_assert_eq!(current.len(), shown.len());
    RowSpans {
        current,
        shown,
        col: 0,
    }
}

impl Iterator for RowSpans<'_> {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.current.len().min(self.shown.len());
        let differs = |i: usize| self.current[i] != self.shown[i];

        let mut start = self.col;
        while start < len && !differs(start) {
            start += 1;
        }
        if start >= len {
            self.col = len;
            return None;
        }

        let mut end = start + 1;
        while end < len && differs(end) {
            end += 1;
        }
        self.col = end;
        Some(start..end)
    }
}

// ─── Dirty marking ───────────────────────────────────────────────────────────

/// Flag every row whose current content differs from what is shown.
///
/// Overwrites all flags: clean rows become `false`.
pub fn mark_dirty_rows(store: &mut FrameStore) {
    let FrameStore {
        current,
        shown,
        dirty,
    } = store;

    let (current, shown) = (&*current, &*shown);

    dirty.par_iter_mut().enumerate().for_each(|(row, flag)| {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        *flag = current.row(row) != shown.row(row);
    });
}

// ─── Emission ────────────────────────────────────────────────────────────────

/// Statistics from one update pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Rows that were flagged dirty when emission started.
    pub rows_dirty: usize,
    /// Spans emitted (one cursor move each).
    pub spans: usize,
    /// Cells written to the terminal and committed to `shown`.
    pub cells_written: usize,
    /// Bytes appended to the output buffer.
    pub bytes_written: usize,
}

/// Emit every changed span of every dirty row into `out`.
///
/// Each span becomes one cursor move plus its glyph run; its cells are then
/// copied from `current` into `shown`. Dirty flags are cleared. Emitted spans
/// are appended to `spans` in emission order.
pub fn emit_updates(
    store: &mut FrameStore,
    out: &mut OutputBuffer,
    spans: &mut Vec<Span>,
) -> RenderStats {
    let FrameStore {
        current,
        shown,
        dirty,
    } = store;

    let height = current.height();
    let bytes_before = out.len();
    let mut stats = RenderStats::default();

    for (row, flag) in (0..height).zip(dirty.iter_mut()) {
        if !*flag {
            continue;
        }
        *flag = false;
        stats.rows_dirty += 1;

        let (Some(cur), Some(prev)) = (current.row(row), shown.row_mut(row)) else {
            continue;
        };
        let screen_y = height - 1 - row;

        let mut col = 0;
        loop {
            let Some(range) = row_spans(&cur[col..], &prev[col..]).next() else {
                break;
            };
            let run = col + range.start..col + range.end;
            // Columns fit in u16: rows are at most u16::MAX wide.
            #[allow(clippy::cast_possible_truncation)]
            let span = Span {
                row,
                cols: run.start as u16..run.end as u16,
            };
            out.write_run(span.cols.start, screen_y, &cur[run.clone()]);
            prev[run.clone()].copy_from_slice(&cur[run.clone()]);

            stats.spans += 1;
            stats.cells_written += run.len();
            spans.push(span);
            col = run.end;
        }
    }

    stats.bytes_written = out.len() - bytes_before;
    stats
}

// ─── Renderer ────────────────────────────────────────────────────────────────

/// Owns the output buffer and span scratch space for repeated updates.
///
/// # Usage
///
/// ```
/// use dodjo_term::diff::Renderer;
/// use dodjo_term::frame::FrameStore;
///
/// let mut store = FrameStore::with_size(20, 8);
/// let mut renderer = Renderer::new();
///
/// let first = renderer.update(&mut store);
/// assert_eq!(first.rows_dirty, 8);
///
/// let second = renderer.update(&mut store);
/// assert_eq!(second.spans, 0);
/// ```
pub struct Renderer {
    output: OutputBuffer,
    spans: Vec<Span>,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            spans: Vec::new(),
        }
    }

    /// Mark dirty rows, then emit their spans into the output buffer.
    ///
    /// Bytes are appended: output from an earlier update that was never
    /// flushed stays queued ahead of this one, since its cells are already
    /// committed to the shown canvas.
    pub fn update(&mut self, store: &mut FrameStore) -> RenderStats {
        self.spans.clear();

        mark_dirty_rows(store);
        let stats = emit_updates(store, &mut self.output, &mut self.spans);

        tracing::trace!(
            rows = stats.rows_dirty,
            spans = stats.spans,
            cells = stats.cells_written,
            bytes = stats.bytes_written,
            "frame emitted"
        );
        stats
    }

    /// Spans emitted by the last update.
    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Raw bytes queued since the last flush.
    #[must_use]
    pub fn output_bytes(&self) -> &[u8] {
        self.output.as_bytes()
    }

    /// Write pending output to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to stdout fails.
    pub fn flush(&mut self) -> io::Result<()> {
        self.output.flush_stdout()
    }

    /// Write pending output to `w`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        self.output.flush_to(w)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
