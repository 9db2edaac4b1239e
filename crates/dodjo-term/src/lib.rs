// SPDX-License-Identifier: MIT
//
// dodjo-term — Terminal rendering engine for dodjo.
//
// Two full-screen glyph canvases and a per-row dirty mask. The game paints
// into the "current" canvas through a single coordinate-translation call,
// the diff engine finds the rows that differ from what the terminal already
// shows, and the emitter writes only the contiguous runs of changed cells:
// one cursor move plus one literal glyph run per run, one flush per frame.
//
// Input comes from a non-blocking raw-mode stdin poll driven by a
// single-threaded loop that sleeps a variable interval between ticks.
// No TUI framework, no async runtime: termios, fcntl, and ANSI escapes.

pub mod ansi;
pub mod canvas;
pub mod compose;
pub mod diff;
pub mod error;
pub mod event_loop;
pub mod frame;
pub mod glyph;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
