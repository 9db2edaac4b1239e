// SPDX-License-Identifier: MIT
//
// Input classification.
//
// Turns one tick's raw stdin batch into game inputs. There are only two
// shapes of input:
//
//   - a single printable byte bound to a command: movement letters (either
//     case), digits 1–9 for hotbar slots, the drop letter (either case)
//   - a three-byte arrow sequence `ESC [ A|B|C|D`
//
// The whole batch is decoded left to right. A control sequence
// `ESC [ params intermediates final` is one unit: parameter bytes
// (0x30–0x3F) and intermediate bytes (0x20–0x2F) run up to a final byte in
// 0x40–0x7E. Only a parameterless `A`/`B`/`C`/`D` final is an arrow; F-keys,
// Delete, Shift+arrows and the rest are dropped whole. Every other byte
// stands alone. Nothing is carried between ticks: a sequence split across
// two reads is dropped, and so is a lone ESC. Unbound bytes are ignored.

use std::fmt;

const ESC: u8 = 0x1B;

/// Bytes that may sit between `ESC [` and the final byte.
const CSI_BODY: std::ops::RangeInclusive<u8> = 0x20..=0x3F;

/// Bytes that terminate a control sequence.
const CSI_FINAL: std::ops::RangeInclusive<u8> = 0x40..=0x7E;

// ─── Types ──────────────────────────────────────────────────────────────────

/// Cardinal movement direction. North is logical `+y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Logical `(dx, dy)` of one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }

    /// Whether this moves along the vertical axis.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// How a movement was entered. Drives the end-of-tick throttle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySource {
    /// A bound letter.
    Typed,
    /// An arrow escape sequence.
    Arrow,
}

/// One decoded game input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Input {
    /// Step the actor one cell.
    Move { dir: Direction, source: KeySource },
    /// Select hotbar slot (0-based).
    SelectSlot(u8),
    /// Drop the item in the selected slot.
    Drop,
}

/// Letter bindings for movement and drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// `z` north, `s` south, `q` west, `d` east, `w` drop.
    #[default]
    Azerty,
    /// `w` north, `s` south, `a` west, `d` east, `x` drop.
    Qwerty,
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Azerty => "azerty",
            Self::Qwerty => "qwerty",
        })
    }
}

// ─── Classification ─────────────────────────────────────────────────────────

impl Layout {
    /// Classify a single byte. Letters match in either case.
    #[must_use]
    pub fn classify(self, byte: u8) -> Option<Input> {
        let typed = |dir| {
            Some(Input::Move {
                dir,
                source: KeySource::Typed,
            })
        };

        if let b'1'..=b'9' = byte {
            return Some(Input::SelectSlot(byte - b'1'));
        }

        match (self, byte.to_ascii_lowercase()) {
            (Self::Azerty, b'z') | (Self::Qwerty, b'w') => typed(Direction::North),
            (_, b's') => typed(Direction::South),
            (Self::Azerty, b'q') | (Self::Qwerty, b'a') => typed(Direction::West),
            (_, b'd') => typed(Direction::East),
            (Self::Azerty, b'w') | (Self::Qwerty, b'x') => Some(Input::Drop),
            _ => None,
        }
    }
}

/// The arrow bound to the final byte of `ESC [ x`.
#[must_use]
pub const fn arrow(final_byte: u8) -> Option<Input> {
    let dir = match final_byte {
        b'A' => Direction::North,
        b'B' => Direction::South,
        b'C' => Direction::East,
        b'D' => Direction::West,
        _ => return None,
    };
    Some(Input::Move {
        dir,
        source: KeySource::Arrow,
    })
}

/// Decode one read batch into inputs, in order.
///
/// # Examples
///
/// ```
/// use dodjo_term::input::{decode, Direction, Input, KeySource, Layout};
///
/// let inputs = decode(b"\x1b[Cz3", Layout::Azerty);
/// assert_eq!(inputs, vec![
///     Input::Move { dir: Direction::East, source: KeySource::Arrow },
///     Input::Move { dir: Direction::North, source: KeySource::Typed },
///     Input::SelectSlot(2),
/// ]);
/// ```
#[must_use]
pub fn decode(batch: &[u8], layout: Layout) -> Vec<Input> {
    let mut inputs = Vec::new();
    let mut pos = 0;

    while pos < batch.len() {
        let rest = &batch[pos..];
        match rest {
            [ESC, b'[', body @ ..] => {
                // Sequence cut off by the end of the batch.
                let Some(end) = body.iter().position(|b| !CSI_BODY.contains(b)) else {
                    break;
                };
                let last = body[end];
                if CSI_FINAL.contains(&last) {
                    if end == 0 {
                        inputs.extend(arrow(last));
                    }
                    pos += 2 + end + 1;
                } else {
                    // Malformed: drop what was read, decode the stray byte alone.
                    pos += 2 + end;
                }
            }
            [ESC] => break,
            [ESC, ..] => pos += 1,
            [byte, ..] => {
                inputs.extend(layout.classify(*byte));
                pos += 1;
            }
            [] => break,
        }
    }

    inputs
}

// ─── Tests ──────────────────────────────────────────────────────────────────
