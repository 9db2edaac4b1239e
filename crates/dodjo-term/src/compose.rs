// SPDX-License-Identifier: MIT
//
// Composition — turning game state into canvas contents.
//
// The renderer does not know what a chunk, a player, or an inventory is. It
// sees three narrow provider traits and draws what they expose:
//
//   ContextView  objects of the current region + its coordinate label
//   ActorView    where the controlled actor is, where it was, what it looks like
//   HotbarView   slot count, per-slot glyph, selected slot
//
// Two paths:
//
//   compose        full rebuild: decorative frame, every object, label,
//                  actor, hotbar. Startup and context transitions only.
//   render_actor   cheap path for in-context movement: restore the old cell
//                  to what compose would draw there (object, label, or
//                  frame), draw the actor at the new one.
//
// `render_hotbar` redraws the small fixed strip on rows 1–2 after selection
// or inventory changes.

use crate::canvas::MARKER_ROW;
use crate::frame::{FrameStore, Placement};
use crate::glyph::Glyph;

/// Column of the first hotbar slot.
pub const HOTBAR_BASE_COL: u16 = 57;

/// Columns between two hotbar slots.
pub const HOTBAR_STRIDE: u16 = 2;

/// Canvas row carrying the hotbar item glyphs.
pub const HOTBAR_ITEM_ROW: u16 = MARKER_ROW;

/// Canvas row carrying the selected-slot marker.
pub const HOTBAR_SELECTION_ROW: u16 = 1;

/// Logical position of the context label: `x` and `y` letters at column
/// -41, the digits at column -40, on rows 15 (`x`) and 14 (`y`).
const LABEL_COL: i32 = -41;
const LABEL_ROW_X: i32 = 15;
const LABEL_ROW_Y: i32 = 14;

// ─── Providers ───────────────────────────────────────────────────────────────

/// The player's current region, as the renderer sees it.
pub trait ContextView {
    /// Every object to draw, in any order. Objects never overlap.
    fn objects(&self) -> impl Iterator<Item = Placement> + '_;

    /// Region coordinates, drawn as one digit each in the label.
    fn label(&self) -> (u8, u8);
}

/// The controlled actor.
pub trait ActorView {
    /// Current logical position.
    fn position(&self) -> (i32, i32);

    /// Logical position before the last move.
    fn previous_position(&self) -> (i32, i32);

    /// Display glyph.
    fn glyph(&self) -> Glyph;
}

/// The hotbar strip.
pub trait HotbarView {
    /// Fixed number of slots.
    fn slot_count(&self) -> usize;

    /// Item glyph in `slot`, or `None` when empty.
    fn slot_glyph(&self, slot: usize) -> Option<Glyph>;

    /// Index of the selected slot.
    fn selected(&self) -> usize;
}

// ─── Drawing ─────────────────────────────────────────────────────────────────

/// Rebuild the whole current canvas from scratch.
pub fn compose(
    store: &mut FrameStore,
    context: &impl ContextView,
    actor: &impl ActorView,
    hotbar: &impl HotbarView,
) {
    store.current_mut().decorate();

    let mut objects = 0usize;
    for placement in context.objects() {
        store.place_at(placement);
        objects += 1;
    }

    for placement in label_placements(context) {
        store.place_at(placement);
    }

    store.place_at(actor_placement(actor));
    render_hotbar(store, hotbar);

    let (cx, cy) = context.label();
    tracing::debug!(objects, cx, cy, "composed full frame");
}

/// Move the actor on the current canvas: erase the old cell, draw the new one.
///
/// The old cell gets back whatever [`compose`] draws there without the
/// actor: the context's object or label glyph, else the decorative frame.
pub fn render_actor(store: &mut FrameStore, context: &impl ContextView, actor: &impl ActorView) {
    let (px, py) = actor.previous_position();
    let background = context_glyph_at(context, px, py)
        .or_else(|| store.background_at(px, py))
        .unwrap_or(Glyph::SPACE);
    store.place(px, py, background);
    store.place_at(actor_placement(actor));
}

/// The four label cells: `x`/`y` letters and one digit per coordinate.
fn label_placements(context: &impl ContextView) -> [Placement; 4] {
    let (cx, cy) = context.label();
    [
        Placement::new(LABEL_COL, LABEL_ROW_X, Glyph::new('x')),
        Placement::new(LABEL_COL, LABEL_ROW_Y, Glyph::new('y')),
        Placement::new(LABEL_COL + 1, LABEL_ROW_X, Glyph::digit(cx)),
        Placement::new(LABEL_COL + 1, LABEL_ROW_Y, Glyph::digit(cy)),
    ]
}

/// The glyph the context puts at logical `(x, y)`, if any. Later
/// placements win, matching draw order in [`compose`].
fn context_glyph_at(context: &impl ContextView, x: i32, y: i32) -> Option<Glyph> {
    context
        .objects()
        .chain(label_placements(context))
        .filter(|p| p.x == x && p.y == y)
        .last()
        .map(|p| p.glyph)
}

fn actor_placement(actor: &impl ActorView) -> Placement {
    let (x, y) = actor.position();
    Placement::new(x, y, actor.glyph())
}

/// Redraw the hotbar strip: item glyphs on row 2, selection marker on row 1.
pub fn render_hotbar(store: &mut FrameStore, hotbar: &impl HotbarView) {
    let selected = hotbar.selected();
    let canvas = store.current_mut();

    for slot in 0..hotbar.slot_count() {
        let Some(col) = u16::try_from(slot)
            .ok()
            .and_then(|s| s.checked_mul(HOTBAR_STRIDE))
            .and_then(|offset| offset.checked_add(HOTBAR_BASE_COL))
        else {
            break;
        };

        let item = hotbar.slot_glyph(slot).unwrap_or(Glyph::SPACE);
        let marker = if slot == selected {
            Glyph::SELECTION
        } else {
            Glyph::SPACE
        };

        canvas.set(col, HOTBAR_ITEM_ROW, item);
        canvas.set(col, HOTBAR_SELECTION_ROW, marker);
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use pretty_assertions::assert_eq;

    struct Room {
        objects: Vec<Placement>,
        label: (u8, u8),
    }

    impl ContextView for Room {
        fn objects(&self) -> impl Iterator<Item = Placement> + '_ {
            self.objects.iter().copied()
        }

        fn label(&self) -> (u8, u8) {
            self.label
        }
    }

    struct Walker {
        at: (i32, i32),
        was: (i32, i32),
    }

    impl ActorView for Walker {
        fn position(&self) -> (i32, i32) {
            self.at
        }

        fn previous_position(&self) -> (i32, i32) {
            self.was
        }

        fn glyph(&self) -> Glyph {
            Glyph::new('@')
        }
    }

    struct Bar {
        slots: Vec<Option<Glyph>>,
        selected: usize,
    }

    impl HotbarView for Bar {
        fn slot_count(&self) -> usize {
            self.slots.len()
        }

        fn slot_glyph(&self, slot: usize) -> Option<Glyph> {
            self.slots.get(slot).copied().flatten()
        }

        fn selected(&self) -> usize {
            self.selected
        }
    }

    fn empty_room() -> Room {
        Room {
            objects: vec![],
            label: (0, 0),
        }
    }

    fn empty_bar() -> Bar {
        Bar {
            slots: vec![None; 9],
            selected: 0,
        }
    }

    #[test]
    fn compose_draws_objects_label_actor() {
        let mut store = FrameStore::new();
        let room = Room {
            objects: vec![Placement::new(5, 5, Glyph::new('♣'))],
            label: (3, 7),
        };
        let actor = Walker { at: (0, 0), was: (0, 0) };
        compose(&mut store, &room, &actor, &empty_bar());

        let c = store.current();
        assert_eq!(c.get(70, 26), Some(Glyph::new('♣')));
        assert_eq!(c.get(65, 21), Some(Glyph::new('@')));
        assert_eq!(c.get(24, 36), Some(Glyph::new('x')));
        assert_eq!(c.get(24, 35), Some(Glyph::new('y')));
        assert_eq!(c.get(25, 36), Some(Glyph::new('3')));
        assert_eq!(c.get(25, 35), Some(Glyph::new('7')));
    }

    #[test]
    fn compose_clears_previous_context() {
        let mut store = FrameStore::new();
        let actor = Walker { at: (0, 0), was: (0, 0) };
        let first = Room {
            objects: vec![Placement::new(-10, 3, Glyph::new('#'))],
            label: (0, 0),
        };
        compose(&mut store, &first, &actor, &empty_bar());
        let second = Room {
            objects: vec![],
            label: (0, 0),
        };
        compose(&mut store, &second, &actor, &empty_bar());
        assert_eq!(store.current().get(55, 24), Some(Glyph::SPACE));
    }

    #[test]
    fn compose_keeps_frame_border() {
        let mut store = FrameStore::new();
        let room = Room { objects: vec![], label: (0, 0) };
        let actor = Walker { at: (0, 0), was: (0, 0) };
        compose(&mut store, &room, &actor, &empty_bar());
        let frame = Canvas::decorated(130, 40);
        assert_eq!(store.current().row(0), frame.row(0));
        assert_eq!(store.current().row(3), frame.row(3));
        assert_eq!(store.current().row(39), frame.row(39));
    }

    #[test]
    fn render_actor_erases_previous_cell() {
        let mut store = FrameStore::new();
        store.place(0, 0, Glyph::new('@'));
        let actor = Walker { at: (1, 0), was: (0, 0) };
        render_actor(&mut store, &empty_room(), &actor);
        assert_eq!(store.current().get(65, 21), Some(Glyph::SPACE));
        assert_eq!(store.current().get(66, 21), Some(Glyph::new('@')));
    }

    #[test]
    fn render_actor_without_move_keeps_actor() {
        let mut store = FrameStore::new();
        let actor = Walker { at: (2, 2), was: (2, 2) };
        render_actor(&mut store, &empty_room(), &actor);
        assert_eq!(store.current().get(67, 23), Some(Glyph::new('@')));
    }

    #[test]
    fn render_actor_restores_walkable_object() {
        let mut store = FrameStore::new();
        let room = Room {
            objects: vec![Placement::new(0, 0, Glyph::new('"'))],
            label: (0, 0),
        };
        let mut actor = Walker { at: (0, 0), was: (0, 0) };
        compose(&mut store, &room, &actor, &empty_bar());
        assert_eq!(store.current().get(65, 21), Some(Glyph::new('@')));

        actor.at = (1, 0);
        render_actor(&mut store, &room, &actor);
        assert_eq!(store.current().get(65, 21), Some(Glyph::new('"')));
        assert_eq!(store.current().get(66, 21), Some(Glyph::new('@')));
    }

    #[test]
    fn render_actor_restores_label_cell() {
        let mut store = FrameStore::new();
        let room = Room { objects: vec![], label: (4, 2) };
        let mut actor = Walker { at: (-40, 15), was: (-40, 15) };
        compose(&mut store, &room, &actor, &empty_bar());

        actor.was = actor.at;
        actor.at = (-39, 15);
        render_actor(&mut store, &room, &actor);
        assert_eq!(store.current().get(25, 36), Some(Glyph::new('4')));
    }

    #[test]
    fn render_actor_matches_recompose() {
        let room = Room {
            objects: vec![
                Placement::new(3, 1, Glyph::new('♣')),
                Placement::new(2, 1, Glyph::new('"')),
            ],
            label: (1, 1),
        };
        let mut actor = Walker { at: (2, 1), was: (2, 1) };
        let mut cheap = FrameStore::new();
        compose(&mut cheap, &room, &actor, &empty_bar());

        actor.at = (2, 2);
        render_actor(&mut cheap, &room, &actor);
        let mut full = FrameStore::new();
        compose(&mut full, &room, &actor, &empty_bar());
        assert_eq!(cheap.current(), full.current());
    }

    #[test]
    fn hotbar_items_and_selection() {
        let mut store = FrameStore::new();
        let mut bar = empty_bar();
        bar.slots[0] = Some(Glyph::new('★'));
        bar.slots[4] = Some(Glyph::new('%'));
        bar.selected = 4;
        render_hotbar(&mut store, &bar);

        let c = store.current();
        assert_eq!(c.get(57, 2), Some(Glyph::new('★')));
        assert_eq!(c.get(65, 2), Some(Glyph::new('%')));
        assert_eq!(c.get(59, 2), Some(Glyph::SPACE));
        assert_eq!(c.get(65, 1), Some(Glyph::SELECTION));
        assert_eq!(c.get(57, 1), Some(Glyph::SPACE));
    }

    #[test]
    fn hotbar_slots_interleave_with_markers() {
        let mut store = FrameStore::new();
        render_hotbar(&mut store, &empty_bar());
        let c = store.current();
        // Slots sit on odd columns; the decorative markers on even ones survive.
        for col in (56..=74).step_by(2) {
            assert_eq!(c.get(col, 2), Some(Glyph::MARKER), "col {col}");
        }
    }

    #[test]
    fn hotbar_selection_out_of_range_marks_nothing() {
        let mut store = FrameStore::new();
        let bar = Bar { slots: vec![None; 9], selected: 42 };
        render_hotbar(&mut store, &bar);
        assert!(!store.current().row_string(1).contains('△'));
    }
}
