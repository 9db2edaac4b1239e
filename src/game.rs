// SPDX-License-Identifier: MIT
//
// Game — wires the world to the render loop.
//
// Each decoded input is routed to the player or the hotbar, and the outcome
// picks the cheapest redraw that keeps the canvas correct:
//
//   step inside the chunk    → render_actor (two cells)
//   step into a neighbour    → compose (full rebuild, diffed down to changes)
//   slot select / drop       → render_hotbar
//   refused step, no-op key  → nothing

use dodjo_term::compose::{self, HotbarView};
use dodjo_term::event_loop::{App, Repaint};
use dodjo_term::frame::FrameStore;
use dodjo_term::glyph::Glyph;
use dodjo_term::input::Input;
use dodjo_world::{Item, ItemKind, MoveOutcome, Player, World};

/// Item every player starts with.
const STARTER_GLYPH: char = '★';

pub struct Game {
    world: World,
    player: Player,
}

impl Game {
    /// Start a game at the world's spawn chunk with the starter item.
    pub fn new(world: World) -> Self {
        let mut player = Player::new(world.spawn());
        let starter = Item::new(0, 0, ItemKind::Decoration, Glyph::new(STARTER_GLYPH));
        if let Err(item) = player.hotbar_mut().pickup(starter) {
            tracing::warn!(glyph = %item.glyph, "hotbar full, starter item discarded");
        }
        Self { world, player }
    }

    #[cfg(test)]
    const fn player(&self) -> &Player {
        &self.player
    }

    fn compose(&mut self, store: &mut FrameStore) {
        let chunk = self.world.chunk(self.player.chunk());
        compose::compose(store, chunk, &self.player, self.player.hotbar());
    }
}

impl App for Game {
    fn start(&mut self, store: &mut FrameStore) {
        let spawn = self.player.chunk();
        tracing::info!(x = spawn.x, y = spawn.y, size = self.world.size(), "game started");
        self.compose(store);
    }

    fn on_input(&mut self, input: Input, store: &mut FrameStore) -> Repaint {
        match input {
            Input::Move { dir, .. } => match self.player.step(dir, &mut self.world) {
                MoveOutcome::MovedWithinContext => {
                    let chunk = self.world.chunk(self.player.chunk());
                    compose::render_actor(store, chunk, &self.player);
                    Repaint::ACTOR
                }
                MoveOutcome::MovedAcrossContext => {
                    self.compose(store);
                    Repaint::CONTEXT
                }
                MoveOutcome::Rejected => Repaint::empty(),
            },
            Input::SelectSlot(slot) => {
                if !self.player.hotbar_mut().select(usize::from(slot)) {
                    return Repaint::empty();
                }
                compose::render_hotbar(store, self.player.hotbar());
                Repaint::HOTBAR
            }
            Input::Drop => {
                let slot = self.player.hotbar().selected();
                let Some(item) = self.player.hotbar_mut().drop_selected() else {
                    return Repaint::empty();
                };
                tracing::debug!(slot, glyph = %item.glyph, "item dropped");
                compose::render_hotbar(store, self.player.hotbar());
                Repaint::HOTBAR
            }
        }
    }
}
