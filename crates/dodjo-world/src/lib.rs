//! # dodjo-world — what the renderer draws
//!
//! Game-side collaborators for `dodjo-term`. Each one implements the narrow
//! provider trait the renderer composes from:
//!
//! - **[`item`]** — `Item` (position, kind, glyph) shared by chunks and the hotbar
//! - **[`decoration`]** — reader for `.dodjo` decoration files
//! - **[`chunk`]** — one screen-sized region of the world (`ContextView`)
//! - **[`world`]** — the grid of chunks, loaded lazily and cached
//! - **[`hotbar`]** — nine inventory slots with a selection (`HotbarView`)
//! - **[`player`]** — the controlled actor and its movement rules (`ActorView`)

pub mod chunk;
pub mod decoration;
pub mod hotbar;
pub mod item;
pub mod player;
pub mod world;

pub use chunk::{Chunk, ChunkCoord, ChunkKind};
pub use hotbar::Hotbar;
pub use item::{Item, ItemKind};
pub use player::{MoveOutcome, Player};
pub use world::{World, WorldError};
