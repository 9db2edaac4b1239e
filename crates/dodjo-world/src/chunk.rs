//! Chunks — one screen of the world.
//!
//! A chunk is the region drawn between two context transitions: its objects
//! fill the canvas interior and its grid coordinates fill the label. Objects
//! come from one of two decoration files depending on the chunk's kind.

use std::path::Path;

use dodjo_term::compose::ContextView;
use dodjo_term::frame::Placement;
use dodjo_term::input::Direction;

use crate::decoration;
use crate::item::Item;

/// Decoration file for the spawn chunk.
pub const SPAWN_FILE: &str = "chunk_spawn.dodjo";

/// Decoration file for every other chunk.
pub const DEFAULT_FILE: &str = "chunk_default.dodjo";

/// Position of a chunk in the world grid. `y` grows northward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    pub x: u8,
    pub y: u8,
}

impl ChunkCoord {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// The adjacent coordinate in `dir`, if it stays inside a `size × size` grid.
    #[must_use]
    pub fn neighbour(self, dir: Direction, size: u8) -> Option<Self> {
        let (x, y) = match dir {
            Direction::North => (Some(self.x), self.y.checked_add(1)),
            Direction::South => (Some(self.x), self.y.checked_sub(1)),
            Direction::East => (self.x.checked_add(1), Some(self.y)),
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
        };
        let (x, y) = (x?, y?);
        (x < size && y < size).then_some(Self { x, y })
    }
}

/// Which decoration set a chunk is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkKind {
    Spawn,
    Default,
}

impl ChunkKind {
    /// File name of this kind's decorations inside the assets directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Spawn => SPAWN_FILE,
            Self::Default => DEFAULT_FILE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    coord: ChunkCoord,
    kind: ChunkKind,
    objects: Vec<Item>,
}

impl Chunk {
    #[must_use]
    pub const fn new(coord: ChunkCoord, kind: ChunkKind, objects: Vec<Item>) -> Self {
        Self {
            coord,
            kind,
            objects,
        }
    }

    /// Build a chunk from its kind's decoration file under `assets`.
    ///
    /// A missing or unreadable file yields a chunk with no objects.
    #[must_use]
    pub fn load(coord: ChunkCoord, kind: ChunkKind, assets: &Path) -> Self {
        let objects = decoration::load_or_empty(&assets.join(kind.file_name()));
        tracing::debug!(x = coord.x, y = coord.y, ?kind, objects = objects.len(), "chunk loaded");
        Self::new(coord, kind, objects)
    }

    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    #[must_use]
    pub const fn kind(&self) -> ChunkKind {
        self.kind
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.objects
    }

    /// Whether a solid object occupies `(x, y)`.
    #[must_use]
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.objects
            .iter()
            .any(|item| item.kind.is_solid() && item.is_at(x, y))
    }
}

impl ContextView for Chunk {
    fn objects(&self) -> impl Iterator<Item = Placement> + '_ {
        self.objects.iter().map(Item::placement)
    }

    fn label(&self) -> (u8, u8) {
        (self.coord.x, self.coord.y)
    }
}
