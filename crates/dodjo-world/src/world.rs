//! World — a square grid of chunks around a central spawn.
//!
//! Chunks are built on first visit and kept for the rest of the session, so
//! each decoration file is read at most once per chunk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use dodjo_term::input::Direction;
use thiserror::Error;

use crate::chunk::{Chunk, ChunkCoord, ChunkKind};

/// Largest grid side. Chunk coordinates are drawn as one digit each.
pub const MAX_SIZE: u8 = 10;

/// Grid side used when none is configured.
pub const DEFAULT_SIZE: u8 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    #[error("world size must be between 1 and {max}, got {0}", max = MAX_SIZE)]
    Size(u8),
}

#[derive(Debug)]
pub struct World {
    assets: PathBuf,
    size: u8,
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl World {
    /// A `size × size` world whose decorations live in `assets`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::Size`] unless `1 <= size <= MAX_SIZE`.
    pub fn new(assets: impl Into<PathBuf>, size: u8) -> Result<Self, WorldError> {
        if size == 0 || size > MAX_SIZE {
            return Err(WorldError::Size(size));
        }
        Ok(Self {
            assets: assets.into(),
            size,
            chunks: HashMap::new(),
        })
    }

    #[must_use]
    pub const fn size(&self) -> u8 {
        self.size
    }

    #[must_use]
    pub fn assets(&self) -> &Path {
        &self.assets
    }

    /// The centre chunk, where the player starts.
    #[must_use]
    pub const fn spawn(&self) -> ChunkCoord {
        ChunkCoord::new(self.size / 2, self.size / 2)
    }

    /// The chunk next to `coord` in `dir`, if inside the world.
    #[must_use]
    pub fn neighbour(&self, coord: ChunkCoord, dir: Direction) -> Option<ChunkCoord> {
        coord.neighbour(dir, self.size)
    }

    /// The chunk at `coord`, loading it on first access.
    pub fn chunk(&mut self, coord: ChunkCoord) -> &Chunk {
        let kind = if coord == self.spawn() {
            ChunkKind::Spawn
        } else {
            ChunkKind::Default
        };
        let assets = &self.assets;
        self.chunks
            .entry(coord)
            .or_insert_with(|| Chunk::load(coord, kind, assets))
    }

    /// Number of chunks loaded so far.
    #[must_use]
    pub fn loaded(&self) -> usize {
        self.chunks.len()
    }
}
