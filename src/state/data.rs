/// Shared data structures for the challenge state
///
/// These structs represent the data model that flows between
/// the round generator, the selection controller and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of tiles shown in every round
pub const TILE_COUNT: usize = 6;

/// Identity of a picture in the catalog.
///
/// Only ever compared for equality; the URI it resolves to lives in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageKey {
    Img1,
    Img2,
    Img3,
    Img4,
    Img5,
}

impl ImageKey {
    /// Every key, in catalog order
    pub const ALL: [ImageKey; 5] = [
        ImageKey::Img1,
        ImageKey::Img2,
        ImageKey::Img3,
        ImageKey::Img4,
        ImageKey::Img5,
    ];

    /// Position of this key in [`ImageKey::ALL`]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageKey::Img1 => "img1",
            ImageKey::Img2 => "img2",
            ImageKey::Img3 => "img3",
            ImageKey::Img4 => "img4",
            ImageKey::Img5 => "img5",
        }
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single tile of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Which picture this tile shows
    pub key: ImageKey,
    /// Where the picture comes from (http(s) URL, file:// URL or plain path)
    pub uri: String,
}

impl Tile {
    /// Basic alt text for a tile at `position` ("tile 1" .. "tile 6")
    pub fn alt(position: usize) -> String {
        format!("tile {}", position + 1)
    }
}

/// One instance of the puzzle: six tiles, five identities, one of them twice.
///
/// A round is never edited after generation; a reset replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    tiles: [Tile; TILE_COUNT],
}

impl Round {
    pub fn new(tiles: [Tile; TILE_COUNT]) -> Self {
        Self { tiles }
    }

    pub fn tiles(&self) -> &[Tile; TILE_COUNT] {
        &self.tiles
    }

    pub fn tile(&self, position: usize) -> Option<&Tile> {
        self.tiles.get(position)
    }

    /// Identity keys in grid order
    pub fn keys(&self) -> [ImageKey; TILE_COUNT] {
        std::array::from_fn(|i| self.tiles[i].key)
    }

    /// The identity that appears twice, if the round is well formed
    pub fn duplicate(&self) -> Option<ImageKey> {
        let keys = self.keys();
        keys.iter()
            .enumerate()
            .find(|&(i, key)| keys[i + 1..].contains(key))
            .map(|(_, key)| *key)
    }

    /// Positions of the two tiles sharing the duplicated identity
    pub fn matching_pair(&self) -> Option<(usize, usize)> {
        let key = self.duplicate()?;
        let mut positions = self
            .tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.key == key)
            .map(|(i, _)| i);
        Some((positions.next()?, positions.next()?))
    }
}
