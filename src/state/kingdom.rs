//! Kingdoms: connected same-player tile groups with shared savings

use serde::{Deserialize, Serialize};

use crate::core::types::{KingdomId, PlayerId};
use crate::map::hex::HexCoord;
use crate::map::tile::TileContent;
use crate::map::HexMap;

/// One economic unit: a connected set of same-player tiles
///
/// The tile list preserves insertion order and holds no duplicates, so
/// "first empty tile" style choices stay reproducible across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kingdom {
    pub id: KingdomId,
    pub player: PlayerId,
    tiles: Vec<HexCoord>,
    pub savings: i32,
    pub was_active_in_current_turn: bool,
    pub done_moving: bool,
}

impl Kingdom {
    pub fn new(id: KingdomId, player: PlayerId) -> Self {
        Self {
            id,
            player,
            tiles: Vec::new(),
            savings: 0,
            was_active_in_current_turn: false,
            done_moving: false,
        }
    }

    pub fn tiles(&self) -> &[HexCoord] {
        &self.tiles
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        self.tiles.contains(&coord)
    }

    pub fn add_tile(&mut self, coord: HexCoord) {
        if !self.tiles.contains(&coord) {
            self.tiles.push(coord);
        }
    }

    pub fn remove_tile(&mut self, coord: HexCoord) {
        self.tiles.retain(|c| *c != coord);
    }

    /// Empty the tile list, returning the previous contents
    pub fn take_tiles(&mut self) -> Vec<HexCoord> {
        std::mem::take(&mut self.tiles)
    }

    /// Money earned per turn: one per tile not blocked by a tree
    pub fn income(&self, map: &HexMap) -> i32 {
        self.tiles
            .iter()
            .filter(|c| {
                !map.get(c)
                    .and_then(|t| t.content)
                    .map_or(false, |content| content.is_tree())
            })
            .count() as i32
    }

    /// Total upkeep owed to units standing on kingdom tiles
    pub fn salaries(&self, map: &HexMap) -> i32 {
        self.tiles
            .iter()
            .filter_map(|c| map.get(c).and_then(|t| t.content.as_ref()))
            .filter_map(|content| match content {
                TileContent::Unit { unit_type, .. } => Some(unit_type.salary()),
                _ => None,
            })
            .sum()
    }
}
