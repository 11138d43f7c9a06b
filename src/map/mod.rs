//! Sparse hex map storage and neighbor queries
//!
//! Tiles live in a hash map keyed by coordinate; a coordinate with no entry
//! is water. A side list remembers insertion order so that every loop which
//! draws from the seeded RNG walks the map in a reproducible order — hash
//! map iteration order alone is unspecified and would break same-seed
//! determinism.

pub mod hex;
pub mod tile;

use ahash::AHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub use hex::HexCoord;
pub use tile::{Tile, TileContent, UnitType};

/// The game map: a sparse, insertion-ordered collection of hex tiles
#[derive(Debug, Clone, Default)]
pub struct HexMap {
    tiles: AHashMap<HexCoord, Tile>,
    order: Vec<HexCoord>,
}

/// Serializes as a tile sequence in insertion order; composite map keys do
/// not survive JSON, and the sequence keeps snapshots deterministic.
impl Serialize for HexMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for HexMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tiles = Vec::<Tile>::deserialize(deserializer)?;
        let mut map = HexMap::new();
        for tile in tiles {
            map.insert(tile);
        }
        Ok(map)
    }
}

impl HexMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of land tiles on the map
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Add a tile; replaces any tile already at its coordinate
    pub fn insert(&mut self, tile: Tile) {
        if !self.tiles.contains_key(&tile.coord) {
            self.order.push(tile.coord);
        }
        self.tiles.insert(tile.coord, tile);
    }

    /// Get a tile at the given coordinate (`None` = water)
    pub fn get(&self, coord: &HexCoord) -> Option<&Tile> {
        self.tiles.get(coord)
    }

    /// Get a mutable tile at the given coordinate
    pub fn get_mut(&mut self, coord: &HexCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(coord)
    }

    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.tiles.contains_key(coord)
    }

    /// All tile coordinates in insertion order
    pub fn coords(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.order.iter().copied()
    }

    /// All tiles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.order.iter().filter_map(move |c| self.tiles.get(c))
    }

    /// Existing tiles adjacent to `coord`
    pub fn neighbor_tiles(&self, coord: HexCoord) -> impl Iterator<Item = &Tile> + '_ {
        coord.neighbors().into_iter().filter_map(move |c| self.get(&c))
    }

    /// Neighbor coordinates of `coord` that hold no tile yet
    ///
    /// Used by the growth walk to find frontier positions.
    pub fn unused_neighbor_coords(&self, coord: HexCoord) -> Vec<HexCoord> {
        coord
            .neighbors()
            .into_iter()
            .filter(|c| !self.contains(c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PlayerId;

    #[test]
    fn test_insert_and_lookup() {
        let mut map = HexMap::new();
        let coord = HexCoord::new(1, -1);
        map.insert(Tile::new(coord, PlayerId(0)));

        assert_eq!(map.len(), 1);
        assert!(map.contains(&coord));
        assert!(map.get(&HexCoord::new(0, 0)).is_none());
        assert_eq!(map.get(&coord).unwrap().player, PlayerId(0));
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let mut map = HexMap::new();
        let coords = [
            HexCoord::new(0, 0),
            HexCoord::new(5, -2),
            HexCoord::new(-3, 1),
            HexCoord::new(1, 1),
        ];
        for c in coords {
            map.insert(Tile::new(c, PlayerId(0)));
        }

        let seen: Vec<HexCoord> = map.coords().collect();
        assert_eq!(seen, coords);
        let tiles: Vec<HexCoord> = map.iter().map(|t| t.coord).collect();
        assert_eq!(tiles, coords);
    }

    #[test]
    fn test_reinsert_keeps_single_entry() {
        let mut map = HexMap::new();
        let coord = HexCoord::new(0, 0);
        map.insert(Tile::new(coord, PlayerId(0)));
        map.insert(Tile::new(coord, PlayerId(1)));

        assert_eq!(map.len(), 1);
        assert_eq!(map.coords().count(), 1);
        assert_eq!(map.get(&coord).unwrap().player, PlayerId(1));
    }

    #[test]
    fn test_json_round_trip_preserves_order_and_contents() {
        let mut map = HexMap::new();
        let mut occupied = Tile::new(HexCoord::new(2, -1), PlayerId(1));
        occupied.content = Some(TileContent::Tree);
        map.insert(Tile::new(HexCoord::new(0, 0), PlayerId(0)));
        map.insert(occupied);

        let json = serde_json::to_string(&map).unwrap();
        let restored: HexMap = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.len(), 2);
        let coords: Vec<HexCoord> = restored.coords().collect();
        assert_eq!(coords, vec![HexCoord::new(0, 0), HexCoord::new(2, -1)]);
        assert_eq!(
            restored.get(&HexCoord::new(2, -1)).unwrap().content,
            Some(TileContent::Tree)
        );
    }

    #[test]
    fn test_unused_neighbor_coords() {
        let mut map = HexMap::new();
        let center = HexCoord::new(0, 0);
        map.insert(Tile::new(center, PlayerId(0)));
        assert_eq!(map.unused_neighbor_coords(center).len(), 6);

        map.insert(Tile::new(HexCoord::new(1, 0), PlayerId(0)));
        map.insert(Tile::new(HexCoord::new(0, 1), PlayerId(0)));
        assert_eq!(map.unused_neighbor_coords(center).len(), 4);
        assert_eq!(map.neighbor_tiles(center).count(), 2);
    }
}
