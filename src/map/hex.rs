//! Axial hex coordinates and the 6-direction neighborhood

use serde::{Deserialize, Serialize};

/// Axial hex coordinate (q, r system)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HexCoord {
    pub q: i32, // Column
    pub r: i32, // Row
}

impl HexCoord {
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Get all 6 adjacent hexes
    pub fn neighbors(&self) -> [HexCoord; 6] {
        [
            HexCoord::new(self.q + 1, self.r),
            HexCoord::new(self.q + 1, self.r - 1),
            HexCoord::new(self.q, self.r - 1),
            HexCoord::new(self.q - 1, self.r),
            HexCoord::new(self.q - 1, self.r + 1),
            HexCoord::new(self.q, self.r + 1),
        ]
    }

    /// Whether `other` is one of this coordinate's 6 neighbors
    pub fn is_adjacent(&self, other: &HexCoord) -> bool {
        self.neighbors().contains(other)
    }

    /// Distance in hex steps using axial coordinate formula
    pub fn distance(&self, other: &HexCoord) -> i32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_coord_distance() {
        let a = HexCoord::new(0, 0);
        let b = HexCoord::new(2, 1);
        assert_eq!(a.distance(&b), 3);

        let c = HexCoord::new(0, 0);
        let d = HexCoord::new(0, 3);
        assert_eq!(c.distance(&d), 3);
    }

    #[test]
    fn test_hex_neighbors() {
        let center = HexCoord::new(0, 0);
        let neighbors = center.neighbors();
        assert_eq!(neighbors.len(), 6);

        // All neighbors should be distance 1 away
        for n in neighbors {
            assert_eq!(center.distance(&n), 1);
            assert!(center.is_adjacent(&n));
        }
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let a = HexCoord::new(3, -2);
        for b in a.neighbors() {
            assert!(b.is_adjacent(&a));
        }
        assert!(!a.is_adjacent(&HexCoord::new(5, 5)));
        assert!(!a.is_adjacent(&a));
    }
}
