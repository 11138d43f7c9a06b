//! Tiles and the closed set of things that can stand on them

use serde::{Deserialize, Serialize};

use crate::core::types::{KingdomId, PlayerId};
use crate::map::hex::HexCoord;

/// Unit tiers, weakest to strongest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    Peasant,
    Spearman,
    Knight,
    Baron,
}

impl UnitType {
    /// Offensive/defensive strength of this tier
    pub fn strength(&self) -> u8 {
        match self {
            Self::Peasant => 1,
            Self::Spearman => 2,
            Self::Knight => 3,
            Self::Baron => 4,
        }
    }

    /// Upkeep owed per turn
    pub fn salary(&self) -> i32 {
        match self {
            Self::Peasant => 2,
            Self::Spearman => 6,
            Self::Knight => 18,
            Self::Baron => 54,
        }
    }

    /// Next tier up, or `None` at the ceiling
    pub fn upgraded(&self) -> Option<UnitType> {
        match self {
            Self::Peasant => Some(Self::Spearman),
            Self::Spearman => Some(Self::Knight),
            Self::Knight => Some(Self::Baron),
            Self::Baron => None,
        }
    }
}

/// Content occupying a tile; an empty tile carries `None` instead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileContent {
    Tree,
    Unit { unit_type: UnitType, can_act: bool },
    Capital,
    Castle,
}

impl TileContent {
    /// Defensive strength this content contributes to its tile
    pub fn strength(&self) -> u8 {
        match self {
            Self::Tree => 0,
            Self::Unit { unit_type, .. } => unit_type.strength(),
            Self::Capital => 1,
            Self::Castle => 2,
        }
    }

    pub fn is_tree(&self) -> bool {
        matches!(self, Self::Tree)
    }

    pub fn is_unit(&self) -> bool {
        matches!(self, Self::Unit { .. })
    }

    pub fn is_capital(&self) -> bool {
        matches!(self, Self::Capital)
    }
}

/// A single hex tile of land
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub coord: HexCoord,
    pub player: PlayerId,
    pub kingdom: Option<KingdomId>,
    pub content: Option<TileContent>,
}

impl Tile {
    pub fn new(coord: HexCoord, player: PlayerId) -> Self {
        Self {
            coord,
            player,
            kingdom: None,
            content: None,
        }
    }
}
