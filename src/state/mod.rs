//! The authoritative game state container
//!
//! One exclusively-owned value holds everything: tiles, players, kingdoms,
//! the turn cursor and the seeded RNG. All mutators take `&mut GameState`
//! explicitly; there is no global state and no interior mutability.

pub mod kingdom;

use ahash::AHashMap;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::types::{KingdomId, PlayerId};
use crate::map::HexMap;

pub use kingdom::Kingdom;

/// A participant in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub defeated: bool,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Self {
            id,
            defeated: false,
        }
    }
}

/// The whole game state
///
/// Reproducibility contract: the RNG is seeded once and consumed strictly in
/// call order, so replaying the same operations against the same seed yields
/// bit-for-bit identical state.
#[derive(Debug, Clone)]
pub struct GameState {
    pub map: HexMap,
    /// Players in turn order; generation reorders this list by income
    pub players: Vec<Player>,
    pub kingdoms: AHashMap<KingdomId, Kingdom>,
    /// Index into `players` of whoever is currently acting
    pub active_player_index: usize,
    pub active_kingdom: Option<KingdomId>,
    /// Content picked up and pending placement
    pub held: Option<crate::map::TileContent>,
    pub winner: Option<PlayerId>,
    pub seed: u64,
    pub rng: ChaCha8Rng,
    next_kingdom_id: u32,
}

impl GameState {
    pub fn new(players: Vec<Player>, seed: u64) -> Self {
        Self {
            map: HexMap::new(),
            players,
            kingdoms: AHashMap::new(),
            active_player_index: 0,
            active_kingdom: None,
            held: None,
            winner: None,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            next_kingdom_id: 0,
        }
    }

    pub fn active_player_id(&self) -> PlayerId {
        self.players[self.active_player_index].id
    }

    /// Create a fresh empty kingdom for `player` and return its id
    pub fn allocate_kingdom(&mut self, player: PlayerId) -> KingdomId {
        let id = KingdomId(self.next_kingdom_id);
        self.next_kingdom_id += 1;
        self.kingdoms.insert(id, Kingdom::new(id, player));
        id
    }

    pub fn kingdom(&self, id: KingdomId) -> Option<&Kingdom> {
        self.kingdoms.get(&id)
    }

    pub fn kingdom_mut(&mut self, id: KingdomId) -> Option<&mut Kingdom> {
        self.kingdoms.get_mut(&id)
    }

    pub fn player_has_kingdom(&self, player: PlayerId) -> bool {
        self.kingdoms.values().any(|k| k.player == player)
    }

    /// Total per-turn income over all kingdoms of `player`
    pub fn player_income(&self, player: PlayerId) -> i32 {
        self.kingdoms
            .values()
            .filter(|k| k.player == player)
            .map(|k| k.income(&self.map))
            .sum()
    }

    /// Place the held content onto `coord`, clearing the held slot
    pub fn place_held(&mut self, coord: crate::map::HexCoord) {
        let held = self.held.take();
        if let Some(tile) = self.map.get_mut(&coord) {
            tile.content = held;
        }
    }

    /// Verify the tile/kingdom partition invariants
    ///
    /// Every tile with a kingdom must be listed by exactly that kingdom, a
    /// kingdom's player must match each of its tiles' owners, and no live
    /// kingdom may have fewer than 2 tiles. Cheap enough for tests; not run
    /// on the mutation paths.
    pub fn check_partition(&self) -> Result<()> {
        for tile in self.map.iter() {
            if let Some(kid) = tile.kingdom {
                let kingdom = self.kingdoms.get(&kid).ok_or_else(|| {
                    GameError::InvariantViolation(format!(
                        "tile {:?} references missing kingdom {:?}",
                        tile.coord, kid
                    ))
                })?;
                if kingdom.player != tile.player {
                    return Err(GameError::InvariantViolation(format!(
                        "tile {:?} owner {:?} does not match kingdom {:?} owner {:?}",
                        tile.coord, tile.player, kid, kingdom.player
                    )));
                }
                if !kingdom.contains(tile.coord) {
                    return Err(GameError::InvariantViolation(format!(
                        "tile {:?} missing from kingdom {:?} tile list",
                        tile.coord, kid
                    )));
                }
            }
        }
        for kingdom in self.kingdoms.values() {
            if kingdom.tiles().len() < 2 {
                return Err(GameError::InvariantViolation(format!(
                    "kingdom {:?} has fewer than 2 tiles",
                    kingdom.id
                )));
            }
            for coord in kingdom.tiles() {
                let tile = self.map.get(coord).ok_or_else(|| {
                    GameError::InvariantViolation(format!(
                        "kingdom {:?} lists water coordinate {:?}",
                        kingdom.id, coord
                    ))
                })?;
                if tile.kingdom != Some(kingdom.id) {
                    return Err(GameError::InvariantViolation(format!(
                        "tile {:?} does not point back at kingdom {:?}",
                        coord, kingdom.id
                    )));
                }
            }
        }
        Ok(())
    }
}
