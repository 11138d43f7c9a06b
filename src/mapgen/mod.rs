//! Procedural map generation
//!
//! Grows the land mass, builds the initial kingdom partition, then dresses
//! the map: vegetation, one capital per kingdom, turn order sorted by income
//! and starting savings. If the growth walk leaves any player without a
//! kingdom (all their tiles isolated), generation retries with a new seed
//! derived deterministically from the previous one.

pub mod growth;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::{MapParams, DEFAULT_VEGETATION_DENSITY, STARTING_SAVINGS_PER_TILE};
use crate::core::error::{GameError, Result};
use crate::core::types::PlayerId;
use crate::kingdoms::{self, capital};
use crate::map::hex::HexCoord;
use crate::map::tile::TileContent;
use crate::state::{GameState, Player};

use ahash::AHashMap;
use rand::Rng;

/// Build a fresh game state and generate its map
///
/// A land mass of zero yields an empty map (useful for tests that construct
/// maps by hand). The seed defaults to wall-clock time when absent.
pub fn initialize(players: Vec<Player>, params: &MapParams) -> Result<GameState> {
    if players.is_empty() {
        return Err(GameError::Configuration(
            "at least one player is required".to_string(),
        ));
    }
    if let Some(density) = params.vegetation_density {
        if !(0.0..=1.0).contains(&density) {
            return Err(GameError::Configuration(format!(
                "vegetation density {density} outside 0..=1"
            )));
        }
    }
    let seed = params.seed.unwrap_or_else(wall_clock_seed);
    let mut state = GameState::new(players, seed);
    if params.land_mass == 0 {
        return Ok(state);
    }
    if params.land_mass < 2 * state.players.len() as u32 {
        return Err(GameError::Configuration(format!(
            "land mass {} cannot give {} players a kingdom",
            params.land_mass,
            state.players.len()
        )));
    }
    let vegetation = params
        .vegetation_density
        .unwrap_or(DEFAULT_VEGETATION_DENSITY);
    generate(&mut state, params.land_mass, params.density, vegetation, seed);
    Ok(state)
}

fn wall_clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn generate(state: &mut GameState, land_mass: u32, density: f32, vegetation: f32, mut seed: u64) {
    loop {
        growth::generate_tiles(state, land_mass, density, seed);
        kingdoms::create_initial_kingdoms(state);
        // derive the next candidate seed from the current one, so retries
        // stay reproducible
        state.rng = ChaCha8Rng::seed_from_u64(seed);
        seed = state.rng.next_u64();
        if every_player_has_a_kingdom(state) {
            break;
        }
        tracing::info!(next_seed = seed, "a player received no kingdom, regenerating");
    }
    tracing::info!(
        tiles = state.map.len(),
        kingdoms = state.kingdoms.len(),
        seed = state.seed,
        "map generated"
    );
    create_trees(state, vegetation);
    create_capitals(state);
    sort_players_by_income(state);
    create_starting_money(state);
}

fn every_player_has_a_kingdom(state: &GameState) -> bool {
    state
        .players
        .iter()
        .all(|p| state.player_has_kingdom(p.id))
}

fn create_trees(state: &mut GameState, vegetation: f32) {
    let coords: Vec<HexCoord> = state.map.coords().collect();
    for coord in coords {
        if state.rng.gen::<f32>() <= vegetation {
            if let Some(tile) = state.map.get_mut(&coord) {
                tile.content = Some(TileContent::Tree);
            }
        }
    }
}

fn create_capitals(state: &mut GameState) {
    let mut ids: Vec<_> = state.kingdoms.keys().copied().collect();
    ids.sort();
    for id in ids {
        capital::assign_capital(state, id);
    }
}

/// Order players ascending by total income; the weakest start moves first
fn sort_players_by_income(state: &mut GameState) {
    let incomes: AHashMap<PlayerId, i32> = state
        .players
        .iter()
        .map(|p| (p.id, state.player_income(p.id)))
        .collect();
    state
        .players
        .sort_by_key(|p| incomes.get(&p.id).copied().unwrap_or(0));
}

/// Seed savings: 5 per tile, minus one round of income for everyone who is
/// not the first mover (they get the credit when their own turn starts)
fn create_starting_money(state: &mut GameState) {
    let active = state.active_player_id();
    let map = &state.map;
    for kingdom in state.kingdoms.values_mut() {
        let mut savings = kingdom.tiles().len() as i32 * STARTING_SAVINGS_PER_TILE;
        if kingdom.player != active {
            savings -= kingdom.income(map);
        }
        kingdom.savings = savings;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn players(n: u32) -> Vec<Player> {
        (0..n).map(|i| Player::new(PlayerId(i))).collect()
    }

    #[test]
    fn test_zero_players_is_a_configuration_error() {
        let result = initialize(Vec::new(), &MapParams::default());
        assert!(matches!(result, Err(GameError::Configuration(_))));
    }

    #[test]
    fn test_zero_land_mass_yields_empty_map() {
        let params = MapParams {
            land_mass: 0,
            seed: Some(1),
            ..MapParams::default()
        };
        let state = initialize(players(2), &params).unwrap();
        assert!(state.map.is_empty());
        assert!(state.kingdoms.is_empty());
    }

    #[test]
    fn test_land_mass_below_two_per_player_is_rejected() {
        let params = MapParams {
            land_mass: 3,
            seed: Some(1),
            ..MapParams::default()
        };
        assert!(initialize(players(2), &params).is_err());
    }

    #[test]
    fn test_out_of_range_vegetation_is_rejected() {
        let params = MapParams {
            vegetation_density: Some(1.5),
            seed: Some(1),
            ..MapParams::default()
        };
        assert!(initialize(players(2), &params).is_err());
    }

    #[test]
    fn test_every_kingdom_gets_exactly_one_capital() {
        let params = MapParams {
            land_mass: 40,
            seed: Some(77),
            vegetation_density: Some(0.0),
            ..MapParams::default()
        };
        let state = initialize(players(3), &params).unwrap();
        for kingdom in state.kingdoms.values() {
            let capitals = kingdom
                .tiles()
                .iter()
                .filter(|c| {
                    matches!(
                        state.map.get(c).and_then(|t| t.content.as_ref()),
                        Some(TileContent::Capital)
                    )
                })
                .count();
            assert_eq!(capitals, 1, "kingdom {:?}", kingdom.id);
        }
    }

    #[test]
    fn test_first_player_has_lowest_income() {
        let params = MapParams {
            land_mass: 60,
            seed: Some(5),
            ..MapParams::default()
        };
        let state = initialize(players(4), &params).unwrap();
        let incomes: Vec<i32> = state
            .players
            .iter()
            .map(|p| state.player_income(p.id))
            .collect();
        for pair in incomes.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_starting_savings_rule() {
        let params = MapParams {
            land_mass: 30,
            seed: Some(11),
            vegetation_density: Some(0.0),
            ..MapParams::default()
        };
        let state = initialize(players(2), &params).unwrap();
        let first = state.active_player_id();
        for kingdom in state.kingdoms.values() {
            let base = kingdom.tiles().len() as i32 * STARTING_SAVINGS_PER_TILE;
            let expected = if kingdom.player == first {
                base
            } else {
                base - kingdom.income(&state.map)
            };
            assert_eq!(kingdom.savings, expected);
        }
    }
}
