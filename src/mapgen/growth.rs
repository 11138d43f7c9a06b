//! Random-walk tile growth with backtracking
//!
//! Tiles are placed one at a time for players that still have quota left.
//! The walk continues from a weighted random pick among the current tile's
//! free neighbor coordinates and backtracks through the placement history
//! whenever it walls itself in.

use ahash::AHashMap;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::types::PlayerId;
use crate::map::hex::HexCoord;
use crate::map::tile::Tile;
use crate::map::HexMap;
use crate::state::GameState;

/// Grow `land_mass` tiles from the origin, reseeding the state RNG first
///
/// Candidate scoring: each free neighbor coordinate scores its own free
/// neighbor count raised to the `density` power, and the next position is a
/// weighted draw over those scores. Positive density favors enclosed spots
/// (clustering), negative density favors open ones (sprawl).
pub(crate) fn generate_tiles(state: &mut GameState, land_mass: u32, density: f32, seed: u64) {
    state.rng = ChaCha8Rng::seed_from_u64(seed);
    state.map = HexMap::new();

    // distribute the land mass evenly; the remainder goes to a random
    // subset, chosen by shuffling the turn order first
    state.players.shuffle(&mut state.rng);
    let player_count = state.players.len() as u32;
    let mut quotas: AHashMap<PlayerId, u32> = AHashMap::new();
    let mut remainder = land_mass % player_count;
    for player in &state.players {
        let extra = if remainder > 0 {
            remainder -= 1;
            1
        } else {
            0
        };
        quotas.insert(player.id, land_mass / player_count + extra);
    }
    let mut remaining: Vec<PlayerId> = state.players.iter().map(|p| p.id).collect();

    let mut next_pos = HexCoord::new(0, 0);
    let mut history: Vec<HexCoord> = Vec::new();
    while !remaining.is_empty() {
        let mut current = next_pos;

        // place a tile for a random player that is still owed tiles
        let pick = state.rng.gen_range(0..remaining.len());
        let player = remaining[pick];
        state.map.insert(Tile::new(current, player));
        let quota = quotas.entry(player).or_insert(0);
        if *quota <= 1 {
            remaining.remove(pick);
        } else {
            *quota -= 1;
        }
        history.push(current);

        // find a position with free neighbors, backtracking if necessary
        let mut usable = state.map.unused_neighbor_coords(current);
        while usable.is_empty() {
            history.pop();
            match history.last() {
                Some(&prev) => {
                    current = prev;
                    usable = state.map.unused_neighbor_coords(prev);
                }
                None => return,
            }
        }

        let scores: Vec<f32> = usable
            .iter()
            .map(|c| (state.map.unused_neighbor_coords(*c).len() as f32).powf(density))
            .collect();
        let score_sum: f32 = scores.iter().sum();
        let random_score = state.rng.gen::<f32>() * score_sum;
        let mut index = 0;
        let mut counted = scores[0];
        while counted < random_score && index + 1 < scores.len() {
            index += 1;
            counted += scores[index];
        }
        next_pos = usable[index];
    }
}
