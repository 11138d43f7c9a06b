//! Player-visible mutators: picking up, placing, buying
//!
//! Legality is the input validator's job; these assume pre-checked calls
//! and quietly do nothing when preconditions are absent.

use crate::core::config::{CASTLE_COST, UNIT_COST};
use crate::core::types::PlayerId;
use crate::map::hex::HexCoord;
use crate::map::tile::{Tile, TileContent, UnitType};
use crate::state::GameState;

/// Lift the content off a tile into the held slot
pub fn pickup(state: &mut GameState, coord: HexCoord) {
    if let Some(tile) = state.map.get_mut(&coord) {
        state.held = tile.content.take();
    }
}

/// Place the held content on a tile the active kingdom already owns
///
/// Clearing a tree costs the placed unit its action for this turn.
pub fn place_own(state: &mut GameState, coord: HexCoord) {
    let clearing_tree = matches!(
        state.map.get(&coord).and_then(|t| t.content),
        Some(TileContent::Tree)
    );
    if clearing_tree {
        if let Some(TileContent::Unit { can_act, .. }) = state.held.as_mut() {
            *can_act = false;
        }
    }
    state.place_held(coord);
}

/// Merge the held unit with the unit standing on `coord`
///
/// The partner that is not a peasant is the one that upgrades a tier; the
/// result keeps the board unit's remaining action.
pub fn combine_units(state: &mut GameState, coord: HexCoord) {
    let Some(TileContent::Unit {
        unit_type: board_type,
        can_act: board_can_act,
    }) = state.map.get(&coord).and_then(|t| t.content)
    else {
        return;
    };
    let Some(TileContent::Unit {
        unit_type: held_type,
        ..
    }) = state.held
    else {
        return;
    };
    let upgrading = if board_type == UnitType::Peasant {
        held_type
    } else {
        board_type
    };
    let merged = upgrading.upgraded().unwrap_or(upgrading);
    state.held = Some(TileContent::Unit {
        unit_type: merged,
        can_act: board_can_act,
    });
    state.place_held(coord);
}

/// Buy a peasant: deduct the cost and hold it for placement
pub fn buy_peasant(state: &mut GameState) {
    let Some(active) = state.active_kingdom else {
        return;
    };
    if let Some(kingdom) = state.kingdoms.get_mut(&active) {
        kingdom.savings -= UNIT_COST;
    }
    state.held = Some(TileContent::Unit {
        unit_type: UnitType::Peasant,
        can_act: true,
    });
}

/// Buy a castle: deduct the cost and hold it for placement
pub fn buy_castle(state: &mut GameState) {
    let Some(active) = state.active_kingdom else {
        return;
    };
    if let Some(kingdom) = state.kingdoms.get_mut(&active) {
        kingdom.savings -= CASTLE_COST;
    }
    state.held = Some(TileContent::Castle);
}

/// Add a land tile for `player` at `coord`
pub fn place_tile(state: &mut GameState, coord: HexCoord, player: PlayerId) {
    state.map.insert(Tile::new(coord, player));
}
