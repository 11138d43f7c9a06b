//! Capital placement heuristics
//!
//! A capital anchors a kingdom's identity across merges and splits. Two
//! call contexts exist: replacing a capital that is about to be lost, and
//! seeding a kingdom that never had one. Neither signals an error when no
//! viable tile exists; the kingdom simply goes without.

use crate::core::types::KingdomId;
use crate::map::hex::HexCoord;
use crate::map::tile::TileContent;
use crate::state::GameState;

/// Pick a new capital tile for the kingdom losing `old_coord`
///
/// Preference order: an empty neighbor tile still in the kingdom, then any
/// empty tile anywhere in the kingdom, then a neighbor that stays connected
/// to the kingdom through some third tile (so the new capital is not
/// stranded once `old_coord` falls). No candidate means no capital.
pub(crate) fn relocate_capital(state: &mut GameState, old_coord: HexCoord) {
    let Some(kingdom_id) = state.map.get(&old_coord).and_then(|t| t.kingdom) else {
        return;
    };
    let mut target = old_coord.neighbors().into_iter().find(|c| {
        state
            .map
            .get(c)
            .map_or(false, |t| t.kingdom == Some(kingdom_id) && t.content.is_none())
    });
    if target.is_none() {
        if let Some(kingdom) = state.kingdoms.get(&kingdom_id) {
            target = kingdom
                .tiles()
                .iter()
                .copied()
                .find(|c| state.map.get(c).map_or(false, |t| t.content.is_none()));
        }
    }
    if target.is_none() {
        target = old_coord.neighbors().into_iter().find(|c| {
            state
                .map
                .get(c)
                .map_or(false, |t| t.kingdom == Some(kingdom_id))
                && c.neighbors().into_iter().any(|third| {
                    third != old_coord
                        && state
                            .map
                            .get(&third)
                            .map_or(false, |t| t.kingdom == Some(kingdom_id))
                })
        });
    }
    if let Some(coord) = target {
        if let Some(tile) = state.map.get_mut(&coord) {
            tile.content = Some(TileContent::Capital);
        }
    }
}

/// Give a kingdom with no prior capital one
///
/// Any empty tile wins; with none available the first tile is commandeered,
/// overwriting whatever stood on it.
pub(crate) fn assign_capital(state: &mut GameState, kingdom_id: KingdomId) {
    let Some(kingdom) = state.kingdoms.get(&kingdom_id) else {
        return;
    };
    let target = kingdom
        .tiles()
        .iter()
        .copied()
        .find(|c| state.map.get(c).map_or(false, |t| t.content.is_none()))
        .or_else(|| kingdom.tiles().first().copied());
    if let Some(coord) = target {
        if let Some(tile) = state.map.get_mut(&coord) {
            tile.content = Some(TileContent::Capital);
        }
    }
}
