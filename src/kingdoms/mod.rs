//! Kingdom graph maintenance
//!
//! Kingdoms partition the owned tiles into connected same-player groups.
//! This module keeps that partition consistent across incremental mutations:
//! the initial construction pass, tile conquest with its merge/annex side
//! effects, and kingdom merging. Split detection after a conquest uses a
//! local adjacency shortcut on the conquered tile's neighborhood; anything
//! the shortcut cannot rule out falls through to the full flood fill in
//! [`split`].

pub mod capital;
pub mod split;

use crate::core::types::KingdomId;
use crate::map::hex::HexCoord;
use crate::map::tile::TileContent;
use crate::state::GameState;

/// Build the kingdom partition from scratch
///
/// Single pass over all tiles, each inspecting its 6 neighbors. For every
/// same-player adjacent pair one of four cases applies: create, extend from
/// either side, or merge. Repeated application converges to the same
/// partition regardless of traversal order.
pub fn create_initial_kingdoms(state: &mut GameState) {
    state.kingdoms.clear();
    let coords: Vec<HexCoord> = state.map.coords().collect();
    for coord in &coords {
        if let Some(tile) = state.map.get_mut(coord) {
            tile.kingdom = None;
        }
    }
    for &coord in &coords {
        let Some(tile) = state.map.get(&coord) else {
            continue;
        };
        let player = tile.player;
        for ncoord in coord.neighbors() {
            let Some(neighbor) = state.map.get(&ncoord) else {
                // water
                continue;
            };
            if neighbor.player != player {
                continue;
            }
            let neighbor_kingdom = neighbor.kingdom;
            let tile_kingdom = state.map.get(&coord).and_then(|t| t.kingdom);
            match (tile_kingdom, neighbor_kingdom) {
                (None, None) => {
                    // neither belongs to a kingdom yet: found a new one
                    let id = state.allocate_kingdom(player);
                    if let Some(kingdom) = state.kingdoms.get_mut(&id) {
                        kingdom.add_tile(coord);
                        kingdom.add_tile(ncoord);
                    }
                    if let Some(t) = state.map.get_mut(&coord) {
                        t.kingdom = Some(id);
                    }
                    if let Some(t) = state.map.get_mut(&ncoord) {
                        t.kingdom = Some(id);
                    }
                }
                (Some(id), None) => {
                    if let Some(kingdom) = state.kingdoms.get_mut(&id) {
                        kingdom.add_tile(ncoord);
                    }
                    if let Some(t) = state.map.get_mut(&ncoord) {
                        t.kingdom = Some(id);
                    }
                }
                (None, Some(id)) => {
                    if let Some(kingdom) = state.kingdoms.get_mut(&id) {
                        kingdom.add_tile(coord);
                    }
                    if let Some(t) = state.map.get_mut(&coord) {
                        t.kingdom = Some(id);
                    }
                }
                (Some(a), Some(b)) if a != b => combine_kingdoms(state, a, b),
                _ => {}
            }
        }
    }
}

/// The active kingdom takes ownership of `coord`
///
/// Handles the full cascade: capital relocation with its savings penalty,
/// ownership transfer, annexation of adjacent kingdomless same-player tiles,
/// merging with adjacent same-player kingdoms (the neighbor survives and
/// becomes the active kingdom), split detection on the victim kingdom, and
/// finally placement of the held item with its action spent.
pub fn conquer(state: &mut GameState, coord: HexCoord) {
    let Some(initial_active) = state.active_kingdom else {
        return;
    };
    // the acting unit is spent for this turn
    if let Some(TileContent::Unit { can_act, .. }) = state.held.as_mut() {
        *can_act = false;
    }

    let old_kingdom = state.map.get(&coord).and_then(|t| t.kingdom);

    if let Some(old_id) = old_kingdom {
        let holds_capital = state
            .map
            .get(&coord)
            .and_then(|t| t.content)
            .map_or(false, |content| content.is_capital());
        let old_len = state.kingdoms.get(&old_id).map_or(0, |k| k.tiles().len());
        if holds_capital && old_len > 2 {
            // losing the capital costs the old kingdom its treasury
            if let Some(kingdom) = state.kingdoms.get_mut(&old_id) {
                kingdom.savings = 0;
            }
            capital::relocate_capital(state, coord);
        }
        if let Some(kingdom) = state.kingdoms.get_mut(&old_id) {
            kingdom.remove_tile(coord);
        }
    }

    let Some(active_player) = state.kingdoms.get(&initial_active).map(|k| k.player) else {
        return;
    };
    if let Some(tile) = state.map.get_mut(&coord) {
        tile.player = active_player;
        tile.kingdom = Some(initial_active);
    }
    if let Some(kingdom) = state.kingdoms.get_mut(&initial_active) {
        kingdom.add_tile(coord);
    }

    // walk the neighborhood: annex, merge, or record frontier tiles of the
    // kingdom the tile was taken from
    let mut current = initial_active;
    let mut frontier: Vec<HexCoord> = Vec::new();
    for ncoord in coord.neighbors() {
        let Some(neighbor) = state.map.get(&ncoord) else {
            // water
            continue;
        };
        let neighbor_player = neighbor.player;
        match neighbor.kingdom {
            None => {
                if neighbor_player == active_player {
                    if let Some(tile) = state.map.get_mut(&ncoord) {
                        tile.kingdom = Some(current);
                    }
                    if let Some(kingdom) = state.kingdoms.get_mut(&current) {
                        kingdom.add_tile(ncoord);
                    }
                }
            }
            Some(neighbor_id) => {
                if neighbor_player == active_player && neighbor_id != current {
                    // same player, different kingdom: the neighbor absorbs us
                    combine_kingdoms(state, neighbor_id, current);
                    current = neighbor_id;
                    state.active_kingdom = Some(neighbor_id);
                    if let Some(kingdom) = state.kingdoms.get_mut(&neighbor_id) {
                        kingdom.was_active_in_current_turn = true;
                    }
                } else if old_kingdom == Some(neighbor_id) {
                    frontier.push(ncoord);
                }
            }
        }
    }

    // frontier counts of 2..=4 are the only ambiguous cases; the adjacency
    // checks below rule a split out without flooding when the frontier is
    // provably still connected around the lost tile
    let potentially_split = match frontier.len() {
        2 => !frontier[0].is_adjacent(&frontier[1]),
        3 => !(0..3).any(|i| {
            (0..3)
                .filter(|&j| j != i)
                .all(|j| frontier[i].is_adjacent(&frontier[j]))
        }),
        4 => {
            let others: Vec<HexCoord> = coord
                .neighbors()
                .into_iter()
                .filter(|c| !frontier.contains(c))
                .collect();
            let connected = others.iter().all(|c| state.map.contains(c))
                && others[0].is_adjacent(&others[1]);
            !connected
        }
        _ => false,
    };
    if let Some(old_id) = old_kingdom {
        let too_small = state
            .kingdoms
            .get(&old_id)
            .map_or(false, |k| k.tiles().len() < 2);
        if (potentially_split || too_small) && state.kingdoms.contains_key(&old_id) {
            tracing::debug!(kingdom = ?old_id, frontier = frontier.len(), "checking for split");
            split::resolve_split(state, old_id);
        }
    }

    state.place_held(coord);
}

/// Merge `slave` into `master`
///
/// Master keeps its capital; any slave capital is torn down. Savings are
/// pooled, and a slave that still had moves left clears the master's
/// done-moving flag.
pub(crate) fn combine_kingdoms(state: &mut GameState, master: KingdomId, slave: KingdomId) {
    if master == slave {
        return;
    }
    let Some(slave_kingdom) = state.kingdoms.remove(&slave) else {
        return;
    };
    for &coord in slave_kingdom.tiles() {
        if let Some(tile) = state.map.get_mut(&coord) {
            tile.kingdom = Some(master);
            if tile.content.map_or(false, |c| c.is_capital()) {
                tile.content = None;
            }
        }
    }
    if let Some(kingdom) = state.kingdoms.get_mut(&master) {
        for &coord in slave_kingdom.tiles() {
            kingdom.add_tile(coord);
        }
        kingdom.savings += slave_kingdom.savings;
        if !slave_kingdom.done_moving {
            kingdom.done_moving = false;
        }
    }
    tracing::debug!(?master, ?slave, "kingdoms merged");
}
