//! Split resolution: re-partition a kingdom that may have come apart
//!
//! Works through the kingdom's former tile set with an explicit worklist
//! instead of recursion, so pathological maps cannot blow the stack. Each
//! round flood-fills one connected fragment: the fragment holding the
//! capital keeps the original kingdom, every other fragment becomes a fresh
//! kingdom, and fragments below 2 tiles dissolve on the spot.

use std::collections::VecDeque;

use ahash::AHashSet;

use crate::core::types::KingdomId;
use crate::kingdoms::capital;
use crate::map::hex::HexCoord;
use crate::state::GameState;

pub(crate) fn resolve_split(state: &mut GameState, old_id: KingdomId) {
    let Some(kingdom) = state.kingdoms.get_mut(&old_id) else {
        return;
    };
    let mut remaining: Vec<HexCoord> = kingdom.take_tiles();
    while !remaining.is_empty() {
        // a fragment containing the capital keeps the old kingdom alive
        let capital_coord = remaining.iter().copied().find(|c| {
            state
                .map
                .get(c)
                .and_then(|t| t.content)
                .map_or(false, |content| content.is_capital())
        });
        let (fragment_id, had_capital, start) = match capital_coord {
            Some(coord) => (old_id, true, coord),
            None => {
                let start = remaining[0];
                let Some(player) = state.map.get(&start).map(|t| t.player) else {
                    remaining.remove(0);
                    continue;
                };
                (state.allocate_kingdom(player), false, start)
            }
        };

        // collect the connected fragment around `start`
        let mut todo = VecDeque::new();
        let mut seen = AHashSet::new();
        todo.push_back(start);
        seen.insert(start);
        let mut fragment: Vec<HexCoord> = Vec::new();
        while let Some(coord) = todo.pop_front() {
            if let Some(tile) = state.map.get_mut(&coord) {
                tile.kingdom = Some(fragment_id);
            }
            if let Some(k) = state.kingdoms.get_mut(&fragment_id) {
                k.add_tile(coord);
            }
            fragment.push(coord);
            for ncoord in coord.neighbors() {
                if seen.contains(&ncoord) {
                    continue;
                }
                if state
                    .map
                    .get(&ncoord)
                    .map_or(false, |t| t.kingdom == Some(old_id))
                {
                    seen.insert(ncoord);
                    todo.push_back(ncoord);
                }
            }
        }
        remaining.retain(|c| !fragment.contains(c));

        if fragment.len() < 2 {
            // too small to live: only trees survive the dissolution
            for coord in &fragment {
                if let Some(tile) = state.map.get_mut(coord) {
                    if !tile.content.map_or(false, |c| c.is_tree()) {
                        tile.content = None;
                    }
                    tile.kingdom = None;
                }
            }
            state.kingdoms.remove(&fragment_id);
            tracing::debug!(kingdom = ?fragment_id, "fragment below minimum size dissolved");
        } else if !had_capital {
            capital::assign_capital(state, fragment_id);
            tracing::debug!(kingdom = ?fragment_id, tiles = fragment.len(), "split off new kingdom");
        }
    }
    // the old kingdom disappears entirely if no fragment kept it
    if state
        .kingdoms
        .get(&old_id)
        .map_or(false, |k| k.tiles().is_empty())
    {
        state.kingdoms.remove(&old_id);
    }
}
