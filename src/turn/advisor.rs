//! Read-only queries used to advise the player
//!
//! Nothing here is a rule: the forgotten-kingdom heuristic exists purely to
//! prompt the player, and the protection level is what the external input
//! validator consults before allowing a conquest.

use crate::core::config::{CASTLE_COST, UNIT_COST};
use crate::map::hex::HexCoord;
use crate::map::tile::{TileContent, UnitType};
use crate::state::GameState;

/// Defensive strength of a tile
///
/// The maximum of the tile's own content strength and the strengths of
/// same-kingdom neighbor contents; a tile without a kingdom only counts its
/// own content.
pub fn protection_level(state: &GameState, coord: HexCoord) -> u8 {
    let Some(tile) = state.map.get(&coord) else {
        return 0;
    };
    let mut level = tile.content.map_or(0, |c| c.strength());
    if let Some(kingdom_id) = tile.kingdom {
        for neighbor in state.map.neighbor_tiles(coord) {
            if neighbor.kingdom == Some(kingdom_id) {
                if let Some(content) = neighbor.content {
                    level = level.max(content.strength());
                }
            }
        }
    }
    level
}

/// Heuristic: does the active player have an untouched kingdom that could
/// still do something useful this turn?
///
/// True when such a kingdom can afford a castle, fields a unit above the
/// weakest tier, or has (or can afford) a weakest-tier unit together with
/// either a tree to clear or an adjacent unprotected foreign tile.
pub fn has_player_likely_forgotten_a_kingdom(state: &GameState) -> bool {
    let active = state.active_player_id();
    for kingdom in state.kingdoms.values() {
        if kingdom.player != active || kingdom.was_active_in_current_turn {
            continue;
        }
        if kingdom.savings >= CASTLE_COST {
            return true;
        }
        let mut has_peasant = false;
        let mut has_tree = false;
        for coord in kingdom.tiles() {
            match state.map.get(coord).and_then(|t| t.content) {
                Some(TileContent::Unit { unit_type, .. }) => {
                    if unit_type.strength() > 1 {
                        return true;
                    }
                    if unit_type == UnitType::Peasant {
                        has_peasant = true;
                    }
                }
                Some(TileContent::Tree) => has_tree = true,
                _ => {}
            }
        }
        let can_buy_peasant = kingdom.savings >= UNIT_COST;
        if has_peasant || can_buy_peasant {
            if has_tree {
                return true;
            }
            for coord in kingdom.tiles() {
                for neighbor in state.map.neighbor_tiles(*coord) {
                    if neighbor.kingdom != Some(kingdom.id)
                        && protection_level(state, neighbor.coord) == 0
                    {
                        return true;
                    }
                }
            }
        }
    }
    false
}
