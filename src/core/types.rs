//! Core identifier types used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for players
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// Unique identifier for kingdoms
///
/// Kingdoms are referenced by id everywhere (tiles store a `KingdomId`, the
/// kingdom table is keyed by it), so merges and dissolutions only ever touch
/// integer ids and can never leave a dangling reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct KingdomId(pub u32);
