//! Hexfief - Turn-Based Hex Territory Strategy Core

pub mod core;
pub mod kingdoms;
pub mod map;
pub mod mapgen;
pub mod state;
pub mod turn;
