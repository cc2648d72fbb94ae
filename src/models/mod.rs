//! Core data models for the ladder.

mod match_record;
mod player;

pub use match_record::*;
pub use player::*;
