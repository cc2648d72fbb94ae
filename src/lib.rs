//! # Elo Ladder
//!
//! A local Elo rating ladder for tracking match results between players.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (players, history points, match records)
//! - **calculate**: Elo expected-score and rating-update formulas
//! - **ladder**: Rating store, match recorder, ranking and history projections
//! - **storage**: Key-value persistence backends (files, memory)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod ladder;
pub mod models;
pub mod storage;

pub use ladder::{LadderError, MatchRecorder, RatingStore};
pub use models::*;
