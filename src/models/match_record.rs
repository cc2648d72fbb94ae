//! Match record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single recorded game between two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub player1: String,

    pub player2: String,

    /// Name of the winning player, always one of `player1` / `player2`
    pub winner: String,

    /// Rating change applied to player 1
    pub p1_rating_change: i32,

    /// Rating change applied to player 2
    pub p2_rating_change: i32,

    /// When the match was recorded; absent on records from older stores
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn new(
        player1: String,
        player2: String,
        winner: String,
        p1_rating_change: i32,
        p2_rating_change: i32,
    ) -> Self {
        Self {
            player1,
            player2,
            winner,
            p1_rating_change,
            p2_rating_change,
            recorded_at: Some(Utc::now()),
        }
    }
}
