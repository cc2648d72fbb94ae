//! Player model and rating history points.

use serde::{Deserialize, Serialize};

/// Rating every player starts from.
pub const INITIAL_RATING: i32 = 1500;

/// One point on a player's rating timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPoint {
    /// 1-based match number, or 0 for the seed point
    #[serde(rename = "match")]
    pub match_number: usize,

    /// Rating after that match
    pub rating: i32,
}

impl HistoryPoint {
    pub fn new(match_number: usize, rating: i32) -> Self {
        Self {
            match_number,
            rating,
        }
    }

    /// The point every player's history starts with.
    pub fn seed() -> Self {
        Self::new(0, INITIAL_RATING)
    }
}

/// A ladder participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique, case-sensitive name
    pub name: String,

    /// Current Elo rating
    pub rating: i32,

    pub wins: u32,

    pub losses: u32,

    /// Append-only rating timeline, starting with the seed point
    pub history: Vec<HistoryPoint>,
}

impl Player {
    /// Create a fresh player at the initial rating with no games played.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating: INITIAL_RATING,
            wins: 0,
            losses: 0,
            history: vec![HistoryPoint::seed()],
        }
    }

    /// Apply the outcome of match `match_number`.
    ///
    /// Rating, win/loss counters and history move together so the last
    /// history point always matches the current rating.
    pub fn apply_result(&mut self, match_number: usize, new_rating: i32, won: bool) {
        self.rating = new_rating;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.history.push(HistoryPoint::new(match_number, new_rating));
    }
}

/// The players a fresh ladder starts with.
pub fn seed_players() -> Vec<Player> {
    ["Alice", "Bob", "Charlie"]
        .into_iter()
        .map(Player::new)
        .collect()
}
