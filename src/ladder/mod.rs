//! The rating ladder.
//!
//! - **store**: owns players and matches, loads and persists them
//! - **recorder**: validates and applies one match result
//! - **ranking**: leaderboard and recent-match projections
//! - **history**: per-player rating series for charting

pub mod history;
pub mod ranking;
pub mod recorder;
pub mod store;

pub use history::{series_for, HistorySeries, PlayerSeries};
pub use ranking::{format_change, rankings, recent_matches, RankingEntry, RecentMatch};
pub use recorder::{winner_choices, MatchRecorder};
pub use store::{load, save, RatingStore};

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by ladder operations.
#[derive(Debug, Error)]
pub enum LadderError {
    #[error("Player name cannot be empty")]
    EmptyName,

    #[error("Player already exists: {0}")]
    DuplicateName(String),

    #[error("Players must be different: {0}")]
    SamePlayer(String),

    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Winner {winner} did not play in {player1} vs {player2}")]
    InvalidWinner {
        player1: String,
        player2: String,
        winner: String,
    },

    #[error("Failed to persist ladder: {0}")]
    Persistence(#[from] StorageError),
}

impl LadderError {
    /// Whether the error was caused by caller input rather than storage.
    pub fn is_validation(&self) -> bool {
        !matches!(self, LadderError::Persistence(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_validation() {
        assert!(LadderError::EmptyName.is_validation());
        assert!(LadderError::PlayerNotFound("Ghost".to_string()).is_validation());
        assert!(LadderError::InvalidWinner {
            player1: "Alice".to_string(),
            player2: "Bob".to_string(),
            winner: "Charlie".to_string(),
        }
        .is_validation());

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        assert!(!LadderError::Persistence(StorageError::Io(io)).is_validation());
    }
}
