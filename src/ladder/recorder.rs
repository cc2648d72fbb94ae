//! Match submission.

use tracing::info;

use super::store::RatingStore;
use super::LadderError;
use crate::calculate::{actual_score, expected_score, update_rating};
use crate::models::MatchRecord;
use crate::storage::KeyValueStore;

/// Names a winner may be picked from for the pairing `player1` vs `player2`.
///
/// Empty unless both names are set and different.
pub fn winner_choices(player1: &str, player2: &str) -> Vec<String> {
    if player1.is_empty() || player2.is_empty() || player1 == player2 {
        return Vec::new();
    }
    vec![player1.to_string(), player2.to_string()]
}

/// Applies match results to a [`RatingStore`].
pub struct MatchRecorder<'a, S> {
    store: &'a mut RatingStore<S>,
}

impl<'a, S: KeyValueStore> MatchRecorder<'a, S> {
    pub fn new(store: &'a mut RatingStore<S>) -> Self {
        Self { store }
    }

    /// Record that `winner` won a match between `player1` and `player2`.
    ///
    /// Each player's new rating is computed from both pre-match ratings and
    /// rounded independently, so the two changes need not cancel out. Ratings,
    /// counters, histories and the match list are staged and only become
    /// visible once the store has been persisted.
    pub fn record_match(
        &mut self,
        player1: &str,
        player2: &str,
        winner: &str,
    ) -> Result<MatchRecord, LadderError> {
        if player1 == player2 {
            return Err(LadderError::SamePlayer(player1.to_string()));
        }

        let i1 = self
            .store
            .position(player1)
            .ok_or_else(|| LadderError::PlayerNotFound(player1.to_string()))?;
        let i2 = self
            .store
            .position(player2)
            .ok_or_else(|| LadderError::PlayerNotFound(player2.to_string()))?;

        if winner != player1 && winner != player2 {
            return Err(LadderError::InvalidWinner {
                player1: player1.to_string(),
                player2: player2.to_string(),
                winner: winner.to_string(),
            });
        }

        let mut players = self.store.players().to_vec();
        let mut matches = self.store.matches().to_vec();

        let old1 = players[i1].rating;
        let old2 = players[i2].rating;
        let expected1 = expected_score(old1, old2);
        let expected2 = expected_score(old2, old1);

        let p1_won = winner == player1;
        let new1 = update_rating(old1, expected1, actual_score(p1_won));
        let new2 = update_rating(old2, expected2, actual_score(!p1_won));

        let match_number = matches.len() + 1;
        players[i1].apply_result(match_number, new1, p1_won);
        players[i2].apply_result(match_number, new2, !p1_won);

        let record = MatchRecord::new(
            player1.to_string(),
            player2.to_string(),
            winner.to_string(),
            new1 - old1,
            new2 - old2,
        );
        matches.push(record.clone());

        self.store.commit(players, matches)?;

        info!(
            match_number,
            "{} ({:+}) vs {} ({:+}), winner {}",
            player1,
            record.p1_rating_change,
            player2,
            record.p2_rating_change,
            winner
        );
        Ok(record)
    }
}
