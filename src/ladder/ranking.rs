//! Leaderboard and recent-match projections.

use serde::Serialize;

use crate::models::{MatchRecord, Player};

/// How many matches the recent-match list shows by default.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    /// 1-based position
    pub rank: usize,
    pub name: String,
    pub rating: i32,
    pub wins: u32,
    pub losses: u32,
}

/// A match together with its 1-based number in the ladder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentMatch {
    pub number: usize,

    #[serde(flatten)]
    pub record: MatchRecord,
}

/// Players ordered by rating, highest first.
///
/// Equal ratings keep their insertion order.
pub fn rankings(players: &[Player]) -> Vec<RankingEntry> {
    let mut sorted: Vec<&Player> = players.iter().collect();
    sorted.sort_by(|a, b| b.rating.cmp(&a.rating));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, p)| RankingEntry {
            rank: i + 1,
            name: p.name.clone(),
            rating: p.rating,
            wins: p.wins,
            losses: p.losses,
        })
        .collect()
}

/// The last `limit` matches, most recent first.
pub fn recent_matches(matches: &[MatchRecord], limit: usize) -> Vec<RecentMatch> {
    matches
        .iter()
        .enumerate()
        .rev()
        .take(limit)
        .map(|(i, record)| RecentMatch {
            number: i + 1,
            record: record.clone(),
        })
        .collect()
}

/// Signed display form of a rating change: `+16`, `-16`, `0`.
pub fn format_change(change: i32) -> String {
    if change > 0 {
        format!("+{}", change)
    } else {
        change.to_string()
    }
}
