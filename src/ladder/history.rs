//! Per-player rating series for charting.

use serde::Serialize;

use crate::models::{HistoryPoint, Player};

/// Rating timeline of one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerSeries {
    pub name: String,
    pub points: Vec<HistoryPoint>,
}

/// Rating timelines keyed by player name, in player insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistorySeries {
    series: Vec<PlayerSeries>,
}

impl HistorySeries {
    /// Points for `name`, if that player exists.
    pub fn get(&self, name: &str) -> Option<&[HistoryPoint]> {
        self.series
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.points.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlayerSeries> {
        self.series.iter()
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Each player's history as a chartable series, unmodified.
pub fn series_for(players: &[Player]) -> HistorySeries {
    HistorySeries {
        series: players
            .iter()
            .map(|p| PlayerSeries {
                name: p.name.clone(),
                points: p.history.clone(),
            })
            .collect(),
    }
}
