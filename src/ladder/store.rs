//! Rating store: the single owner of ladder state.

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::recorder::MatchRecorder;
use super::LadderError;
use crate::models::{seed_players, MatchRecord, Player};
use crate::storage::{KeyValueStore, StorageError, MATCHES_KEY, PLAYERS_KEY};

/// Read persisted ladder state.
///
/// Missing players fall back to the seed players and missing matches to an
/// empty list. Unreadable or malformed data on either key resets both to
/// seed defaults.
pub fn load<S: KeyValueStore + ?Sized>(backend: &S) -> (Vec<Player>, Vec<MatchRecord>) {
    let players = read_key::<_, Vec<Player>>(backend, PLAYERS_KEY);
    let matches = read_key::<_, Vec<MatchRecord>>(backend, MATCHES_KEY);

    match (players, matches) {
        (Ok(players), Ok(matches)) => {
            let players = players.unwrap_or_else(seed_players);
            let matches = matches.unwrap_or_default();
            debug!(
                "Loaded {} players and {} matches",
                players.len(),
                matches.len()
            );
            (players, matches)
        }
        (players, matches) => {
            if let Err(e) = players {
                warn!("Discarding stored players: {}", e);
            }
            if let Err(e) = matches {
                warn!("Discarding stored matches: {}", e);
            }
            (seed_players(), Vec::new())
        }
    }
}

fn read_key<S, T>(backend: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    match backend.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Persist both collections in one backend write.
///
/// Both values are encoded before anything is written.
pub fn save<S: KeyValueStore + ?Sized>(
    backend: &mut S,
    players: &[Player],
    matches: &[MatchRecord],
) -> Result<(), StorageError> {
    let players_json = serde_json::to_string(players)?;
    let matches_json = serde_json::to_string(matches)?;
    backend.set_all(&[(PLAYERS_KEY, players_json), (MATCHES_KEY, matches_json)])
}

/// Owns the players and matches of one ladder and its persistence backend.
#[derive(Debug)]
pub struct RatingStore<S> {
    backend: S,
    players: Vec<Player>,
    matches: Vec<MatchRecord>,
}

impl<S: KeyValueStore> RatingStore<S> {
    /// Open a store over `backend`, loading whatever it holds.
    pub fn open(backend: S) -> Self {
        let (players, matches) = load(&backend);
        Self {
            backend,
            players,
            matches,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Look up a player by exact name.
    pub fn player(&self, name: &str) -> Result<&Player, LadderError> {
        self.position(name)
            .map(|i| &self.players[i])
            .ok_or_else(|| LadderError::PlayerNotFound(name.to_string()))
    }

    /// Player names in insertion order.
    pub fn player_names(&self) -> Vec<&str> {
        self.players.iter().map(|p| p.name.as_str()).collect()
    }

    pub(crate) fn position(&self, name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.name == name)
    }

    /// Add a new player at the initial rating.
    ///
    /// Surrounding whitespace is trimmed before validation.
    pub fn add_player(&mut self, name: &str) -> Result<&Player, LadderError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LadderError::EmptyName);
        }
        if self.position(name).is_some() {
            return Err(LadderError::DuplicateName(name.to_string()));
        }

        let mut players = self.players.clone();
        players.push(Player::new(name));
        save(&mut self.backend, &players, &self.matches)?;
        self.players = players;

        info!("Added player {}", name);
        Ok(&self.players[self.players.len() - 1])
    }

    /// Replace every player and match with fresh seed defaults.
    pub fn reset(&mut self) -> Result<(), LadderError> {
        let players = seed_players();
        let matches = Vec::new();
        save(&mut self.backend, &players, &matches)?;

        info!(
            "Reset ladder, discarded {} players and {} matches",
            self.players.len(),
            self.matches.len()
        );
        self.players = players;
        self.matches = matches;
        Ok(())
    }

    /// Recorder for submitting match results against this store.
    pub fn recorder(&mut self) -> MatchRecorder<'_, S> {
        MatchRecorder::new(self)
    }

    /// Persist staged state, then make it current.
    pub(crate) fn commit(
        &mut self,
        players: Vec<Player>,
        matches: Vec<MatchRecord>,
    ) -> Result<(), LadderError> {
        save(&mut self.backend, &players, &matches)?;
        self.players = players;
        self.matches = matches;
        Ok(())
    }
}
