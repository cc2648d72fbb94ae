use std::sync::Arc;

use tokio::sync::Mutex;

use crate::ladder::RatingStore;
use crate::storage::KeyValueStore;

/// Backend type the server works with.
pub type DynStore = Box<dyn KeyValueStore + Send>;

/// Ladder shared between requests. Every mutation holds the lock for its
/// whole read, compute, persist cycle.
pub type SharedLadder = Arc<Mutex<RatingStore<DynStore>>>;

#[derive(Clone)]
pub struct AppState {
    pub ladder: SharedLadder,
    pub recent_match_limit: usize,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(
        store: RatingStore<DynStore>,
        recent_match_limit: usize,
        cors_origin: String,
    ) -> Self {
        Self {
            ladder: Arc::new(Mutex::new(store)),
            recent_match_limit,
            cors_origin,
        }
    }
}
