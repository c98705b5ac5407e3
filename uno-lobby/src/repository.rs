use std::{
    collections::BTreeMap,
    fmt,
    future::Future,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use uno_engine::round::Round;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A round behind its own lock. Every mutation of a game goes through this
/// mutex, so two requests for the same game never interleave.
pub type SharedRound = Arc<Mutex<Round>>;

/// Where live games are kept, addressed by [`GameId`].
pub trait GameRepository: Send + Sync {
    fn insert(&self, round: Round) -> impl Future<Output = GameId> + Send;

    fn get(&self, id: GameId) -> impl Future<Output = Option<SharedRound>> + Send;

    fn ids(&self) -> impl Future<Output = Vec<GameId>> + Send;

    fn remove(&self, id: GameId) -> impl Future<Output = Option<SharedRound>> + Send;
}

/// Keeps every game in process memory. Nothing survives a restart.
#[derive(Debug)]
pub struct InMemoryRepository {
    games: RwLock<BTreeMap<GameId, SharedRound>>,
    next_id: AtomicU64,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRepository for InMemoryRepository {
    async fn insert(&self, round: Round) -> GameId {
        let id = GameId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.games
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(round)));
        id
    }

    async fn get(&self, id: GameId) -> Option<SharedRound> {
        self.games.read().await.get(&id).cloned()
    }

    async fn ids(&self) -> Vec<GameId> {
        self.games.read().await.keys().copied().collect()
    }

    async fn remove(&self, id: GameId) -> Option<SharedRound> {
        self.games.write().await.remove(&id)
    }
}
