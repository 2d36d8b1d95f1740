use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::ServerConfig;
use crate::round_store::RoundStore;

pub type SharedRoundStore = Arc<RwLock<RoundStore>>;

#[derive(Clone)]
pub struct AppState {
    pub rounds: SharedRoundStore,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            rounds: Arc::new(RwLock::new(RoundStore::new(config.limits.max_rounds))),
            config: Arc::new(config),
        }
    }
}
