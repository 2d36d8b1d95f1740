use std::collections::HashMap;
use std::time::{Duration, Instant};

use uuid::Uuid;

use fairway_banker::BankerGame;
use fairway_core::game_trait::GameKind;

/// A round in progress: the side games chosen for it and the banker ledger.
pub struct Round {
    pub id: String,
    /// Games the players agreed to. Only Banker is settled.
    pub games: Vec<GameKind>,
    pub banker: BankerGame,
}

struct RoundEntry {
    round: Round,
    last_activity: Instant,
}

/// In-memory rounds keyed by UUID.
pub struct RoundStore {
    rounds: HashMap<String, RoundEntry>,
    max_rounds: usize,
}

impl RoundStore {
    pub fn new(max_rounds: usize) -> Self {
        Self {
            rounds: HashMap::new(),
            max_rounds,
        }
    }

    /// Store a new round. Returns `None` when the store is full.
    pub fn create(&mut self, games: Vec<GameKind>, banker: BankerGame) -> Option<String> {
        if self.rounds.len() >= self.max_rounds {
            return None;
        }
        let id = Uuid::new_v4().to_string();
        self.rounds.insert(
            id.clone(),
            RoundEntry {
                round: Round {
                    id: id.clone(),
                    games,
                    banker,
                },
                last_activity: Instant::now(),
            },
        );
        Some(id)
    }

    pub fn get(&self, id: &str) -> Option<&Round> {
        self.rounds.get(id).map(|e| &e.round)
    }

    /// Shared access for a client viewing the round; counts as activity.
    pub fn view(&mut self, id: &str) -> Option<&Round> {
        self.rounds.get_mut(id).map(|e| {
            e.last_activity = Instant::now();
            &e.round
        })
    }

    /// Mutable access, marking the round as active.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut Round> {
        self.rounds.get_mut(id).map(|e| {
            e.last_activity = Instant::now();
            &mut e.round
        })
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.rounds.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    /// Remove rounds that have been idle for longer than `max_idle`.
    pub fn cleanup_idle_rounds(&mut self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let before = self.rounds.len();
        self.rounds
            .retain(|_, entry| now.duration_since(entry.last_activity) < max_idle);
        before - self.rounds.len()
    }
}
