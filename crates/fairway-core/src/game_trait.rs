use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::PlayerId;

/// Core trait for side-bet games played on top of a round's gross scores.
///
/// A game owns its running totals; the caller feeds it one hole at a time.
pub trait SideGame: Send + Sync {
    /// Per-hole configuration chosen before the hole is played.
    type HoleSetup;

    /// Game metadata for listing.
    fn metadata(&self) -> GameMetadata;

    /// Settle a hole from gross scores, replacing any earlier result for it.
    fn record_hole(
        &mut self,
        hole: usize,
        setup: Self::HoleSetup,
        scores: &HashMap<PlayerId, u32>,
    ) -> Result<HoleResult, GameError>;

    /// Forget a hole's result.
    fn clear_hole(&mut self, hole: usize) -> Result<(), GameError>;

    /// Running totals, highest first.
    fn standings(&self) -> Vec<PlayerScore>;

    /// Serialize the game state for caching or transfer.
    fn serialize_state(&self) -> Vec<u8>;

    /// Replace the game state with a previously serialized one.
    fn apply_state(&mut self, state: &[u8]) -> Result<(), GameError>;
}

/// Kinds of side game a round can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Banker,
    Nassau,
    Skins,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Banker, GameKind::Nassau, GameKind::Skins];

    /// Whether points can be computed for this kind. Nassau and Skins are
    /// recorded as a round's chosen games but never settled.
    pub fn is_settleable(self) -> bool {
        matches!(self, GameKind::Banker)
    }
}

/// Game metadata for listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMetadata {
    pub kind: GameKind,
    pub name: String,
    pub description: String,
    pub min_players: u8,
    pub max_players: u8,
}

/// Signed points for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub player_id: PlayerId,
    pub points: i32,
}

/// Settled outcome of a single hole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleResult {
    pub hole: usize,
    pub points: Vec<PlayerScore>,
}

impl HoleResult {
    pub fn points_for(&self, player_id: PlayerId) -> Option<i32> {
        self.points
            .iter()
            .find(|p| p.player_id == player_id)
            .map(|p| p.points)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    UnknownPlayer(PlayerId),
    DuplicatePlayer(PlayerId),
    TooFewPlayers { min: u8, got: usize },
    TooManyPlayers { max: u8, got: usize },
    UnknownHole(usize),
    HoleNotRecorded(usize),
    MissingScore { player_id: PlayerId },
    ZeroScore { player_id: PlayerId },
    ScoreTooHigh { player_id: PlayerId, max: u32 },
    BankerNotInRound(PlayerId),
    InvalidState(String),
}

impl std::fmt::Display for GameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPlayer(id) => write!(f, "unknown player {id}"),
            Self::DuplicatePlayer(id) => write!(f, "player {id} listed more than once"),
            Self::TooFewPlayers { min, got } => {
                write!(f, "need at least {min} players, got {got}")
            },
            Self::TooManyPlayers { max, got } => {
                write!(f, "at most {max} players allowed, got {got}")
            },
            Self::UnknownHole(h) => write!(f, "unknown hole {h}"),
            Self::HoleNotRecorded(h) => write!(f, "hole {h} has no result"),
            Self::MissingScore { player_id } => write!(f, "no score for player {player_id}"),
            Self::ZeroScore { player_id } => write!(f, "player {player_id} has a score of 0"),
            Self::ScoreTooHigh { player_id, max } => {
                write!(f, "score for player {player_id} is above {max}")
            },
            Self::BankerNotInRound(id) => write!(f, "banker {id} is not in this round"),
            Self::InvalidState(e) => write!(f, "invalid game state: {e}"),
        }
    }
}

impl std::error::Error for GameError {}

/// Generates `serialize_state` and `apply_state` for a `SideGame` whose state
/// lives in a `state: $StateType` field. The implementing crate must depend on
/// `rmp-serde`.
#[macro_export]
macro_rules! side_game_state_codec {
    (state_type: $StateType:ty) => {
        fn serialize_state(&self) -> Vec<u8> {
            rmp_serde::to_vec(&self.state).expect("game state serialization must succeed")
        }

        fn apply_state(&mut self, state: &[u8]) -> Result<(), $crate::game_trait::GameError> {
            let s = rmp_serde::from_slice::<$StateType>(state)
                .map_err(|e| $crate::game_trait::GameError::InvalidState(e.to_string()))?;
            self.state = s;
            Ok(())
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_banker_is_settleable() {
        assert!(GameKind::Banker.is_settleable());
        assert!(!GameKind::Nassau.is_settleable());
        assert!(!GameKind::Skins.is_settleable());
    }

    #[test]
    fn game_kind_serializes_lowercase() {
        let json = serde_json::to_string(&GameKind::Skins).unwrap();
        assert_eq!(json, "\"skins\"");
        let kind: GameKind = serde_json::from_str("\"banker\"").unwrap();
        assert_eq!(kind, GameKind::Banker);
    }

    #[test]
    fn points_for_finds_player() {
        let result = HoleResult {
            hole: 3,
            points: vec![
                PlayerScore {
                    player_id: 1,
                    points: -2,
                },
                PlayerScore {
                    player_id: 2,
                    points: 2,
                },
            ],
        };
        assert_eq!(result.points_for(2), Some(2));
        assert_eq!(result.points_for(9), None);
    }

    #[test]
    fn error_display() {
        assert_eq!(
            GameError::TooFewPlayers { min: 2, got: 1 }.to_string(),
            "need at least 2 players, got 1"
        );
        assert_eq!(GameError::UnknownHole(19).to_string(), "unknown hole 19");
    }
}
