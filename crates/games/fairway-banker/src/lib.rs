pub mod config;
pub mod settlement;

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use fairway_core::course::{HoleContext, Tee};
use fairway_core::game_trait::{
    GameError, GameKind, GameMetadata, HoleResult, PlayerScore, SideGame,
};
use fairway_core::player::{Player, PlayerId};
use fairway_core::scorecard::{MAX_STROKES, Scorecard};
use fairway_core::side_game_state_codec;

use config::BankerRules;
use settlement::{BankerMatchup, Perspective, settle_as};

/// Fewest players a Banker round can have: the banker and one opponent.
pub const MIN_PLAYERS: u8 = 2;
/// Most players a Banker round can have.
pub const MAX_PLAYERS: u8 = 8;

/// Per-hole choices made before anyone tees off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleSetup {
    /// Player every other player is matched against on this hole.
    pub banker: PlayerId,
    /// Dots per matchup; `None` uses the round's default.
    #[serde(default)]
    pub dots: Option<u32>,
    /// Players who doubled against the banker.
    #[serde(default)]
    pub player_doubles: Vec<PlayerId>,
    /// Players the banker doubled against.
    #[serde(default)]
    pub banker_doubles: Vec<PlayerId>,
}

impl HoleSetup {
    pub fn new(banker: PlayerId) -> Self {
        Self {
            banker,
            dots: None,
            player_doubles: Vec::new(),
            banker_doubles: Vec::new(),
        }
    }
}

/// A settled hole together with the setup it was played under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettledHole {
    pub setup: HoleSetup,
    pub result: HoleResult,
}

/// Serializable state of a Banker round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankerState {
    pub players: Vec<Player>,
    pub tee: Tee,
    pub rules: BankerRules,
    pub scorecards: Vec<Scorecard>,
    pub holes: BTreeMap<usize, SettledHole>,
}

/// A Banker round: running per-player points over a tee's holes.
pub struct BankerGame {
    state: BankerState,
}

impl BankerGame {
    pub fn new(players: Vec<Player>, tee: Tee, rules: BankerRules) -> Result<Self, GameError> {
        if players.len() < usize::from(MIN_PLAYERS) {
            return Err(GameError::TooFewPlayers {
                min: MIN_PLAYERS,
                got: players.len(),
            });
        }
        if players.len() > usize::from(MAX_PLAYERS) {
            return Err(GameError::TooManyPlayers {
                max: MAX_PLAYERS,
                got: players.len(),
            });
        }
        let mut seen = HashSet::new();
        for p in &players {
            if !seen.insert(p.id) {
                return Err(GameError::DuplicatePlayer(p.id));
            }
        }

        let scorecards = players
            .iter()
            .map(|p| Scorecard::new(p.id, p.course_handicap(), tee.holes()))
            .collect();

        Ok(Self {
            state: BankerState {
                players,
                tee,
                rules,
                scorecards,
                holes: BTreeMap::new(),
            },
        })
    }

    pub fn state(&self) -> &BankerState {
        &self.state
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn tee(&self) -> &Tee {
        &self.state.tee
    }

    pub fn rules(&self) -> &BankerRules {
        &self.state.rules
    }

    pub fn scorecards(&self) -> &[Scorecard] {
        &self.state.scorecards
    }

    pub fn scorecard(&self, player_id: PlayerId) -> Option<&Scorecard> {
        self.state
            .scorecards
            .iter()
            .find(|c| c.player_id == player_id)
    }

    pub fn hole(&self, hole: usize) -> Option<&SettledHole> {
        self.state.holes.get(&hole)
    }

    pub fn holes_settled(&self) -> usize {
        self.state.holes.len()
    }

    fn hole_context(&self, hole: usize) -> Result<HoleContext, GameError> {
        self.state
            .tee
            .hole(hole)
            .copied()
            .ok_or(GameError::UnknownHole(hole))
    }

    fn has_player(&self, id: PlayerId) -> bool {
        self.state.players.iter().any(|p| p.id == id)
    }

    fn validate(
        &self,
        setup: &HoleSetup,
        scores: &HashMap<PlayerId, u32>,
    ) -> Result<(), GameError> {
        if !self.has_player(setup.banker) {
            return Err(GameError::BankerNotInRound(setup.banker));
        }
        if let Some(&id) = setup
            .player_doubles
            .iter()
            .chain(&setup.banker_doubles)
            .find(|&&id| !self.has_player(id))
        {
            return Err(GameError::UnknownPlayer(id));
        }
        if let Some(&id) = scores.keys().find(|&&id| !self.has_player(id)) {
            return Err(GameError::UnknownPlayer(id));
        }
        for p in &self.state.players {
            match scores.get(&p.id) {
                None => return Err(GameError::MissingScore { player_id: p.id }),
                Some(0) => return Err(GameError::ZeroScore { player_id: p.id }),
                Some(&s) if s > MAX_STROKES => {
                    return Err(GameError::ScoreTooHigh {
                        player_id: p.id,
                        max: MAX_STROKES,
                    });
                },
                Some(_) => {},
            }
        }
        Ok(())
    }

    /// Settle every non-banker player against the banker. The banker is
    /// credited with the negated matchups, so each hole sums to zero.
    fn settle_hole(
        &self,
        hole: usize,
        ctx: HoleContext,
        setup: &HoleSetup,
        scores: &HashMap<PlayerId, u32>,
    ) -> HoleResult {
        let rules = &self.state.rules;
        let dots = setup.dots.unwrap_or(rules.default_dots);
        let banker_score = scores[&setup.banker];

        let mut banker_points: i32 = 0;
        let mut points = Vec::with_capacity(self.state.players.len());
        for p in &self.state.players {
            if p.id == setup.banker {
                continue;
            }
            let matchup = BankerMatchup {
                player_score: scores[&p.id],
                banker_score,
                hole_par: ctx.par,
                dots,
                is_player_doubled: setup.player_doubles.contains(&p.id),
                is_banker_doubled: setup.banker_doubles.contains(&p.id),
                bonus: rules.bonus,
                is_par3: ctx.is_par3(),
                par3_triples: rules.par3_triples,
            };
            banker_points =
                banker_points.saturating_add(settle_as(&matchup, Perspective::Banker));
            points.push(PlayerScore {
                player_id: p.id,
                points: settle_as(&matchup, Perspective::Player),
            });
        }

        // Keep results in player order.
        let banker_index = self
            .state
            .players
            .iter()
            .position(|p| p.id == setup.banker)
            .unwrap_or(0);
        points.insert(
            banker_index,
            PlayerScore {
                player_id: setup.banker,
                points: banker_points,
            },
        );

        HoleResult { hole, points }
    }

    /// Total points for one player across settled holes.
    pub fn total_for(&self, player_id: PlayerId) -> i32 {
        self.state
            .holes
            .values()
            .filter_map(|h| h.result.points_for(player_id))
            .fold(0, i32::saturating_add)
    }
}

impl SideGame for BankerGame {
    type HoleSetup = HoleSetup;

    fn metadata(&self) -> GameMetadata {
        GameMetadata {
            kind: GameKind::Banker,
            name: "Banker".to_string(),
            description: "Each hole one player banks; everyone else plays them for dots."
                .to_string(),
            min_players: MIN_PLAYERS,
            max_players: MAX_PLAYERS,
        }
    }

    fn record_hole(
        &mut self,
        hole: usize,
        setup: HoleSetup,
        scores: &HashMap<PlayerId, u32>,
    ) -> Result<HoleResult, GameError> {
        let ctx = self.hole_context(hole)?;
        self.validate(&setup, scores)?;

        let result = self.settle_hole(hole, ctx, &setup, scores);
        for card in &mut self.state.scorecards {
            card.record(hole, scores[&card.player_id])?;
        }

        tracing::debug!(
            hole,
            banker = setup.banker,
            dots = setup.dots.unwrap_or(self.state.rules.default_dots),
            replaced = self.state.holes.contains_key(&hole),
            "Settled banker hole"
        );

        self.state.holes.insert(
            hole,
            SettledHole {
                setup,
                result: result.clone(),
            },
        );
        Ok(result)
    }

    fn clear_hole(&mut self, hole: usize) -> Result<(), GameError> {
        self.hole_context(hole)?;
        if self.state.holes.remove(&hole).is_none() {
            return Err(GameError::HoleNotRecorded(hole));
        }
        for card in &mut self.state.scorecards {
            card.clear(hole)?;
        }
        tracing::debug!(hole, "Cleared banker hole");
        Ok(())
    }

    fn standings(&self) -> Vec<PlayerScore> {
        let mut standings: Vec<PlayerScore> = self
            .state
            .players
            .iter()
            .map(|p| PlayerScore {
                player_id: p.id,
                points: self.total_for(p.id),
            })
            .collect();
        standings.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        standings
    }

    side_game_state_codec!(state_type: BankerState);
}
