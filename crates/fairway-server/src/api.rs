use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};

use fairway_banker::config::BankerRules;
use fairway_banker::settlement::{BankerMatchup, BonusRule, settle, settle_from_banker_perspective};
use fairway_banker::{BankerGame, HoleSetup, SettledHole};
use fairway_core::course::{HoleContext, Tee};
use fairway_core::game_registry::{GameEntry, catalog};
use fairway_core::game_trait::{GameKind, HoleResult, PlayerScore, SideGame};
use fairway_core::handicap::{self, HandicapProfile};
use fairway_core::player::{Player, PlayerId};
use fairway_core::scorecard::ScorecardSummary;

use crate::error::AppError;
use crate::round_store::Round;
use crate::state::AppState;

/// Slope ratings outside this range do not exist on rated courses.
const SLOPE_RANGE: std::ops::RangeInclusive<u16> = 55..=155;

#[derive(Debug, Deserialize)]
pub struct CourseHandicapRequest {
    pub handicap_index: f64,
    pub slope_rating: u16,
}

#[derive(Debug, Serialize)]
pub struct CourseHandicapResponse {
    pub course_handicap: i32,
}

/// POST /api/v1/handicap/course
pub async fn course_handicap(
    Json(body): Json<CourseHandicapRequest>,
) -> Json<CourseHandicapResponse> {
    Json(CourseHandicapResponse {
        course_handicap: handicap::course_handicap(body.handicap_index, body.slope_rating),
    })
}

#[derive(Debug, Deserialize)]
pub struct HoleAllowanceRequest {
    pub par: u8,
    pub course_handicap: i32,
    pub stroke_index: u8,
}

#[derive(Debug, Serialize)]
pub struct HoleAllowanceResponse {
    pub strokes: u32,
    pub max_score: u32,
}

/// POST /api/v1/handicap/hole
pub async fn hole_allowance(Json(body): Json<HoleAllowanceRequest>) -> Json<HoleAllowanceResponse> {
    Json(HoleAllowanceResponse {
        strokes: handicap::stroke_allowance(body.course_handicap, body.stroke_index),
        max_score: handicap::max_hole_score(body.par, body.course_handicap, body.stroke_index),
    })
}

/// Matchup in the flag form score-entry clients send.
#[derive(Debug, Deserialize)]
pub struct SettleRequest {
    pub player_score: u32,
    pub banker_score: u32,
    pub hole_par: u8,
    pub dots: u32,
    #[serde(default)]
    pub is_player_doubled: bool,
    #[serde(default)]
    pub is_banker_doubled: bool,
    #[serde(default)]
    pub use_gross_birdies: bool,
    #[serde(default)]
    pub is_par3: bool,
    #[serde(default)]
    pub par3_triples: bool,
    #[serde(default)]
    pub double_birdie_bets: bool,
}

impl From<&SettleRequest> for BankerMatchup {
    fn from(r: &SettleRequest) -> Self {
        BankerMatchup {
            player_score: r.player_score,
            banker_score: r.banker_score,
            hole_par: r.hole_par,
            dots: r.dots,
            is_player_doubled: r.is_player_doubled,
            is_banker_doubled: r.is_banker_doubled,
            bonus: BonusRule::from_flags(r.use_gross_birdies, r.double_birdie_bets),
            is_par3: r.is_par3,
            par3_triples: r.par3_triples,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SettleResponse {
    /// Points to the non-banker player.
    pub points: i32,
    /// The same settlement credited to the banker.
    pub banker_points: i32,
}

/// POST /api/v1/banker/settle
pub async fn settle_matchup(
    State(state): State<AppState>,
    Json(body): Json<SettleRequest>,
) -> Result<Json<SettleResponse>, AppError> {
    check_dots(&state, body.dots)?;
    let matchup = BankerMatchup::from(&body);
    Ok(Json(SettleResponse {
        points: settle(&matchup),
        banker_points: settle_from_banker_perspective(&matchup),
    }))
}

/// GET /api/v1/games
pub async fn list_games() -> Json<Vec<GameEntry>> {
    Json(catalog())
}

#[derive(Debug, Deserialize)]
pub struct PlayerRequest {
    pub display_name: String,
    pub handicap_index: f64,
    /// Slope of the tee this player plays; defaults to the round's tee.
    #[serde(default)]
    pub slope_rating: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct TeeRequest {
    pub name: String,
    pub slope_rating: u16,
    pub holes: Vec<HoleContext>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoundRequest {
    pub players: Vec<PlayerRequest>,
    pub tee: TeeRequest,
    #[serde(default)]
    pub rules: Option<BankerRules>,
    #[serde(default)]
    pub games: Vec<GameKind>,
}

#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub id: PlayerId,
    pub display_name: String,
    pub course_handicap: i32,
}

impl From<&Player> for PlayerView {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            display_name: p.display_name.clone(),
            course_handicap: p.course_handicap(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreateRoundResponse {
    pub round_id: String,
    pub players: Vec<PlayerView>,
}

fn check_dots(state: &AppState, dots: u32) -> Result<(), AppError> {
    let max = state.config.limits.max_dots;
    if dots > max {
        return Err(AppError::BadRequest(format!(
            "dots {dots} exceeds maximum {max}"
        )));
    }
    Ok(())
}

fn check_slope(slope: u16) -> Result<(), AppError> {
    if !SLOPE_RANGE.contains(&slope) {
        return Err(AppError::BadRequest(format!(
            "slope rating {slope} outside {}-{}",
            SLOPE_RANGE.start(),
            SLOPE_RANGE.end()
        )));
    }
    Ok(())
}

/// Trimmed display name, limited to `max_len` characters.
fn check_display_name(raw: &str, max_len: usize) -> Result<&str, AppError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > max_len {
        return Err(AppError::BadRequest(format!(
            "display_name must be 1-{max_len} chars"
        )));
    }
    Ok(name)
}

fn build_players(state: &AppState, req: &CreateRoundRequest) -> Result<Vec<Player>, AppError> {
    let max_name = state.config.limits.max_name_len;
    req.players
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let name = check_display_name(&p.display_name, max_name)?;
            if !p.handicap_index.is_finite() || p.handicap_index < 0.0 {
                return Err(AppError::BadRequest(format!(
                    "handicap_index for {name} must be a non-negative number"
                )));
            }
            let slope = p.slope_rating.unwrap_or(req.tee.slope_rating);
            check_slope(slope)?;
            Ok(Player::new(
                i as PlayerId + 1,
                name,
                HandicapProfile::new(p.handicap_index, slope),
            ))
        })
        .collect()
}

/// POST /api/v1/rounds
pub async fn create_round(
    State(state): State<AppState>,
    Json(body): Json<CreateRoundRequest>,
) -> Result<(StatusCode, Json<CreateRoundResponse>), AppError> {
    let games = if body.games.is_empty() {
        vec![GameKind::Banker]
    } else {
        body.games.clone()
    };
    if !games.contains(&GameKind::Banker) {
        return Err(AppError::BadRequest(
            "round must include the banker game".to_string(),
        ));
    }

    check_slope(body.tee.slope_rating)?;
    let tee = Tee::new(
        body.tee.name.clone(),
        body.tee.slope_rating,
        body.tee.holes.clone(),
    )?;
    let rules = body.rules.unwrap_or(state.config.banker);
    check_dots(&state, rules.default_dots)?;
    let players = build_players(&state, &body)?;
    let views: Vec<PlayerView> = players.iter().map(PlayerView::from).collect();

    let banker = BankerGame::new(players, tee, rules)?;
    let round_id = {
        let mut rounds = state.rounds.write().await;
        rounds.create(games, banker)
    };
    let Some(round_id) = round_id else {
        tracing::warn!("Round store full, rejecting new round");
        return Err(AppError::AtCapacity(
            "too many active rounds, try again later".to_string(),
        ));
    };

    tracing::info!(round_id = %round_id, players = views.len(), "Created round");
    Ok((
        StatusCode::CREATED,
        Json(CreateRoundResponse {
            round_id,
            players: views,
        }),
    ))
}

#[derive(Debug, Serialize)]
pub struct RoundView {
    pub round_id: String,
    pub tee: String,
    pub par: u32,
    pub games: Vec<GameKind>,
    pub rules: BankerRules,
    pub players: Vec<PlayerView>,
    pub standings: Vec<PlayerScore>,
    pub scorecards: Vec<ScorecardSummary>,
    pub holes: Vec<SettledHole>,
}

impl From<&Round> for RoundView {
    fn from(round: &Round) -> Self {
        let game = &round.banker;
        Self {
            round_id: round.id.clone(),
            tee: game.tee().name.clone(),
            par: game.tee().par(),
            games: round.games.clone(),
            rules: *game.rules(),
            players: game.players().iter().map(PlayerView::from).collect(),
            standings: game.standings(),
            scorecards: game.scorecards().iter().map(|c| c.summary()).collect(),
            holes: game.state().holes.values().cloned().collect(),
        }
    }
}

fn round_not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Round {id} not found"))
}

/// GET /api/v1/rounds/{round_id}
pub async fn get_round(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<Json<RoundView>, AppError> {
    let mut rounds = state.rounds.write().await;
    let round = rounds
        .view(&round_id)
        .ok_or_else(|| round_not_found(&round_id))?;
    Ok(Json(RoundView::from(round)))
}

/// DELETE /api/v1/rounds/{round_id}
pub async fn delete_round(
    State(state): State<AppState>,
    Path(round_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut rounds = state.rounds.write().await;
    if rounds.remove(&round_id) {
        tracing::info!(round_id = %round_id, "Deleted round");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(round_not_found(&round_id))
    }
}

#[derive(Debug, Deserialize)]
pub struct RecordHoleRequest {
    pub setup: HoleSetup,
    pub scores: HashMap<PlayerId, u32>,
}

/// PUT /api/v1/rounds/{round_id}/holes/{hole}
pub async fn record_hole(
    State(state): State<AppState>,
    Path((round_id, hole)): Path<(String, usize)>,
    Json(body): Json<RecordHoleRequest>,
) -> Result<Json<HoleResult>, AppError> {
    if let Some(dots) = body.setup.dots {
        check_dots(&state, dots)?;
    }
    let mut rounds = state.rounds.write().await;
    let round = rounds
        .get_mut(&round_id)
        .ok_or_else(|| round_not_found(&round_id))?;
    match round.banker.record_hole(hole, body.setup, &body.scores) {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            tracing::debug!(round_id = %round_id, hole, error = %e, "Rejected hole");
            Err(e.into())
        },
    }
}

/// DELETE /api/v1/rounds/{round_id}/holes/{hole}
pub async fn clear_hole(
    State(state): State<AppState>,
    Path((round_id, hole)): Path<(String, usize)>,
) -> Result<StatusCode, AppError> {
    let mut rounds = state.rounds.write().await;
    let round = rounds
        .get_mut(&round_id)
        .ok_or_else(|| round_not_found(&round_id))?;
    round.banker.clear_hole(hole)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_request_collapses_bonus_flags() {
        let req: SettleRequest = serde_json::from_str(
            r#"{"player_score":3,"banker_score":4,"hole_par":4,"dots":1,
                "use_gross_birdies":true,"double_birdie_bets":true}"#,
        )
        .unwrap();
        let m = BankerMatchup::from(&req);
        assert_eq!(m.bonus, BonusRule::GrossBirdiesEnabled);
        assert!(!m.is_player_doubled);
        assert_eq!(settle(&m), 2);
    }

    #[test]
    fn record_hole_request_parses_string_keys() {
        let req: RecordHoleRequest = serde_json::from_str(
            r#"{"setup":{"banker":1,"player_doubles":[2]},"scores":{"1":4,"2":5}}"#,
        )
        .unwrap();
        assert_eq!(req.setup.banker, 1);
        assert_eq!(req.setup.dots, None);
        assert_eq!(req.scores[&2], 5);
    }

    #[test]
    fn display_name_counts_chars() {
        let accented = "é".repeat(30);
        assert_eq!(check_display_name(&accented, 30).unwrap(), accented);
        assert!(check_display_name(&"é".repeat(31), 30).is_err());
        assert_eq!(check_display_name("  Ann  ", 3).unwrap(), "Ann");
        assert!(check_display_name("   ", 64).is_err());
    }

    #[test]
    fn slope_bounds() {
        assert!(check_slope(55).is_ok());
        assert!(check_slope(155).is_ok());
        assert!(check_slope(54).is_err());
        assert!(check_slope(156).is_err());
    }
}
