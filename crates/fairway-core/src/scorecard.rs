use serde::{Deserialize, Serialize};

use crate::course::HoleContext;
use crate::game_trait::GameError;
use crate::handicap::{max_hole_score, stroke_allowance};
use crate::player::PlayerId;

/// Holes in a nine.
const NINE: usize = 9;

/// Most gross strokes accepted on one hole.
pub const MAX_STROKES: u32 = 99;

/// One player's gross strokes for a round, with handicap-derived views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub player_id: PlayerId,
    pub course_handicap: i32,
    holes: Vec<HoleContext>,
    gross: Vec<Option<u32>>,
}

/// Totals for a scorecard, suitable for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScorecardSummary {
    pub player_id: PlayerId,
    pub course_handicap: i32,
    pub holes_played: usize,
    pub front_nine: u32,
    pub back_nine: u32,
    pub gross: u32,
    pub net: u32,
    pub adjusted: u32,
}

impl Scorecard {
    pub fn new(player_id: PlayerId, course_handicap: i32, holes: &[HoleContext]) -> Self {
        Self {
            player_id,
            course_handicap,
            holes: holes.to_vec(),
            gross: vec![None; holes.len()],
        }
    }

    fn index(&self, hole: usize) -> Result<usize, GameError> {
        hole.checked_sub(1)
            .filter(|&i| i < self.holes.len())
            .ok_or(GameError::UnknownHole(hole))
    }

    /// Record gross strokes for a 1-based hole, replacing any earlier entry.
    pub fn record(&mut self, hole: usize, strokes: u32) -> Result<(), GameError> {
        let i = self.index(hole)?;
        if strokes > MAX_STROKES {
            return Err(GameError::ScoreTooHigh {
                player_id: self.player_id,
                max: MAX_STROKES,
            });
        }
        self.gross[i] = Some(strokes);
        Ok(())
    }

    pub fn clear(&mut self, hole: usize) -> Result<(), GameError> {
        let i = self.index(hole)?;
        self.gross[i] = None;
        Ok(())
    }

    pub fn gross(&self, hole: usize) -> Option<u32> {
        self.index(hole).ok().and_then(|i| self.gross[i])
    }

    /// Handicap strokes received on a hole, whether or not it has been played.
    pub fn strokes_received(&self, hole: usize) -> Option<u32> {
        let i = self.index(hole).ok()?;
        Some(stroke_allowance(
            self.course_handicap,
            self.holes[i].stroke_index,
        ))
    }

    /// Gross minus handicap strokes, floored at zero.
    pub fn net(&self, hole: usize) -> Option<u32> {
        let gross = self.gross(hole)?;
        let strokes = self.strokes_received(hole)?;
        Some(gross.saturating_sub(strokes))
    }

    /// Gross capped at net double bogey.
    pub fn adjusted(&self, hole: usize) -> Option<u32> {
        let i = self.index(hole).ok()?;
        let gross = self.gross[i]?;
        let ctx = self.holes[i];
        Some(gross.min(max_hole_score(
            ctx.par,
            self.course_handicap,
            ctx.stroke_index,
        )))
    }

    pub fn holes_played(&self) -> usize {
        self.gross.iter().filter(|g| g.is_some()).count()
    }

    fn sum_over(&self, range: std::ops::Range<usize>, f: impl Fn(usize) -> Option<u32>) -> u32 {
        range.filter_map(|i| f(i + 1)).fold(0, u32::saturating_add)
    }

    pub fn total_gross(&self) -> u32 {
        self.sum_over(0..self.holes.len(), |h| self.gross(h))
    }

    pub fn total_net(&self) -> u32 {
        self.sum_over(0..self.holes.len(), |h| self.net(h))
    }

    pub fn total_adjusted(&self) -> u32 {
        self.sum_over(0..self.holes.len(), |h| self.adjusted(h))
    }

    pub fn front_nine(&self) -> u32 {
        self.sum_over(0..self.holes.len().min(NINE), |h| self.gross(h))
    }

    pub fn back_nine(&self) -> u32 {
        let len = self.holes.len();
        self.sum_over(len.min(NINE)..len, |h| self.gross(h))
    }

    pub fn summary(&self) -> ScorecardSummary {
        ScorecardSummary {
            player_id: self.player_id,
            course_handicap: self.course_handicap,
            holes_played: self.holes_played(),
            front_nine: self.front_nine(),
            back_nine: self.back_nine(),
            gross: self.total_gross(),
            net: self.total_net(),
            adjusted: self.total_adjusted(),
        }
    }
}
