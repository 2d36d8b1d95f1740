use serde::{Deserialize, Serialize};

/// Which birdie/eagle bonus rule a round plays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusRule {
    #[default]
    None,
    GrossBirdiesEnabled,
    LegacyDoubleBirdieBets,
}

impl BonusRule {
    /// Collapse the two overlapping toggles; gross birdies wins when both are set.
    pub fn from_flags(use_gross_birdies: bool, double_birdie_bets: bool) -> Self {
        if use_gross_birdies {
            Self::GrossBirdiesEnabled
        } else if double_birdie_bets {
            Self::LegacyDoubleBirdieBets
        } else {
            Self::None
        }
    }

    pub fn is_active(self) -> bool {
        self != Self::None
    }
}

/// Whose running total a settlement is credited to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    Player,
    Banker,
}

/// One non-banker player's gross score against the banker's on one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankerMatchup {
    pub player_score: u32,
    pub banker_score: u32,
    pub hole_par: u8,
    pub dots: u32,
    pub is_player_doubled: bool,
    pub is_banker_doubled: bool,
    pub bonus: BonusRule,
    pub is_par3: bool,
    pub par3_triples: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Player,
    Banker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Achievement {
    Birdie,
    EagleOrBetter,
}

impl Achievement {
    fn multiplier(self) -> u32 {
        match self {
            Achievement::Birdie => 2,
            Achievement::EagleOrBetter => 4,
        }
    }

    fn reached(self, score: u32, par: u8) -> bool {
        let score = i64::from(score);
        let par = i64::from(par);
        match self {
            Achievement::Birdie => score == par - 1,
            Achievement::EagleOrBetter => score <= par - 2,
        }
    }
}

const BONUS_CASES: [(Side, Achievement); 4] = [
    (Side::Banker, Achievement::Birdie),
    (Side::Banker, Achievement::EagleOrBetter),
    (Side::Player, Achievement::Birdie),
    (Side::Player, Achievement::EagleOrBetter),
];

impl BankerMatchup {
    fn score_of(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player_score,
            Side::Banker => self.banker_score,
        }
    }

    fn doubling_multiplier(&self) -> u32 {
        let factor = if self.is_par3 && self.par3_triples { 3 } else { 2 };
        let mut multiplier = 1;
        if self.is_player_doubled {
            multiplier *= factor;
        }
        if self.is_banker_doubled {
            multiplier *= factor;
        }
        multiplier
    }

    /// Best single birdie/eagle bonus across both sides; bonuses never add up.
    fn bonus_multiplier(&self) -> u32 {
        if !self.bonus.is_active() {
            return 1;
        }
        BONUS_CASES
            .iter()
            .map(|&(side, achievement)| {
                if achievement.reached(self.score_of(side), self.hole_par) {
                    achievement.multiplier()
                } else {
                    1
                }
            })
            .max()
            .unwrap_or(1)
    }
}

/// Largest factor `dots` can be scaled by: both sides doubled on a par 3
/// with triples on, times the eagle bonus.
pub const MAX_MULTIPLIER: u32 = 3 * 3 * 4;

/// Settle a matchup into signed points from the non-banker player's side.
///
/// Ties are always 0. Otherwise `dots` is scaled by the doubling multiplier
/// (x3 per double on par 3s when triples are on, x2 otherwise) and the bonus
/// multiplier, and signed positive when the player's lower score wins.
/// Magnitudes beyond `i32::MAX` saturate; the sign is never lost.
pub fn settle(matchup: &BankerMatchup) -> i32 {
    if matchup.player_score == matchup.banker_score {
        return 0;
    }

    let multiplier = matchup.doubling_multiplier() * matchup.bonus_multiplier();
    let points = i64::from(matchup.dots) * i64::from(multiplier);
    let points = i32::try_from(points).unwrap_or(i32::MAX);

    if matchup.player_score < matchup.banker_score {
        points
    } else {
        -points
    }
}

/// The same settlement credited to the banker.
pub fn settle_from_banker_perspective(matchup: &BankerMatchup) -> i32 {
    -settle(matchup)
}

pub fn settle_as(matchup: &BankerMatchup, perspective: Perspective) -> i32 {
    match perspective {
        Perspective::Player => settle(matchup),
        Perspective::Banker => settle_from_banker_perspective(matchup),
    }
}

/// Settle from the ten primitive arguments scorecards carry.
#[allow(clippy::too_many_arguments)]
pub fn settle_flags(
    player_score: u32,
    banker_score: u32,
    hole_par: u8,
    dots: u32,
    is_player_doubled: bool,
    is_banker_doubled: bool,
    use_gross_birdies: bool,
    is_par3: bool,
    par3_triples: bool,
    double_birdie_bets: bool,
) -> i32 {
    settle(&BankerMatchup {
        player_score,
        banker_score,
        hole_par,
        dots,
        is_player_doubled,
        is_banker_doubled,
        bonus: BonusRule::from_flags(use_gross_birdies, double_birdie_bets),
        is_par3,
        par3_triples,
    })
}
