use serde::{Deserialize, Serialize};

/// USGA slope rating of a course of standard difficulty.
pub const NEUTRAL_SLOPE: f64 = 113.0;

/// Strokes over par counted before handicap strokes (net double bogey).
pub const DOUBLE_BOGEY_MARGIN: u32 = 2;

/// Holes in one full allocation pass.
const HOLES_PER_PASS: i32 = 18;

/// A player's handicap index together with the slope of the tee they play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandicapProfile {
    pub handicap_index: f64,
    pub slope_rating: u16,
}

impl HandicapProfile {
    pub fn new(handicap_index: f64, slope_rating: u16) -> Self {
        Self {
            handicap_index,
            slope_rating,
        }
    }

    /// Course handicap for this profile.
    pub fn course_handicap(&self) -> i32 {
        course_handicap(self.handicap_index, self.slope_rating)
    }
}

/// Scale a handicap index by slope: `round(index * slope / 113)`.
///
/// Rounds half away from zero. Inputs are not validated.
pub fn course_handicap(handicap_index: f64, slope_rating: u16) -> i32 {
    (handicap_index * f64::from(slope_rating) / NEUTRAL_SLOPE).round() as i32
}

/// Handicap strokes received on a hole of the given stroke index.
///
/// Strokes are dealt in passes over the 18 stroke indices: every hole up to
/// the course handicap gets one, then a second pass covers the amount above
/// 18 and a third pass the amount above 36.
pub fn stroke_allowance(course_handicap: i32, stroke_index: u8) -> u32 {
    if course_handicap <= 0 {
        return 0;
    }
    let si = i32::from(stroke_index);

    let base = if course_handicap > HOLES_PER_PASS {
        1
    } else {
        u32::from(si <= course_handicap)
    };
    let second = if course_handicap > HOLES_PER_PASS {
        u32::from(si <= course_handicap - HOLES_PER_PASS)
    } else {
        0
    };
    let third = if course_handicap > 2 * HOLES_PER_PASS {
        u32::from(si <= course_handicap - 2 * HOLES_PER_PASS)
    } else {
        0
    };

    base + second + third
}

/// Highest score counted on a hole: par + 2 + handicap strokes.
pub fn max_hole_score(par: u8, course_handicap: i32, stroke_index: u8) -> u32 {
    u32::from(par) + DOUBLE_BOGEY_MARGIN + stroke_allowance(course_handicap, stroke_index)
}
