use serde::{Deserialize, Serialize};

/// Most holes a tee can carry.
pub const MAX_HOLES: usize = 18;

/// Par and difficulty rank (1 = hardest) of one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleContext {
    pub par: u8,
    pub stroke_index: u8,
}

impl HoleContext {
    pub const fn new(par: u8, stroke_index: u8) -> Self {
        Self { par, stroke_index }
    }

    pub fn is_par3(&self) -> bool {
        self.par == 3
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseError {
    NoHoles,
    TooManyHoles(usize),
    ZeroPar { hole: usize },
    StrokeIndexOutOfRange { hole: usize, stroke_index: u8 },
    DuplicateStrokeIndex { stroke_index: u8 },
}

impl std::fmt::Display for CourseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoHoles => write!(f, "tee has no holes"),
            Self::TooManyHoles(n) => write!(f, "tee has {n} holes (max {MAX_HOLES})"),
            Self::ZeroPar { hole } => write!(f, "hole {hole} has par 0"),
            Self::StrokeIndexOutOfRange { hole, stroke_index } => {
                write!(f, "hole {hole} has stroke index {stroke_index} (expected 1-18)")
            },
            Self::DuplicateStrokeIndex { stroke_index } => {
                write!(f, "stroke index {stroke_index} is used by more than one hole")
            },
        }
    }
}

impl std::error::Error for CourseError {}

/// A set of tees on a course: slope plus per-hole par and stroke index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tee {
    pub name: String,
    pub slope_rating: u16,
    holes: Vec<HoleContext>,
}

impl Tee {
    /// Build a tee, checking hole count, pars and stroke indices.
    pub fn new(
        name: impl Into<String>,
        slope_rating: u16,
        holes: Vec<HoleContext>,
    ) -> Result<Self, CourseError> {
        let name = name.into();
        if let Err(e) = validate_holes(&holes) {
            tracing::debug!(tee = %name, error = %e, "Rejected tee definition");
            return Err(e);
        }
        Ok(Self {
            name,
            slope_rating,
            holes,
        })
    }

    /// Hole by 1-based number.
    pub fn hole(&self, number: usize) -> Option<&HoleContext> {
        number.checked_sub(1).and_then(|i| self.holes.get(i))
    }

    pub fn holes(&self) -> &[HoleContext] {
        &self.holes
    }

    pub fn hole_count(&self) -> usize {
        self.holes.len()
    }

    /// Total par of all holes.
    pub fn par(&self) -> u32 {
        self.holes.iter().map(|h| u32::from(h.par)).sum()
    }
}

fn validate_holes(holes: &[HoleContext]) -> Result<(), CourseError> {
    if holes.is_empty() {
        return Err(CourseError::NoHoles);
    }
    if holes.len() > MAX_HOLES {
        return Err(CourseError::TooManyHoles(holes.len()));
    }
    let mut seen = [false; MAX_HOLES + 1];
    for (i, hole) in holes.iter().enumerate() {
        let number = i + 1;
        if hole.par == 0 {
            return Err(CourseError::ZeroPar { hole: number });
        }
        let si = usize::from(hole.stroke_index);
        if si == 0 || si > MAX_HOLES {
            return Err(CourseError::StrokeIndexOutOfRange {
                hole: number,
                stroke_index: hole.stroke_index,
            });
        }
        if seen[si] {
            return Err(CourseError::DuplicateStrokeIndex {
                stroke_index: hole.stroke_index,
            });
        }
        seen[si] = true;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine_holes() -> Vec<HoleContext> {
        [(4, 1), (3, 17), (5, 5), (4, 9), (4, 3), (3, 15), (4, 7), (5, 11), (4, 13)]
            .into_iter()
            .map(|(par, si)| HoleContext::new(par, si))
            .collect()
    }

    #[test]
    fn nine_hole_tee_is_valid() {
        let tee = Tee::new("White", 121, nine_holes()).unwrap();
        assert_eq!(tee.hole_count(), 9);
        assert_eq!(tee.par(), 36);
        assert_eq!(tee.hole(2), Some(&HoleContext::new(3, 17)));
        assert!(tee.hole(2).unwrap().is_par3());
    }

    #[test]
    fn hole_lookup_is_one_based() {
        let tee = Tee::new("White", 121, nine_holes()).unwrap();
        assert!(tee.hole(0).is_none());
        assert!(tee.hole(10).is_none());
        assert_eq!(tee.hole(1).unwrap().stroke_index, 1);
    }

    #[test]
    fn empty_tee_rejected() {
        assert_eq!(Tee::new("Red", 113, vec![]), Err(CourseError::NoHoles));
    }

    #[test]
    fn nineteen_holes_rejected() {
        let holes = vec![HoleContext::new(4, 1); 19];
        assert_eq!(
            Tee::new("Red", 113, holes),
            Err(CourseError::TooManyHoles(19))
        );
    }

    #[test]
    fn zero_par_rejected() {
        let mut holes = nine_holes();
        holes[4].par = 0;
        assert_eq!(
            Tee::new("Red", 113, holes),
            Err(CourseError::ZeroPar { hole: 5 })
        );
    }

    #[test]
    fn stroke_index_out_of_range_rejected() {
        let mut holes = nine_holes();
        holes[0].stroke_index = 19;
        assert!(matches!(
            Tee::new("Red", 113, holes),
            Err(CourseError::StrokeIndexOutOfRange { hole: 1, .. })
        ));
    }

    #[test]
    fn duplicate_stroke_index_rejected() {
        let mut holes = nine_holes();
        holes[1].stroke_index = 1;
        assert_eq!(
            Tee::new("Red", 113, holes),
            Err(CourseError::DuplicateStrokeIndex { stroke_index: 1 })
        );
    }

    #[test]
    fn error_messages_name_the_hole() {
        let err = CourseError::ZeroPar { hole: 7 };
        assert_eq!(err.to_string(), "hole 7 has par 0");
    }
}
