use serde::{Deserialize, Serialize};

use crate::handicap::HandicapProfile;

/// Unique identifier for a player within a round.
pub type PlayerId = u64;

/// A golfer registered for a round on a particular tee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub display_name: String,
    pub handicap: HandicapProfile,
}

impl Player {
    pub fn new(id: PlayerId, display_name: impl Into<String>, handicap: HandicapProfile) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            handicap,
        }
    }

    pub fn course_handicap(&self) -> i32 {
        self.handicap.course_handicap()
    }
}
