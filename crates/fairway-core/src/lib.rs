pub mod course;
pub mod game_registry;
pub mod game_trait;
pub mod handicap;
pub mod player;
pub mod scorecard;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use std::collections::HashMap;

    use crate::course::{HoleContext, Tee};
    use crate::handicap::HandicapProfile;
    use crate::player::{Player, PlayerId};

    /// Par and stroke index for an 18-hole par-72 layout with four par 3s.
    pub const SAMPLE_HOLES: [(u8, u8); 18] = [
        (4, 7),
        (5, 11),
        (3, 17),
        (4, 1),
        (4, 9),
        (3, 15),
        (5, 5),
        (4, 13),
        (4, 3),
        (4, 8),
        (3, 16),
        (5, 4),
        (4, 12),
        (4, 2),
        (3, 18),
        (4, 10),
        (5, 14),
        (4, 6),
    ];

    /// Create `n` test players with sequential IDs starting at 1. Player `k`
    /// has handicap index `k * 6` at a neutral slope.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                Player::new(
                    i as PlayerId + 1,
                    format!("Player{}", i + 1),
                    HandicapProfile::new((i as f64 + 1.0) * 6.0, 113),
                )
            })
            .collect()
    }

    /// The sample 18-hole tee at slope 113.
    pub fn sample_tee() -> Tee {
        let holes = SAMPLE_HOLES
            .iter()
            .map(|&(par, si)| HoleContext::new(par, si))
            .collect();
        Tee::new("Sample", 113, holes).expect("sample tee must be valid")
    }

    /// Build a score map from `(player_id, strokes)` pairs.
    pub fn scores(pairs: &[(PlayerId, u32)]) -> HashMap<PlayerId, u32> {
        pairs.iter().copied().collect()
    }
}
