use crate::cards::street::Stage;
use crate::Chips;

/// Runtime configuration for a single re-solve session.
///
/// The teacher crate bakes equivalent numbers in as crate-level
/// constants (`STACK`, `B_BLIND`, `S_BLIND`, `MAX_RAISE_REPEATS`); this
/// crate needs both deck sizes selectable at runtime, so the same
/// numbers live on a plain struct instead, threaded explicitly rather
/// than read from globals (see the Design Notes on eliminating global
/// mutable game state).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    /// Use the 24-card limited deck (ranks 9..Ace) instead of the full 52.
    pub limited: bool,
    pub stack: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Raises allowed per betting round, per stage.
    pub raises_per_stage: usize,
    /// Chance-node public-card outcomes sampled, rather than enumerated.
    pub max_events: usize,
    /// Default CFR iteration count for a resolve call.
    pub cfr_iterations: usize,
    /// Regret floor applied before normalizing a strategy row.
    pub regret_floor: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            limited: false,
            stack: 100,
            small_blind: 1,
            big_blind: 2,
            raises_per_stage: 2,
            max_events: 3,
            cfr_iterations: 100,
            regret_floor: 0.001,
        }
    }
}

impl GameConfig {
    pub fn limited() -> Self {
        Self {
            limited: true,
            ..Self::default()
        }
    }

    /// Number of distinct cards in the active deck.
    pub const fn deck_size(&self) -> usize {
        if self.limited {
            24
        } else {
            52
        }
    }

    /// Number of distinct hole-pair keys, `H`, for the active deck.
    pub const fn n_hole_pairs(&self) -> usize {
        let n = self.deck_size();
        n * (n - 1) / 2
    }

    /// Arbitrary pot cap used to normalize a stage's relative pot for
    /// value-network inputs, matching the stage-specific caps the
    /// training-data generator draws pots from.
    pub const fn stage_max_pot(&self, stage: Stage) -> Chips {
        match stage {
            Stage::Pref => self.big_blind * 2,
            Stage::Flop => 40,
            Stage::Turn => 60,
            Stage::Rive | Stage::Show => 80,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_sizes_match_hole_pair_counts() {
        let full = GameConfig::default();
        assert_eq!(full.deck_size(), 52);
        assert_eq!(full.n_hole_pairs(), 1326);

        let limited = GameConfig::limited();
        assert_eq!(limited.deck_size(), 24);
        assert_eq!(limited.n_hole_pairs(), 276);
    }
}
