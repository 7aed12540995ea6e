//! Playout policies used to score freshly expanded nodes.
//!
//! A rollout plays a position out to the end and reports how it finished.
//! The search only needs the final [`Outcome`]; the moves played along the
//! way are thrown away.

use games_connect4::{GameError, Outcome, State};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

/// Trait for playout policies.
///
/// Implementations must not modify the position they are given and must
/// draw all randomness from `rng` so searches replay under a fixed seed.
pub trait Rollout: Send + Sync {
    /// Play `state` out to a terminal outcome.
    fn simulate(&self, state: &State, rng: &mut ChaCha20Rng) -> Result<Outcome, GameError>;
}

/// Plays uniformly random legal moves until the game ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRollout;

impl RandomRollout {
    pub fn new() -> Self {
        Self
    }
}

impl Rollout for RandomRollout {
    fn simulate(&self, state: &State, rng: &mut ChaCha20Rng) -> Result<Outcome, GameError> {
        let mut current = state.clone();
        loop {
            let outcome = current.classify();
            if outcome.is_terminal() {
                return Ok(outcome);
            }
            let moves = current.legal_moves();
            let mv = moves.choose(rng).copied().ok_or_else(|| {
                GameError::InvalidPosition("unfinished game with no legal moves".to_string())
            })?;
            current = current.apply(mv)?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use games_connect4::{Move, Player};
    use rand::SeedableRng;

    #[test]
    fn test_rollout_reaches_terminal() {
        let rollout = RandomRollout::new();
        for seed in 0..20 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            let outcome = rollout
                .simulate(&State::new(Player::Opponent), &mut rng)
                .unwrap();
            assert!(outcome.is_terminal(), "seed {seed} gave {outcome:?}");
        }
    }

    #[test]
    fn test_rollout_leaves_input_untouched() {
        let state = State::new(Player::Engine).apply(Move::new(3)).unwrap();
        let before = state.clone();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        RandomRollout.simulate(&state, &mut rng).unwrap();
        assert_eq!(state, before);
    }

    #[test]
    fn test_rollout_of_finished_game_returns_its_outcome() {
        let state = State::from_rows(&["....", "O...", "O...", "O..."], Player::Engine)
            .unwrap()
            .apply(Move::new(0))
            .unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(
            RandomRollout.simulate(&state, &mut rng).unwrap(),
            Outcome::EngineWins
        );
    }

    #[test]
    fn test_rollout_is_deterministic_per_seed() {
        let state = State::new(Player::Opponent);
        let run = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            (0..10)
                .map(|_| RandomRollout.simulate(&state, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }

    #[test]
    fn test_single_column_board_always_draws() {
        // 4x1: players alternate in one column, nobody can connect
        let state = State::with_dimensions(4, 1, Player::Engine).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        assert_eq!(RandomRollout.simulate(&state, &mut rng).unwrap(), Outcome::Draw);
    }
}
