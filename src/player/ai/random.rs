use crate::core::{Move, PlayerId};
use crate::game::GameState;
use crate::player::PlayerController;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Uniform random placement. Baseline opponent for self-play runs.
pub struct RandomAI {
    pub name: String,
}

impl RandomAI {
    pub fn new(_player_id: PlayerId, name: &str) -> Self {
        RandomAI {
            name: name.to_string(),
        }
    }
}

impl PlayerController for RandomAI {
    fn choose_move(&self, state: &GameState, _remaining: Duration) -> Option<Move> {
        let moves = state.possible_actions();
        let mut rng = rand::thread_rng();
        moves.choose(&mut rng).copied()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_local(&self) -> bool {
        true
    }
}
