use crate::core::{Move, PlayerId};
use crate::game::GameState;
use crate::player::PlayerController;
use std::sync::mpsc;
use std::time::Duration;

/// Stand-in for the remote player: blocks until the networking task hands
/// over the opponent's move.
pub struct NetworkController {
    player_id: PlayerId,
    name: String,
    rx: mpsc::Receiver<Move>,
}

impl NetworkController {
    pub fn new(player_id: PlayerId, name: &str, rx: mpsc::Receiver<Move>) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            rx,
        }
    }

    pub fn player_id(&self) -> PlayerId {
        self.player_id
    }
}

impl PlayerController for NetworkController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, _state: &GameState, _remaining: Duration) -> Option<Move> {
        self.rx.recv().ok()
    }

    fn is_local(&self) -> bool {
        false
    }
}
