use crate::core::Move;
use crate::game::GameState;
use std::time::Duration;

/// Something that can take a turn: human TUI, remote peer, or an AI.
pub trait PlayerController {
    /// Pick a move for the current snapshot. `remaining` is the time left
    /// on this player's clock. `None` means resignation (or, for an AI, no
    /// legal move to give).
    fn choose_move(&self, state: &GameState, remaining: Duration) -> Option<Move>;

    fn name(&self) -> &str;

    /// Local controllers' moves are forwarded to the server in network play.
    fn is_local(&self) -> bool;

    /// Interactive controllers own the terminal while choosing a move.
    fn is_interactive(&self) -> bool {
        false
    }
}
