use crate::core::{Move, PlayerId};
use crate::display::{render, DisplayState};
use crate::logic;
use crate::player::PlayerController;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Immutable snapshot of a match: the board, whose turn it is, and how many
/// placements have happened. Successors are produced with [`GameState::apply`];
/// a snapshot is never mutated in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: crate::core::Board,
    pub current_player: PlayerId,
    pub turn: usize,
}

impl GameState {
    pub fn new(board: crate::core::Board) -> Self {
        GameState {
            board,
            current_player: PlayerId::Player1,
            turn: 0,
        }
    }

    pub fn next_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> HashMap<PlayerId, i32> {
        logic::compute_scores(&self.board)
    }

    pub fn is_done(&self) -> bool {
        logic::is_done(&self.board)
    }

    /// Legal placements for the player to move, in the deterministic order
    /// documented in [`logic::legal_moves`].
    pub fn possible_actions(&self) -> Vec<Move> {
        logic::legal_moves(&self.board, self.current_player)
    }

    /// Successor snapshot after `mv`. Pure; `self` is left untouched.
    pub fn apply(&self, mv: &Move) -> GameState {
        GameState {
            board: logic::apply_move(&self.board, mv, self.current_player),
            current_player: self.current_player.opponent(),
            turn: self.turn + 1,
        }
    }
}

/// Higher score wins; equal scores draw.
pub fn winner_by_scores(scores: &HashMap<PlayerId, i32>) -> Option<PlayerId> {
    let p1 = scores[&PlayerId::Player1];
    let p2 = scores[&PlayerId::Player2];
    match p1.cmp(&p2) {
        std::cmp::Ordering::Greater => Some(PlayerId::Player1),
        std::cmp::Ordering::Less => Some(PlayerId::Player2),
        std::cmp::Ordering::Equal => None,
    }
}

/// An interactive match: the current snapshot, each player's countdown
/// clock, and (for network play) a channel carrying authoritative state
/// updates from the server.
pub struct Game {
    pub state: GameState,
    pub clocks: HashMap<PlayerId, Duration>,
    pub state_sync_rx: Option<std::sync::mpsc::Receiver<GameState>>,
}

impl Game {
    pub fn new(state: GameState, clock: Duration) -> Self {
        Game {
            state,
            clocks: HashMap::from([(PlayerId::Player1, clock), (PlayerId::Player2, clock)]),
            state_sync_rx: None,
        }
    }

    fn drain_sync(&mut self) {
        if let Some(rx) = &self.state_sync_rx {
            while let Ok(state) = rx.try_recv() {
                self.state = state;
            }
        }
    }

    /// Run the match to completion, rendering between moves. Returns the
    /// winner, or `None` on a draw or user interrupt. `on_move` fires for
    /// every locally-chosen move (network play forwards these to the server).
    pub fn play<F>(
        &mut self,
        p1: &dyn PlayerController,
        p2: &dyn PlayerController,
        mut on_move: F,
    ) -> Option<PlayerId>
    where
        F: FnMut(&Move),
    {
        loop {
            self.drain_sync();

            let player = self.state.current_player;
            let controller = match player {
                PlayerId::Player1 => p1,
                PlayerId::Player2 => p2,
            };

            let mut ds = DisplayState::default();
            ds.last_move = self.state.board.last_move;
            ds.show_cursor = false;
            ds.status_msg = Some(format!("{}'s turn ({:?})", controller.name(), player));
            render(&self.state, &ds, Some(&self.clocks));

            if self.state.is_done() {
                let scores = self.state.scores();
                let winner = winner_by_scores(&scores);
                ds.status_msg = Some(match winner {
                    Some(w) => format!(
                        "Game over! {:?} wins {} - {}",
                        w,
                        scores[&PlayerId::Player1],
                        scores[&PlayerId::Player2]
                    ),
                    None => format!("Game over! Draw {0} - {0}", scores[&PlayerId::Player1]),
                });
                render(&self.state, &ds, Some(&self.clocks));
                std::thread::sleep(Duration::from_secs(5));
                return winner;
            }

            // Let the user bail out of AI-vs-AI or network games with 'q';
            // interactive controllers run their own event loop instead.
            if !controller.is_interactive() && poll_quit(Duration::from_millis(300)) {
                return None;
            }

            let remaining = self.clocks[&player];
            let started = Instant::now();
            let chosen = controller.choose_move(&self.state, remaining);
            let elapsed = started.elapsed();

            let clock = self.clocks.get_mut(&player).expect("clock exists");
            if elapsed >= *clock {
                // Flag fall: the move came too late.
                *clock = Duration::ZERO;
                return Some(player.opponent());
            }
            *clock -= elapsed;

            let Some(mv) = chosen else {
                return Some(player.opponent()); // resignation
            };

            // A server update may have landed while the controller was
            // thinking; if the turn already advanced, this move is stale
            // (or already applied remotely).
            self.drain_sync();
            if self.state.current_player != player {
                continue;
            }

            if controller.is_local() {
                on_move(&mv);
            }
            self.state = self.state.apply(&mv);
        }
    }
}

fn poll_quit(timeout: Duration) -> bool {
    use crossterm::event::{self, Event, KeyCode};
    if event::poll(timeout).unwrap_or(false) {
        if let Ok(Event::Key(key)) = event::read() {
            return key.code == KeyCode::Char('q');
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{initial_board, Color, PieceKind, Position, Shape};

    #[test]
    fn apply_advances_player_and_turn() {
        let state = GameState::new(initial_board());
        let mv = Move::new(
            PieceKind::new(Color::Red, Shape::Resource),
            Position::new(4, 4),
        );
        let next = state.apply(&mv);
        assert_eq!(next.current_player, PlayerId::Player2);
        assert_eq!(next.turn, 1);
        assert!(next.board.get_piece(Position::new(4, 4)).is_some());
        // snapshot untouched
        assert_eq!(state.turn, 0);
        assert!(state.board.get_piece(Position::new(4, 4)).is_none());
    }

    #[test]
    fn action_enumeration_is_deterministic() {
        let state = GameState::new(initial_board());
        assert_eq!(state.possible_actions(), state.possible_actions());
    }

    #[test]
    fn fresh_game_is_scoreless() {
        let state = GameState::new(initial_board());
        let scores = state.scores();
        assert_eq!(scores[&PlayerId::Player1], 0);
        assert_eq!(scores[&PlayerId::Player2], 0);
        assert!(!state.is_done());
    }

    #[test]
    fn winner_resolution() {
        let scores = HashMap::from([(PlayerId::Player1, 12), (PlayerId::Player2, 9)]);
        assert_eq!(winner_by_scores(&scores), Some(PlayerId::Player1));
        let tied = HashMap::from([(PlayerId::Player1, 7), (PlayerId::Player2, 7)]);
        assert_eq!(winner_by_scores(&tied), None);
    }
}
