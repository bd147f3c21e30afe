use super::config::AIConfig;
use super::heuristic::evaluate;
use crate::core::{Move, PlayerId};
use crate::game::GameState;
use crate::player::PlayerController;
use log::{debug, warn};
use std::cell::Cell;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The root snapshot is terminal, or enumeration came up empty.
    #[error("no legal action available from this position")]
    NoMoveAvailable,
}

/// Depth-limited minimax with alpha-beta pruning, driven by the weighted
/// static evaluator. The depth is fixed up front from the remaining clock;
/// there is no mid-search deadline check and no transposition caching.
pub struct MinimaxAI {
    pub player_id: PlayerId,
    pub name: String,
    pub config: AIConfig,
    nodes: Cell<usize>,
}

impl MinimaxAI {
    pub fn new(player_id: PlayerId, name: &str) -> Self {
        Self::with_config(player_id, name, AIConfig::get().clone())
    }

    pub fn with_config(player_id: PlayerId, name: &str, config: AIConfig) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            config,
            nodes: Cell::new(0),
        }
    }

    /// Select the best move for the agent from this snapshot.
    ///
    /// The agent searches as the maximizer when it is its own turn and as
    /// the minimizer otherwise; either way the evaluation stays in the
    /// agent's perspective. A terminal root (or an empty enumeration at the
    /// root) yields [`SearchError::NoMoveAvailable`] rather than an
    /// invented move.
    pub fn compute_action(
        &self,
        state: &GameState,
        remaining: Duration,
    ) -> Result<Move, SearchError> {
        let max_depth = self.config.search.depth_for(remaining);
        let maximizing = state.next_player() == self.player_id;
        self.nodes.set(0);

        let (value, best) = self.minimax(state, 0, max_depth, i32::MIN, i32::MAX, maximizing);
        debug!(
            "{}: depth={} nodes={} value={} move={}",
            self.name,
            max_depth,
            self.nodes.get(),
            value,
            best.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
        );
        best.ok_or(SearchError::NoMoveAvailable)
    }

    /// One recursive procedure for both polarities; `maximizing` flips on
    /// each ply. Returns the backed-up value and the move that produced it
    /// (absent at cutoff and terminal nodes).
    ///
    /// Best-move updates use strict comparison, so among equal-valued
    /// children the earliest in enumeration order is kept. After each child
    /// the owning bound tightens, and siblings are abandoned once
    /// `beta <= alpha`.
    fn minimax(
        &self,
        state: &GameState,
        depth: u32,
        max_depth: u32,
        alpha: i32,
        beta: i32,
        maximizing: bool,
    ) -> (i32, Option<Move>) {
        self.nodes.set(self.nodes.get() + 1);

        if depth == max_depth || state.is_done() {
            return (
                evaluate(state, self.player_id, &self.config.evaluation),
                None,
            );
        }

        let moves = state.possible_actions();

        if maximizing {
            let mut alpha = alpha;
            let mut best_score = i32::MIN;
            let mut best_move = None;
            for mv in moves {
                let next = state.apply(&mv);
                let (score, _) = self.minimax(&next, depth + 1, max_depth, alpha, beta, false);
                if score > best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            (best_score, best_move)
        } else {
            let mut beta = beta;
            let mut best_score = i32::MAX;
            let mut best_move = None;
            for mv in moves {
                let next = state.apply(&mv);
                let (score, _) = self.minimax(&next, depth + 1, max_depth, alpha, beta, true);
                if score < best_score {
                    best_score = score;
                    best_move = Some(mv);
                }
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            (best_score, best_move)
        }
    }
}

impl PlayerController for MinimaxAI {
    fn choose_move(&self, state: &GameState, remaining: Duration) -> Option<Move> {
        match self.compute_action(state, remaining) {
            Ok(mv) => Some(mv),
            Err(err) => {
                warn!("{}: {}", self.name, err);
                None
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_local(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Color, Piece, PieceKind, Position, Shape};

    const P1: PlayerId = PlayerId::Player1;
    const P2: PlayerId = PlayerId::Player2;

    fn ai(player_id: PlayerId) -> MinimaxAI {
        MinimaxAI::with_config(player_id, "test", AIConfig::default())
    }

    fn city(color: Color) -> PieceKind {
        PieceKind::new(color, Shape::City)
    }

    fn resource(color: Color) -> PieceKind {
        PieceKind::new(color, Shape::Resource)
    }

    /// P1 red city at (3,4) with three distinct resources around it; the
    /// fourth neighbour (4,4) is open. A yellow resource there completes
    /// the divercité.
    fn near_divercite_board() -> Board {
        let mut board = Board::new();
        board.place_piece(Position::new(3, 4), Piece::new(city(Color::Red), P1));
        board.place_piece(Position::new(2, 4), Piece::new(resource(Color::Red), P1));
        board.place_piece(Position::new(3, 3), Piece::new(resource(Color::Green), P2));
        board.place_piece(Position::new(3, 5), Piece::new(resource(Color::Blue), P1));
        board
    }

    #[test]
    fn depth_one_picks_best_immediate_move() {
        let mut board = near_divercite_board();
        board.add_to_reserve(P1, resource(Color::Red), 1);
        board.add_to_reserve(P1, resource(Color::Yellow), 1);
        let state = GameState::new(board);

        let engine = ai(P1);
        let (value, best) = engine.minimax(&state, 0, 1, i32::MIN, i32::MAX, true);

        // Completing the divercité: 5 points + one achievement = 10*5 + 5.
        assert_eq!(value, 55);
        assert_eq!(
            best,
            Some(Move::new(resource(Color::Yellow), Position::new(4, 4)))
        );
    }

    #[test]
    fn equal_children_resolve_to_first_enumerated() {
        // Nothing on the board scores: every resource placement evaluates
        // to zero.
        let mut board = Board::new();
        board.add_to_reserve(P1, resource(Color::Green), 2);
        let state = GameState::new(board);

        let engine = ai(P1);
        let (value, best) = engine.minimax(&state, 0, 1, i32::MIN, i32::MAX, true);

        assert_eq!(value, 0);
        assert_eq!(best, Some(state.possible_actions()[0]));
    }

    #[test]
    fn minimizing_root_avoids_gifting_the_divercite() {
        // P2 to move; the agent is P1. Dropping the yellow resource on
        // (4,4) would hand P1 the divercité, so the minimizer must not.
        let mut board = near_divercite_board();
        board.add_to_reserve(P2, resource(Color::Yellow), 1);
        let mut state = GameState::new(board);
        state.current_player = P2;

        let engine = ai(P1);
        let (value, best) = engine.minimax(&state, 0, 1, i32::MIN, i32::MAX, false);

        // Any other square leaves the red city at one matching resource.
        assert_eq!(value, 10);
        let chosen = best.expect("a move");
        assert_ne!(chosen.to, Position::new(4, 4));
        // First enumerated non-gifting square wins the tie.
        let first_safe = state
            .possible_actions()
            .into_iter()
            .find(|m| m.to != Position::new(4, 4))
            .unwrap();
        assert_eq!(chosen, first_safe);
    }

    #[test]
    fn terminal_root_reports_no_move() {
        // Both reserves empty: the game is over before the search starts.
        let board = near_divercite_board();
        let state = GameState::new(board);

        let engine = ai(P1);
        assert_eq!(
            engine.compute_action(&state, Duration::from_secs(900)),
            Err(SearchError::NoMoveAvailable)
        );
    }

    #[test]
    fn compute_action_uses_clock_for_depth() {
        let mut board = Board::new();
        board.add_to_reserve(P1, resource(Color::Red), 1);
        board.add_to_reserve(P2, resource(Color::Blue), 1);
        let state = GameState::new(board);

        let engine = ai(P1);
        // 2 plies of material: any budget finishes the game tree.
        let mv = engine.compute_action(&state, Duration::from_secs(10)).unwrap();
        assert_eq!(mv.kind, resource(Color::Red));
    }

    /// Reference search without pruning; used to pin down that pruning
    /// never changes the backed-up value.
    fn plain_minimax(
        engine: &MinimaxAI,
        state: &GameState,
        depth: u32,
        max_depth: u32,
        maximizing: bool,
    ) -> i32 {
        if depth == max_depth || state.is_done() {
            return evaluate(state, engine.player_id, &engine.config.evaluation);
        }
        let actions = state.possible_actions();
        let children = actions
            .iter()
            .map(|mv| plain_minimax(engine, &state.apply(mv), depth + 1, max_depth, !maximizing));
        if maximizing {
            children.max().unwrap_or(i32::MIN)
        } else {
            children.min().unwrap_or(i32::MAX)
        }
    }

    #[test]
    fn pruning_preserves_the_minimax_value() {
        let mut board = near_divercite_board();
        board.add_to_reserve(P1, resource(Color::Yellow), 1);
        board.add_to_reserve(P1, city(Color::Blue), 1);
        board.add_to_reserve(P2, resource(Color::Red), 1);
        board.add_to_reserve(P2, city(Color::Green), 1);
        let state = GameState::new(board);

        let engine = ai(P1);
        for max_depth in 1..=3 {
            let (pruned, _) =
                engine.minimax(&state, 0, max_depth, i32::MIN, i32::MAX, true);
            let full = plain_minimax(&engine, &state, 0, max_depth, true);
            assert_eq!(pruned, full, "divergence at depth {}", max_depth);
        }
    }
}
