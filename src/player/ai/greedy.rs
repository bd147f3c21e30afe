use super::config::AIConfig;
use super::heuristic::evaluate;
use crate::core::{Move, PlayerId};
use crate::game::GameState;
use crate::player::PlayerController;
use std::time::Duration;

/// One-ply lookahead: plays the placement whose successor evaluates best,
/// with no regard for the reply. Stronger than random, much weaker than the
/// full search; useful as a sparring partner.
pub struct GreedyAI {
    pub player_id: PlayerId,
    pub name: String,
    pub config: AIConfig,
}

impl GreedyAI {
    pub fn new(player_id: PlayerId, name: &str) -> Self {
        Self {
            player_id,
            name: name.to_string(),
            config: AIConfig::get().clone(),
        }
    }
}

impl PlayerController for GreedyAI {
    fn choose_move(&self, state: &GameState, _remaining: Duration) -> Option<Move> {
        let mut best_score = i32::MIN;
        let mut best_move = None;
        for mv in state.possible_actions() {
            let next = state.apply(&mv);
            let score = evaluate(&next, self.player_id, &self.config.evaluation);
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
        }
        best_move
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

    #[test]
    fn takes_the_immediate_divercite() {
        let p1 = PlayerId::Player1;
        let mut board = Board::new();
        board.place_piece(
            Position::new(3, 4),
            Piece::new(PieceKind::new(Color::Red, Shape::City), p1),
        );
        board.place_piece(
            Position::new(2, 4),
            Piece::new(PieceKind::new(Color::Red, Shape::Resource), p1),
        );
        board.place_piece(
            Position::new(3, 3),
            Piece::new(PieceKind::new(Color::Green, Shape::Resource), p1),
        );
        board.place_piece(
            Position::new(3, 5),
            Piece::new(PieceKind::new(Color::Blue, Shape::Resource), p1),
        );
        board.add_to_reserve(p1, PieceKind::new(Color::Yellow, Shape::Resource), 1);
        let state = GameState::new(board);

        let greedy = GreedyAI {
            player_id: p1,
            name: "greedy".to_string(),
            config: AIConfig::default(),
        };
        let mv = greedy
            .choose_move(&state, Duration::from_secs(1))
            .expect("a move");
        assert_eq!(mv.to, Position::new(4, 4));
    }
}
