//! Static evaluation of a snapshot from the agent's fixed perspective.
//!
//! Three weighted components: the score differential, the agent's divercité
//! count, and control of the central columns by cities. Both search
//! polarities call the same unnegated function; the agent's identity, not
//! the player to move, decides the sign of every term.

use super::config::EvaluationConfig;
use crate::core::{Board, PlayerId, Shape};
use crate::game::GameState;
use crate::logic::is_divercite;

/// Columns whose city occupancy is specially weighted.
pub const CENTER_COLUMNS: [usize; 2] = [3, 5];

pub fn evaluate(state: &GameState, agent: PlayerId, weights: &EvaluationConfig) -> i32 {
    let scores = state.scores();
    let score_diff = scores[&agent] - scores[&agent.opponent()];

    weights.score_weight * score_diff
        + weights.divercite_weight * divercite_count(&state.board, agent)
        + weights.center_weight * center_control(&state.board, agent)
}

/// Number of the agent's own divercités. Opponent divercités are not
/// subtracted here.
pub fn divercite_count(board: &Board, agent: PlayerId) -> i32 {
    board
        .pieces
        .iter()
        .filter(|(&pos, piece)| piece.owner == agent && is_divercite(board, pos))
        .count() as i32
}

/// +1 per agent city, -1 per opponent city, over the central columns.
/// Resources there count for nothing.
pub fn center_control(board: &Board, agent: PlayerId) -> i32 {
    let mut control = 0;
    for (&pos, piece) in &board.pieces {
        if piece.kind.shape == Shape::City && CENTER_COLUMNS.contains(&pos.col) {
            if piece.owner == agent {
                control += 1;
            } else {
                control -= 1;
            }
        }
    }
    control
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Color, Piece, PieceKind, Position};

    const P1: PlayerId = PlayerId::Player1;
    const P2: PlayerId = PlayerId::Player2;

    fn city(color: Color, owner: PlayerId) -> Piece {
        Piece::new(PieceKind::new(color, Shape::City), owner)
    }

    fn resource(color: Color, owner: PlayerId) -> Piece {
        Piece::new(PieceKind::new(color, Shape::Resource), owner)
    }

    /// City at (3,4) ringed by four distinct resource colors.
    fn board_with_divercite(city_owner: PlayerId) -> Board {
        let mut board = Board::new();
        board.place_piece(Position::new(3, 4), city(Color::Red, city_owner));
        board.place_piece(Position::new(2, 4), resource(Color::Red, P1));
        board.place_piece(Position::new(4, 4), resource(Color::Green, P2));
        board.place_piece(Position::new(3, 3), resource(Color::Blue, P1));
        board.place_piece(Position::new(3, 5), resource(Color::Yellow, P2));
        board
    }

    #[test]
    fn own_divercite_counts() {
        let board = board_with_divercite(P1);
        assert_eq!(divercite_count(&board, P1), 1);
    }

    #[test]
    fn opponent_divercite_is_not_subtracted() {
        let board = board_with_divercite(P2);
        assert_eq!(divercite_count(&board, P1), 0);
    }

    #[test]
    fn center_control_offsets_to_zero() {
        let mut board = Board::new();
        board.place_piece(Position::new(2, 3), city(Color::Red, P1));
        board.place_piece(Position::new(2, 5), city(Color::Blue, P2));
        assert_eq!(center_control(&board, P1), 0);
    }

    #[test]
    fn lone_center_city_scores_one() {
        let mut board = Board::new();
        board.place_piece(Position::new(2, 3), city(Color::Red, P1));
        assert_eq!(center_control(&board, P1), 1);
        assert_eq!(center_control(&board, P2), -1);
    }

    #[test]
    fn center_ignores_resources_and_outer_columns() {
        let mut board = Board::new();
        // resource in a central column
        board.place_piece(Position::new(4, 3), resource(Color::Red, P1));
        // city outside the central columns
        board.place_piece(Position::new(4, 1), city(Color::Red, P1));
        assert_eq!(center_control(&board, P1), 0);
    }

    #[test]
    fn evaluation_combines_weighted_components() {
        let weights = crate::player::ai::AIConfig::default().evaluation;
        // P1 divercité worth 5 points, plus the achievement bonus.
        let state = GameState::new(board_with_divercite(P1));
        assert_eq!(evaluate(&state, P1, &weights), 10 * 5 + 5 * 1);
        // Same snapshot seen by P2: down 5 on score, nothing else.
        assert_eq!(evaluate(&state, P2, &weights), 10 * -5);
    }
}
