use crate::core::{Board, Color, Move, Piece, PieceKind, PlayerId, Position, Shape, BOARD_SIZE};
use std::collections::HashMap;

/// Points for a city surrounded by four distinct resource colors.
pub const DIVERCITE_POINTS: i32 = 5;

/// Every placement the player can make: each kind still in reserve, onto
/// each empty slot of the matching shape.
///
/// The order is deterministic (kinds in `PieceKind::all()` order, cells
/// row-major); the search engine's tie-break keeps the earliest move of
/// equal value, so this order is part of the engine's observable behavior.
pub fn legal_moves(board: &Board, player: PlayerId) -> Vec<Move> {
    let mut moves = Vec::new();
    for kind in PieceKind::all() {
        if board.reserve_count(player, kind) == 0 {
            continue;
        }
        for row in 0..BOARD_SIZE {
            for col in 0..BOARD_SIZE {
                let to = Position::new(row, col);
                if Board::slot_shape(to) == Some(kind.shape) && board.get_piece(to).is_none() {
                    moves.push(Move::new(kind, to));
                }
            }
        }
    }
    moves
}

/// Apply a placement, returning the successor board. The input is never
/// mutated.
pub fn apply_move(board: &Board, mv: &Move, player: PlayerId) -> Board {
    let mut next = board.clone();
    next.last_move = Some(*mv);
    if next.take_from_reserve(player, mv.kind) {
        next.place_piece(mv.to, Piece::new(mv.kind, player));
    }
    next
}

/// A divercité: a city whose four orthogonal neighbours hold resources of
/// four distinct colors.
pub fn is_divercite(board: &Board, pos: Position) -> bool {
    let piece = match board.get_piece(pos) {
        Some(p) => p,
        None => return false,
    };
    if piece.kind.shape != Shape::City {
        return false;
    }
    let colors: Vec<Color> = Board::neighbors(pos)
        .into_iter()
        .filter_map(|n| board.get_piece(n))
        .filter(|p| p.kind.shape == Shape::Resource)
        .map(|p| p.kind.color)
        .collect();
    if colors.len() != 4 {
        return false;
    }
    let mut seen = [false; 4];
    for color in colors {
        let idx = match color {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
            Color::Yellow => 3,
        };
        if seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Points earned by the city at `pos`: DIVERCITE_POINTS for a divercité,
/// otherwise one per adjacent resource matching the city's color.
pub fn city_points(board: &Board, pos: Position) -> i32 {
    if is_divercite(board, pos) {
        return DIVERCITE_POINTS;
    }
    let city = match board.get_piece(pos) {
        Some(p) if p.kind.shape == Shape::City => p,
        _ => return 0,
    };
    Board::neighbors(pos)
        .into_iter()
        .filter_map(|n| board.get_piece(n))
        .filter(|p| p.kind.shape == Shape::Resource && p.kind.color == city.kind.color)
        .count() as i32
}

/// Current score of both players. Both entries are always present.
pub fn compute_scores(board: &Board) -> HashMap<PlayerId, i32> {
    let mut scores = HashMap::from([(PlayerId::Player1, 0), (PlayerId::Player2, 0)]);
    for (&pos, piece) in &board.pieces {
        if piece.kind.shape == Shape::City {
            *scores.entry(piece.owner).or_insert(0) += city_points(board, pos);
        }
    }
    scores
}

/// The game ends when both reserves are exhausted.
pub fn is_done(board: &Board) -> bool {
    board.reserve_empty(PlayerId::Player1) && board.reserve_empty(PlayerId::Player2)
}
