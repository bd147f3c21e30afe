#[cfg(test)]
mod tests {
    use crate::core::{
        board_from_strings, initial_board, Board, Color, Move, PieceKind, PlayerId, Position,
        Shape, BOARD_SIZE,
    };
    use crate::logic::{
        apply_move, compute_scores, is_divercite, is_done, legal_moves, DIVERCITE_POINTS,
    };

    const P1: PlayerId = PlayerId::Player1;
    const P2: PlayerId = PlayerId::Player2;

    fn all_positions() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Position::new(row, col)))
    }

    /// P1 red city at (3,4) with a complete four-color ring; P2 blue city
    /// at (5,4) with a single matching blue resource.
    fn scoring_board() -> Board {
        board_from_strings(&[
            ". . . . .  . . . .",
            ". . . . .  . . . .",
            ". . . . r1 . . . .",
            ". . . b1 R1 y2 . . .",
            ". . . .  g2 . . . .",
            ". . . b2 B2 . . . .",
            ". . . . .  . . . .",
            ". . . . .  . . . .",
            ". . . . .  . . . .",
        ])
    }

    #[test]
    fn diamond_geometry() {
        let in_bounds: Vec<Position> = all_positions().filter(|&p| Board::in_bounds(p)).collect();
        assert_eq!(in_bounds.len(), 41);

        let cities = in_bounds
            .iter()
            .filter(|&&p| Board::slot_shape(p) == Some(Shape::City))
            .count();
        let resources = in_bounds
            .iter()
            .filter(|&&p| Board::slot_shape(p) == Some(Shape::Resource))
            .count();
        assert_eq!(cities, 16);
        assert_eq!(resources, 25);

        assert!(!Board::in_bounds(Position::new(0, 0)));
        assert_eq!(Board::slot_shape(Position::new(0, 0)), None);
    }

    #[test]
    fn neighbor_counts() {
        assert_eq!(Board::neighbors(Position::new(4, 4)).len(), 4);
        // the top tip only touches the cell below it
        assert_eq!(Board::neighbors(Position::new(0, 4)).len(), 1);
        // every city slot sits clear of the rim
        for pos in all_positions() {
            if Board::slot_shape(pos) == Some(Shape::City) {
                assert_eq!(Board::neighbors(pos).len(), 4, "city slot {} on rim", pos);
            }
        }
    }

    #[test]
    fn opening_move_enumeration() {
        let board = initial_board();
        let moves = legal_moves(&board, P1);

        // 4 city kinds x 16 slots + 4 resource kinds x 25 slots
        assert_eq!(moves.len(), 4 * 16 + 4 * 25);

        for mv in &moves {
            assert_eq!(Board::slot_shape(mv.to), Some(mv.kind.shape));
        }

        // deterministic order: first kind in PieceKind::all() on the first
        // row-major city slot
        assert_eq!(
            moves[0],
            Move::new(PieceKind::new(Color::Red, Shape::City), Position::new(1, 4))
        );
    }

    #[test]
    fn enumeration_respects_reserves() {
        let mut board = Board::new();
        board.add_to_reserve(P1, PieceKind::new(Color::Blue, Shape::Resource), 1);
        let moves = legal_moves(&board, P1);
        assert_eq!(moves.len(), 25);
        assert!(moves
            .iter()
            .all(|m| m.kind == PieceKind::new(Color::Blue, Shape::Resource)));
        // the other player has nothing to play
        assert!(legal_moves(&board, P2).is_empty());
    }

    #[test]
    fn apply_move_accounting() {
        let board = initial_board();
        let kind = PieceKind::new(Color::Green, Shape::City);
        let mv = Move::new(kind, Position::new(1, 4));

        let next = apply_move(&board, &mv, P1);
        assert_eq!(next.reserve_count(P1, kind), 1);
        assert_eq!(next.get_piece(mv.to).map(|p| p.owner), Some(P1));
        assert_eq!(next.last_move, Some(mv));

        // input board untouched
        assert_eq!(board.reserve_count(P1, kind), 2);
        assert!(board.get_piece(mv.to).is_none());
    }

    #[test]
    fn divercite_detection() {
        let board = scoring_board();
        assert!(is_divercite(&board, Position::new(3, 4)));
        // only two resources around the blue city
        assert!(!is_divercite(&board, Position::new(5, 4)));
        // resources themselves never qualify
        assert!(!is_divercite(&board, Position::new(2, 4)));
        // empty cell
        assert!(!is_divercite(&board, Position::new(1, 4)));
    }

    #[test]
    fn duplicate_colors_break_the_divercite() {
        let mut board = scoring_board();
        // swap the yellow resource for a second red one
        board.place_piece(
            Position::new(3, 5),
            crate::core::Piece::new(PieceKind::new(Color::Red, Shape::Resource), P2),
        );
        assert!(!is_divercite(&board, Position::new(3, 4)));
        // ...but the red city now touches two matching resources
        let scores = compute_scores(&board);
        assert_eq!(scores[&P1], 2);
    }

    #[test]
    fn scoring() {
        let scores = compute_scores(&scoring_board());
        assert_eq!(scores[&P1], DIVERCITE_POINTS);
        assert_eq!(scores[&P2], 1);
    }

    #[test]
    fn empty_board_scores_zero_for_both() {
        let scores = compute_scores(&Board::new());
        assert_eq!(scores[&P1], 0);
        assert_eq!(scores[&P2], 0);
    }

    #[test]
    fn terminal_when_reserves_run_out() {
        // boards built from strings carry no reserves
        assert!(is_done(&scoring_board()));

        let mut board = scoring_board();
        board.add_to_reserve(P2, PieceKind::new(Color::Yellow, Shape::City), 1);
        assert!(!is_done(&board));

        let mv = Move::new(
            PieceKind::new(Color::Yellow, Shape::City),
            Position::new(1, 4),
        );
        let done = apply_move(&board, &mv, P2);
        assert!(is_done(&done));
    }
}
