use crate::core::{Board, Color, Piece, PieceKind, PlayerId, Position, Shape};

/// Cities per color in each player's starting reserve.
pub const CITIES_PER_COLOR: usize = 2;
/// Resources per color in each player's starting reserve.
pub const RESOURCES_PER_COLOR: usize = 3;

/// Empty board with both players' full starting reserves.
pub fn initial_board() -> Board {
    let mut board = Board::new();
    for player in [PlayerId::Player1, PlayerId::Player2] {
        for color in Color::ALL {
            board.add_to_reserve(player, PieceKind::new(color, Shape::City), CITIES_PER_COLOR);
            board.add_to_reserve(
                player,
                PieceKind::new(color, Shape::Resource),
                RESOURCES_PER_COLOR,
            );
        }
    }
    board
}

/// Build a board from a whitespace-separated cell grid.
///
/// Each token is either `.` (empty) or a color letter followed by the owner
/// digit: uppercase letter for a city, lowercase for a resource. `R1` is a
/// red city of Player1, `g2` a green resource of Player2. Reserves are left
/// empty; callers set them as needed. Intended for tests and fixtures.
pub fn board_from_strings(rows: &[&str]) -> Board {
    let mut board = Board::new();
    for (row, line) in rows.iter().enumerate() {
        for (col, token) in line.split_whitespace().enumerate() {
            if token == "." {
                continue;
            }
            let pos = Position::new(row, col);
            if let Some(piece) = parse_piece(token) {
                board.place_piece(pos, piece);
            }
        }
    }
    board
}

fn parse_piece(token: &str) -> Option<Piece> {
    let mut chars = token.chars();
    let letter = chars.next()?;
    let owner = match chars.next()? {
        '1' => PlayerId::Player1,
        '2' => PlayerId::Player2,
        _ => return None,
    };
    let shape = if letter.is_uppercase() {
        Shape::City
    } else {
        Shape::Resource
    };
    let color = match letter.to_ascii_uppercase() {
        'R' => Color::Red,
        'G' => Color::Green,
        'B' => Color::Blue,
        'Y' => Color::Yellow,
        _ => return None,
    };
    Some(Piece::new(PieceKind::new(color, shape), owner))
}
