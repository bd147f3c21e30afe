use crate::core::{Board, Move, PieceKind, PlayerId, Position, BOARD_SIZE};
use crate::game::GameState;
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::collections::HashMap;
use std::io::stdout;
use std::time::Duration;

pub struct DisplayState {
    pub cursor: Position,
    /// Reserve kind the local player is about to place.
    pub selected_kind: Option<PieceKind>,
    pub status_msg: Option<String>,
    pub last_move: Option<Move>,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor: Position::new(4, 4),
            selected_kind: None,
            status_msg: None,
            last_move: None,
            show_cursor: true,
        }
    }
}

pub fn render(state: &GameState, ds: &DisplayState, clocks: Option<&HashMap<PlayerId, Duration>>) {
    let mut out = stdout();

    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
    .unwrap();

    print!("=== Divercité ===\r\n");
    if let Some(msg) = &ds.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }

    let scores = state.scores();
    print!(
        "Turn {:2}  {} {} - {} {}\r\n",
        state.turn,
        "Player1".cyan(),
        scores[&PlayerId::Player1],
        scores[&PlayerId::Player2],
        "Player2".magenta(),
    );
    if let Some(clocks) = clocks {
        print!(
            "Clocks   {} | {}\r\n",
            format_clock(clocks[&PlayerId::Player1]).cyan(),
            format_clock(clocks[&PlayerId::Player2]).magenta(),
        );
    }
    print!("\r\n");

    print!("    ");
    for col in 0..BOARD_SIZE {
        print!("  {} ", col);
    }
    print!("\r\n");

    for row in 0..BOARD_SIZE {
        print!(" {} |", row);
        for col in 0..BOARD_SIZE {
            let pos = Position::new(row, col);
            if !Board::in_bounds(pos) {
                print!("    ");
                continue;
            }

            let piece = state.board.get_piece(pos);
            let glyph = match piece {
                Some(p) => p.display_char(),
                // empty city slots read differently from resource slots
                None => match Board::slot_shape(pos) {
                    Some(crate::core::Shape::City) => 'o',
                    _ => '.',
                },
            };

            let is_cursor = ds.show_cursor && ds.cursor == pos;
            let is_last_move = ds.last_move.map(|m| m.to == pos).unwrap_or(false);

            let (prefix, suffix) = if is_cursor {
                ("[", "]")
            } else if is_last_move {
                ("{", "}")
            } else {
                (" ", " ")
            };
            let cell = format!("{} {}{}", prefix, glyph, suffix);

            if is_cursor {
                print!("{}", cell.yellow());
            } else if is_last_move {
                print!("{}", cell.red());
            } else if let Some(p) = piece {
                if p.owner == PlayerId::Player1 {
                    print!("{}", cell.cyan());
                } else {
                    print!("{}", cell.magenta());
                }
            } else {
                print!("{}", cell.dark_grey());
            }
        }
        print!("\r\n");
    }
    print!("\r\n");

    render_reserves(state, ds);
    print!("Uppercase = city, lowercase = resource, o/. = empty slots\r\n");
}

fn render_reserves(state: &GameState, ds: &DisplayState) {
    for player in [PlayerId::Player1, PlayerId::Player2] {
        print!("{:?} reserve:\r\n  ", player);
        let mut any = false;
        for kind in PieceKind::all() {
            let count = state.board.reserve_count(player, kind);
            if count == 0 {
                continue;
            }
            any = true;
            let label = format!("[{} x{}]", kind.display_char(), count);
            let selected = player == state.current_player && ds.selected_kind == Some(kind);
            if selected {
                print!("{} ", label.black().on_yellow());
            } else if player == PlayerId::Player1 {
                print!("{} ", label.cyan());
            } else {
                print!("{} ", label.magenta());
            }
        }
        if !any {
            print!("(empty)");
        }
        print!("\r\n");
    }
}

fn format_clock(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
