use crate::core::{Move, PieceKind, PlayerId, BOARD_SIZE};
use crate::display::{render, DisplayState};
use crate::game::GameState;
use crate::player::PlayerController;
use crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

/// Keyboard-driven placement: arrows move the cursor over the diamond,
/// `p` cycles through the reserve, Enter places.
pub struct TuiController {
    player_id: PlayerId,
    name: String,
}

impl TuiController {
    pub fn new(player_id: PlayerId, name: &str) -> Self {
        Self {
            player_id,
            name: name.to_string(),
        }
    }
}

impl PlayerController for TuiController {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&self, state: &GameState, _remaining: Duration) -> Option<Move> {
        let legal = state.possible_actions();
        let available: Vec<PieceKind> = PieceKind::all()
            .filter(|&kind| state.board.reserve_count(self.player_id, kind) > 0)
            .collect();

        let mut kind_index = 0usize;
        let mut ds = DisplayState::default();
        ds.last_move = state.board.last_move;
        ds.selected_kind = available.first().copied();
        ds.status_msg = Some(format!("{}'s turn ({:?})", self.name, self.player_id));

        loop {
            render(state, &ds, None);
            print!("[Arrows]: Move | [p]: Next piece | [Enter]: Place | [q]: Resign\r\n");

            if event::poll(Duration::from_millis(100)).unwrap_or(false) {
                if let Ok(Event::Key(KeyEvent { code, .. })) = event::read() {
                    match code {
                        KeyCode::Char('q') => return None,
                        KeyCode::Up => {
                            if ds.cursor.row > 0 {
                                ds.cursor.row -= 1;
                            }
                        }
                        KeyCode::Down => {
                            if ds.cursor.row < BOARD_SIZE - 1 {
                                ds.cursor.row += 1;
                            }
                        }
                        KeyCode::Left => {
                            if ds.cursor.col > 0 {
                                ds.cursor.col -= 1;
                            }
                        }
                        KeyCode::Right => {
                            if ds.cursor.col < BOARD_SIZE - 1 {
                                ds.cursor.col += 1;
                            }
                        }
                        KeyCode::Char('p') => {
                            if !available.is_empty() {
                                kind_index = (kind_index + 1) % available.len();
                                ds.selected_kind = Some(available[kind_index]);
                            }
                        }
                        KeyCode::Enter | KeyCode::Char(' ') => {
                            if let Some(kind) = ds.selected_kind {
                                let mv = Move::new(kind, ds.cursor);
                                if legal.contains(&mv) {
                                    return Some(mv);
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    fn is_local(&self) -> bool {
        true
    }

    fn is_interactive(&self) -> bool {
        true
    }
}
