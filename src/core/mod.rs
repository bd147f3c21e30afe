pub mod board;
pub mod r#move;
pub mod piece;
pub mod serialization;
pub mod setup;
pub mod types;

pub use board::{Board, BOARD_SIZE};
pub use piece::{Color, Piece, PieceKind, Shape};
pub use r#move::Move;
pub use setup::{board_from_strings, initial_board};
pub use types::{PlayerId, Position};
