use super::piece::PieceKind;
use super::types::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placement of one reserve piece onto an empty slot. Every Divercité move
/// has this form; pieces never move again once placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub kind: PieceKind,
    pub to: Position,
}

impl Move {
    pub fn new(kind: PieceKind, to: Position) -> Self {
        Move { kind, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.kind.display_char(), self.to)
    }
}
