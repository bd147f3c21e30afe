use super::piece::{Piece, PieceKind, Shape};
use super::types::{PlayerId, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The board is a diamond inscribed in a 9x9 grid.
pub const BOARD_SIZE: usize = 9;

const CENTER: i32 = (BOARD_SIZE as i32 - 1) / 2;

/// Board: placed pieces plus each player's unplaced reserve.
///
/// Cells alternate between city slots and resource slots; a piece may only
/// ever occupy a slot of its own shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    /// Placed pieces
    #[serde(with = "crate::core::serialization")]
    pub pieces: HashMap<Position, Piece>,
    /// Unplaced pieces per player
    #[serde(
        serialize_with = "crate::core::serialization::serialize_reserves",
        deserialize_with = "crate::core::serialization::deserialize_reserves"
    )]
    pub reserves: HashMap<PlayerId, HashMap<PieceKind, usize>>,
    pub last_move: Option<crate::core::Move>,
}

impl Board {
    pub fn new() -> Self {
        Board {
            pieces: HashMap::new(),
            reserves: HashMap::new(),
            last_move: None,
        }
    }

    /// Whether the position falls inside the playable diamond.
    pub fn in_bounds(pos: Position) -> bool {
        if pos.row >= BOARD_SIZE || pos.col >= BOARD_SIZE {
            return false;
        }
        let dr = (pos.row as i32 - CENTER).abs();
        let dc = (pos.col as i32 - CENTER).abs();
        dr + dc <= CENTER
    }

    /// City slots sit on odd-parity cells, resource slots on even-parity ones.
    pub fn slot_shape(pos: Position) -> Option<Shape> {
        if !Self::in_bounds(pos) {
            return None;
        }
        if (pos.row + pos.col) % 2 == 1 {
            Some(Shape::City)
        } else {
            Some(Shape::Resource)
        }
    }

    /// Orthogonal neighbours inside the diamond.
    pub fn neighbors(pos: Position) -> Vec<Position> {
        let mut out = Vec::with_capacity(4);
        for (dr, dc) in [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)] {
            let r = pos.row as i32 + dr;
            let c = pos.col as i32 + dc;
            if r >= 0 && c >= 0 {
                let p = Position::new(r as usize, c as usize);
                if Self::in_bounds(p) {
                    out.push(p);
                }
            }
        }
        out
    }

    pub fn place_piece(&mut self, pos: Position, piece: Piece) {
        self.pieces.insert(pos, piece);
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        self.pieces.get(&pos)
    }

    pub fn reserve_count(&self, player: PlayerId, kind: PieceKind) -> usize {
        self.reserves
            .get(&player)
            .and_then(|r| r.get(&kind))
            .copied()
            .unwrap_or(0)
    }

    pub fn add_to_reserve(&mut self, player: PlayerId, kind: PieceKind, count: usize) {
        let reserve = self.reserves.entry(player).or_default();
        *reserve.entry(kind).or_insert(0) += count;
    }

    pub fn take_from_reserve(&mut self, player: PlayerId, kind: PieceKind) -> bool {
        if let Some(reserve) = self.reserves.get_mut(&player) {
            if let Some(count) = reserve.get_mut(&kind) {
                if *count > 0 {
                    *count -= 1;
                    if *count == 0 {
                        reserve.remove(&kind);
                    }
                    return true;
                }
            }
        }
        false
    }

    pub fn reserve_empty(&self, player: PlayerId) -> bool {
        self.reserves
            .get(&player)
            .map(|r| r.values().all(|&c| c == 0))
            .unwrap_or(true)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
