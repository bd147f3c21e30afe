use super::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Piece color. Four colors exist for both cities and resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::Yellow => 'Y',
        }
    }
}

/// A city scores from the resources placed around it; a resource scores nothing
/// by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shape {
    City,
    Resource,
}

impl Shape {
    pub const ALL: [Shape; 2] = [Shape::City, Shape::Resource];
}

/// What kind of piece: a colored city or a colored resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceKind {
    pub color: Color,
    pub shape: Shape,
}

impl PieceKind {
    pub fn new(color: Color, shape: Shape) -> Self {
        PieceKind { color, shape }
    }

    /// Every kind in a fixed order (color-major, city before resource).
    /// Legal-move enumeration relies on this order being stable.
    pub fn all() -> impl Iterator<Item = PieceKind> {
        Color::ALL.into_iter().flat_map(|color| {
            Shape::ALL
                .into_iter()
                .map(move |shape| PieceKind { color, shape })
        })
    }

    /// Cities print uppercase, resources lowercase.
    pub fn display_char(&self) -> char {
        match self.shape {
            Shape::City => self.color.letter(),
            Shape::Resource => self.color.letter().to_ascii_lowercase(),
        }
    }
}

/// A piece on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub owner: PlayerId,
}

impl Piece {
    pub fn new(kind: PieceKind, owner: PlayerId) -> Self {
        Piece { kind, owner }
    }

    pub fn display_char(&self) -> char {
        self.kind.display_char()
    }
}
