//! Piece, colour and stack definitions

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Player color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

/// The three piece kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PieceType {
    Tzaar = 0,
    Tzarra = 1,
    Tott = 2,
}

impl PieceType {
    pub const ALL: [PieceType; 3] = [PieceType::Tzaar, PieceType::Tzarra, PieceType::Tott];

    /// Pieces of this kind each color starts with
    pub const fn starting_count(self) -> usize {
        match self {
            PieceType::Tzaar => 6,
            PieceType::Tzarra => 9,
            PieceType::Tott => 15,
        }
    }

    /// One-letter symbol used when rendering boards
    pub fn symbol(self) -> char {
        match self {
            PieceType::Tzaar => 'Z',
            PieceType::Tzarra => 'R',
            PieceType::Tott => 'T',
        }
    }
}

/// Pieces per color at the start of a game
pub const PIECES_PER_COLOR: usize = 30;

/// A single piece
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub owner: Color,
    pub kind: PieceType,
}

impl Piece {
    pub const fn new(owner: Color, kind: PieceType) -> Self {
        Self { owner, kind }
    }
}

/// Non-empty pile of pieces on one cell, bottom first.
///
/// Only the top piece matters for the rules: it decides who controls the
/// stack and which kind it counts as.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "Vec<Piece>", try_from = "Vec<Piece>")]
pub struct PieceStack {
    pieces: Vec<Piece>,
}

impl PieceStack {
    /// Stack holding one piece
    pub fn single(piece: Piece) -> Self {
        Self { pieces: vec![piece] }
    }

    /// Stack from pieces listed bottom first, `None` if empty
    pub fn from_pieces(pieces: Vec<Piece>) -> Option<Self> {
        if pieces.is_empty() {
            None
        } else {
            Some(Self { pieces })
        }
    }

    /// The rule-significant piece
    pub fn top(&self) -> Piece {
        self.pieces[self.pieces.len() - 1]
    }

    pub fn owner(&self) -> Color {
        self.top().owner
    }

    pub fn kind(&self) -> PieceType {
        self.top().kind
    }

    pub fn height(&self) -> usize {
        self.pieces.len()
    }

    /// Pieces bottom first
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Put this stack on top of `below`, keeping the internal order of both
    pub fn place_on(&self, below: &PieceStack) -> PieceStack {
        let mut pieces = Vec::with_capacity(below.height() + self.height());
        pieces.extend_from_slice(&below.pieces);
        pieces.extend_from_slice(&self.pieces);
        PieceStack { pieces }
    }
}

impl From<PieceStack> for Vec<Piece> {
    fn from(stack: PieceStack) -> Self {
        stack.pieces
    }
}

impl TryFrom<Vec<Piece>> for PieceStack {
    type Error = BoardError;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, Self::Error> {
        PieceStack::from_pieces(pieces).ok_or(BoardError::EmptyStack)
    }
}
