//! Board state, moves and starting layouts

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHashMap;

use crate::board::{Position, BOARD_RADIUS, DIRECTIONS};
use crate::error::{BoardError, ParseError};
use crate::pieces::{Color, Piece, PieceStack, PieceType};

// ============================================================================
// MOVES
// ============================================================================

/// A move. Exactly one of the three shapes; never extended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// The stack at `from` captures the opposing stack at `to`
    Attack { from: Position, to: Position },
    /// The stack at `from` climbs onto the friendly stack at `to`
    Stack { from: Position, to: Position },
    Pass,
}

impl Move {
    pub fn is_attack(&self) -> bool {
        matches!(self, Move::Attack { .. })
    }

    pub fn is_stack(&self) -> bool {
        matches!(self, Move::Stack { .. })
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    /// Origin and destination, `None` for Pass
    pub fn endpoints(&self) -> Option<(Position, Position)> {
        match *self {
            Move::Attack { from, to } | Move::Stack { from, to } => Some((from, to)),
            Move::Pass => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Move::Attack { from, to } => write!(f, "{}x{}", from, to),
            Move::Stack { from, to } => write!(f, "{}-{}", from, to),
            Move::Pass => write!(f, "pass"),
        }
    }
}

/// Accepts `A1xA2`, `A1-A2`, `pass`, and the word forms
/// `attack A1 A2` / `stack A1 A2`.
impl FromStr for Move {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim().to_ascii_lowercase();
        let bad = || ParseError::Move(s.trim().to_string());

        if text == "pass" {
            return Ok(Move::Pass);
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        if let [verb, from, to] = words.as_slice() {
            let from = from.parse().map_err(|_| bad())?;
            let to = to.parse().map_err(|_| bad())?;
            return match *verb {
                "attack" | "a" => Ok(Move::Attack { from, to }),
                "stack" | "s" => Ok(Move::Stack { from, to }),
                _ => Err(bad()),
            };
        }

        if let Some((from, to)) = text.split_once('x') {
            let from = from.parse().map_err(|_| bad())?;
            let to = to.parse().map_err(|_| bad())?;
            return Ok(Move::Attack { from, to });
        }
        if let Some((from, to)) = text.split_once('-') {
            let from = from.parse().map_err(|_| bad())?;
            let to = to.parse().map_err(|_| bad())?;
            return Ok(Move::Stack { from, to });
        }

        Err(bad())
    }
}

// ============================================================================
// BOARD
// ============================================================================

/// Board: position -> stack (sparse representation).
///
/// A `Board` is a value. Rules produce new boards instead of mutating, so a
/// board can be kept as history or shared between games without locking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: FxHashMap<Position, PieceStack>,
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Build a board from explicit stacks, checking every invariant
    pub fn from_placements<I>(placements: I) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (Position, PieceStack)>,
    {
        let mut cells = FxHashMap::default();
        for (pos, stack) in placements {
            if !pos.is_valid() {
                return Err(BoardError::OffBoard(pos));
            }
            if stack.pieces().iter().any(|p| p.owner != stack.owner()) {
                return Err(BoardError::MixedStack(pos));
            }
            if cells.insert(pos, stack).is_some() {
                return Err(BoardError::DuplicatePosition(pos));
            }
        }

        let board = Self { cells };
        for color in Color::ALL {
            for kind in PieceType::ALL {
                let count = board.piece_counts(color, kind);
                if count > kind.starting_count() {
                    return Err(BoardError::TooManyPieces {
                        color,
                        kind,
                        count,
                        limit: kind.starting_count(),
                    });
                }
            }
        }
        Ok(board)
    }

    /// Standard starting layout.
    ///
    /// Rings around the hole hold, from the inside out: Totts, Tzaars,
    /// Tzarras, Totts. Each ring is split into six sides alternating white
    /// and black.
    pub fn standard() -> Self {
        const RING_KINDS: [PieceType; BOARD_RADIUS as usize] = [
            PieceType::Tott,
            PieceType::Tzaar,
            PieceType::Tzarra,
            PieceType::Tott,
        ];

        let mut cells = FxHashMap::default();
        for (ring, &kind) in RING_KINDS.iter().enumerate() {
            let distance = ring as u8 + 1;
            for (i, pos) in iter_hex_ring(distance).enumerate() {
                let side = i / distance as usize;
                let owner = if side % 2 == 0 { Color::White } else { Color::Black };
                cells.insert(pos, PieceStack::single(Piece::new(owner, kind)));
            }
        }
        Self { cells }
    }

    /// Full set of pieces shuffled uniformly over the board
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pieces: Vec<Piece> = Color::ALL
            .iter()
            .flat_map(|&owner| {
                PieceType::ALL.iter().flat_map(move |&kind| {
                    std::iter::repeat(Piece::new(owner, kind)).take(kind.starting_count())
                })
            })
            .collect();
        pieces.shuffle(rng);

        let cells = Position::all()
            .zip(pieces)
            .map(|(pos, piece)| (pos, PieceStack::single(piece)))
            .collect();
        Self { cells }
    }

    /// Random layout from a fixed seed
    pub fn random_seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random(&mut rng)
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    /// Stack at a position
    pub fn get(&self, pos: Position) -> Option<&PieceStack> {
        self.cells.get(&pos)
    }

    /// Occupied cells in board order
    pub fn stacks(&self) -> impl Iterator<Item = (Position, &PieceStack)> + '_ {
        Position::all().filter_map(move |pos| self.cells.get(&pos).map(|s| (pos, s)))
    }

    /// Stacks whose top piece belongs to `color`, in board order
    pub fn controlled_by(&self, color: Color) -> impl Iterator<Item = (Position, &PieceStack)> + '_ {
        self.stacks().filter(move |(_, s)| s.owner() == color)
    }

    /// Number of occupied cells
    pub fn occupied(&self) -> usize {
        self.cells.len()
    }

    /// Pieces of a given color and kind still on the board, buried or not
    pub fn piece_counts(&self, color: Color, kind: PieceType) -> usize {
        self.cells
            .values()
            .flat_map(|s| s.pieces())
            .filter(|p| p.owner == color && p.kind == kind)
            .count()
    }

    /// All pieces of a color still on the board
    pub fn total_pieces(&self, color: Color) -> usize {
        self.cells
            .values()
            .flat_map(|s| s.pieces())
            .filter(|p| p.owner == color)
            .count()
    }

    /// Count of the scarcest kind for a color
    pub fn min_kind_count(&self, color: Color) -> usize {
        PieceType::ALL
            .iter()
            .map(|&kind| self.piece_counts(color, kind))
            .min()
            .unwrap_or(0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text rendering, one hex row per line.
///
/// White stacks use upper case symbols, black lower case, followed by the
/// stack height: `E4:Z1` is a single white Tzaar on E4.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in -BOARD_RADIUS..=BOARD_RADIUS {
            let indent = r.unsigned_abs() as usize * 3;
            write!(f, "{:indent$}", "", indent = indent)?;
            let q_min = (-BOARD_RADIUS).max(-BOARD_RADIUS - r);
            let q_max = BOARD_RADIUS.min(BOARD_RADIUS - r);
            for q in q_min..=q_max {
                let pos = Position::new(q, r);
                if !pos.is_valid() {
                    write!(f, "      ")?;
                    continue;
                }
                match self.get(pos) {
                    Some(stack) => {
                        let symbol = match stack.owner() {
                            Color::White => stack.kind().symbol(),
                            Color::Black => stack.kind().symbol().to_ascii_lowercase(),
                        };
                        write!(f, "{}:{}{:<2}", pos, symbol, stack.height())?;
                    }
                    None => write!(f, "{}:.  ", pos)?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ============================================================================
// HEX GEOMETRY HELPERS
// ============================================================================

/// Generate all hex positions at exactly distance N from the centre,
/// walking six sides of N cells each
fn iter_hex_ring(distance: u8) -> impl Iterator<Item = Position> {
    let distance = distance as i8;
    (0..6).flat_map(move |side| {
        let dir = DIRECTIONS[side];
        (0..distance).map(move |step| {
            // Start position for this side (corner of hexagon)
            let start_q = distance * DIRECTIONS[(side + 4) % 6].0;
            let start_r = distance * DIRECTIONS[(side + 4) % 6].1;
            // Walk along the edge
            Position::new(start_q + step * dir.0, start_r + step * dir.1)
        })
    })
}

// ============================================================================
// TESTS
// ============================================================================
