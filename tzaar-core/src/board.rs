//! Hex board geometry with axial coordinates
//!
//! The Tzaar board is a hexagon with five cells per edge and a hole in the
//! centre: 60 playable cells. Cells are numbered densely in column order
//! (`A1`, `A2`, ..., `I5`) and the neighbour table is built at compile time.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Board radius (distance from center to edge)
pub const BOARD_RADIUS: i8 = 4;

/// Number of playable cells
pub const CELL_COUNT: usize = 60;

/// Direction vectors in axial coordinates (dq, dr)
/// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
pub const DIRECTIONS: [(i8, i8); 6] = [
    (0, -1),  // N
    (1, -1),  // NE
    (1, 0),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // NW
];

/// Marker for "no cell" in the lookup tables
const NO_CELL: u8 = u8::MAX;

/// Side length of the (q, r) lookup square
const SPAN: usize = (2 * BOARD_RADIUS + 1) as usize;

/// Axial hex coordinates of a playable cell
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Position {
    pub q: i8,
    pub r: i8,
}

impl Position {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Check if this coordinate is a playable cell
    pub const fn is_valid(&self) -> bool {
        on_board(self.q, self.r)
    }

    /// Dense index in `0..CELL_COUNT`, `None` when off the board
    pub fn index(&self) -> Option<usize> {
        if !self.is_valid() {
            return None;
        }
        let idx = INDEX[(self.q + BOARD_RADIUS) as usize][(self.r + BOARD_RADIUS) as usize];
        Some(idx as usize)
    }

    /// Position of the cell with the given dense index
    pub fn from_index(idx: usize) -> Option<Position> {
        CELLS.get(idx).copied()
    }

    /// Distance from center (0,0)
    pub fn distance_to_center(&self) -> i8 {
        (self.q.abs() + self.r.abs() + (self.q + self.r).abs()) / 2
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Position) -> i8 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = ((self.q + self.r) - (other.q + other.r)).abs();
        (dq + dr + ds) / 2
    }

    /// Playable neighbours, in direction order
    pub fn neighbors(self) -> impl Iterator<Item = Position> {
        let row = match self.index() {
            Some(idx) => ADJACENCY[idx],
            None => [NO_CELL; 6],
        };
        row.into_iter()
            .filter(|&n| n != NO_CELL)
            .map(|n| CELLS[n as usize])
    }

    /// Whether `other` shares an edge with this cell
    pub fn is_adjacent(&self, other: Position) -> bool {
        match self.index() {
            Some(idx) => ADJACENCY[idx]
                .iter()
                .any(|&n| n != NO_CELL && CELLS[n as usize] == other),
            None => false,
        }
    }

    /// Iterate every playable cell in index order
    pub fn all() -> impl Iterator<Item = Position> {
        CELLS.into_iter()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let column = (b'A' + (self.q + BOARD_RADIUS) as u8) as char;
        let mut row = self.r - column_start(self.q) + 1;
        if self.q == 0 && self.r > 0 {
            // Skip the centre hole
            row -= 1;
        }
        write!(f, "{}{}", column, row)
    }
}

impl FromStr for Position {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let column = chars
            .next()
            .ok_or_else(|| ParseError::Position(s.to_string()))?
            .to_ascii_uppercase();
        if !('A'..='I').contains(&column) {
            return Err(ParseError::Position(s.to_string()));
        }
        let row: i8 = chars
            .as_str()
            .parse()
            .map_err(|_| ParseError::Position(s.to_string()))?;
        if row < 1 {
            return Err(ParseError::Position(s.to_string()));
        }

        let q = (column as u8 - b'A') as i8 - BOARD_RADIUS;
        let mut r = column_start(q) + row - 1;
        if q == 0 && r >= 0 {
            r += 1;
        }

        let pos = Position::new(q, r);
        if pos.is_valid() {
            Ok(pos)
        } else {
            Err(ParseError::Position(s.to_string()))
        }
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        pos.to_string()
    }
}

impl TryFrom<String> for Position {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

// ============================================================================
// PRECOMPUTED TABLES
// ============================================================================

const fn on_board(q: i8, r: i8) -> bool {
    q.abs() <= BOARD_RADIUS
        && r.abs() <= BOARD_RADIUS
        && (q + r).abs() <= BOARD_RADIUS
        && !(q == 0 && r == 0)
}

/// Lowest valid `r` in column `q`
fn column_start(q: i8) -> i8 {
    (-BOARD_RADIUS).max(-BOARD_RADIUS - q)
}

const fn build_cells() -> [Position; CELL_COUNT] {
    let mut cells = [Position::new(0, 0); CELL_COUNT];
    let mut i = 0;
    let mut q = -BOARD_RADIUS;
    while q <= BOARD_RADIUS {
        let mut r = -BOARD_RADIUS;
        while r <= BOARD_RADIUS {
            if on_board(q, r) {
                cells[i] = Position::new(q, r);
                i += 1;
            }
            r += 1;
        }
        q += 1;
    }
    cells
}

const fn build_index() -> [[u8; SPAN]; SPAN] {
    let mut index = [[NO_CELL; SPAN]; SPAN];
    let mut i = 0;
    while i < CELL_COUNT {
        let cell = CELL_TABLE[i];
        index[(cell.q + BOARD_RADIUS) as usize][(cell.r + BOARD_RADIUS) as usize] = i as u8;
        i += 1;
    }
    index
}

const fn build_adjacency() -> [[u8; 6]; CELL_COUNT] {
    let mut table = [[NO_CELL; 6]; CELL_COUNT];
    let mut i = 0;
    while i < CELL_COUNT {
        let cell = CELL_TABLE[i];
        let mut d = 0;
        while d < 6 {
            let q = cell.q + DIRECTIONS[d].0;
            let r = cell.r + DIRECTIONS[d].1;
            if on_board(q, r) {
                table[i][d] = INDEX_TABLE[(q + BOARD_RADIUS) as usize][(r + BOARD_RADIUS) as usize];
            }
            d += 1;
        }
        i += 1;
    }
    table
}

const CELL_TABLE: [Position; CELL_COUNT] = build_cells();
const INDEX_TABLE: [[u8; SPAN]; SPAN] = build_index();
const ADJACENCY_TABLE: [[u8; 6]; CELL_COUNT] = build_adjacency();

/// Every playable cell, column by column
static CELLS: [Position; CELL_COUNT] = CELL_TABLE;

/// (q, r) -> dense index
static INDEX: [[u8; SPAN]; SPAN] = INDEX_TABLE;

/// Dense index -> neighbour indices per direction
static ADJACENCY: [[u8; 6]; CELL_COUNT] = ADJACENCY_TABLE;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_validity() {
        assert!(!Position::new(0, 0).is_valid());
        assert!(Position::new(4, 0).is_valid());
        assert!(Position::new(0, 4).is_valid());
        assert!(Position::new(-4, 0).is_valid());
        assert!(!Position::new(5, 0).is_valid());
        assert!(!Position::new(3, 3).is_valid()); // q + r = 6 > 4
    }

    #[test]
    fn test_cell_count() {
        assert_eq!(Position::all().count(), CELL_COUNT);
        for (i, pos) in Position::all().enumerate() {
            assert_eq!(pos.index(), Some(i));
            assert_eq!(Position::from_index(i), Some(pos));
        }
    }

    #[test]
    fn test_adjacency_symmetric() {
        for a in Position::all() {
            for b in a.neighbors() {
                assert!(b.is_adjacent(a), "{} -> {} not symmetric", a, b);
                assert_eq!(a.distance_to(b), 1);
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        // Corner of the board
        assert_eq!(Position::new(-4, 0).neighbors().count(), 3);
        // Next to the hole
        assert_eq!(Position::new(1, 0).neighbors().count(), 5);
        // Interior
        assert_eq!(Position::new(1, 1).neighbors().count(), 6);
    }

    #[test]
    fn test_notation() {
        assert_eq!(Position::new(-4, 0).to_string(), "A1");
        assert_eq!(Position::new(-4, 4).to_string(), "A5");
        assert_eq!(Position::new(0, -4).to_string(), "E1");
        assert_eq!(Position::new(0, -1).to_string(), "E4");
        assert_eq!(Position::new(0, 1).to_string(), "E5");
        assert_eq!(Position::new(0, 4).to_string(), "E8");
        assert_eq!(Position::new(4, -4).to_string(), "I1");

        for pos in Position::all() {
            assert_eq!(pos.to_string().parse::<Position>(), Ok(pos));
        }
    }

    #[test]
    fn test_notation_rejects_off_board() {
        assert!("A6".parse::<Position>().is_err());
        assert!("E9".parse::<Position>().is_err());
        assert!("J1".parse::<Position>().is_err());
        assert!("A0".parse::<Position>().is_err());
        assert!("".parse::<Position>().is_err());
        assert_eq!("e5".parse::<Position>(), Ok(Position::new(0, 1)));
    }

    #[test]
    fn test_distance() {
        assert_eq!(Position::new(1, 0).distance_to_center(), 1);
        assert_eq!(Position::new(2, 2).distance_to_center(), 4);
    }
}
