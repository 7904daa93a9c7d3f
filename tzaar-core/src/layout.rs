//! Layout - board setups stored as JSON

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::BoardError;
use crate::game::Board;
use crate::pieces::PieceStack;

/// One occupied cell in a layout file
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub at: Position,
    pub stack: PieceStack,
}

/// Named board setup.
///
/// ```json
/// {"name": "opening", "cells": [{"at": "A1", "stack": [{"owner": "White", "kind": "Tott"}]}]}
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Layout {
    /// Capture a board
    pub fn from_board(name: &str, board: &Board) -> Self {
        Self {
            name: name.to_string(),
            cells: board
                .stacks()
                .map(|(at, stack)| Cell {
                    at,
                    stack: stack.clone(),
                })
                .collect(),
        }
    }

    /// Build the board, checking placement invariants
    pub fn to_board(&self) -> Result<Board, BoardError> {
        Board::from_placements(self.cells.iter().map(|c| (c.at, c.stack.clone())))
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let layout: Layout = serde_json::from_str(&content)
            .with_context(|| format!("malformed layout file {}", path.display()))?;
        Ok(layout)
    }

    /// Load from JSON file straight into a board
    pub fn load_board(path: &Path) -> anyhow::Result<Board> {
        let layout = Self::load(path)?;
        let board = layout
            .to_board()
            .with_context(|| format!("layout {:?} is not a legal board", layout.name))?;
        Ok(board)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
