//! Cell states of the fire grid
//!
//! A cell is always in exactly one of five states. Only `Grass` and `Tree` can
//! catch fire; `Burning` counts down to `Burnt`; `Empty` and `Burnt` are inert.

use crate::error::{FireSimError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate as `(x, y)`: column first, then row
pub type Coord = (usize, usize);

/// Fire-related state of one grid position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    /// Bare ground, never burns
    Empty,
    /// Ignites with a probability when next to fire
    #[default]
    Grass,
    /// Always ignites when next to fire
    Tree,
    /// On fire; tracked by a burn timer
    Burning,
    /// Burned out, inert until cleared
    Burnt,
}

impl Cell {
    /// All states in code order
    pub const ALL: [Cell; 5] = [
        Cell::Empty,
        Cell::Grass,
        Cell::Tree,
        Cell::Burning,
        Cell::Burnt,
    ];

    /// Whether a burning neighbour can ignite this cell
    #[inline]
    pub const fn is_flammable(self) -> bool {
        matches!(self, Cell::Grass | Cell::Tree)
    }

    /// Whether fire spread leaves this cell untouched
    #[inline]
    pub const fn is_inert(self) -> bool {
        matches!(self, Cell::Empty | Cell::Burnt)
    }

    /// Numeric code for boundary formats (0-4)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Grass => 1,
            Cell::Tree => 2,
            Cell::Burning => 3,
            Cell::Burnt => 4,
        }
    }

    /// Single-character glyph used by the text drivers
    pub const fn glyph(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Grass => '.',
            Cell::Tree => 'T',
            Cell::Burning => '*',
            Cell::Burnt => '#',
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = FireSimError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Cell::Empty),
            1 => Ok(Cell::Grass),
            2 => Ok(Cell::Tree),
            3 => Ok(Cell::Burning),
            4 => Ok(Cell::Burnt),
            _ => Err(FireSimError::invalid_argument(
                "cell",
                value,
                "cell code must be 0 (empty) through 4 (burnt)",
            )),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cell::Empty => "empty",
            Cell::Grass => "grass",
            Cell::Tree => "tree",
            Cell::Burning => "burning",
            Cell::Burnt => "burnt",
        };
        f.write_str(name)
    }
}
