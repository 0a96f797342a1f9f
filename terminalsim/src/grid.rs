// TerminalSim: Container Terminal Simulation Substrate written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! Grid geometry primitives for the terminal floor.

use serde::{Deserialize, Serialize};

use crate::constants::CORRIDOR_SPLIT_X;

/// A cell on the terminal grid. The known floor spans `x ∈ [1, 42]` and `y ∈ [1, 13]`, with `y`
/// growing towards the yard row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Horizontal position, growing eastwards.
    pub x: i32,
    /// Vertical position, growing towards the yard row.
    pub y: i32,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to `other`.
    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns `true` if `other` is orthogonally adjacent to `self`.
    pub fn is_adjacent(self, other: Self) -> bool {
        self.manhattan(other) == 1
    }

    /// The corridor this cell belongs to.
    pub fn corridor_side(self) -> CorridorSide {
        if self.x <= CORRIDOR_SPLIT_X {
            CorridorSide::West
        } else {
            CorridorSide::East
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// One of the two travel corridors of the terminal, split at [`CORRIDOR_SPLIT_X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CorridorSide {
    /// Corridor covering `x ≤ 21`, including the yard blocks `A` to `D`.
    West,
    /// Corridor covering `x > 21`.
    East,
}

impl CorridorSide {
    /// The other corridor.
    pub fn opposite(self) -> Self {
        match self {
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Corridor of a yard block, derived from its name. Yard names beginning with `A` to `D`
    /// (after an optional `YD_` prefix) belong to the western corridor.
    pub fn of_yard(yard_name: &str) -> Self {
        let block = yard_name.strip_prefix("YD_").unwrap_or(yard_name);
        match block.chars().next() {
            Some('A'..='D') => Self::West,
            _ => Self::East,
        }
    }
}

impl std::fmt::Display for CorridorSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::West => f.write_str("west"),
            Self::East => f.write_str("east"),
        }
    }
}
