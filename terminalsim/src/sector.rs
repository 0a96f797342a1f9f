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

//! Static sector map of the terminal: where each quay crane and yard block can be entered and
//! left. The map is immutable for the duration of a run.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;

/// Entry and exit cells of a sector (a quay crane or a yard block).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorInfo {
    /// Cell where an HT enters the sector to be served.
    pub in_coord: Coordinate,
    /// Cell where an HT leaves the sector after being served.
    pub out_coord: Coordinate,
}

impl SectorInfo {
    /// Create a new sector descriptor.
    pub fn new(in_coord: impl Into<Coordinate>, out_coord: impl Into<Coordinate>) -> Self {
        Self {
            in_coord: in_coord.into(),
            out_coord: out_coord.into(),
        }
    }
}

/// Read-only snapshot of the sector map. Lookups of unknown names return `None`, which cost
/// functions treat as an infinite cost.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorMapSnapshot {
    /// All quay cranes by name.
    qcs: HashMap<String, SectorInfo>,
    /// All yard blocks by name.
    yards: HashMap<String, SectorInfo>,
}

impl SectorMapSnapshot {
    /// Create an empty sector map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a quay crane. An existing entry of the same name is replaced.
    pub fn add_qc(&mut self, name: impl Into<String>, sector: SectorInfo) {
        self.qcs.insert(name.into(), sector);
    }

    /// Register a yard block. An existing entry of the same name is replaced.
    pub fn add_yard(&mut self, name: impl Into<String>, sector: SectorInfo) {
        self.yards.insert(name.into(), sector);
    }

    /// Look up a quay crane by name.
    pub fn qc_sector(&self, name: &str) -> Option<&SectorInfo> {
        self.qcs.get(name)
    }

    /// Look up a yard block by name.
    pub fn yard_sector(&self, name: &str) -> Option<&SectorInfo> {
        self.yards.get(name)
    }

    /// All quay-crane names in sorted order.
    pub fn qc_names(&self) -> Vec<&str> {
        self.qcs.keys().map(String::as_str).sorted().collect()
    }

    /// All yard-block names in sorted order.
    pub fn yard_names(&self) -> Vec<&str> {
        self.yards.keys().map(String::as_str).sorted().collect()
    }
}
