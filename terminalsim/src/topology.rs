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

//! The prepared standard terminal layout: seven quay cranes along the quay row, eight yard blocks
//! along the yard row, and a fleet of HTs parked on the buffer lane. Tests and evaluation
//! binaries build their scenarios from this module.

use crate::constants::{HIGHWAY_LEFT_LANE_Y, QC_ROW_Y, YARD_ROW_Y};
use crate::fleet::HtFleetSnapshot;
use crate::grid::Coordinate;
use crate::sector::{SectorInfo, SectorMapSnapshot};

/// x positions of the quay cranes `QC01` to `QC07`.
const QC_XS: [i32; 7] = [3, 9, 15, 21, 27, 33, 39];

/// x positions of the yard blocks `YD_A` to `YD_H`. The first four lie in the western corridor.
const YARD_XS: [i32; 8] = [2, 7, 12, 17, 24, 29, 34, 39];

/// Names of the yard blocks, aligned with [`YARD_XS`].
const YARD_NAMES: [&str; 8] = [
    "YD_A", "YD_B", "YD_C", "YD_D", "YD_E", "YD_F", "YD_G", "YD_H",
];

/// Build the sector map of the standard terminal. Each quay crane occupies two cells of the quay
/// row (entry west of exit); each yard block occupies two cells of the yard row.
pub fn standard_sector_map() -> SectorMapSnapshot {
    let mut map = SectorMapSnapshot::new();
    for (i, x) in QC_XS.into_iter().enumerate() {
        map.add_qc(
            format!("QC{:02}", i + 1),
            SectorInfo::new(
                Coordinate::new(x, QC_ROW_Y),
                Coordinate::new(x + 1, QC_ROW_Y),
            ),
        );
    }
    for (name, x) in YARD_NAMES.into_iter().zip(YARD_XS) {
        map.add_yard(
            name,
            SectorInfo::new(
                Coordinate::new(x, YARD_ROW_Y),
                Coordinate::new(x + 2, YARD_ROW_Y),
            ),
        );
    }
    map
}

/// Build a fleet of `n` idle HTs named `HT01`, `HT02`, ... parked on consecutive buffer cells of
/// the highway-left lane. At most 20 HTs fit on the lane.
pub fn standard_fleet(n: usize) -> HtFleetSnapshot {
    let mut fleet = HtFleetSnapshot::new();
    for i in 0..n.min(20) {
        fleet.add_ht(
            format!("HT{:02}", i + 1),
            Coordinate::new(2 + 2 * i as i32, HIGHWAY_LEFT_LANE_Y),
        );
    }
    fleet
}
