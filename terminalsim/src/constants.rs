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

//! Constants describing the simulated terminal world. These must match the floor layout assumed
//! by the simulation; the planner consumes them when constructing routes and cost estimates.

/// Smallest valid x coordinate on the terminal grid.
pub const GRID_MIN_X: i32 = 1;
/// Largest valid x coordinate on the terminal grid.
pub const GRID_MAX_X: i32 = 42;
/// Smallest valid y coordinate on the terminal grid.
pub const GRID_MIN_Y: i32 = 1;
/// Largest valid y coordinate on the terminal grid.
pub const GRID_MAX_Y: i32 = 13;

/// Row of the quay-crane entry and exit cells.
pub const QC_ROW_Y: i32 = 3;
/// Eastbound lane leading towards the quay-crane entries.
pub const QC_TRAVEL_LANE_Y: i32 = 4;
/// Eastbound lane leaving the quay area towards the eastern boundary.
pub const QC_LANE_Y: i32 = 5;
/// Westbound lane serving the HT buffer cells.
pub const HIGHWAY_LEFT_LANE_Y: i32 = 7;
/// Westbound lane between the eastern boundary and the yard approach.
pub const HIGHWAY_LANE_Y: i32 = 11;
/// Eastbound lane serving the yard-block entries.
pub const YARD_LANE_Y: i32 = 12;
/// Row of the yard-block entry and exit cells.
pub const YARD_ROW_Y: i32 = 13;

/// Largest x coordinate that still counts as the western corridor.
pub const CORRIDOR_SPLIT_X: i32 = 21;

/// Seconds an HT needs to traverse one grid sector.
pub const HT_DRIVE_TIME_PER_SECTOR: f64 = 6.0;

/// Upper bound on the number of jobs the tracker releases per planning tick.
pub const PLANNABLE_WINDOW: usize = 16;
