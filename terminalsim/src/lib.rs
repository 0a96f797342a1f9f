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

#![deny(missing_docs, missing_debug_implementations)]

//! # TerminalSim
//!
//! This is the substrate library for simulating a container terminal. It contains the data model
//! shared between the planner and the discrete-event simulation: the terminal floor (grid
//! geometry and the sector map), jobs with their instruction sequences, the job tracker, and a
//! read-only view onto the horizontal-transport (HT) fleet.
//!
//! ## Main Concepts
//!
//! The terminal floor is a fixed grid of cells (see [`grid::Coordinate`]). Quay cranes (QCs) and
//! yard blocks are *sectors*: each has an entry and an exit cell, looked up by name through the
//! [`sector::SectorMapSnapshot`]. The [`job::JobTracker`] owns all [`job::Job`]s and releases a
//! bounded window of plannable jobs per planning tick. The fleet is observed through the
//! [`fleet::HtCoordinateView`] trait; [`fleet::HtFleetSnapshot`] is the provided implementation
//! and returns HTs in a deterministic (sorted) order.
//!
//! The module [`topology`] contains the prepared standard terminal layout (seven quay cranes,
//! eight yard blocks, and a fleet of buffered HTs), which tests and evaluation binaries build
//! their scenarios from.
//!
//! ## Example usage
//!
//! ```
//! use terminalsim::prelude::*;
//!
//! let map = terminalsim::topology::standard_sector_map();
//! let qc = map.qc_sector("QC01").unwrap();
//! assert_eq!(qc.in_coord.manhattan(qc.out_coord), 1);
//!
//! let mut tracker = JobTracker::new();
//! tracker.insert(JobInfo {
//!     job_seq: "j1".to_string(),
//!     job_type: JobType::Discharge,
//!     qc_name: "QC01".to_string(),
//!     yard_name: "YD_A".to_string(),
//!     alt_yard_names: vec!["YD_E".to_string()],
//! });
//! assert_eq!(tracker.get_plannable_job_sequences(), vec!["j1".to_string()]);
//! ```

pub mod constants;
pub mod fleet;
pub mod grid;
pub mod job;
pub mod prelude;
pub mod sector;
pub mod topology;
pub mod types;

#[cfg(test)]
mod test;
