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

//! Module containing shared type definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable, unique identifier of a job, assigned by the job tracker.
pub type JobSeq = String;

/// Error produced when resolving names against the simulated world.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalError {
    /// The named quay crane is not part of the sector map.
    #[error("Quay crane was not found in the sector map: {0}")]
    UnknownQc(String),
    /// The named yard block is not part of the sector map.
    #[error("Yard block was not found in the sector map: {0}")]
    UnknownYard(String),
    /// The HT tracker has no coordinate for the named HT.
    #[error("No coordinate is known for HT: {0}")]
    UnknownHtPosition(String),
}
