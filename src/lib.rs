// Corridor Planner: deterministic job planning for container terminals
// Copyright (C) 2023 Tibor Schneider <sctibor@ethz.ch>
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

//! # Corridor Planner
//!
//! Deterministic per-tick job planning for a simulated container terminal. On every planning
//! tick the planner assigns a bounded batch of pending jobs to horizontal-transport vehicles
//! (HTs) and yard blocks, and emits the low-level instruction sequences (resource bookings,
//! driving paths, crane and yard work) that the downstream simulation executes.
//!
//! ## Structure
//!
//! The source code of this program is structured as follows:
//! - The module [`planner`] (structure [`JobPlanner`]) drives one planning tick: it runs the
//!   yard optimiser (a small elitist genetic algorithm with a capacity-repair pass), selects an
//!   HT per job with a distance- and congestion-aware greedy heuristic, and assembles the
//!   per-job instruction sequences.
//! - The module [`path`] (structure [`path::PathSynthesiser`]) constructs the deterministic
//!   driving routes along the fixed lane topology of the terminal, with optional memoisation.
//! - The module [`features`] (structure [`FeatureSet`]) holds the planner's runtime feature
//!   flags, parsed once from the `JOB_PLANNER_FEATURES` environment variable.
//! - The simulated world itself (floor, sectors, jobs, fleet) is defined in a separate crate:
//!   [`terminalsim`].
//!
//! The planner is single-threaded and synchronous: one call to [`JobPlanner::plan`] is atomic
//! with respect to its own state, and all random choices are drawn from a PRNG owned by the
//! planner and seeded with a fixed value, so identical inputs reproduce identical plans.

#![deny(missing_docs, missing_debug_implementations, rust_2018_idioms)]

pub mod features;
pub mod path;
pub mod planner;
#[cfg(test)]
mod test;

pub use features::{Feature, FeatureSet};
pub use planner::JobPlanner;
