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

//! Read-only view onto the HT fleet. The planner never advances this state itself; it observes a
//! snapshot that the simulation keeps up to date between planning ticks.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::grid::Coordinate;
use crate::types::TerminalError;

/// Interface of the HT coordinate tracker.
///
/// Implementations must return HT names in a stable, deterministic order from
/// [`HtCoordinateView::available_hts`]: the planner breaks cost ties by iteration order, so an
/// unordered set would make planning non-deterministic.
pub trait HtCoordinateView {
    /// Names of all HTs that are idle and may be planned, in a deterministic order.
    fn available_hts(&self) -> Vec<String>;

    /// Current cell of the named HT, or `None` if the tracker has lost it.
    fn coordinate(&self, ht_name: &str) -> Option<Coordinate>;

    /// Like [`HtCoordinateView::coordinate`], but turns a lost HT into an error.
    fn try_coordinate(&self, ht_name: &str) -> Result<Coordinate, TerminalError> {
        self.coordinate(ht_name)
            .ok_or_else(|| TerminalError::UnknownHtPosition(ht_name.to_string()))
    }

    /// Names of all HTs that currently cannot move.
    fn non_moving_hts(&self) -> Vec<String>;

    /// Returns `true` if the tracker has detected a deadlock among the HTs.
    fn is_deadlock(&self) -> bool;
}

/// Snapshot implementation of [`HtCoordinateView`], backed by ordered maps so that all listing
/// methods return sorted names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtFleetSnapshot {
    /// Position of every HT of the fleet.
    positions: BTreeMap<String, Coordinate>,
    /// HTs that are idle and plannable.
    idle: BTreeSet<String>,
    /// HTs that are currently unable to move.
    non_moving: BTreeSet<String>,
    /// Whether the fleet is deadlocked.
    deadlock: bool,
}

impl HtFleetSnapshot {
    /// Create an empty fleet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an HT at the given cell. New HTs start out idle.
    pub fn add_ht(&mut self, ht_name: impl Into<String>, coord: impl Into<Coordinate>) {
        let ht_name = ht_name.into();
        self.positions.insert(ht_name.clone(), coord.into());
        self.idle.insert(ht_name);
    }

    /// Move an HT to a new cell. Unknown names are added to the fleet (idle).
    pub fn set_position(&mut self, ht_name: impl Into<String>, coord: impl Into<Coordinate>) {
        let ht_name = ht_name.into();
        if !self.positions.contains_key(&ht_name) {
            self.idle.insert(ht_name.clone());
        }
        self.positions.insert(ht_name, coord.into());
    }

    /// Mark an HT as idle (plannable) or busy.
    pub fn set_idle(&mut self, ht_name: &str, idle: bool) {
        if idle {
            self.idle.insert(ht_name.to_string());
        } else {
            self.idle.remove(ht_name);
        }
    }

    /// Mark an HT as non-moving or moving.
    pub fn set_non_moving(&mut self, ht_name: &str, non_moving: bool) {
        if non_moving {
            self.non_moving.insert(ht_name.to_string());
        } else {
            self.non_moving.remove(ht_name);
        }
    }

    /// Record whether the fleet is deadlocked.
    pub fn set_deadlock(&mut self, deadlock: bool) {
        self.deadlock = deadlock;
    }

    /// Number of HTs in the fleet.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the fleet has no HTs.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

impl HtCoordinateView for HtFleetSnapshot {
    fn available_hts(&self) -> Vec<String> {
        self.idle.iter().cloned().collect()
    }

    fn coordinate(&self, ht_name: &str) -> Option<Coordinate> {
        self.positions.get(ht_name).copied()
    }

    fn non_moving_hts(&self) -> Vec<String> {
        self.non_moving.iter().cloned().collect()
    }

    fn is_deadlock(&self) -> bool {
        self.deadlock
    }
}
