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

//! Test module for the planner.

use terminalsim::fleet::HtFleetSnapshot;
use terminalsim::grid::Coordinate;
use terminalsim::job::{JobInfo, JobTracker, JobType};
use terminalsim::topology::{standard_fleet, standard_sector_map};

use crate::features::FeatureSet;
use crate::planner::JobPlanner;

mod test_ga;
mod test_planner;

/// Planner over the standard terminal with `n` HTs and all features off, independent of the
/// process environment.
fn planner(n_hts: usize) -> JobPlanner<HtFleetSnapshot> {
    JobPlanner::new(standard_fleet(n_hts), standard_sector_map())
        .with_features(FeatureSet::default())
}

/// Planner over the standard terminal with an explicit feature set.
fn planner_with(n_hts: usize, features: FeatureSet) -> JobPlanner<HtFleetSnapshot> {
    JobPlanner::new(standard_fleet(n_hts), standard_sector_map()).with_features(features)
}

/// A discharge job description.
fn di(seq: &str, qc: &str, yard: &str, alts: &[&str]) -> JobInfo {
    JobInfo {
        job_seq: seq.to_string(),
        job_type: JobType::Discharge,
        qc_name: qc.to_string(),
        yard_name: yard.to_string(),
        alt_yard_names: alts.iter().map(|s| s.to_string()).collect(),
    }
}

/// A load job description.
fn lo(seq: &str, qc: &str, yard: &str) -> JobInfo {
    JobInfo {
        job_seq: seq.to_string(),
        job_type: JobType::Load,
        qc_name: qc.to_string(),
        yard_name: yard.to_string(),
        alt_yard_names: Vec::new(),
    }
}

/// Tracker seeded with the given jobs.
fn tracker_with(jobs: Vec<JobInfo>) -> JobTracker {
    let mut tracker = JobTracker::new();
    for info in jobs {
        tracker.insert(info);
    }
    tracker
}

/// Fleet with HTs at explicit cells.
fn fleet_at(hts: &[(&str, i32, i32)]) -> HtFleetSnapshot {
    let mut fleet = HtFleetSnapshot::new();
    for (name, x, y) in hts {
        fleet.add_ht(*name, Coordinate::new(*x, *y));
    }
    fleet
}

/// Assert that every pair of consecutive cells of `path` is orthogonally adjacent.
fn assert_connected(path: &[Coordinate]) {
    assert!(!path.is_empty(), "path must not be empty");
    for pair in path.windows(2) {
        assert!(
            pair[0].is_adjacent(pair[1]),
            "cells {} and {} are not orthogonally adjacent",
            pair[0],
            pair[1]
        );
    }
}
