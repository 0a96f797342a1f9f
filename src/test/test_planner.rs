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

use std::collections::HashSet;

use pretty_assertions::assert_eq;

use terminalsim::fleet::{HtCoordinateView, HtFleetSnapshot};
use terminalsim::grid::Coordinate;
use terminalsim::job::{JobInstruction, JobTracker, JobType};
use terminalsim::topology::standard_sector_map;

use super::{assert_connected, di, fleet_at, lo, planner, planner_with, tracker_with};
use crate::features::{Feature, FeatureSet};
use crate::planner::{enumerate_yard_options, JobPlanner};

/// Assert that the instruction sequence matches the template of its job type and that every
/// drive is non-empty and orthogonally connected.
fn assert_instruction_template(job_type: JobType, instructions: &[JobInstruction]) {
    assert_eq!(instructions.len(), 8);
    let expect_book_qc_first = job_type == JobType::Discharge;
    let (book_first, book_second) = if expect_book_qc_first {
        (&instructions[0], &instructions[4])
    } else {
        (&instructions[4], &instructions[0])
    };
    assert_eq!(book_first, &JobInstruction::BookQc);
    assert_eq!(book_second, &JobInstruction::BookYard);
    for idx in [1, 3, 5, 7] {
        let path = instructions[idx].path().expect("expected a drive");
        assert_connected(path);
    }
    let work_indices = [2, 6];
    for idx in work_indices {
        match (&instructions[idx], job_type) {
            (JobInstruction::WorkQc { .. }, JobType::Discharge) if idx == 2 => {}
            (JobInstruction::WorkYard { .. }, JobType::Discharge) if idx == 6 => {}
            (JobInstruction::WorkYard { .. }, JobType::Load) if idx == 2 => {}
            (JobInstruction::WorkQc { .. }, JobType::Load) if idx == 6 => {}
            (other, _) => panic!("unexpected instruction at {idx}: {other}"),
        }
    }
}

#[test]
fn empty_tick_returns_nothing() {
    let mut planner = planner(4);
    planner.corridor_history.west = 2;
    let mut tracker = JobTracker::new();
    assert_eq!(planner.plan(&mut tracker), vec![]);
    assert!(planner.yard_di_allocation.is_empty());
    assert!(planner.recent_yard_usage.is_empty());
    // without the corridor feature there is no decay either
    assert_eq!(planner.corridor_history.west, 2);
}

#[test]
fn empty_tick_decays_the_corridor_history() {
    let mut planner = planner_with(
        4,
        FeatureSet::default().with(Feature::DynamicCorridorBias, true),
    );
    planner.corridor_history.west = 2;
    planner.corridor_history.east = 0;
    let mut tracker = JobTracker::new();
    assert_eq!(planner.plan(&mut tracker), vec![]);
    assert_eq!(planner.corridor_history.west, 1);
    assert_eq!(planner.corridor_history.east, 0);
}

#[test]
fn single_load_job() {
    let fleet = fleet_at(&[("HT01", 20, 7)]);
    let mut planner =
        JobPlanner::new(fleet, standard_sector_map()).with_features(FeatureSet::default());
    let mut tracker = tracker_with(vec![lo("j1", "QC01", "YD_A")]);

    let jobs = planner.plan(&mut tracker);
    assert_eq!(jobs.len(), 1);
    let job = &jobs[0];
    assert_eq!(job.assigned_ht(), Some("HT01"));
    assert_eq!(job.assigned_yard(), Some("YD_A"));
    assert_instruction_template(JobType::Load, job.instructions());
    // the first drive leaves the HT's buffer cell
    assert_eq!(
        job.instructions()[1].path().unwrap().last(),
        Some(&standard_sector_map().yard_sector("YD_A").unwrap().in_coord)
    );
}

#[test]
fn ht_starvation_ends_the_tick() {
    let mut planner = planner(2);
    let mut tracker = tracker_with(vec![
        lo("j1", "QC01", "YD_A"),
        lo("j2", "QC02", "YD_B"),
        lo("j3", "QC03", "YD_C"),
        lo("j4", "QC04", "YD_D"),
        lo("j5", "QC05", "YD_E"),
    ]);

    let jobs = planner.plan(&mut tracker);
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].job_seq(), "j1");
    assert_eq!(jobs[1].job_seq(), "j2");
    // the remaining jobs are untouched and stay plannable
    assert_eq!(tracker.get_plannable_job_sequences(), vec!["j3", "j4", "j5"]);
    assert!(!tracker.get_job("j3").unwrap().is_assigned());
}

#[test]
fn no_ht_is_assigned_twice() {
    let mut planner = planner(6);
    let mut tracker = tracker_with(vec![
        di("j1", "QC01", "YD_A", &["YD_E"]),
        lo("j2", "QC02", "YD_B"),
        di("j3", "QC03", "YD_C", &["YD_F", "YD_G"]),
        lo("j4", "QC04", "YD_D"),
        di("j5", "QC05", "YD_H", &[]),
    ]);

    let jobs = planner.plan(&mut tracker);
    assert_eq!(jobs.len(), 5);
    let hts: HashSet<_> = jobs.iter().map(|job| job.assigned_ht().unwrap()).collect();
    assert_eq!(hts.len(), jobs.len());
}

#[test]
fn assigned_yards_respect_the_candidate_lists() {
    let mut planner = planner(6);
    let mut tracker = tracker_with(vec![
        di("j1", "QC01", "YD_A", &["YD_E"]),
        lo("j2", "QC02", "YD_B"),
        di("j3", "QC03", "YD_C", &["YD_F", "YD_G"]),
    ]);

    for job in planner.plan(&mut tracker) {
        let info = job.info();
        match info.job_type {
            JobType::Discharge => {
                let options = enumerate_yard_options(info);
                assert!(options.contains(&job.assigned_yard().unwrap().to_string()));
            }
            JobType::Load => assert_eq!(job.assigned_yard(), Some(info.yard_name.as_str())),
        }
        assert_instruction_template(info.job_type, job.instructions());
    }
}

#[test]
fn discharge_allocation_grows_monotonically() {
    let mut planner = planner(4);
    let mut tracker = JobTracker::new();
    let mut previous = planner.yard_di_allocation.clone();
    for tick in 0..5 {
        tracker.insert(di(&format!("a{tick}"), "QC01", "YD_A", &["YD_B"]));
        tracker.insert(di(&format!("b{tick}"), "QC05", "YD_G", &["YD_H"]));
        planner.plan(&mut tracker);
        for (yard, count) in &previous {
            assert!(planner.yard_di_allocation.get(yard).copied().unwrap_or(0) >= *count);
        }
        previous = planner.yard_di_allocation.clone();
    }
    assert_eq!(previous.values().sum::<u32>(), 10);
}

#[test]
fn recent_usage_decays_once_per_active_tick() {
    let mut planner = planner(2);
    let mut tracker = JobTracker::new();

    // first tick: the yard is used twice
    tracker.insert(lo("j1", "QC01", "YD_C"));
    tracker.insert(lo("j2", "QC02", "YD_C"));
    planner.plan(&mut tracker);
    assert_eq!(planner.recent_yard_usage.get("YD_C"), Some(&2));

    // an idle tick does not decay the counter
    planner.plan(&mut tracker);
    assert_eq!(planner.recent_yard_usage.get("YD_C"), Some(&2));

    // another use decays once, then counts once
    tracker.insert(lo("j3", "QC03", "YD_C"));
    planner.plan(&mut tracker);
    assert_eq!(planner.recent_yard_usage.get("YD_C"), Some(&2));
}

#[test]
fn capacity_saturation_migrates_to_alternates() {
    let mut planner = planner(3);
    planner.yard_di_allocation.insert("YD_E".to_string(), 699);
    let mut tracker = tracker_with(vec![
        di("j1", "QC05", "YD_E", &["YD_F"]),
        di("j2", "QC05", "YD_E", &["YD_F"]),
        di("j3", "QC06", "YD_E", &["YD_F"]),
    ]);

    let jobs = planner.plan(&mut tracker);
    assert_eq!(jobs.len(), 3);
    let on_f = jobs
        .iter()
        .filter(|job| job.assigned_yard() == Some("YD_F"))
        .count();
    assert!(on_f >= 2, "expected at least two jobs on YD_F, got {on_f}");
    assert!(planner.yard_di_allocation["YD_E"] <= 700);
}

#[test]
fn unknown_yard_skips_the_job_but_not_the_tick() {
    let mut planner = planner(2);
    let mut tracker = tracker_with(vec![
        di("j1", "QC01", "YD_Z", &[]),
        lo("j2", "QC02", "YD_B"),
    ]);

    let jobs = planner.plan(&mut tracker);
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].job_seq(), "j2");
    assert!(!tracker.get_job("j1").unwrap().is_assigned());
    assert!(planner.yard_di_allocation.is_empty());
}

#[test]
fn cached_paths_match_freshly_built_ones() {
    let run = |cache: bool| {
        let features = FeatureSet::default().with(Feature::PathCache, cache);
        let mut planner = planner_with(2, features);
        let mut tracker = tracker_with(vec![
            lo("j1", "QC01", "YD_A"),
            lo("j2", "QC01", "YD_A"),
        ]);
        planner.plan(&mut tracker)
    };
    let cached = run(true);
    let fresh = run(false);
    assert_eq!(cached, fresh);
}

#[test]
fn identical_planners_produce_identical_runs() {
    let features = FeatureSet::default()
        .with(Feature::DynamicCorridorBias, true)
        .with(Feature::GaDiversity, true)
        .with(Feature::HtFuturePenalty, true);
    let mut planner_a = planner_with(6, features);
    let mut planner_b = planner_with(6, features);
    let mut tracker_a = JobTracker::new();
    let mut tracker_b = JobTracker::new();

    for tick in 0..10 {
        for k in 0..4 {
            let seq = format!("t{tick}-{k}");
            let info = if k % 2 == 0 {
                di(&seq, "QC03", "YD_B", &["YD_F", "YD_G"])
            } else {
                lo(&seq, "QC02", "YD_D")
            };
            tracker_a.insert(info.clone());
            tracker_b.insert(info);
        }
        assert_eq!(planner_a.plan(&mut tracker_a), planner_b.plan(&mut tracker_b));
    }
    assert_eq!(planner_a.yard_di_allocation, planner_b.yard_di_allocation);
    assert_eq!(planner_a.recent_yard_usage, planner_b.recent_yard_usage);
}

#[test]
fn deadlock_and_non_moving_are_passed_through() {
    let mut fleet = HtFleetSnapshot::new();
    fleet.add_ht("HT01", Coordinate::new(2, 7));
    fleet.set_non_moving("HT01", true);
    fleet.set_deadlock(true);
    let planner =
        JobPlanner::new(fleet, standard_sector_map()).with_features(FeatureSet::default());
    assert!(planner.is_deadlock());
    assert_eq!(planner.non_moving_hts(), vec!["HT01"]);
    assert!(planner.ht_tracker.coordinate("HT01").is_some());
}
