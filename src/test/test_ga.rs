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

use approx::assert_relative_eq;
use maplit::btreemap;
use pretty_assertions::assert_eq;

use terminalsim::grid::CorridorSide;

use super::{di, lo, tracker_with};
use crate::features::{Feature, FeatureSet};
use crate::planner::ga::CandidateJob;

/// Candidate with the given options, preferred first.
fn candidate(seq: &str, qc: &str, options: &[&str]) -> CandidateJob {
    CandidateJob {
        job_seq: seq.to_string(),
        info: di(seq, qc, options[0], &options[1..]),
        options: options.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn single_option_jobs_are_pinned() {
    let mut planner = super::planner(4);
    let tracker = tracker_with(vec![
        di("j1", "QC01", "YD_A", &[]),
        di("j2", "QC02", "YD_B", &["YD_B"]),
    ]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);
    assert_eq!(plan["j1"], "YD_A");
    assert_eq!(plan["j2"], "YD_B");
}

#[test]
fn load_jobs_never_enter_the_plan() {
    let mut planner = super::planner(4);
    let tracker = tracker_with(vec![
        lo("j1", "QC01", "YD_A"),
        di("j2", "QC02", "YD_B", &["YD_C"]),
    ]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);
    assert!(!plan.contains_key("j1"));
    assert!(plan.contains_key("j2"));
}

#[test]
fn jobs_without_options_are_left_out() {
    let mut planner = super::planner(4);
    let tracker = tracker_with(vec![di("j1", "QC01", "", &[])]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);
    assert!(plan.is_empty());
}

#[test]
fn optimised_yards_stay_within_the_options() {
    let mut planner = super::planner(4);
    let tracker = tracker_with(vec![
        di("j1", "QC01", "YD_A", &["YD_E", "YD_F"]),
        di("j2", "QC03", "YD_B", &["YD_G"]),
        di("j3", "QC05", "YD_H", &["YD_C", "YD_D"]),
    ]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);
    assert!(["YD_A", "YD_E", "YD_F"].contains(&plan["j1"].as_str()));
    assert!(["YD_B", "YD_G"].contains(&plan["j2"].as_str()));
    assert!(["YD_H", "YD_C", "YD_D"].contains(&plan["j3"].as_str()));
}

#[test]
fn scorer_charges_duplicated_yards() {
    let planner = super::planner(0);
    let candidates = vec![
        candidate("j1", "QC04", &["YD_A", "YD_H"]),
        candidate("j2", "QC04", &["YD_A", "YD_H"]),
    ];
    let base = Default::default();

    let both_west = planner.score_yard_plan(&vec![0, 0], &candidates, &base);
    let choice_costs = planner.yard_choice_cost(&candidates[0].info, "YD_A")
        + planner.yard_choice_cost(&candidates[1].info, "YD_A");
    // one duplication penalty and a corridor imbalance of two
    assert_relative_eq!(both_west, choice_costs + (10.0 + 4.0) + 2.0 * 2.0);

    let split = planner.score_yard_plan(&vec![0, 1], &candidates, &base);
    let split_costs = planner.yard_choice_cost(&candidates[0].info, "YD_A")
        + planner.yard_choice_cost(&candidates[1].info, "YD_H");
    assert_relative_eq!(split, split_costs);
}

#[test]
fn scorer_charges_recently_used_yards() {
    let mut planner = super::planner(0);
    let candidates = vec![candidate("j1", "QC04", &["YD_A", "YD_H"])];
    let base = Default::default();
    let fresh = planner.score_yard_plan(&vec![0], &candidates, &base);
    planner.recent_yard_usage.insert("YD_A".to_string(), 10);
    let reused = planner.score_yard_plan(&vec![0], &candidates, &base);
    // the recency charge is capped at six
    assert_relative_eq!(reused, fresh + 6.0 * 1.5);
}

#[test]
fn scorer_charges_the_capacity_margin() {
    let planner = super::planner(0);
    let candidates = vec![candidate("j1", "QC04", &["YD_A", "YD_H"])];
    let base = btreemap! { "YD_A".to_string() => 690 };
    let score = planner.score_yard_plan(&vec![0], &candidates, &base);

    let relaxed_base = btreemap! { "YD_A".to_string() => 600 };
    let relaxed = planner.score_yard_plan(&vec![0], &candidates, &relaxed_base);

    // 691 of 700 used leaves a margin of 9: seven soft-penalty steps. The corridor imbalance
    // also grows by the 90 additional baseline containers in the west.
    assert_relative_eq!(score, relaxed + 7.0 * 750.0 + 90.0 * 2.0);
}

#[test]
fn scorer_charges_capacity_overflow_hard() {
    let planner = super::planner(0);
    let candidates = vec![candidate("j1", "QC04", &["YD_A", "YD_H"])];
    let base = btreemap! { "YD_A".to_string() => 700 };
    let score = planner.score_yard_plan(&vec![0], &candidates, &base);
    assert!(score >= 1_000_000.0);
}

#[test]
fn repair_moves_overflow_to_feasible_alternates() {
    let planner = super::planner(0);
    let base = btreemap! { "YD_E".to_string() => 699 };
    let candidates = vec![
        candidate("j1", "QC05", &["YD_E", "YD_F"]),
        candidate("j2", "QC05", &["YD_E", "YD_F"]),
        candidate("j3", "QC05", &["YD_E", "YD_F"]),
    ];
    let repaired = planner.enforce_capacity_limit(vec![0, 0, 0], &candidates, &base);
    // two jobs must leave YD_E; ties resolve in candidate order
    assert_eq!(repaired, vec![1, 1, 0]);
}

#[test]
fn repair_leaves_infeasible_plans_untouched() {
    let planner = super::planner(0);
    let base = btreemap! {
        "YD_E".to_string() => 700,
        "YD_F".to_string() => 700,
    };
    let candidates = vec![candidate("j1", "QC05", &["YD_E", "YD_F"])];
    let repaired = planner.enforce_capacity_limit(vec![0], &candidates, &base);
    assert_eq!(repaired, vec![0]);
    // the scorer still reports the violation
    assert!(planner.score_yard_plan(&repaired, &candidates, &base) >= 1_000_000.0);
}

#[test]
fn optimiser_respects_capacity_after_repair() {
    let mut planner = super::planner(4);
    planner.yard_di_allocation.insert("YD_E".to_string(), 699);
    let tracker = tracker_with(vec![
        di("j1", "QC05", "YD_E", &["YD_F"]),
        di("j2", "QC05", "YD_E", &["YD_F"]),
        di("j3", "QC05", "YD_E", &["YD_F"]),
    ]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);

    let on_e = plan.values().filter(|yard| *yard == "YD_E").count();
    let on_f = plan.values().filter(|yard| *yard == "YD_F").count();
    assert_eq!(on_e + on_f, 3);
    assert!(on_e <= 1, "at most one job may still fit into YD_E");
    assert!(on_f >= 2);
}

#[test]
fn optimiser_balances_the_corridors() {
    let mut planner = super::planner_with(
        8,
        FeatureSet::default().with(Feature::DynamicCorridorBias, true),
    );
    // the western corridor has been loaded recently, so spreading the batch wins
    planner.corridor_history.west = 4;
    let tracker = tracker_with(vec![
        di("j1", "QC04", "YD_A", &["YD_H"]),
        di("j2", "QC04", "YD_A", &["YD_H"]),
        di("j3", "QC04", "YD_A", &["YD_H"]),
        di("j4", "QC04", "YD_A", &["YD_H"]),
    ]);
    let seqs = tracker.get_plannable_job_sequences();
    let plan = planner.optimize_yard_assignments(&tracker, &seqs);

    let west = plan
        .values()
        .filter(|yard| CorridorSide::of_yard(yard) == CorridorSide::West)
        .count() as i64;
    let east = plan.len() as i64 - west;
    assert!(
        (west - east).abs() <= 1,
        "final plan is imbalanced: {west} west vs {east} east"
    );
}
