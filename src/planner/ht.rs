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

//! Greedy HT selection: estimate the travel effort of every idle HT for the job at hand and
//! take the cheapest one.

use terminalsim::fleet::HtCoordinateView;
use terminalsim::grid::{Coordinate, CorridorSide};
use terminalsim::job::{JobInfo, JobType};

use super::JobPlanner;

impl<V: HtCoordinateView> JobPlanner<V> {
    /// Select an idle HT for the job using a distance-based heuristic. HTs listed in
    /// `selected_hts` were already chosen this tick and are skipped, as are HTs without a known
    /// coordinate. Ties are broken by the tracker's iteration order, which the
    /// [`HtCoordinateView`] contract requires to be deterministic. Returns `None` when no idle
    /// HT remains.
    pub fn select_ht(
        &self,
        info: &JobInfo,
        selected_hts: &[String],
        assigned_yard: Option<&str>,
    ) -> Option<String> {
        let mut best_choice = None;
        let mut best_cost = f64::INFINITY;

        for ht_name in self.ht_tracker.available_hts() {
            if selected_hts.contains(&ht_name) {
                continue;
            }
            let Some(ht_coord) = self.ht_tracker.coordinate(&ht_name) else {
                continue;
            };
            let cost = self.estimate_ht_assignment_cost(ht_coord, info, assigned_yard);
            if cost < best_cost {
                best_cost = cost;
                best_choice = Some(ht_name);
            }
        }

        best_choice
    }

    /// Estimated travel effort of assigning the HT at `ht_coord` to the job: the immediate trip
    /// plus a discounted estimate of the onward leg implied by the job type and yard. An unknown
    /// quay crane makes the assignment infinitely expensive.
    pub(crate) fn estimate_ht_assignment_cost(
        &self,
        ht_coord: Coordinate,
        info: &JobInfo,
        assigned_yard: Option<&str>,
    ) -> f64 {
        let Some(qc) = self.sector_map.qc_sector(&info.qc_name) else {
            return f64::INFINITY;
        };
        let yard = assigned_yard.and_then(|name| self.sector_map.yard_sector(name));

        let mut cost = 0.0;
        match info.job_type {
            JobType::Discharge => {
                cost += f64::from(ht_coord.manhattan(qc.in_coord));
                if let Some(yard) = yard {
                    cost += f64::from(qc.out_coord.manhattan(yard.in_coord)) * 0.7;
                    cost += f64::from(ht_coord.x.abs_diff(yard.in_coord.x)) * 0.1;
                }
            }
            JobType::Load => {
                if let Some(yard) = yard {
                    cost += f64::from(ht_coord.manhattan(yard.in_coord));
                    cost += f64::from(yard.out_coord.manhattan(qc.in_coord)) * 0.7;
                    cost += f64::from(ht_coord.x.abs_diff(yard.in_coord.x)) * 0.05;
                } else {
                    cost += f64::from(ht_coord.manhattan(qc.in_coord));
                }
            }
        }

        if let Some(yard_name) = assigned_yard {
            let recent = self.recent_yard_usage.get(yard_name).copied().unwrap_or(0);
            cost += f64::from(recent) * 0.3;

            if self.features.ht_future_penalty {
                let yard_side = CorridorSide::of_yard(yard_name);
                let diff = self.corridor_history.diff();
                if yard_side == CorridorSide::West && diff > 0 {
                    cost += diff as f64 * 0.5;
                } else if yard_side == CorridorSide::East && diff < 0 {
                    cost += diff.unsigned_abs() as f64 * 0.5;
                }
                if ht_coord.corridor_side() != yard_side {
                    cost += 4.0;
                }
            }
        }

        cost
    }
}
