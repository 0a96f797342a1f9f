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

//! Yard choice: candidate enumeration and the cost of sending one job to one yard block.

use terminalsim::constants::HT_DRIVE_TIME_PER_SECTOR;
use terminalsim::fleet::HtCoordinateView;
use terminalsim::grid::CorridorSide;
use terminalsim::job::JobInfo;

use super::JobPlanner;

/// Ordered candidate yards of a job: the preferred yard first, followed by every alternate that
/// is neither empty nor already listed. An empty preferred yard with no alternates yields an
/// empty list.
pub fn enumerate_yard_options(info: &JobInfo) -> Vec<String> {
    let mut options = Vec::with_capacity(1 + info.alt_yard_names.len());
    if !info.yard_name.is_empty() {
        options.push(info.yard_name.clone());
    }
    for alt in &info.alt_yard_names {
        if !alt.is_empty() && !options.contains(alt) {
            options.push(alt.clone());
        }
    }
    options
}

impl<V: HtCoordinateView> JobPlanner<V> {
    /// Yard for a discharge job. Uses the yard plan computed at the start of the tick when it
    /// covers the job; otherwise falls back to the cheapest single-job choice, or the preferred
    /// yard when there is nothing to choose from.
    pub(crate) fn select_yard(&self, job_seq: &str, info: &JobInfo) -> String {
        if let Some(yard) = self.latest_yard_plan.get(job_seq) {
            return yard.clone();
        }
        let options = enumerate_yard_options(info);
        if options.is_empty() {
            return info.yard_name.clone();
        }
        self.select_best_yard(info, &options)
    }

    /// The option minimising [`JobPlanner::yard_choice_cost`]; the first option on a tie or when
    /// every option is unknown.
    fn select_best_yard(&self, info: &JobInfo, options: &[String]) -> String {
        let mut best_choice: Option<&String> = None;
        let mut best_score = f64::INFINITY;
        for option in options {
            let score = self.yard_choice_cost(info, option);
            if score < best_score {
                best_score = score;
                best_choice = Some(option);
            }
        }
        best_choice.unwrap_or(&options[0]).clone()
    }

    /// Cost of sending the job's container to `yard_name`: the drive time from the quay crane's
    /// exit, discounted for the preferred yard, charged with a rank penalty for alternates, and
    /// (with `dynamic_corridor_bias`) with the pressure on the yard's corridor. Unknown sectors
    /// cost infinity.
    pub(crate) fn yard_choice_cost(&self, info: &JobInfo, yard_name: &str) -> f64 {
        let (Some(qc), Some(yard)) = (
            self.sector_map.qc_sector(&info.qc_name),
            self.sector_map.yard_sector(yard_name),
        ) else {
            return f64::INFINITY;
        };

        let distance = qc.out_coord.manhattan(yard.in_coord);
        let mut cost = f64::from(distance) * HT_DRIVE_TIME_PER_SECTOR;

        if yard_name == info.yard_name {
            cost *= 0.92;
        } else {
            let rank = info
                .alt_yard_names
                .iter()
                .position(|alt| alt == yard_name)
                .unwrap_or(info.alt_yard_names.len());
            cost += (rank + 1) as f64 * 8.0;
        }

        if self.features.dynamic_corridor_bias {
            cost += self.corridor_pressure_penalty(yard_name);
        }

        cost
    }

    /// Penalty charged when the yard's corridor was recently used more than the opposite one.
    fn corridor_pressure_penalty(&self, yard_name: &str) -> f64 {
        let side = CorridorSide::of_yard(yard_name);
        let imbalance = i64::from(self.corridor_history.get(side))
            - i64::from(self.corridor_history.get(side.opposite()));
        imbalance.max(0) as f64 * 1.2
    }
}
