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

//! Capacity repair: a deterministic post-pass that evicts assignments from over-capacity yards
//! to the cheapest feasible alternative.

use std::collections::BTreeMap;

use log::warn;
use ordered_float::OrderedFloat;

use terminalsim::fleet::HtCoordinateView;

use super::ga::{CandidateJob, Genome};
use super::{JobPlanner, YARD_DI_CAPACITY};

impl<V: HtCoordinateView> JobPlanner<V> {
    /// Move assignments away from yards whose combined (baseline plus planned) count exceeds the
    /// capacity. The yard with the largest overflow is drained first, always via the move with
    /// the smallest cost increase (ties broken by the job's quay crane, then candidate order).
    /// When no feasible move remains the plan is accepted as best effort.
    pub(crate) fn enforce_capacity_limit(
        &self,
        mut genome: Genome,
        candidates: &[CandidateJob],
        base_counts: &BTreeMap<String, u32>,
    ) -> Genome {
        if genome.is_empty() {
            return genome;
        }

        let mut combined_counts = base_counts.clone();
        for (candidate, &choice) in candidates.iter().zip(&genome) {
            *combined_counts
                .entry(candidate.options[choice].clone())
                .or_default() += 1;
        }

        loop {
            // the yard with the largest overflow, alphabetically first on ties
            let mut worst: Option<(&str, u32)> = None;
            for (yard, &count) in &combined_counts {
                if count > YARD_DI_CAPACITY {
                    let overflow = count - YARD_DI_CAPACITY;
                    if worst.map(|(_, w)| overflow > w).unwrap_or(true) {
                        worst = Some((yard, overflow));
                    }
                }
            }
            let Some((yard, _)) = worst else {
                break;
            };
            let yard = yard.to_string();

            let mut moves: Vec<(OrderedFloat<f64>, String, usize, usize)> = Vec::new();
            for (idx, candidate) in candidates.iter().enumerate() {
                if candidate.options[genome[idx]] != yard {
                    continue;
                }
                let current_cost = self.yard_choice_cost(&candidate.info, &yard);
                for (alt_idx, alt) in candidate.options.iter().enumerate() {
                    if alt == &yard {
                        continue;
                    }
                    if combined_counts.get(alt).copied().unwrap_or(0) >= YARD_DI_CAPACITY {
                        continue;
                    }
                    let delta = self.yard_choice_cost(&candidate.info, alt) - current_cost;
                    moves.push((
                        OrderedFloat(delta),
                        candidate.info.qc_name.clone(),
                        idx,
                        alt_idx,
                    ));
                }
            }

            if moves.is_empty() {
                warn!("Yard {yard} stays over capacity: no feasible reassignment remains");
                break;
            }
            moves.sort();
            let (_, _, idx, alt_idx) = moves.swap_remove(0);

            let from = candidates[idx].options[genome[idx]].clone();
            let to = candidates[idx].options[alt_idx].clone();
            genome[idx] = alt_idx;
            if let Some(count) = combined_counts.get_mut(&from) {
                *count = count.saturating_sub(1);
            }
            *combined_counts.entry(to).or_default() += 1;
        }

        genome
    }
}
