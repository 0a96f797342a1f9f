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

//! The yard optimiser: a small elitist genetic algorithm over candidate yard assignments for the
//! discharge jobs of one planning tick.
//!
//! Only discharge jobs with at least two feasible yard options enter the population; jobs with a
//! single option are pinned into the returned plan directly and counted towards the capacity
//! baseline. A genome is a flat vector of option indices aligned with the candidate list. All
//! stochastic choices are drawn from the planner's seeded PRNG, and every container that is
//! iterated during scoring is ordered, so the optimiser is deterministic for fixed inputs.

use std::collections::{BTreeMap, HashMap};

use itertools::Itertools;
use log::debug;
use ordered_float::OrderedFloat;
use rand::seq::SliceRandom;
use rand::Rng;

use terminalsim::fleet::HtCoordinateView;
use terminalsim::grid::CorridorSide;
use terminalsim::job::{JobInfo, JobTracker, JobType};
use terminalsim::types::JobSeq;

use super::yard::enumerate_yard_options;
use super::{
    JobPlanner, SideCounts, YARD_CAPACITY_HARD_PENALTY, YARD_CAPACITY_SOFT_PENALTY,
    YARD_CAPACITY_SOFT_THRESHOLD, YARD_DI_CAPACITY,
};

/// Number of generations the optimiser evolves.
const GENERATIONS: usize = 5;

/// A discharge job competing for a yard in the optimiser.
#[derive(Debug, Clone)]
pub(crate) struct CandidateJob {
    /// The job's stable identifier.
    pub(crate) job_seq: JobSeq,
    /// The job's immutable description.
    pub(crate) info: JobInfo,
    /// Feasible yards, preferred first. Always at least two entries.
    pub(crate) options: Vec<String>,
}

/// One member of the population: the chosen option index per candidate job.
pub(crate) type Genome = Vec<usize>;

/// First index of `order` whose yard still has spare capacity in `counts`; the first entry of
/// `order` when none has.
fn pick_feasible_yard(options: &[String], order: &[usize], counts: &BTreeMap<String, u32>) -> usize {
    for &idx in order {
        if counts.get(&options[idx]).copied().unwrap_or(0) < YARD_DI_CAPACITY {
            return idx;
        }
    }
    order.first().copied().unwrap_or(0)
}

impl<V: HtCoordinateView> JobPlanner<V> {
    /// Compute the yard plan for the given plannable window. Discharge jobs with one option are
    /// pinned; the rest are optimised by the GA and repaired for capacity. Load jobs never
    /// appear in the returned plan.
    pub(crate) fn optimize_yard_assignments(
        &mut self,
        job_tracker: &JobTracker,
        job_seqs: &[JobSeq],
    ) -> HashMap<JobSeq, String> {
        let mut yard_plan: HashMap<JobSeq, String> = HashMap::new();
        let mut base_di_counts = self.yard_di_allocation.clone();
        let mut candidates: Vec<CandidateJob> = Vec::new();

        for job_seq in job_seqs {
            let Some(job) = job_tracker.get_job(job_seq) else {
                continue;
            };
            let info = job.info();
            if info.job_type != JobType::Discharge {
                continue;
            }
            let options = enumerate_yard_options(info);
            if let [only] = options.as_slice() {
                *base_di_counts.entry(only.clone()).or_default() += 1;
                yard_plan.insert(job_seq.clone(), only.clone());
            } else if !options.is_empty() {
                candidates.push(CandidateJob {
                    job_seq: job_seq.clone(),
                    info: info.clone(),
                    options,
                });
            }
        }

        if candidates.is_empty() {
            return yard_plan;
        }

        let population_size = (candidates.len() * 2).clamp(4, 16);
        let elite_count = (population_size / 3).clamp(1, 3);

        let base_genome: Genome = if self.features.ga_diversity {
            candidates
                .iter()
                .map(|candidate| self.diverse_seed_choice(candidate))
                .collect()
        } else {
            vec![0; candidates.len()]
        };
        let mut population = vec![base_genome.clone()];
        while population.len() < population_size {
            population.push(self.random_assignment(&candidates, &base_di_counts));
        }

        let mut best_genome = base_genome;
        let mut best_score = f64::INFINITY;
        let mut mutation_rate: f64 = if self.features.ga_diversity { 0.40 } else { 0.35 };
        let mut stagnant_generations = 0usize;

        for generation in 0..GENERATIONS {
            let scored: Vec<(f64, Genome)> = population
                .iter()
                .map(|genome| {
                    (
                        self.score_yard_plan(genome, &candidates, &base_di_counts),
                        genome.clone(),
                    )
                })
                .sorted_by_key(|(score, _)| OrderedFloat(*score))
                .collect();

            if scored.first().map(|(s, _)| *s < best_score).unwrap_or(false) {
                best_score = scored[0].0;
                best_genome = scored[0].1.clone();
                stagnant_generations = 0;
                debug!("Generation {generation}: best score {best_score}");
            } else {
                stagnant_generations += 1;
                if self.features.ga_diversity && stagnant_generations >= 1 {
                    mutation_rate = (mutation_rate + 0.10).min(0.65);
                }
            }

            let elites: Vec<Genome> = scored
                .iter()
                .take(elite_count)
                .map(|(_, genome)| genome.clone())
                .collect();
            let elites = if elites.is_empty() {
                vec![best_genome.clone()]
            } else {
                elites
            };

            let mut next_population = elites.clone();
            while next_population.len() < population_size {
                let parent = elites[self.rng.gen_range(0..elites.len())].clone();
                next_population.push(self.mutate_assignment(
                    &parent,
                    &candidates,
                    mutation_rate,
                    &base_di_counts,
                ));
            }
            population = next_population;
        }

        let mut final_scored: Vec<(f64, Genome)> = population
            .into_iter()
            .map(|genome| {
                (
                    self.score_yard_plan(&genome, &candidates, &base_di_counts),
                    genome,
                )
            })
            .sorted_by_key(|(score, _)| OrderedFloat(*score))
            .collect();
        if final_scored.first().map(|(s, _)| *s < best_score).unwrap_or(false) {
            best_genome = final_scored.swap_remove(0).1;
        }

        let best_genome = self.enforce_capacity_limit(best_genome, &candidates, &base_di_counts);

        for (candidate, &choice) in candidates.iter().zip(&best_genome) {
            yard_plan.insert(candidate.job_seq.clone(), candidate.options[choice].clone());
        }
        yard_plan
    }

    /// Stochastic argmin used to seed the population with `ga_diversity`: the option with the
    /// lowest choice cost after adding uniform noise from `[0, 2)`.
    fn diverse_seed_choice(&mut self, candidate: &CandidateJob) -> usize {
        let mut keyed: Vec<(OrderedFloat<f64>, usize)> = Vec::with_capacity(candidate.options.len());
        for (idx, option) in candidate.options.iter().enumerate() {
            let noise: f64 = self.rng.gen::<f64>() * 2.0;
            keyed.push((
                OrderedFloat(self.yard_choice_cost(&candidate.info, option) + noise),
                idx,
            ));
        }
        keyed.into_iter().min().map(|(_, idx)| idx).unwrap_or(0)
    }

    /// Draw one random genome. With `ga_diversity`, options are ranked by noisy choice cost and
    /// the first feasible one is taken; without it, the assignment is biased towards the
    /// preferred yard and otherwise picks the first feasible option of a shuffled order. The
    /// running counts include everything assigned so far, so individuals respect the capacity
    /// limit in expectation.
    fn random_assignment(
        &mut self,
        candidates: &[CandidateJob],
        base_counts: &BTreeMap<String, u32>,
    ) -> Genome {
        let mut assignment = Genome::with_capacity(candidates.len());
        let mut local_counts = base_counts.clone();
        for candidate in candidates {
            let choice = if self.features.ga_diversity {
                let mut keyed: Vec<(OrderedFloat<f64>, usize)> =
                    Vec::with_capacity(candidate.options.len());
                for (idx, option) in candidate.options.iter().enumerate() {
                    let noise: f64 = self.rng.gen::<f64>() * 5.0;
                    keyed.push((
                        OrderedFloat(self.yard_choice_cost(&candidate.info, option) + noise),
                        idx,
                    ));
                }
                keyed.sort();
                let order: Vec<usize> = keyed.into_iter().map(|(_, idx)| idx).collect();
                pick_feasible_yard(&candidate.options, &order, &local_counts)
            } else if candidate.options.contains(&candidate.info.yard_name)
                && self.rng.gen::<f64>() < 0.6
            {
                // preferred-first order; the enumerator puts the preferred yard at index 0
                let order: Vec<usize> = (0..candidate.options.len()).collect();
                pick_feasible_yard(&candidate.options, &order, &local_counts)
            } else {
                let mut order: Vec<usize> = (0..candidate.options.len()).collect();
                order.shuffle(&mut self.rng);
                pick_feasible_yard(&candidate.options, &order, &local_counts)
            };
            *local_counts
                .entry(candidate.options[choice].clone())
                .or_default() += 1;
            assignment.push(choice);
        }
        assignment
    }

    /// Mutate a genome: each gene is, with probability `mutation_rate`, replaced by a uniformly
    /// chosen different option that keeps the running counts below capacity; if no alternative
    /// fits, the gene is kept.
    fn mutate_assignment(
        &mut self,
        baseline: &Genome,
        candidates: &[CandidateJob],
        mutation_rate: f64,
        base_counts: &BTreeMap<String, u32>,
    ) -> Genome {
        let mut mutated = baseline.clone();
        let mut current_counts = base_counts.clone();
        for (candidate, &choice) in candidates.iter().zip(baseline) {
            *current_counts
                .entry(candidate.options[choice].clone())
                .or_default() += 1;
        }

        for (idx, candidate) in candidates.iter().enumerate() {
            if candidate.options.len() <= 1 {
                continue;
            }
            if self.rng.gen::<f64>() >= mutation_rate {
                continue;
            }
            let current = mutated[idx];
            let mut pool: Vec<usize> = (0..candidate.options.len())
                .filter(|&other| other != current)
                .collect();
            pool.shuffle(&mut self.rng);
            for replacement in pool {
                let replacement_yard = &candidate.options[replacement];
                if current_counts.get(replacement_yard).copied().unwrap_or(0) < YARD_DI_CAPACITY {
                    mutated[idx] = replacement;
                    if let Some(count) = current_counts.get_mut(&candidate.options[current]) {
                        *count = count.saturating_sub(1);
                    }
                    *current_counts.entry(replacement_yard.clone()).or_default() += 1;
                    break;
                }
            }
        }
        mutated
    }

    /// Score a full assignment: the summed yard-choice costs plus penalties for duplicated
    /// yards, recently used yards, eaten capacity margins, exceeded capacity, and corridor
    /// imbalance.
    pub(crate) fn score_yard_plan(
        &self,
        genome: &Genome,
        candidates: &[CandidateJob],
        base_counts: &BTreeMap<String, u32>,
    ) -> f64 {
        let mut total_cost = 0.0;
        let mut yard_counts: BTreeMap<&str, u32> = BTreeMap::new();
        let mut corridor_counts = SideCounts::default();
        for (yard, &count) in base_counts {
            *corridor_counts.get_mut(CorridorSide::of_yard(yard)) += count;
        }

        for (candidate, &choice) in candidates.iter().zip(genome) {
            let yard = candidate.options[choice].as_str();
            total_cost += self.yard_choice_cost(&candidate.info, yard);
            *yard_counts.entry(yard).or_default() += 1;
            *corridor_counts.get_mut(CorridorSide::of_yard(yard)) += 1;
        }

        for (yard, &count) in &yard_counts {
            if count > 1 {
                total_cost += f64::from(count - 1) * 10.0 + f64::from(count * count);
            }
            let recent = self.recent_yard_usage.get(*yard).copied().unwrap_or(0);
            if recent > 0 {
                total_cost += f64::from(recent.min(6)) * 1.5;
            }
            let combined = count + base_counts.get(*yard).copied().unwrap_or(0);
            if combined > YARD_DI_CAPACITY {
                total_cost += f64::from(combined - YARD_DI_CAPACITY) * YARD_CAPACITY_HARD_PENALTY;
            } else {
                let remaining = YARD_DI_CAPACITY - combined;
                if remaining <= YARD_CAPACITY_SOFT_THRESHOLD {
                    total_cost += f64::from(YARD_CAPACITY_SOFT_THRESHOLD - remaining + 1)
                        * YARD_CAPACITY_SOFT_PENALTY;
                }
            }
        }

        let imbalance = f64::from(corridor_counts.imbalance());
        if self.features.dynamic_corridor_bias {
            let history_diff = f64::from(self.corridor_history.imbalance());
            total_cost += imbalance * (2.0 + 0.5 * history_diff);
        } else {
            total_cost += imbalance * 2.0;
        }

        total_cost
    }
}
