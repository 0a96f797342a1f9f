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

//! The per-tick job planner. One call to [`JobPlanner::plan`] consumes the tracker's plannable
//! window, assigns HTs and yards, and fills in the instruction sequences that the simulation
//! executes.

use std::collections::{BTreeMap, HashMap};

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use terminalsim::fleet::{HtCoordinateView, HtFleetSnapshot};
use terminalsim::grid::{Coordinate, CorridorSide};
use terminalsim::job::{Job, JobInfo, JobInstruction, JobTracker, JobType};
use terminalsim::sector::SectorMapSnapshot;
use terminalsim::types::{JobSeq, TerminalError};

use crate::features::FeatureSet;
use crate::path::PathSynthesiser;

pub(crate) mod ga;
mod ht;
mod repair;
mod yard;

pub use yard::enumerate_yard_options;

/// Maximum number of discharge jobs a single yard block accepts over a run.
pub const YARD_DI_CAPACITY: u32 = 700;
/// Remaining-capacity margin below which the plan scorer starts charging the soft penalty.
pub const YARD_CAPACITY_SOFT_THRESHOLD: u32 = 15;
/// Per-step soft penalty for eating into the capacity margin.
pub const YARD_CAPACITY_SOFT_PENALTY: f64 = 750.0;
/// Per-container penalty for exceeding the capacity outright.
pub const YARD_CAPACITY_HARD_PENALTY: f64 = 1_000_000.0;

/// Per-corridor usage counters, used to spread yard traffic between the two corridors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct SideCounts {
    /// Counter of the western corridor.
    pub(crate) west: u32,
    /// Counter of the eastern corridor.
    pub(crate) east: u32,
}

impl SideCounts {
    /// Read the counter of one corridor.
    pub(crate) fn get(self, side: CorridorSide) -> u32 {
        match side {
            CorridorSide::West => self.west,
            CorridorSide::East => self.east,
        }
    }

    /// Mutable access to the counter of one corridor.
    pub(crate) fn get_mut(&mut self, side: CorridorSide) -> &mut u32 {
        match side {
            CorridorSide::West => &mut self.west,
            CorridorSide::East => &mut self.east,
        }
    }

    /// Signed difference `west − east`.
    pub(crate) fn diff(self) -> i64 {
        i64::from(self.west) - i64::from(self.east)
    }

    /// Absolute difference between the two counters.
    pub(crate) fn imbalance(self) -> u32 {
        self.west.abs_diff(self.east)
    }

    /// Decay both counters by one, flooring at zero.
    pub(crate) fn decay(&mut self) {
        self.west = self.west.saturating_sub(1);
        self.east = self.east.saturating_sub(1);
    }
}

/// Coordinator of all job planning activities, built on top of the HT tracker view and the
/// static sector map.
///
/// The planner owns all cross-tick state: the recent-yard-usage and corridor-history counters,
/// the cumulative discharge allocation per yard, the path cache, and the seeded PRNG. It never
/// mutates the tracker views it observes.
#[derive(Debug)]
pub struct JobPlanner<V = HtFleetSnapshot>
where
    V: HtCoordinateView,
{
    /// Read-only view onto the HT fleet.
    pub(crate) ht_tracker: V,
    /// Static map of all quay cranes and yard blocks.
    pub(crate) sector_map: SectorMapSnapshot,
    /// Feature flags, resolved at construction.
    pub(crate) features: FeatureSet,
    /// The planner-owned PRNG. All stochastic choices of the yard GA go through this.
    pub(crate) rng: StdRng,
    /// Route builder with the optional path cache.
    pub(crate) paths: PathSynthesiser,
    /// Yard plan computed at the start of the current tick, consumed within it.
    pub(crate) latest_yard_plan: HashMap<JobSeq, String>,
    /// How often each yard was used in recent ticks. Decays by one per tick that used any yard.
    pub(crate) recent_yard_usage: BTreeMap<String, u32>,
    /// How often each corridor was recently targeted. Only maintained with the
    /// `dynamic_corridor_bias` feature.
    pub(crate) corridor_history: SideCounts,
    /// Cumulative number of discharge jobs committed to each yard. Never decays.
    pub(crate) yard_di_allocation: BTreeMap<String, u32>,
}

impl<V: HtCoordinateView> JobPlanner<V> {
    /// Create a planner over the given tracker view and sector map. Feature flags are read from
    /// the environment (see [`crate::features::FEATURES_ENV_VAR`]) and the PRNG is seeded with 0.
    pub fn new(ht_tracker: V, sector_map: SectorMapSnapshot) -> Self {
        let features = FeatureSet::from_env();
        Self {
            ht_tracker,
            sector_map,
            features,
            rng: StdRng::seed_from_u64(0),
            paths: PathSynthesiser::new(features.path_cache),
            latest_yard_plan: HashMap::new(),
            recent_yard_usage: BTreeMap::new(),
            corridor_history: SideCounts::default(),
            yard_di_allocation: BTreeMap::new(),
        }
    }

    /// Replace the feature flags. Overrides passed here win over the environment.
    pub fn with_features(mut self, features: FeatureSet) -> Self {
        self.features = features;
        self.paths = PathSynthesiser::new(features.path_cache);
        self
    }

    /// Reseed the PRNG.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// The resolved feature flags.
    pub fn features(&self) -> FeatureSet {
        self.features
    }

    /// Cumulative discharge allocation per yard.
    pub fn yard_di_allocation(&self) -> &BTreeMap<String, u32> {
        &self.yard_di_allocation
    }

    /// Returns `true` if the HT tracker has detected a deadlock.
    pub fn is_deadlock(&self) -> bool {
        self.ht_tracker.is_deadlock()
    }

    /// Names of all HTs that currently cannot move.
    pub fn non_moving_hts(&self) -> Vec<String> {
        self.ht_tracker.non_moving_hts()
    }

    /// Run one planning tick: optimise yard assignments for the plannable window, then greedily
    /// assign one idle HT per job and synthesise its instruction sequence. Returns the fully
    /// populated jobs in the order they were planned. An empty return is legal (no plannable
    /// jobs, or no idle HT).
    pub fn plan(&mut self, job_tracker: &mut JobTracker) -> Vec<Job> {
        if self.features.dynamic_corridor_bias {
            self.corridor_history.decay();
        }
        let plannable = job_tracker.get_plannable_job_sequences();
        debug!("Planning tick: {} plannable jobs", plannable.len());
        self.latest_yard_plan = self.optimize_yard_assignments(job_tracker, &plannable);

        let mut selected_hts: Vec<String> = Vec::new();
        let mut new_jobs: Vec<Job> = Vec::new();
        let mut used_yards: Vec<String> = Vec::new();

        for job_seq in &plannable {
            let Some(job) = job_tracker.get_job(job_seq) else {
                continue;
            };
            let info = job.info().clone();

            let assigned_yard = match info.job_type {
                JobType::Discharge => self.select_yard(job_seq, &info),
                JobType::Load => info.yard_name.clone(),
            };

            let yard_ref = (!assigned_yard.is_empty()).then_some(assigned_yard.as_str());
            let Some(ht_name) = self.select_ht(&info, &selected_hts, yard_ref) else {
                debug!("No idle HT remains, ending the tick after {} jobs", new_jobs.len());
                break;
            };
            selected_hts.push(ht_name.clone());

            let buffer = match self.ht_tracker.try_coordinate(&ht_name) {
                Ok(coord) => coord,
                Err(e) => {
                    warn!("Skipping job {job_seq}: {e}");
                    continue;
                }
            };
            let instructions =
                match self.build_instructions(&info, &ht_name, buffer, &assigned_yard) {
                    Ok(instructions) => instructions,
                    Err(e) => {
                        warn!("Skipping job {job_seq}: {e}");
                        continue;
                    }
                };

            let Some(job) = job_tracker.get_job_mut(job_seq) else {
                continue;
            };
            job.assign(ht_name.as_str(), assigned_yard.as_str());
            job.set_instructions(instructions);
            debug!("Assigned job {job_seq} to {ht_name} (yard {assigned_yard})");

            if info.job_type == JobType::Discharge && !assigned_yard.is_empty() {
                *self
                    .yard_di_allocation
                    .entry(assigned_yard.clone())
                    .or_default() += 1;
            }
            if !assigned_yard.is_empty() {
                used_yards.push(assigned_yard);
            }
            new_jobs.push(job.clone());
        }

        if !used_yards.is_empty() {
            self.apply_yard_usage_decay();
            for yard in &used_yards {
                *self.recent_yard_usage.entry(yard.clone()).or_default() += 1;
            }
            if self.features.dynamic_corridor_bias {
                for yard in &used_yards {
                    *self.corridor_history.get_mut(CorridorSide::of_yard(yard)) += 1;
                }
            }
        }

        info!("Planned {} of {} plannable jobs", new_jobs.len(), plannable.len());
        new_jobs
    }

    /// Assemble the eight instructions of a job. Discharge jobs visit the quay crane first, load
    /// jobs the yard block.
    fn build_instructions(
        &mut self,
        info: &JobInfo,
        ht_name: &str,
        buffer: Coordinate,
        assigned_yard: &str,
    ) -> Result<Vec<JobInstruction>, TerminalError> {
        let to_qc = self
            .paths
            .buffer_to_qc(&self.sector_map, buffer, &info.qc_name)?;
        let from_qc = self
            .paths
            .qc_to_buffer(&self.sector_map, &info.qc_name, buffer)?;
        let to_yard = self
            .paths
            .buffer_to_yard(&self.sector_map, buffer, assigned_yard)?;
        let from_yard = self
            .paths
            .yard_to_buffer(&self.sector_map, assigned_yard, buffer)?;

        let drive = |path: Vec<Coordinate>| JobInstruction::Drive {
            ht_name: ht_name.to_string(),
            path,
        };
        let work_qc = JobInstruction::WorkQc {
            ht_name: ht_name.to_string(),
            qc_name: info.qc_name.clone(),
        };
        let work_yard = JobInstruction::WorkYard {
            ht_name: ht_name.to_string(),
            yard_name: assigned_yard.to_string(),
        };

        Ok(match info.job_type {
            JobType::Discharge => vec![
                JobInstruction::BookQc,
                drive(to_qc),
                work_qc,
                drive(from_qc),
                JobInstruction::BookYard,
                drive(to_yard),
                work_yard,
                drive(from_yard),
            ],
            JobType::Load => vec![
                JobInstruction::BookYard,
                drive(to_yard),
                work_yard,
                drive(from_yard),
                JobInstruction::BookQc,
                drive(to_qc),
                work_qc,
                drive(from_qc),
            ],
        })
    }

    /// Decay the recent-usage counter of every yard by one, dropping entries that reach zero.
    fn apply_yard_usage_decay(&mut self) {
        self.recent_yard_usage.retain(|_, count| {
            *count -= 1;
            *count > 0
        });
    }
}
