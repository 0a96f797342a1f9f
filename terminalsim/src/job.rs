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

//! Jobs, their instruction sequences, and the tracker that releases them for planning.

use std::collections::HashMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::constants::PLANNABLE_WINDOW;
use crate::grid::Coordinate;
use crate::types::JobSeq;

/// Direction of a container move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    /// Discharge: the container flows vessel → quay crane → yard.
    Discharge,
    /// Load: the container flows yard → quay crane → vessel.
    Load,
}

impl std::fmt::Display for JobType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discharge => f.write_str("DI"),
            Self::Load => f.write_str("LO"),
        }
    }
}

/// Immutable description of a job, as released by the job tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInfo {
    /// Stable unique identifier of the job.
    pub job_seq: JobSeq,
    /// Whether the container is discharged or loaded.
    pub job_type: JobType,
    /// Quay crane serving the vessel side of the move.
    pub qc_name: String,
    /// Preferred yard block.
    pub yard_name: String,
    /// Alternate yard blocks, in decreasing order of preference. May be empty.
    pub alt_yard_names: Vec<String>,
}

/// A single low-level instruction executed by a downstream actor of the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobInstruction {
    /// Reserve the quay-crane resource of the job.
    BookQc,
    /// Reserve the yard resource of the job.
    BookYard,
    /// Drive the HT along `path`. The first cell is the HT's current position, the last is the
    /// destination, and consecutive cells are orthogonally adjacent.
    Drive {
        /// The HT that executes the drive.
        ht_name: String,
        /// The route to follow, cell by cell.
        path: Vec<Coordinate>,
    },
    /// Exchange the container with the quay crane.
    WorkQc {
        /// The HT being served.
        ht_name: String,
        /// The serving quay crane.
        qc_name: String,
    },
    /// Exchange the container with the yard block.
    WorkYard {
        /// The HT being served.
        ht_name: String,
        /// The serving yard block.
        yard_name: String,
    },
}

impl JobInstruction {
    /// The driven route, if this is a [`JobInstruction::Drive`].
    pub fn path(&self) -> Option<&[Coordinate]> {
        match self {
            Self::Drive { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl std::fmt::Display for JobInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BookQc => f.write_str("BOOK_QC"),
            Self::BookYard => f.write_str("BOOK_YARD"),
            Self::Drive { ht_name, path } => {
                write!(f, "DRIVE[{}: {}]", ht_name, path.iter().join(" -> "))
            }
            Self::WorkQc { ht_name, qc_name } => write!(f, "WORK_QC[{} @ {}]", ht_name, qc_name),
            Self::WorkYard { ht_name, yard_name } => {
                write!(f, "WORK_YARD[{} @ {}]", ht_name, yard_name)
            }
        }
    }
}

/// A job together with the mutable fields filled in by the planner. A job is created by the
/// tracker, assigned at most once, and then consumed by the simulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// The immutable job description.
    info: JobInfo,
    /// HT chosen by the planner.
    assigned_ht: Option<String>,
    /// Yard chosen by the planner.
    assigned_yard: Option<String>,
    /// Instruction sequence produced by the planner.
    instructions: Vec<JobInstruction>,
}

impl Job {
    /// Create a fresh, unassigned job.
    pub fn new(info: JobInfo) -> Self {
        Self {
            info,
            assigned_ht: None,
            assigned_yard: None,
            instructions: Vec::new(),
        }
    }

    /// The immutable job description.
    pub fn info(&self) -> &JobInfo {
        &self.info
    }

    /// The job's stable identifier.
    pub fn job_seq(&self) -> &JobSeq {
        &self.info.job_seq
    }

    /// Record the HT and yard chosen by the planner.
    pub fn assign(&mut self, ht_name: impl Into<String>, yard_name: impl Into<String>) {
        self.assigned_ht = Some(ht_name.into());
        self.assigned_yard = Some(yard_name.into());
    }

    /// Store the instruction sequence produced by the planner.
    pub fn set_instructions(&mut self, instructions: Vec<JobInstruction>) {
        self.instructions = instructions;
    }

    /// HT assigned to the job, if any.
    pub fn assigned_ht(&self) -> Option<&str> {
        self.assigned_ht.as_deref()
    }

    /// Yard assigned to the job, if any.
    pub fn assigned_yard(&self) -> Option<&str> {
        self.assigned_yard.as_deref()
    }

    /// The planned instruction sequence. Empty until the planner has processed the job.
    pub fn instructions(&self) -> &[JobInstruction] {
        &self.instructions
    }

    /// Returns `true` once the planner has assigned the job.
    pub fn is_assigned(&self) -> bool {
        self.assigned_ht.is_some()
    }
}

/// Owner of all jobs of a run. The tracker releases a bounded, insertion-ordered window of
/// unassigned jobs for each planning tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobTracker {
    /// All jobs, in insertion order.
    jobs: Vec<Job>,
    /// Index from job sequence to position in `jobs`.
    index: HashMap<JobSeq, usize>,
}

impl JobTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new job. A job with an already known sequence is ignored.
    pub fn insert(&mut self, info: JobInfo) {
        if self.index.contains_key(&info.job_seq) {
            log::warn!("Ignoring duplicate job sequence: {}", info.job_seq);
            return;
        }
        self.index.insert(info.job_seq.clone(), self.jobs.len());
        self.jobs.push(Job::new(info));
    }

    /// The plannable window: sequences of unassigned jobs in insertion order, capped at
    /// [`PLANNABLE_WINDOW`] entries.
    pub fn get_plannable_job_sequences(&self) -> Vec<JobSeq> {
        self.jobs
            .iter()
            .filter(|job| !job.is_assigned())
            .take(PLANNABLE_WINDOW)
            .map(|job| job.job_seq().clone())
            .collect()
    }

    /// Look up a job by sequence.
    pub fn get_job(&self, job_seq: &str) -> Option<&Job> {
        let idx = self.index.get(job_seq).copied()?;
        self.jobs.get(idx)
    }

    /// Look up a job by sequence, mutably.
    pub fn get_job_mut(&mut self, job_seq: &str) -> Option<&mut Job> {
        let idx = self.index.get(job_seq).copied()?;
        self.jobs.get_mut(idx)
    }

    /// Total number of jobs ever inserted.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Returns `true` if no job was ever inserted.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of jobs that have been assigned by the planner.
    pub fn assigned_count(&self) -> usize {
        self.jobs.iter().filter(|job| job.is_assigned()).count()
    }
}
