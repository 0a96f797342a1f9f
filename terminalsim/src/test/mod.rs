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

//! Test module for the substrate types.

use crate::job::{JobInfo, JobType};


/// Build a job description with the given sequence, preferred yard, and alternates.
fn job_info(seq: &str, job_type: JobType, qc: &str, yard: &str, alts: &[&str]) -> JobInfo {
    JobInfo {
        job_seq: seq.to_string(),
        job_type,
        qc_name: qc.to_string(),
        yard_name: yard.to_string(),
        alt_yard_names: alts.iter().map(|s| s.to_string()).collect(),
    }
}
