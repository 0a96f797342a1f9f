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

//! Drive the planner tick by tick over the standard terminal and print one JSON stats line per
//! tick. The fleet is assumed to turn over between ticks (every HT finishes its job within one
//! planning interval), so the runner exercises the planner alone, not the full simulation.

use std::collections::BTreeMap;

use clap::Parser;
use serde::Serialize;

use corridor_planner::{FeatureSet, JobPlanner};
use terminalsim::job::{JobInfo, JobTracker, JobType};
use terminalsim::topology::{standard_fleet, standard_sector_map};

/// Command-line arguments of the simulation runner.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run the corridor planner over a synthetic job stream")]
struct Args {
    /// Number of planning ticks to run.
    #[arg(long, default_value_t = 20)]
    ticks: u32,

    /// Number of HTs in the fleet.
    #[arg(long, default_value_t = 8)]
    hts: usize,

    /// Number of new jobs entering the tracker before each tick.
    #[arg(long, default_value_t = 10)]
    jobs_per_tick: usize,

    /// Feature tokens applied on top of the `JOB_PLANNER_FEATURES` environment variable, e.g.
    /// `dynamic_corridor_bias,path_cache`.
    #[arg(long)]
    features: Option<String>,

    /// Seed of the planner's PRNG.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// One line of the JSON stats stream.
#[derive(Debug, Serialize)]
struct TickStats {
    /// Index of the planning tick, starting at 1.
    tick: u32,
    /// Jobs planned in this tick.
    planned: usize,
    /// Discharge jobs planned in this tick.
    discharge: usize,
    /// Load jobs planned in this tick.
    load: usize,
    /// Jobs assigned since the start of the run.
    total_assigned: usize,
    /// Cumulative discharge allocation per yard.
    di_allocation: BTreeMap<String, u32>,
}

/// Generate the synthetic jobs entering the tracker before tick `tick`: alternating discharge
/// and load jobs spread round-robin over the standard cranes and yard blocks. Discharge jobs get
/// the two following yard blocks as alternates.
fn synthetic_jobs(tick: u32, count: usize) -> Vec<JobInfo> {
    let yards = ["YD_A", "YD_B", "YD_C", "YD_D", "YD_E", "YD_F", "YD_G", "YD_H"];
    (0..count)
        .map(|k| {
            let n = tick as usize * count + k;
            let job_type = if k % 2 == 0 {
                JobType::Discharge
            } else {
                JobType::Load
            };
            let yard = n % yards.len();
            let alt_yard_names = if job_type == JobType::Discharge {
                vec![
                    yards[(yard + 1) % yards.len()].to_string(),
                    yards[(yard + 2) % yards.len()].to_string(),
                ]
            } else {
                Vec::new()
            };
            JobInfo {
                job_seq: format!("t{tick}-j{k}"),
                job_type,
                qc_name: format!("QC{:02}", n % 7 + 1),
                yard_name: yards[yard].to_string(),
                alt_yard_names,
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();

    let mut features = FeatureSet::from_env();
    if let Some(tokens) = &args.features {
        features = features.with_tokens(tokens);
    }

    let mut planner = JobPlanner::new(standard_fleet(args.hts), standard_sector_map())
        .with_features(features)
        .with_seed(args.seed);
    let mut tracker = JobTracker::new();

    for tick in 1..=args.ticks {
        for info in synthetic_jobs(tick, args.jobs_per_tick) {
            tracker.insert(info);
        }

        let planned = planner.plan(&mut tracker);
        let discharge = planned
            .iter()
            .filter(|job| job.info().job_type == JobType::Discharge)
            .count();

        let stats = TickStats {
            tick,
            planned: planned.len(),
            discharge,
            load: planned.len() - discharge,
            total_assigned: tracker.assigned_count(),
            di_allocation: planner.yard_di_allocation().clone(),
        };
        println!("{}", serde_json::to_string(&stats)?);
    }

    Ok(())
}
