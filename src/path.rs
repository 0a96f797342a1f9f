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

//! Deterministic route construction over the fixed lane topology of the terminal.
//!
//! All traffic follows a one-way circuit: westbound on the highway-left lane (`y = 7`) towards
//! the quay, eastbound on the QC travel lane (`y = 4`) below the cranes, eastbound on the QC
//! lane (`y = 5`) towards the eastern boundary, westbound on the highway lane (`y = 11`), and
//! eastbound on the yard lane (`y = 12`) below the yard blocks. The four route kinds connect an
//! HT's buffer cell with the entry and exit cells of its quay crane and yard block.
//!
//! Synthesised paths are geometric only; they do not reserve cells in time. With the
//! `path_cache` feature enabled, built routes are memoised by route kind, endpoint name, and
//! buffer cell; a cache hit materialises a fresh coordinate list, never an aliased one.

use std::collections::HashMap;

use terminalsim::constants::{
    GRID_MAX_X, GRID_MIN_X, HIGHWAY_LANE_Y, HIGHWAY_LEFT_LANE_Y, QC_LANE_Y, QC_TRAVEL_LANE_Y,
    YARD_LANE_Y,
};
use terminalsim::grid::Coordinate;
use terminalsim::sector::SectorMapSnapshot;
use terminalsim::types::TerminalError;

/// The four directed route kinds of the circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum RouteKind {
    /// From an HT buffer cell to a quay-crane entry.
    BufferToQc,
    /// From an HT buffer cell to a yard-block entry.
    BufferToYard,
    /// From a yard-block exit back to an HT buffer cell.
    YardToBuffer,
    /// From a quay-crane exit back to an HT buffer cell.
    QcToBuffer,
}

/// Memoisation key: route kind, endpoint name, and the buffer cell. These are all quantities the
/// builders consume.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct RouteKey {
    /// Which builder produced the path.
    kind: RouteKind,
    /// Name of the quay crane or yard block at the non-buffer end.
    sector: String,
    /// The HT's buffer cell.
    buffer: Coordinate,
}

/// Builder of deterministic driving routes, with optional memoisation.
#[derive(Debug, Clone, Default)]
pub struct PathSynthesiser {
    /// Whether built routes are memoised.
    cache_enabled: bool,
    /// Memoised routes. Stays empty while `cache_enabled` is off.
    cache: HashMap<RouteKey, Vec<Coordinate>>,
}

impl PathSynthesiser {
    /// Create a new synthesiser. `cache_enabled` controls memoisation.
    pub fn new(cache_enabled: bool) -> Self {
        Self {
            cache_enabled,
            cache: HashMap::new(),
        }
    }

    /// Number of memoised routes.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Route from a buffer cell to the entry of the named quay crane: westbound along the
    /// highway-left lane to the western boundary, north to the QC travel lane, then eastbound to
    /// the crane entry.
    pub fn buffer_to_qc(
        &mut self,
        map: &SectorMapSnapshot,
        buffer: Coordinate,
        qc_name: &str,
    ) -> Result<Vec<Coordinate>, TerminalError> {
        let key = RouteKey {
            kind: RouteKind::BufferToQc,
            sector: qc_name.to_string(),
            buffer,
        };
        self.build_with_cache(key, || {
            let qc_in = map
                .qc_sector(qc_name)
                .ok_or_else(|| TerminalError::UnknownQc(qc_name.to_string()))?
                .in_coord;
            let mut path = vec![Coordinate::new(buffer.x, HIGHWAY_LEFT_LANE_Y)];
            path.extend(
                (GRID_MIN_X..buffer.x)
                    .rev()
                    .map(|x| Coordinate::new(x, HIGHWAY_LEFT_LANE_Y)),
            );
            path.extend(
                (QC_TRAVEL_LANE_Y..HIGHWAY_LEFT_LANE_Y)
                    .rev()
                    .map(|y| Coordinate::new(GRID_MIN_X, y)),
            );
            path.extend(
                (GRID_MIN_X + 1..=qc_in.x).map(|x| Coordinate::new(x, QC_TRAVEL_LANE_Y)),
            );
            path.push(qc_in);
            Ok(path)
        })
    }

    /// Route from a buffer cell to the entry of the named yard block: north onto the QC lane,
    /// eastbound to the eastern boundary, south to the highway lane, westbound to the western
    /// boundary, then eastbound along the yard lane to the block entry.
    pub fn buffer_to_yard(
        &mut self,
        map: &SectorMapSnapshot,
        buffer: Coordinate,
        yard_name: &str,
    ) -> Result<Vec<Coordinate>, TerminalError> {
        let key = RouteKey {
            kind: RouteKind::BufferToYard,
            sector: yard_name.to_string(),
            buffer,
        };
        self.build_with_cache(key, || {
            let yard_in = map
                .yard_sector(yard_name)
                .ok_or_else(|| TerminalError::UnknownYard(yard_name.to_string()))?
                .in_coord;
            let mut path = vec![Coordinate::new(buffer.x, buffer.y - 1)];
            // climb the remaining rows at the buffer's x before turning east
            path.extend(
                (QC_LANE_Y..buffer.y - 1)
                    .rev()
                    .map(|y| Coordinate::new(buffer.x, y)),
            );
            path.extend((buffer.x + 1..=GRID_MAX_X).map(|x| Coordinate::new(x, QC_LANE_Y)));
            path.extend(
                (QC_LANE_Y + 1..=HIGHWAY_LANE_Y).map(|y| Coordinate::new(GRID_MAX_X, y)),
            );
            path.extend(
                (GRID_MIN_X..GRID_MAX_X)
                    .rev()
                    .map(|x| Coordinate::new(x, HIGHWAY_LANE_Y)),
            );
            path.push(Coordinate::new(GRID_MIN_X, YARD_LANE_Y));
            path.extend((GRID_MIN_X + 1..=yard_in.x).map(|x| Coordinate::new(x, YARD_LANE_Y)));
            path.push(yard_in);
            Ok(path)
        })
    }

    /// Route from the exit of the named yard block back to a buffer cell: eastbound along the
    /// yard lane, north to the highway-left lane, then westbound to the buffer.
    pub fn yard_to_buffer(
        &mut self,
        map: &SectorMapSnapshot,
        yard_name: &str,
        buffer: Coordinate,
    ) -> Result<Vec<Coordinate>, TerminalError> {
        let key = RouteKey {
            kind: RouteKind::YardToBuffer,
            sector: yard_name.to_string(),
            buffer,
        };
        self.build_with_cache(key, || {
            let yard_out = map
                .yard_sector(yard_name)
                .ok_or_else(|| TerminalError::UnknownYard(yard_name.to_string()))?
                .out_coord;
            let mut path = vec![yard_out];
            path.extend((yard_out.x..GRID_MAX_X).map(|x| Coordinate::new(x, YARD_LANE_Y)));
            path.extend(
                (HIGHWAY_LEFT_LANE_Y..=HIGHWAY_LANE_Y)
                    .rev()
                    .map(|y| Coordinate::new(GRID_MAX_X - 1, y)),
            );
            path.extend(
                (buffer.x + 1..GRID_MAX_X - 1)
                    .rev()
                    .map(|x| Coordinate::new(x, HIGHWAY_LEFT_LANE_Y)),
            );
            path.push(buffer);
            Ok(path)
        })
    }

    /// Route from the exit of the named quay crane back to a buffer cell: south onto the QC
    /// travel lane, eastbound to the eastern boundary, south to the highway-left lane, then
    /// westbound to the buffer.
    pub fn qc_to_buffer(
        &mut self,
        map: &SectorMapSnapshot,
        qc_name: &str,
        buffer: Coordinate,
    ) -> Result<Vec<Coordinate>, TerminalError> {
        let key = RouteKey {
            kind: RouteKind::QcToBuffer,
            sector: qc_name.to_string(),
            buffer,
        };
        self.build_with_cache(key, || {
            let qc_out = map
                .qc_sector(qc_name)
                .ok_or_else(|| TerminalError::UnknownQc(qc_name.to_string()))?
                .out_coord;
            let mut path = vec![qc_out, Coordinate::new(qc_out.x, QC_TRAVEL_LANE_Y)];
            path.extend(
                (qc_out.x + 1..=GRID_MAX_X).map(|x| Coordinate::new(x, QC_TRAVEL_LANE_Y)),
            );
            path.extend(
                (QC_LANE_Y..=HIGHWAY_LEFT_LANE_Y).map(|y| Coordinate::new(GRID_MAX_X, y)),
            );
            path.extend(
                (buffer.x + 1..GRID_MAX_X)
                    .rev()
                    .map(|x| Coordinate::new(x, HIGHWAY_LEFT_LANE_Y)),
            );
            path.push(buffer);
            Ok(path)
        })
    }

    /// Run `build`, memoising its result when the cache is enabled. Cache hits return a fresh
    /// list; failures are never cached.
    fn build_with_cache(
        &mut self,
        key: RouteKey,
        build: impl FnOnce() -> Result<Vec<Coordinate>, TerminalError>,
    ) -> Result<Vec<Coordinate>, TerminalError> {
        if !self.cache_enabled {
            return build();
        }
        if let Some(path) = self.cache.get(&key) {
            return Ok(path.clone());
        }
        let path = build()?;
        self.cache.insert(key, path.clone());
        Ok(path)
    }
}
