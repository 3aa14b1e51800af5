//! # Station Segmenter
//!
//! Partitions a group's vertices into stations ordered from the nose
//! (minimum `z`) to the tail.
//!
//! ## Algorithm Overview
//!
//! 1. Topology: BFS from the nose vertex, one station per depth layer,
//!    members ordered along the station's own edge loop
//! 2. Fallback: sort by `z`, singleton tip and tail, the rest chunked into
//!    loops of `verts_per_loop` (configured, else the most common BFS layer
//!    size, else the default)
//! 3. Fit to the grid capacity: truncate (warning) or pad with empty
//!    stations (info)
//!
//! Points handed to the segmenter are already in feet and laterally
//! recentered.

mod fallback;
mod topology;

#[cfg(test)]
mod tests;

pub use fallback::coordinate_stations;
pub use topology::{extremity, infer_loop_size, topology_stations, AxisEnd};

use crate::adjacency::AdjacencyGraph;
use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use config::constants::EngineConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of a station in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StationKind {
    Tip,
    Mid,
    Tail,
    /// Padding beyond the discovered stations
    Empty,
}

/// One cross-section: its grid index, role and member vertex indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub index: usize,
    pub kind: StationKind,
    pub members: Vec<u32>,
}

impl Station {
    /// True for tip and tail stations, which collapse to a single point.
    #[inline]
    pub fn is_pole(&self) -> bool {
        matches!(self.kind, StationKind::Tip | StationKind::Tail)
    }
}

/// How the stations were discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SegmentationMethod {
    Topology,
    CoordinateSort,
}

/// Stations fitted to the grid capacity.
#[derive(Debug, Clone, PartialEq)]
pub struct Segmentation {
    /// Exactly `capacity.stations()` entries.
    pub stations: Vec<Station>,
    /// Station count before truncation or padding.
    pub discovered: usize,
    pub method: SegmentationMethod,
}

/// Segments `points` into exactly `config.capacity.stations()` stations.
///
/// `adjacency` is `None` for point clouds. `points` must hold at least two
/// vertices.
pub fn segment(
    points: &[DVec3],
    adjacency: Option<&AdjacencyGraph>,
    config: &EngineConfig,
    diagnostics: &mut Diagnostics,
) -> Segmentation {
    let (raw, method) = match adjacency {
        Some(graph) => {
            match topology_stations(points, graph, config.centerline_epsilon_ft, diagnostics) {
                Some(raw) => (raw, SegmentationMethod::Topology),
                None => {
                    let verts_per_loop = match config.verts_per_loop {
                        Some(configured) => configured,
                        None => infer_loop_size(points, graph).unwrap_or_else(|| config.verts_per_loop()),
                    };
                    diagnostics.push(Diagnostic::warning(
                        DiagnosticCode::AmbiguousTopology,
                        format!(
                            "no unique nose/tail extremity, segmenting by longitudinal coordinate in loops of {verts_per_loop}"
                        ),
                    ));
                    (
                        coordinate_stations(points, verts_per_loop),
                        SegmentationMethod::CoordinateSort,
                    )
                }
            }
        }
        None => {
            diagnostics.push(Diagnostic::info(
                DiagnosticCode::NoAdjacency,
                "group has no faces, segmenting by longitudinal coordinate".to_string(),
            ));
            (
                coordinate_stations(points, config.verts_per_loop()),
                SegmentationMethod::CoordinateSort,
            )
        }
    };

    debug!(method = ?method, stations = raw.len(), "Discovered stations");

    fit_to_capacity(raw, method, config.capacity.stations(), diagnostics)
}

/// Truncates or pads discovered stations to `capacity` and assigns kinds.
///
/// The last retained station is always the tail, including after
/// truncation.
fn fit_to_capacity(
    mut raw: Vec<Vec<u32>>,
    method: SegmentationMethod,
    capacity: usize,
    diagnostics: &mut Diagnostics,
) -> Segmentation {
    let discovered = raw.len();

    if discovered > capacity {
        let dropped: Vec<usize> = (capacity..discovered).collect();
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::Truncated,
            format!(
                "{discovered} stations exceed the grid capacity of {capacity}, dropped stations {dropped:?}"
            ),
        ));
        raw.truncate(capacity);
    }

    let last = raw.len().saturating_sub(1);
    let mut stations: Vec<Station> = raw
        .into_iter()
        .enumerate()
        .map(|(index, members)| {
            let kind = if index == 0 {
                StationKind::Tip
            } else if index == last {
                StationKind::Tail
            } else {
                StationKind::Mid
            };
            Station {
                index,
                kind,
                members,
            }
        })
        .collect();

    if discovered < capacity {
        diagnostics.push(Diagnostic::info(
            DiagnosticCode::Padded,
            format!("{discovered} stations discovered, stations {discovered}..{capacity} left empty"),
        ));
        stations.extend((discovered..capacity).map(|index| Station {
            index,
            kind: StationKind::Empty,
            members: Vec::new(),
        }));
    }

    Segmentation {
        stations,
        discovered,
        method,
    }
}
