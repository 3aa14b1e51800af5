//! # Engine
//!
//! Per-group pipeline:
//!
//! ```text
//! Group (m) -> feet, recentered -> AdjacencyGraph -> stations -> rings
//!           -> BodyMetadata -> StorageGrid
//! ```
//!
//! Each group is a pure function of its input and the [`EngineConfig`];
//! [`build_body_grids`] runs groups in parallel with `rayon`.

use crate::adjacency::AdjacencyGraph;
use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::error::BodyGridResult;
use crate::metadata::{lateral_center, recenter_lateral, BodyMetadata};
use crate::mesh::Group;
use crate::rings::{build_ring, BuiltRing};
use crate::stations::{segment, SegmentationMethod};
use crate::storage::StorageGrid;
use config::constants::{EngineConfig, FT_PER_M};
use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Reconstructed body grid for one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyGrid {
    pub name: String,
    pub method: SegmentationMethod,
    /// `capacity.stations() x capacity.slots()` points in feet.
    pub grid: StorageGrid,
    pub metadata: BodyMetadata,
    pub diagnostics: Vec<Diagnostic>,
}

impl BodyGrid {
    /// True if any diagnostic is a warning.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_warning)
    }
}

/// Result of one group in a batch.
#[derive(Debug, Clone)]
pub struct GroupOutcome {
    pub name: String,
    pub result: BodyGridResult<BodyGrid>,
}

/// Reconstructs the body grid of a single group.
///
/// # Errors
///
/// Returns [`crate::BodyGridError`] when the group is not a body, has fewer
/// than two vertices, holds a non-finite coordinate or a face index out of
/// range.
///
/// # Example
///
/// ```rust
/// use body_grid::{build_body_grid, Group};
/// use config::constants::EngineConfig;
/// use glam::DVec3;
///
/// let group = Group::point_cloud(
///     "pod",
///     vec![DVec3::new(0.0, 0.0, 0.0), DVec3::new(0.0, 0.0, 1.0)],
/// );
/// let body = build_body_grid(&group, &EngineConfig::default()).unwrap();
/// assert_eq!(body.metadata.station_count, 2);
/// assert_eq!(body.grid.station_count(), 20);
/// ```
pub fn build_body_grid(group: &Group, config: &EngineConfig) -> BodyGridResult<BodyGrid> {
    let adjacency = AdjacencyGraph::build(group)?;

    info!(
        group = group.name(),
        vertices = group.vertex_count(),
        faces = group.face_count(),
        "Building body grid"
    );

    let mut points: Vec<DVec3> = group.vertices().iter().map(|v| *v * FT_PER_M).collect();
    let lateral_offset_ft = lateral_center(&points);
    recenter_lateral(&mut points, lateral_offset_ft);

    let mut diagnostics = Diagnostics::new(group.name());
    let segmentation = segment(&points, adjacency.as_ref(), config, &mut diagnostics);

    let rings: Vec<BuiltRing> = segmentation
        .stations
        .iter()
        .map(|station| build_ring(station, &points, config, &mut diagnostics))
        .collect();

    let metadata = BodyMetadata::compute(lateral_offset_ft, &rings, segmentation.discovered, config);

    debug!(
        group = group.name(),
        stations = metadata.station_count,
        half_ring_max = metadata.half_ring_max,
        radius_ft = metadata.radius_ft,
        "Body grid built"
    );

    Ok(BodyGrid {
        name: group.name().to_string(),
        method: segmentation.method,
        grid: StorageGrid::new(rings.into_iter().map(|r| r.points).collect()),
        metadata,
        diagnostics: diagnostics.into_vec(),
    })
}

/// Reconstructs every group in parallel.
///
/// A failing group never affects the others; outcomes keep input order.
pub fn build_body_grids(groups: &[Group], config: &EngineConfig) -> Vec<GroupOutcome> {
    groups
        .par_iter()
        .map(|group| GroupOutcome {
            name: group.name().to_string(),
            result: build_body_grid(group, config),
        })
        .collect()
}
