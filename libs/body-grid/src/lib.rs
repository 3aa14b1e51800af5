//! # Body Grid
//!
//! Reconstructs Plane-Maker body grids from triangle meshes.
//!
//! ## Architecture
//!
//! ```text
//! Group -> adjacency -> stations -> rings -> metadata -> storage order
//! ```
//!
//! - **Stations**: BFS layers from the nose vertex, coordinate sort when the
//!   topology is missing or ambiguous
//! - **Rings**: positive half-ring in loop order, padded and mirrored to a
//!   fixed slot count
//! - **Storage**: Plane-Maker's `0, 1, 10.., 2..9` index order
//!
//! Input is in meters (`x` lateral, `y` vertical, `z` longitudinal), output
//! in feet. Grid capacity comes from [`config::constants::EngineConfig`].
//!
//! ## Usage
//!
//! ```rust,ignore
//! use body_grid::{build_body_grid, Group};
//! use config::constants::EngineConfig;
//!
//! let body = build_body_grid(&group, &EngineConfig::default())?;
//! for cell in body.grid.cells() {
//!     println!("{},{} {:?}", cell.station, cell.slot, cell.point);
//! }
//! ```

pub mod adjacency;
pub mod diagnostic;
pub mod engine;
pub mod error;
pub mod mesh;
pub mod metadata;
pub mod rings;
pub mod stations;
pub mod storage;

#[cfg(test)]
mod testing;

pub use adjacency::AdjacencyGraph;
pub use diagnostic::{Diagnostic, DiagnosticCode, Diagnostics, Severity};
pub use engine::{build_body_grid, build_body_grids, BodyGrid, GroupOutcome};
pub use error::{BodyGridError, BodyGridResult};
pub use mesh::{Group, GroupKind};
pub use metadata::BodyMetadata;
pub use rings::BuiltRing;
pub use stations::{Segmentation, SegmentationMethod, Station, StationKind};
pub use storage::{storage_order, StorageCell, StorageGrid, StorageOrder};
