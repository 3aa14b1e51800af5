//! # Body Grid Errors
//!
//! Fatal, per-group failures of the reconstruction engine. Recoverable
//! conditions (truncation, fallback segmentation, degenerate rings) are
//! reported as [`crate::Diagnostic`]s instead.

use crate::mesh::GroupKind;
use thiserror::Error;

/// Errors that abort reconstruction of a single group.
///
/// Other groups are unaffected; see [`crate::build_body_grids`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BodyGridError {
    /// The group carries no vertices at all
    #[error("Group '{group}' has no vertices")]
    EmptyGroup { group: String },

    /// A tip and a tail need two distinct vertices
    #[error("Group '{group}' has {count} vertex, at least 2 are needed for a tip and a tail")]
    TooFewVertices { group: String, count: usize },

    /// A face points past the end of the vertex list
    #[error("Group '{group}': face {face} references vertex {index} but only {vertex_count} exist")]
    FaceIndexOutOfRange {
        group: String,
        face: usize,
        index: u32,
        vertex_count: usize,
    },

    /// NaN or infinite coordinate
    #[error("Group '{group}': vertex {index} has a non-finite coordinate")]
    NonFiniteVertex { group: String, index: usize },

    /// The caller routed a non-body group into the body engine
    #[error("Group '{group}' is classified as {kind:?}, not a body")]
    NotABody { group: String, kind: GroupKind },
}

impl BodyGridError {
    /// Name of the group that failed.
    pub fn group(&self) -> &str {
        match self {
            Self::EmptyGroup { group }
            | Self::TooFewVertices { group, .. }
            | Self::FaceIndexOutOfRange { group, .. }
            | Self::NonFiniteVertex { group, .. }
            | Self::NotABody { group, .. } => group,
        }
    }
}

/// Result type alias for engine operations.
pub type BodyGridResult<T> = Result<T, BodyGridError>;
