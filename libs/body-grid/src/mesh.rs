//! # Mesh Model
//!
//! One named vertex/face group extracted from the input mesh. Groups are
//! read-only once built: the engine never mutates them.

use crate::error::{BodyGridError, BodyGridResult};
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Part type resolved by the caller before the group reaches the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupKind {
    /// Fuselage, cowling, fairing, ... handled by the body grid engine.
    Body,
    /// Planar lifting surface, handled elsewhere.
    Wing,
}

/// A named triangle group with vertices in meters.
///
/// Axis convention: `x` lateral, `y` vertical, `z` longitudinal (nose at
/// the minimum `z`).
///
/// # Example
///
/// ```rust
/// use body_grid::{Group, GroupKind};
/// use glam::DVec3;
///
/// let group = Group::body(
///     "fuselage",
///     vec![DVec3::ZERO, DVec3::new(0.5, 0.0, 1.0), DVec3::new(0.0, 0.0, 2.0)],
///     vec![[0, 1, 2]],
/// );
/// assert_eq!(group.kind(), GroupKind::Body);
/// assert_eq!(group.vertex_count(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    name: String,
    kind: GroupKind,
    /// Vertex positions (meters)
    vertices: Vec<DVec3>,
    /// Triangle indices into `vertices`
    faces: Vec<[u32; 3]>,
}

impl Group {
    /// Creates a group of any kind.
    pub fn new(
        name: impl Into<String>,
        kind: GroupKind,
        vertices: Vec<DVec3>,
        faces: Vec<[u32; 3]>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            vertices,
            faces,
        }
    }

    /// Creates a body group.
    pub fn body(name: impl Into<String>, vertices: Vec<DVec3>, faces: Vec<[u32; 3]>) -> Self {
        Self::new(name, GroupKind::Body, vertices, faces)
    }

    /// Creates a body group without faces.
    pub fn point_cloud(name: impl Into<String>, vertices: Vec<DVec3>) -> Self {
        Self::new(name, GroupKind::Body, vertices, Vec::new())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    #[inline]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Checks that the group can be reconstructed as a body.
    ///
    /// Checks:
    /// - The group is tagged [`GroupKind::Body`]
    /// - At least two vertices (tip and tail)
    /// - Every coordinate is finite
    /// - Every face index is in range
    pub fn validate(&self) -> BodyGridResult<()> {
        if self.kind != GroupKind::Body {
            return Err(BodyGridError::NotABody {
                group: self.name.clone(),
                kind: self.kind,
            });
        }

        match self.vertices.len() {
            0 => {
                return Err(BodyGridError::EmptyGroup {
                    group: self.name.clone(),
                })
            }
            1 => {
                return Err(BodyGridError::TooFewVertices {
                    group: self.name.clone(),
                    count: 1,
                })
            }
            _ => {}
        }

        if let Some(index) = self.vertices.iter().position(|v| !v.is_finite()) {
            return Err(BodyGridError::NonFiniteVertex {
                group: self.name.clone(),
                index,
            });
        }

        let vertex_count = self.vertices.len();
        for (face, tri) in self.faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(BodyGridError::FaceIndexOutOfRange {
                    group: self.name.clone(),
                    face,
                    index,
                    vertex_count,
                });
            }
        }

        Ok(())
    }
}
