//! # Rebuild Pipeline
//!
//! ```text
//! load OBJ -> resolve assignments -> read capacities -> engine (parallel)
//!          -> all bodies ok? -> render blocks -> replace -> staged write
//! ```
//!
//! Nothing is written unless every assigned body was reconstructed.

use crate::block::{body_block_lines, fill_template};
use crate::capacity::read_grid_capacity;
use crate::error::{AcfError, AcfResult};
use crate::obj::load_obj;
use crate::rewrite::{read_lines, replace_body_lines, write_lines_atomic};
use body_grid::{build_body_grid, BodyGrid, Group};
use config::constants::EngineConfig;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{info, warn};

/// One OBJ group mapped to a body slot of the `.acf` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyAssignment {
    /// OBJ group name
    pub mesh: String,
    pub body_index: usize,
    /// Written as the body's `_descrip`
    pub description: String,
}

impl BodyAssignment {
    pub fn new(mesh: impl Into<String>, body_index: usize, description: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            body_index,
            description: description.into(),
        }
    }
}

/// Inputs of one rebuild.
#[derive(Debug, Clone)]
pub struct RebuildRequest {
    pub obj_path: PathBuf,
    pub acf_path: PathBuf,
    /// Defaults to overwriting `acf_path`.
    pub output_path: Option<PathBuf>,
    pub assignments: Vec<BodyAssignment>,
    /// Fallback loop size; `None` uses the default.
    pub verts_per_loop: Option<usize>,
    /// Zeroed `_body/b/` block to fill instead of the stock layout.
    pub template: Option<Vec<String>>,
    /// Copy the destination to `<name>.bak` before replacing it.
    pub backup: bool,
}

impl RebuildRequest {
    pub fn new(obj_path: impl Into<PathBuf>, acf_path: impl Into<PathBuf>, assignments: Vec<BodyAssignment>) -> Self {
        Self {
            obj_path: obj_path.into(),
            acf_path: acf_path.into(),
            output_path: None,
            assignments,
            verts_per_loop: None,
            template: None,
            backup: false,
        }
    }

    fn destination(&self) -> PathBuf {
        self.output_path.clone().unwrap_or_else(|| self.acf_path.clone())
    }
}

/// What a successful rebuild wrote.
#[derive(Debug, Clone)]
pub struct RebuildReport {
    pub output_path: PathBuf,
    pub backup_path: Option<PathBuf>,
    /// Reconstructed bodies by ascending body index.
    pub bodies: Vec<BodyGrid>,
}

/// Rebuilds the assigned bodies of an `.acf` file from an OBJ file.
///
/// # Errors
///
/// Assignment errors ([`AcfError::NoAssignments`],
/// [`AcfError::DuplicateBodyIndex`], [`AcfError::NonContiguousBodyIndices`],
/// [`AcfError::UnknownMesh`]), the first failing body as [`AcfError::Body`],
/// [`AcfError::TemplateTooSmall`] for a template that cannot hold a grid,
/// and any read, parse or write failure. The destination is untouched on
/// error.
pub fn rebuild_bodies(request: &RebuildRequest) -> AcfResult<RebuildReport> {
    let groups = load_obj(&request.obj_path)?;
    let assignments = resolve_assignments(&request.assignments, &groups)?;
    let acf_lines = read_lines(&request.acf_path)?;

    let jobs = assignments
        .into_iter()
        .map(|(assignment, group)| {
            let capacity = read_grid_capacity(&acf_lines, assignment.body_index)?;
            let config = EngineConfig::new(capacity, request.verts_per_loop)?;
            Ok((assignment, group, config))
        })
        .collect::<AcfResult<Vec<_>>>()?;

    info!(bodies = jobs.len(), "Rebuilding bodies");

    let results: Vec<AcfResult<BodyGrid>> = jobs
        .par_iter()
        .map(|(assignment, group, config)| {
            build_body_grid(group, config).map_err(|source| AcfError::Body {
                index: assignment.body_index,
                mesh: assignment.mesh.clone(),
                source,
            })
        })
        .collect();

    let mut bodies = Vec::with_capacity(results.len());
    for result in results {
        bodies.push(result?);
    }

    let mut block = Vec::new();
    for ((assignment, _, _), body) in jobs.iter().zip(&bodies) {
        if body.has_warnings() {
            warn!(
                body = assignment.body_index,
                mesh = %assignment.mesh,
                warnings = body.diagnostics.iter().filter(|d| d.is_warning()).count(),
                "Body rebuilt with warnings"
            );
        }
        let lines = match &request.template {
            Some(template) => fill_template(template, assignment.body_index, body, &assignment.description)?,
            None => body_block_lines(assignment.body_index, body, &assignment.description),
        };
        block.extend(lines);
    }

    let output = replace_body_lines(&acf_lines, &block)?;
    let output_path = request.destination();
    let backup_path = write_lines_atomic(&output_path, &output, request.backup)?;

    info!(path = %output_path.display(), bodies = bodies.len(), "Rebuild complete");

    Ok(RebuildReport {
        output_path,
        backup_path,
        bodies,
    })
}

/// Pairs assignments with their groups, sorted by body index.
///
/// Body indices must be unique and cover `0..n`.
pub fn resolve_assignments<'a>(
    assignments: &'a [BodyAssignment],
    groups: &'a [Group],
) -> AcfResult<Vec<(&'a BodyAssignment, &'a Group)>> {
    if assignments.is_empty() {
        return Err(AcfError::NoAssignments);
    }

    let by_name: HashMap<&str, &Group> = groups.iter().map(|g| (g.name(), g)).collect();

    let mut resolved = assignments
        .iter()
        .map(|assignment| {
            by_name
                .get(assignment.mesh.as_str())
                .map(|&group| (assignment, group))
                .ok_or_else(|| AcfError::UnknownMesh {
                    name: assignment.mesh.clone(),
                })
        })
        .collect::<AcfResult<Vec<_>>>()?;

    resolved.sort_by_key(|(assignment, _)| assignment.body_index);

    for (expected, (assignment, _)) in resolved.iter().enumerate() {
        match assignment.body_index {
            index if index == expected => {}
            index if index + 1 == expected => return Err(AcfError::DuplicateBodyIndex { index }),
            _ => return Err(AcfError::NonContiguousBodyIndices { missing: expected }),
        }
    }

    Ok(resolved)
}
