//! # OBJ Reader
//!
//! Reads Wavefront OBJ files into per-group [`Group`]s (meters).
//!
//! - `v` lines add vertices to one shared pool
//! - `g` / `o` lines switch the current group (`"unnamed"` when blank)
//! - `f` lines are fan-triangulated; `a/b/c` tokens use the position index,
//!   negative indices count back from the latest vertex
//! - Each group keeps only the vertices its faces use, in ascending file
//!   order, with faces remapped to that local list
//! - Groups without faces are dropped; order is first appearance

use crate::error::{AcfError, AcfResult};
use body_grid::{Group, GroupKind};
use glam::DVec3;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Group that collects faces before the first `g`/`o` line.
const DEFAULT_GROUP: &str = "default";

/// Name given to `g`/`o` lines without a name.
const UNNAMED_GROUP: &str = "unnamed";

/// Classifies a group by name: anything containing `wing` is a wing.
///
/// # Example
///
/// ```rust
/// use acf_io::classify_group;
/// use body_grid::GroupKind;
///
/// assert_eq!(classify_group("Left_Wing"), GroupKind::Wing);
/// assert_eq!(classify_group("fuselage"), GroupKind::Body);
/// ```
pub fn classify_group(name: &str) -> GroupKind {
    if name.to_lowercase().contains("wing") {
        GroupKind::Wing
    } else {
        GroupKind::Body
    }
}

/// Loads an OBJ file.
///
/// # Errors
///
/// [`AcfError::FileNotFound`] for a missing file, [`AcfError::Parse`] for
/// malformed `v` or `f` lines.
pub fn load_obj<P: AsRef<Path>>(path: P) -> AcfResult<Vec<Group>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AcfError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            AcfError::Io(e)
        }
    })?;

    let groups = parse_obj(BufReader::new(file))?;
    info!(path = %path.display(), groups = groups.len(), "Loaded OBJ");
    Ok(groups)
}

/// Parses OBJ text from any buffered reader.
pub fn parse_obj<R: BufRead>(reader: R) -> AcfResult<Vec<Group>> {
    let mut vertices: Vec<DVec3> = Vec::new();
    let mut names: Vec<String> = vec![DEFAULT_GROUP.to_string()];
    let mut faces: Vec<Vec<[u32; 3]>> = vec![Vec::new()];
    let mut lookup: HashMap<String, usize> = HashMap::from([(DEFAULT_GROUP.to_string(), 0)]);
    let mut current = 0;

    for (number, line) in reader.lines().enumerate() {
        let line_no = number + 1;
        let line = line?;
        let line = line.trim();

        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        match keyword {
            "v" => vertices.push(parse_vertex(rest, line_no)?),
            "g" | "o" => {
                let name = match rest.trim() {
                    "" => UNNAMED_GROUP,
                    name => name,
                };
                current = *lookup.entry(name.to_string()).or_insert_with(|| {
                    names.push(name.to_string());
                    faces.push(Vec::new());
                    names.len() - 1
                });
            }
            "f" => {
                let polygon = parse_face(rest, vertices.len(), line_no)?;
                for k in 1..polygon.len() - 1 {
                    faces[current].push([polygon[0], polygon[k], polygon[k + 1]]);
                }
            }
            _ => {}
        }
    }

    debug!(vertices = vertices.len(), groups = names.len(), "Parsed OBJ");

    Ok(names
        .into_iter()
        .zip(faces)
        .filter(|(_, faces)| !faces.is_empty())
        .map(|(name, faces)| localize(name, &vertices, &faces))
        .collect())
}

fn parse_vertex(rest: &str, line_no: usize) -> AcfResult<DVec3> {
    let mut coords = [0.0; 3];
    let mut tokens = rest.split_whitespace();
    for coord in &mut coords {
        let token = tokens
            .next()
            .ok_or_else(|| AcfError::parse(line_no, "vertex needs three coordinates"))?;
        *coord = token
            .parse()
            .map_err(|_| AcfError::parse(line_no, format!("bad vertex coordinate '{token}'")))?;
    }
    Ok(DVec3::from_array(coords))
}

/// Resolves a face's position indices to 0-based global indices.
fn parse_face(rest: &str, vertex_count: usize, line_no: usize) -> AcfResult<Vec<u32>> {
    let indices = rest
        .split_whitespace()
        .map(|token| {
            let position = token.split('/').next().unwrap_or(token);
            let raw: i64 = position
                .parse()
                .map_err(|_| AcfError::parse(line_no, format!("bad face index '{token}'")))?;

            let resolved = match raw {
                0 => None,
                r if r > 0 => Some(r - 1),
                r => Some(vertex_count as i64 + r),
            };
            match resolved {
                Some(index) if (0..vertex_count as i64).contains(&index) => Ok(index as u32),
                _ => Err(AcfError::parse(
                    line_no,
                    format!("face index {raw} out of range for {vertex_count} vertices"),
                )),
            }
        })
        .collect::<AcfResult<Vec<u32>>>()?;

    if indices.len() < 3 {
        return Err(AcfError::parse(line_no, "face needs at least three vertices"));
    }
    Ok(indices)
}

/// Builds a group holding only the vertices its faces reference.
fn localize(name: String, vertices: &[DVec3], faces: &[[u32; 3]]) -> Group {
    let mut used: Vec<u32> = faces.iter().flatten().copied().collect();
    used.sort_unstable();
    used.dedup();

    let local: HashMap<u32, u32> = used
        .iter()
        .enumerate()
        .map(|(local, &global)| (global, local as u32))
        .collect();
    let remapped = faces.iter().map(|face| face.map(|v| local[&v])).collect();
    let positions = used.iter().map(|&v| vertices[v as usize]).collect();

    let kind = classify_group(&name);
    Group::new(name, kind, positions, remapped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> AcfResult<Vec<Group>> {
        parse_obj(Cursor::new(text))
    }

    #[test]
    fn test_groups_keep_local_vertices() {
        let text = "\
v 0 0 0
v 1 0 0
v 0 1 0
v 5 5 5
v 0 0 9
g fuselage
f 1 2 3
g right_wing
f 2 4 5
";
        let groups = parse(text).unwrap();
        assert_eq!(groups.len(), 2);

        assert_eq!(groups[0].name(), "fuselage");
        assert_eq!(groups[0].kind(), GroupKind::Body);
        assert_eq!(groups[0].vertex_count(), 3);
        assert_eq!(groups[0].faces(), &[[0, 1, 2]]);

        assert_eq!(groups[1].name(), "right_wing");
        assert_eq!(groups[1].kind(), GroupKind::Wing);
        assert_eq!(groups[1].vertices()[0], DVec3::new(1.0, 0.0, 0.0));
        assert_eq!(groups[1].vertices()[2], DVec3::new(0.0, 0.0, 9.0));
        assert_eq!(groups[1].faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_polygons_are_fan_triangulated() {
        let text = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\no pod\nf 1/1/1 2/2/2 3//3 4\n";
        let groups = parse(text).unwrap();
        assert_eq!(groups[0].faces(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_negative_indices_are_relative() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng tank\nf -3 -2 -1\n";
        let groups = parse(text).unwrap();
        assert_eq!(groups[0].faces(), &[[0, 1, 2]]);
    }

    #[test]
    fn test_faceless_groups_are_dropped() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\ng empty\ng\nf 1 2 3\n";
        let groups = parse(text).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name(), "unnamed");
    }

    #[test]
    fn test_repeated_group_name_appends() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 0 0 1\ng a\nf 1 2 3\ng b\nf 1 2 4\ng a\nf 2 3 4\n";
        let groups = parse(text).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name(), "a");
        assert_eq!(groups[0].face_count(), 2);
        assert_eq!(groups[0].vertex_count(), 4);
    }

    #[test]
    fn test_faces_before_group_use_default() {
        let groups = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").unwrap();
        assert_eq!(groups[0].name(), "default");
    }

    #[test]
    fn test_bad_vertex_reports_line() {
        let err = parse("# comment\nv 0 zero 0\n").unwrap_err();
        assert!(matches!(err, AcfError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_out_of_range_face_is_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert!(matches!(err, AcfError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_short_face_is_error() {
        let err = parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(err.to_string().contains("three vertices"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_obj("missing_body_mesh_4821.obj").unwrap_err();
        assert!(matches!(err, AcfError::FileNotFound { .. }));
    }
}
