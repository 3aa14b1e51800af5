//! Topology-based stationing: BFS depth layers from the nose vertex.

use crate::adjacency::{largest_component, AdjacencyGraph};
use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use config::constants::LONGITUDINAL_TIE_EPSILON_FT;
use glam::DVec3;
use std::collections::{HashMap, HashSet};

/// End of the longitudinal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisEnd {
    /// Minimum `z`
    Nose,
    /// Maximum `z`
    Tail,
}

/// Picks the extremity vertex among `candidates`.
///
/// Vertices within [`LONGITUDINAL_TIE_EPSILON_FT`] of the extreme `z`
/// compete; the one closest to the longitudinal axis wins, then the lowest
/// index.
pub fn extremity(points: &[DVec3], candidates: &[u32], end: AxisEnd) -> Option<u32> {
    let extreme = candidates
        .iter()
        .map(|&v| points[v as usize].z)
        .reduce(|a, b| match end {
            AxisEnd::Nose => a.min(b),
            AxisEnd::Tail => a.max(b),
        })?;

    candidates
        .iter()
        .copied()
        .filter(|&v| (points[v as usize].z - extreme).abs() <= LONGITUDINAL_TIE_EPSILON_FT)
        .min_by(|&a, &b| {
            axis_distance_sq(points[a as usize])
                .total_cmp(&axis_distance_sq(points[b as usize]))
                .then(a.cmp(&b))
        })
}

#[inline]
fn axis_distance_sq(p: DVec3) -> f64 {
    p.x * p.x + p.y * p.y
}

/// Discovers stations from mesh topology.
///
/// Returns `None` when the topology has no unique nose/tail pair: the last
/// BFS layer must be exactly the tail extremity. Disconnected meshes are
/// reduced to their largest component with a warning.
pub fn topology_stations(
    points: &[DVec3],
    graph: &AdjacencyGraph,
    centerline_epsilon: f64,
    diagnostics: &mut Diagnostics,
) -> Option<Vec<Vec<u32>>> {
    let components = graph.components();
    let component = largest_component(&components)?;

    if components.len() > 1 {
        let ignored = graph.vertex_count() - component.len();
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::DisconnectedMesh,
            format!(
                "{} connected components, using the largest ({} vertices) and ignoring {ignored} vertices",
                components.len(),
                component.len()
            ),
        ));
    }

    if component.len() < 2 {
        return None;
    }

    let nose = extremity(points, component, AxisEnd::Nose)?;
    let tail = extremity(points, component, AxisEnd::Tail)?;
    let layers = graph.bfs_layers(nose);

    if layers.len() < 2 {
        return None;
    }
    match layers.last() {
        Some(last) if last.as_slice() == [tail] => {}
        _ => return None,
    }

    let last = layers.len() - 1;
    Some(
        layers
            .into_iter()
            .enumerate()
            .map(|(depth, layer)| {
                if depth == 0 || depth == last {
                    layer
                } else {
                    loop_order(points, graph, &layer, centerline_epsilon)
                }
            })
            .collect(),
    )
}

/// Most common BFS layer size below the nose of the largest component.
///
/// Single-vertex layers are ignored; ties go to the smaller size. `None`
/// when no layer holds two or more vertices.
pub fn infer_loop_size(points: &[DVec3], graph: &AdjacencyGraph) -> Option<usize> {
    let components = graph.components();
    let component = largest_component(&components)?;
    let nose = extremity(points, component, AxisEnd::Nose)?;

    let mut counts: HashMap<usize, usize> = HashMap::new();
    for layer in graph.bfs_layers(nose).iter().skip(1) {
        if layer.len() > 1 {
            *counts.entry(layer.len()).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .max_by(|(size_a, count_a), (size_b, count_b)| count_a.cmp(count_b).then(size_b.cmp(size_a)))
        .map(|(size, _)| size)
}

/// Orders a layer along its own edge loop.
///
/// The walk starts at the top-centerline vertex and steps toward positive
/// lateral first, so the positive half-ring runs top to bottom. Members the
/// walk cannot reach keep their BFS discovery order at the end.
fn loop_order(points: &[DVec3], graph: &AdjacencyGraph, layer: &[u32], centerline_epsilon: f64) -> Vec<u32> {
    let Some(start) = loop_start(points, layer, centerline_epsilon) else {
        return layer.to_vec();
    };

    let members: HashSet<u32> = layer.iter().copied().collect();
    let mut visited: HashSet<u32> = HashSet::with_capacity(layer.len());
    visited.insert(start);
    let mut ordered = vec![start];
    let mut current = start;

    loop {
        let candidates = graph
            .neighbors(current)
            .iter()
            .copied()
            .filter(|v| members.contains(v) && !visited.contains(v));

        let next = if ordered.len() == 1 {
            candidates.max_by(|&a, &b| {
                points[a as usize]
                    .x
                    .total_cmp(&points[b as usize].x)
                    .then(b.cmp(&a))
            })
        } else {
            let here = points[current as usize];
            candidates.min_by(|&a, &b| {
                here.distance_squared(points[a as usize])
                    .total_cmp(&here.distance_squared(points[b as usize]))
                    .then(a.cmp(&b))
            })
        };

        let Some(next) = next else { break };
        visited.insert(next);
        ordered.push(next);
        current = next;
    }

    ordered.extend(layer.iter().copied().filter(|v| !visited.contains(v)));
    ordered
}

/// Highest member on the centerline, else highest member overall.
fn loop_start(points: &[DVec3], layer: &[u32], centerline_epsilon: f64) -> Option<u32> {
    let by_height = |a: &u32, b: &u32| {
        points[*a as usize]
            .y
            .total_cmp(&points[*b as usize].y)
            .then(b.cmp(a))
    };

    layer
        .iter()
        .copied()
        .filter(|&v| points[v as usize].x.abs() < centerline_epsilon)
        .max_by(by_height)
        .or_else(|| layer.iter().copied().max_by(by_height))
}
