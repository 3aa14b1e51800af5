//! Coordinate-sort stationing for point clouds and ambiguous topology.

use super::topology::{extremity, AxisEnd};
use glam::DVec3;

/// Splits `points` into a tip, mid chunks of `verts_per_loop` in ascending
/// `z`, and a tail.
///
/// Returns an empty list for fewer than two points.
pub fn coordinate_stations(points: &[DVec3], verts_per_loop: usize) -> Vec<Vec<u32>> {
    let all: Vec<u32> = (0..points.len() as u32).collect();
    let Some(tip) = extremity(points, &all, AxisEnd::Nose) else {
        return Vec::new();
    };

    let rest: Vec<u32> = all.into_iter().filter(|&v| v != tip).collect();
    let Some(tail) = extremity(points, &rest, AxisEnd::Tail) else {
        return Vec::new();
    };

    let mut middle: Vec<u32> = rest.into_iter().filter(|&v| v != tail).collect();
    middle.sort_by(|&a, &b| {
        points[a as usize]
            .z
            .total_cmp(&points[b as usize].z)
            .then(a.cmp(&b))
    });

    let mut stations = Vec::with_capacity(2 + middle.len() / verts_per_loop.max(1));
    stations.push(vec![tip]);
    stations.extend(middle.chunks(verts_per_loop.max(1)).map(<[u32]>::to_vec));
    stations.push(vec![tail]);
    stations
}
