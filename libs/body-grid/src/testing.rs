//! Synthetic body meshes shared by the unit tests.

use crate::mesh::Group;
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Spacing between consecutive rings (meters).
pub const RING_PITCH: f64 = 0.5;

/// Closed tube: nose vertex, `rings` loops of `loop_size` vertices and a
/// tail vertex, centered on `x = lateral_offset`.
///
/// Loop vertex `t` sits at angle `pi/2 - tau * t / loop_size`: vertex 0 is
/// top-centerline and the loop runs down the positive-`x` side first.
pub fn tube(rings: usize, loop_size: usize, lateral_offset: f64) -> Group {
    tube_with_tails(rings, loop_size, lateral_offset, 1)
}

/// Like [`tube`], but the last loop is closed by `tails` separate vertices
/// sharing the same `z`.
pub fn tube_with_tails(rings: usize, loop_size: usize, lateral_offset: f64, tails: usize) -> Group {
    let mut vertices = Vec::with_capacity(rings * loop_size + 1 + tails);
    vertices.push(DVec3::new(lateral_offset, 0.0, 0.0));

    for j in 1..=rings {
        let radius = 0.5 + 0.1 * j as f64;
        for t in 0..loop_size {
            let theta = FRAC_PI_2 - TAU * t as f64 / loop_size as f64;
            vertices.push(DVec3::new(
                lateral_offset + radius * theta.cos(),
                radius * theta.sin(),
                j as f64 * RING_PITCH,
            ));
        }
    }

    let tail_z = (rings + 1) as f64 * RING_PITCH;
    let first_tail = vertices.len() as u32;
    for k in 0..tails {
        let spread = k as f64 - (tails as f64 - 1.0) / 2.0;
        vertices.push(DVec3::new(lateral_offset + 0.1 * spread, 0.0, tail_z));
    }

    let at = |j: usize, t: usize| (1 + (j - 1) * loop_size + t % loop_size) as u32;
    let mut faces = Vec::new();

    for t in 0..loop_size {
        faces.push([0, at(1, t), at(1, t + 1)]);
    }
    for j in 1..rings {
        for t in 0..loop_size {
            let (a, b) = (at(j, t), at(j, t + 1));
            let (c, d) = (at(j + 1, t), at(j + 1, t + 1));
            faces.push([a, b, d]);
            faces.push([a, d, c]);
        }
    }
    for t in 0..loop_size {
        let tail = first_tail + (t * tails / loop_size) as u32;
        faces.push([tail, at(rings, t + 1), at(rings, t)]);
    }

    Group::body(format!("tube_{rings}x{loop_size}"), vertices, faces)
}

/// Like [`tube`], but the last loop is left open: no tail vertex.
pub fn open_tube(rings: usize, loop_size: usize) -> Group {
    let closed = tube(rings, loop_size, 0.0);
    let tail = (closed.vertex_count() - 1) as u32;
    let vertices = closed.vertices()[..tail as usize].to_vec();
    let faces = closed
        .faces()
        .iter()
        .copied()
        .filter(|face| !face.contains(&tail))
        .collect();
    Group::body(format!("open_tube_{rings}x{loop_size}"), vertices, faces)
}

/// Loop-vertex index of ring `j` (1-based), position `t`, in [`tube`].
pub fn ring_vertex(loop_size: usize, j: usize, t: usize) -> u32 {
    (1 + (j - 1) * loop_size + t) as u32
}
