//! Synthetic fuselage meshes for integration tests.

#![allow(dead_code)]

use body_grid::Group;
use glam::DVec3;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Longitudinal spacing between loops (meters).
pub const FRAME_PITCH: f64 = 0.4;

/// Elliptical fuselage: nose vertex, `frames` loops of `loop_size` vertices,
/// tail vertex. Loops start at the top centerline and run down the
/// positive-`x` side; the whole body is shifted by `lateral_offset`.
pub fn fuselage(frames: usize, loop_size: usize, lateral_offset: f64) -> Group {
    let mut vertices = vec![DVec3::new(lateral_offset, 0.1, 0.0)];

    for f in 1..=frames {
        let width = 0.3 + 0.05 * f as f64;
        let height = 0.4 + 0.05 * f as f64;
        for t in 0..loop_size {
            let theta = FRAC_PI_2 - TAU * t as f64 / loop_size as f64;
            vertices.push(DVec3::new(
                lateral_offset + width * theta.cos(),
                0.1 + height * theta.sin(),
                f as f64 * FRAME_PITCH,
            ));
        }
    }

    let tail = vertices.len() as u32;
    vertices.push(DVec3::new(lateral_offset, 0.2, (frames + 1) as f64 * FRAME_PITCH));

    let at = |f: usize, t: usize| (1 + (f - 1) * loop_size + t % loop_size) as u32;
    let mut faces = Vec::new();
    for t in 0..loop_size {
        faces.push([0, at(1, t), at(1, t + 1)]);
        faces.push([tail, at(frames, t + 1), at(frames, t)]);
    }
    for f in 1..frames {
        for t in 0..loop_size {
            faces.push([at(f, t), at(f, t + 1), at(f + 1, t + 1)]);
            faces.push([at(f, t), at(f + 1, t + 1), at(f + 1, t)]);
        }
    }

    Group::body(format!("fuselage_{frames}"), vertices, faces)
}

/// Like [`fuselage`], but the last frame is left open: no tail vertex.
pub fn open_fuselage(frames: usize, loop_size: usize) -> Group {
    let closed = fuselage(frames, loop_size, 0.0);
    let tail = (closed.vertex_count() - 1) as u32;
    let faces = closed
        .faces()
        .iter()
        .copied()
        .filter(|face| !face.contains(&tail))
        .collect();
    Group::body(
        format!("open_fuselage_{frames}"),
        closed.vertices()[..tail as usize].to_vec(),
        faces,
    )
}

/// Maximum lateral half-width of [`fuselage`] (meters).
pub fn max_width(frames: usize) -> f64 {
    0.3 + 0.05 * frames as f64
}
