//! # Metadata Calculator
//!
//! Scalar values written next to the ring grid: lateral arm, part radius
//! and dimension counts.

use crate::rings::BuiltRing;
use config::constants::EngineConfig;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Per-group scalars derived once every ring is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyMetadata {
    /// Midpoint of the group's lateral extent (feet), subtracted before
    /// ring building.
    pub lateral_offset_ft: f64,
    /// Largest lateral/vertical ring extent plus the radius margin (feet).
    pub radius_ft: f64,
    /// Largest raw half-ring size over mid stations.
    pub half_ring_max: usize,
    /// `2 * half_ring_max`
    pub ring_dim: usize,
    /// Stations discovered before truncation or padding.
    pub station_count: usize,
    pub locked_i_count: usize,
    pub locked_j_count: usize,
}

impl BodyMetadata {
    /// Computes metadata from the built rings (logical order).
    pub fn compute(
        lateral_offset_ft: f64,
        rings: &[BuiltRing],
        discovered: usize,
        config: &EngineConfig,
    ) -> Self {
        let half_ring_max = rings
            .iter()
            .filter_map(|ring| ring.half_ring_len)
            .max()
            .unwrap_or(0);

        Self {
            lateral_offset_ft,
            radius_ft: part_radius(rings.iter().map(|r| r.points.as_slice()), config.radius_margin_ft),
            half_ring_max,
            ring_dim: 2 * half_ring_max,
            station_count: discovered,
            locked_i_count: config.capacity.stations(),
            locked_j_count: config.capacity.slots(),
        }
    }
}

/// Midpoint of the lateral extent, `0.0` for no points.
pub fn lateral_center(points: &[DVec3]) -> f64 {
    let mut xs = points.iter().map(|p| p.x);
    let Some(first) = xs.next() else {
        return 0.0;
    };
    let (min, max) = xs.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x)));
    (min + max) / 2.0
}

/// Shifts every point by `-offset` laterally.
pub fn recenter_lateral(points: &mut [DVec3], offset: f64) {
    if offset == 0.0 {
        return;
    }
    for p in points {
        p.x -= offset;
    }
}

/// `max(|x|, |y|)` over all ring points plus `margin`.
pub fn part_radius<'a>(rings: impl IntoIterator<Item = &'a [DVec3]>, margin: f64) -> f64 {
    let extent = rings
        .into_iter()
        .flatten()
        .map(|p| p.x.abs().max(p.y.abs()))
        .fold(0.0, f64::max);
    extent + margin
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use config::constants::GridCapacity;

    fn ring(points: Vec<DVec3>, half_ring_len: Option<usize>) -> BuiltRing {
        BuiltRing {
            points,
            half_ring_len,
        }
    }

    #[test]
    fn test_lateral_center() {
        let points = vec![
            DVec3::new(1.0, 5.0, 0.0),
            DVec3::new(3.0, -5.0, 1.0),
            DVec3::new(2.5, 0.0, 2.0),
        ];
        assert_relative_eq!(lateral_center(&points), 2.0);
        assert_eq!(lateral_center(&[]), 0.0);
    }

    #[test]
    fn test_recenter_lateral() {
        let mut points = vec![DVec3::new(1.0, 2.0, 3.0), DVec3::new(3.0, 4.0, 5.0)];
        recenter_lateral(&mut points, 2.0);
        assert_eq!(points[0], DVec3::new(-1.0, 2.0, 3.0));
        assert_eq!(points[1], DVec3::new(1.0, 4.0, 5.0));
    }

    #[test]
    fn test_part_radius_uses_larger_axis() {
        let rings = vec![
            vec![DVec3::new(0.5, -2.5, 40.0)],
            vec![DVec3::new(-1.5, 0.0, -10.0)],
        ];
        let radius = part_radius(rings.iter().map(Vec::as_slice), 1.0);
        assert_relative_eq!(radius, 3.5);
    }

    #[test]
    fn test_compute() {
        let config = EngineConfig::new(GridCapacity::new(6, 4).unwrap(), None).unwrap();
        let rings = vec![
            ring(vec![DVec3::new(0.0, 0.2, 0.0); 4], None),
            ring(vec![DVec3::new(0.8, 0.0, 1.0); 4], Some(3)),
            ring(vec![DVec3::new(0.0, -1.2, 2.0); 4], Some(5)),
            ring(vec![DVec3::new(0.0, 0.0, 3.0); 4], None),
            ring(vec![DVec3::ZERO; 4], None),
            ring(vec![DVec3::ZERO; 4], None),
        ];

        let metadata = BodyMetadata::compute(0.75, &rings, 4, &config);

        assert_eq!(metadata.lateral_offset_ft, 0.75);
        assert_relative_eq!(metadata.radius_ft, 2.2);
        assert_eq!(metadata.half_ring_max, 5);
        assert_eq!(metadata.ring_dim, 10);
        assert_eq!(metadata.station_count, 4);
        assert_eq!(metadata.locked_i_count, 6);
        assert_eq!(metadata.locked_j_count, 4);
    }
}
