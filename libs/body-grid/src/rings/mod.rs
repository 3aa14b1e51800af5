//! # Ring Builder
//!
//! Turns one station into a fixed-length symmetric ring of `slots` points.
//!
//! ## Layout
//!
//! ```text
//! slot:   0 .. half-1        half .. slots-1
//!         half-ring          half-ring mirrored (x -> -x)
//! ```
//!
//! - Empty stations become the null ring (all zeros)
//! - Tip and tail stations become a pole ring: one on-axis point repeated
//! - Mid stations keep their `x >= 0` members in loop order, truncated or
//!   padded (repeat last) to `half`, then mirrored; members spread along
//!   `z` beyond the configured tolerance are flagged as a possible mixed
//!   station
//!
//! Points are in feet and laterally recentered before they reach here.


use crate::diagnostic::{Diagnostic, DiagnosticCode, Diagnostics};
use crate::stations::{Station, StationKind};
use config::constants::EngineConfig;
use glam::DVec3;

/// A built ring plus the raw half-ring size it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRing {
    /// Exactly `capacity.slots()` points.
    pub points: Vec<DVec3>,
    /// Half-ring member count before truncation/padding, mid stations only.
    pub half_ring_len: Option<usize>,
}

/// Builds the ring for `station`.
pub fn build_ring(
    station: &Station,
    points: &[DVec3],
    config: &EngineConfig,
    diagnostics: &mut Diagnostics,
) -> BuiltRing {
    let slots = config.capacity.slots();
    let epsilon = config.centerline_epsilon_ft;

    match station.kind {
        StationKind::Empty => BuiltRing {
            points: null_ring(slots),
            half_ring_len: None,
        },
        StationKind::Tip | StationKind::Tail => BuiltRing {
            points: pole_ring(&station.members, points, slots),
            half_ring_len: None,
        },
        StationKind::Mid => {
            let (half, degenerate) = half_ring(&station.members, points, epsilon);
            if degenerate {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::DegenerateRing,
                        format!(
                            "no members on the positive lateral side, using all {} members",
                            station.members.len()
                        ),
                    )
                    .at_station(station.index),
                );
            }

            let spread = z_spread(&station.members, points);
            if spread > config.mixed_station_tolerance_ft {
                diagnostics.push(
                    Diagnostic::warning(
                        DiagnosticCode::MixedStation,
                        format!("members span {spread:.6} ft longitudinally, station may mix two loops"),
                    )
                    .at_station(station.index),
                );
            }

            let target = config.capacity.half();
            if let Some(last) = half.last() {
                if half.len() < target && last.x.abs() >= epsilon {
                    diagnostics.push(
                        Diagnostic::warning(
                            DiagnosticCode::OffCenterlinePadding,
                            format!(
                                "padding {} slots with a vertex {:.6} ft off the centerline",
                                target - half.len(),
                                last.x
                            ),
                        )
                        .at_station(station.index),
                    );
                }
            }

            BuiltRing {
                points: mirrored_ring(&half, slots, epsilon),
                half_ring_len: Some(half.len()),
            }
        }
    }
}

/// `slots` copies of the origin.
pub fn null_ring(slots: usize) -> Vec<DVec3> {
    vec![DVec3::ZERO; slots]
}

/// `slots` copies of the on-axis centroid of `members`.
///
/// A single member yields its own `y`/`z`. No members yields the null ring.
pub fn pole_ring(members: &[u32], points: &[DVec3], slots: usize) -> Vec<DVec3> {
    if members.is_empty() {
        return null_ring(slots);
    }

    let sum: DVec3 = members.iter().map(|&v| points[v as usize]).sum();
    let centroid = sum / members.len() as f64;
    vec![DVec3::new(0.0, centroid.y, centroid.z); slots]
}

/// Longitudinal range of `members`, `0.0` when empty.
pub fn z_spread(members: &[u32], points: &[DVec3]) -> f64 {
    let mut zs = members.iter().map(|&v| points[v as usize].z);
    let Some(first) = zs.next() else {
        return 0.0;
    };
    let (min, max) = zs.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z)));
    max - min
}

/// Members on the positive lateral side, in member order.
///
/// Members within `epsilon` below zero count as on-axis. Returns the full
/// member list and `true` when no member qualifies.
pub fn half_ring(members: &[u32], points: &[DVec3], epsilon: f64) -> (Vec<DVec3>, bool) {
    let positive: Vec<DVec3> = members
        .iter()
        .map(|&v| points[v as usize])
        .filter(|p| p.x >= -epsilon)
        .collect();

    if positive.is_empty() {
        (members.iter().map(|&v| points[v as usize]).collect(), true)
    } else {
        (positive, false)
    }
}

/// Fits `half` to `slots / 2` points and appends its mirror image.
///
/// Extra points are dropped, missing ones repeat the last point. Lateral
/// coordinates are snapped with [`snap_lateral`].
pub fn mirrored_ring(half: &[DVec3], slots: usize, epsilon: f64) -> Vec<DVec3> {
    let Some(&last) = half.last() else {
        return null_ring(slots);
    };

    let target = slots / 2;
    let fitted: Vec<DVec3> = half
        .iter()
        .copied()
        .chain(std::iter::repeat(last))
        .take(target)
        .map(|p| DVec3::new(snap_lateral(p.x, epsilon), p.y, p.z))
        .collect();

    let mut ring = Vec::with_capacity(slots);
    ring.extend_from_slice(&fitted);
    ring.extend(
        fitted
            .iter()
            .map(|p| DVec3::new(snap_lateral(-p.x, epsilon), p.y, p.z)),
    );
    ring
}

/// Collapses lateral values within `epsilon` of zero to exactly `0.0`.
#[inline]
pub fn snap_lateral(x: f64, epsilon: f64) -> f64 {
    if x.abs() < epsilon {
        0.0
    } else {
        x
    }
}
