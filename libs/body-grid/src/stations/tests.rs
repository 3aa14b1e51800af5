//! # Station Segmenter Tests

use super::*;
use crate::mesh::Group;
use crate::testing::{open_tube, ring_vertex, tube, tube_with_tails};
use config::constants::GridCapacity;

fn config(verts_per_loop: Option<usize>) -> EngineConfig {
    EngineConfig::new(GridCapacity::new(20, 18).unwrap(), verts_per_loop).unwrap()
}

fn run(group: &Group, verts_per_loop: Option<usize>) -> (Segmentation, Diagnostics) {
    let graph = AdjacencyGraph::build(group).unwrap();
    let mut diagnostics = Diagnostics::new(group.name());
    let segmentation = segment(group.vertices(), graph.as_ref(), &config(verts_per_loop), &mut diagnostics);
    (segmentation, diagnostics)
}

fn kinds(segmentation: &Segmentation) -> Vec<StationKind> {
    segmentation.stations.iter().map(|s| s.kind).collect()
}

#[test]
fn test_topology_one_station_per_loop() {
    let (segmentation, diagnostics) = run(&tube(5, 8, 0.0), None);

    assert_eq!(segmentation.method, SegmentationMethod::Topology);
    assert_eq!(segmentation.discovered, 7);
    assert_eq!(segmentation.stations.len(), 20);

    let mut expected = vec![StationKind::Tip];
    expected.extend([StationKind::Mid; 5]);
    expected.push(StationKind::Tail);
    expected.extend([StationKind::Empty; 13]);
    assert_eq!(kinds(&segmentation), expected);

    assert_eq!(segmentation.stations[0].members, vec![0]);
    assert_eq!(segmentation.stations[6].members, vec![41]);
    assert!(diagnostics.contains(DiagnosticCode::Padded));
    assert!(diagnostics.iter().all(|d| !d.is_warning()));
}

#[test]
fn test_topology_orders_loop_from_top_down_positive_side() {
    let (segmentation, _) = run(&tube(3, 8, 0.0), None);
    for j in 1..=3 {
        let expected: Vec<u32> = (0..8).map(|t| ring_vertex(8, j, t)).collect();
        assert_eq!(segmentation.stations[j].members, expected, "station {j}");
    }
}

#[test]
fn test_station_indices_are_ascending() {
    let (segmentation, _) = run(&tube(4, 6, 0.0), None);
    for (i, station) in segmentation.stations.iter().enumerate() {
        assert_eq!(station.index, i);
    }
}

#[test]
fn test_oversized_mesh_is_truncated() {
    let (segmentation, diagnostics) = run(&tube(23, 16, 0.0), None);

    assert_eq!(segmentation.discovered, 25);
    assert_eq!(segmentation.stations.len(), 20);
    assert_eq!(segmentation.stations[0].kind, StationKind::Tip);
    assert_eq!(segmentation.stations[19].kind, StationKind::Tail);
    assert_eq!(segmentation.stations[19].members.len(), 16);

    let truncated: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.code == DiagnosticCode::Truncated)
        .collect();
    assert_eq!(truncated.len(), 1);
    assert!(truncated[0].is_warning());
    assert!(truncated[0].message.contains("[20, 21, 22, 23, 24]"));
}

#[test]
fn test_point_cloud_uses_coordinate_sort() {
    let vertices = (0..10)
        .map(|i| DVec3::new((i % 3) as f64 * 0.1, 0.0, i as f64))
        .collect();
    let (segmentation, diagnostics) = run(&Group::point_cloud("cloud", vertices), Some(4));

    assert_eq!(segmentation.method, SegmentationMethod::CoordinateSort);
    assert_eq!(segmentation.discovered, 4);
    assert_eq!(segmentation.stations[0].members, vec![0]);
    assert_eq!(segmentation.stations[1].members, vec![1, 2, 3, 4]);
    assert_eq!(segmentation.stations[2].members, vec![5, 6, 7, 8]);
    assert_eq!(segmentation.stations[3].members, vec![9]);
    assert_eq!(segmentation.stations[3].kind, StationKind::Tail);
    assert!(diagnostics.contains(DiagnosticCode::NoAdjacency));
}

#[test]
fn test_split_tail_falls_back_with_warning() {
    let (segmentation, diagnostics) = run(&tube_with_tails(3, 8, 0.0, 2), Some(8));

    assert_eq!(segmentation.method, SegmentationMethod::CoordinateSort);
    assert!(diagnostics.contains(DiagnosticCode::AmbiguousTopology));
    // tip, three loops, the second tail vertex alone, tail
    assert_eq!(segmentation.discovered, 6);
    assert_eq!(segmentation.stations[5].members, vec![25]);
    assert_eq!(segmentation.stations[4].members, vec![26]);
}

#[test]
fn test_open_tail_infers_loop_size_from_layers() {
    let group = open_tube(6, 8);
    let (segmentation, diagnostics) = run(&group, None);

    assert_eq!(segmentation.method, SegmentationMethod::CoordinateSort);
    assert!(diagnostics.contains(DiagnosticCode::AmbiguousTopology));
    // tip, five full loops, last loop without its tail vertex, tail
    assert_eq!(segmentation.discovered, 8);
    for j in 1..=5 {
        let expected: Vec<u32> = (0..8).map(|t| ring_vertex(8, j, t)).collect();
        assert_eq!(segmentation.stations[j].members, expected, "station {j}");
    }
    assert_eq!(segmentation.stations[6].members.len(), 7);
    assert_eq!(segmentation.stations[7].members.len(), 1);
    let mut last_loop = segmentation.stations[6].members.clone();
    last_loop.extend(&segmentation.stations[7].members);
    last_loop.sort_unstable();
    assert_eq!(last_loop, (41..=48).collect::<Vec<u32>>());

    for station in &segmentation.stations[1..7] {
        let z = group.vertices()[station.members[0] as usize].z;
        assert!(station
            .members
            .iter()
            .all(|&v| group.vertices()[v as usize].z == z));
    }
}

#[test]
fn test_configured_loop_size_wins_over_inferred() {
    let (segmentation, _) = run(&open_tube(6, 8), Some(16));
    // tip, 47 members in chunks of 16, tail
    assert_eq!(segmentation.discovered, 5);
    assert_eq!(segmentation.stations[1].members.len(), 16);
}

#[test]
fn test_infer_loop_size() {
    let group = tube_with_tails(3, 8, 0.0, 2);
    let graph = AdjacencyGraph::build(&group).unwrap().unwrap();
    // layers: nose, three loops of 8, two tail vertices
    assert_eq!(infer_loop_size(group.vertices(), &graph), Some(8));

    let group = open_tube(4, 6);
    let graph = AdjacencyGraph::build(&group).unwrap().unwrap();
    assert_eq!(infer_loop_size(group.vertices(), &graph), Some(6));
}

#[test]
fn test_disconnected_mesh_uses_largest_component() {
    let big = tube(5, 8, 0.0);
    let small = tube(2, 4, 0.0);

    let mut vertices = big.vertices().to_vec();
    let offset = vertices.len() as u32;
    vertices.extend(small.vertices().iter().map(|v| *v + DVec3::new(0.0, 0.0, 100.0)));
    let mut faces = big.faces().to_vec();
    faces.extend(
        small
            .faces()
            .iter()
            .map(|f| [f[0] + offset, f[1] + offset, f[2] + offset]),
    );

    let (segmentation, diagnostics) = run(&Group::body("pair", vertices, faces), None);

    assert!(diagnostics.contains(DiagnosticCode::DisconnectedMesh));
    assert_eq!(segmentation.method, SegmentationMethod::Topology);
    assert_eq!(segmentation.discovered, 7);
}

#[test]
fn test_extremity_prefers_vertex_nearest_axis() {
    let points = vec![
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(0.1, 0.0, 0.0),
        DVec3::new(0.0, 0.0, 5.0),
        DVec3::new(0.5, 0.0, 5.0),
    ];
    let all = [0, 1, 2, 3];
    assert_eq!(extremity(&points, &all, AxisEnd::Nose), Some(1));
    assert_eq!(extremity(&points, &all, AxisEnd::Tail), Some(2));
    assert_eq!(extremity(&points, &[], AxisEnd::Tail), None);
}

#[test]
fn test_coordinate_stations_two_points() {
    let points = vec![DVec3::new(0.0, 0.0, 3.0), DVec3::new(0.0, 0.0, -1.0)];
    assert_eq!(coordinate_stations(&points, 16), vec![vec![1], vec![0]]);
}

#[test]
fn test_coordinate_stations_short_loop() {
    let points: Vec<DVec3> = (0..5).map(|i| DVec3::new(0.0, 0.0, i as f64)).collect();
    assert_eq!(
        coordinate_stations(&points, 16),
        vec![vec![0], vec![1, 2, 3], vec![4]]
    );
}

#[test]
fn test_coordinate_stations_flat_cloud_keeps_distinct_poles() {
    let points = vec![
        DVec3::new(2.0, 0.0, 1.0),
        DVec3::new(0.0, 0.0, 1.0),
        DVec3::new(1.0, 0.0, 1.0),
    ];
    // tip: nearest axis; tail: nearest axis among the rest
    assert_eq!(coordinate_stations(&points, 16), vec![vec![1], vec![0], vec![2]]);
}

#[test]
fn test_exact_fit_has_no_capacity_diagnostics() {
    let raw: Vec<Vec<u32>> = (0..4).map(|i| vec![i]).collect();
    let mut diagnostics = Diagnostics::new("exact");
    let segmentation = fit_to_capacity(raw, SegmentationMethod::Topology, 4, &mut diagnostics);

    assert!(diagnostics.is_empty());
    assert_eq!(
        kinds(&segmentation),
        vec![StationKind::Tip, StationKind::Mid, StationKind::Mid, StationKind::Tail]
    );
}
