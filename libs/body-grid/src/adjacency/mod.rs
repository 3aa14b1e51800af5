//! # Adjacency Builder
//!
//! Vertex adjacency derived from face topology. Two vertices are adjacent
//! iff they share at least one face. Neighbor lists are kept sorted so every
//! traversal over the graph is deterministic.


use crate::error::BodyGridResult;
use crate::mesh::Group;
use std::collections::VecDeque;

/// Undirected vertex adjacency for one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// Sorted, deduplicated neighbors per vertex.
    neighbors: Vec<Vec<u32>>,
}

impl AdjacencyGraph {
    /// Builds the graph for a group.
    ///
    /// Returns `Ok(None)` when the group has no faces: a point cloud carries
    /// no topology and must be segmented by coordinates.
    ///
    /// # Example
    ///
    /// ```rust
    /// use body_grid::{AdjacencyGraph, Group};
    /// use glam::DVec3;
    ///
    /// let group = Group::body("tri", vec![DVec3::ZERO, DVec3::X, DVec3::Z], vec![[0, 1, 2]]);
    /// let graph = AdjacencyGraph::build(&group).unwrap().unwrap();
    /// assert!(graph.are_adjacent(0, 2));
    /// ```
    pub fn build(group: &Group) -> BodyGridResult<Option<Self>> {
        group.validate()?;
        if group.faces().is_empty() {
            return Ok(None);
        }
        Ok(Some(Self::from_faces(group.vertex_count(), group.faces())))
    }

    /// Builds the graph from faces whose indices are known to be in range.
    pub(crate) fn from_faces(vertex_count: usize, faces: &[[u32; 3]]) -> Self {
        let mut neighbors = vec![Vec::new(); vertex_count];

        for face in faces {
            for k in 0..3 {
                let a = face[k];
                let b = face[(k + 1) % 3];
                if a == b {
                    continue;
                }
                neighbors[a as usize].push(b);
                neighbors[b as usize].push(a);
            }
        }

        for list in &mut neighbors {
            list.sort_unstable();
            list.dedup();
        }

        Self { neighbors }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns the sorted neighbors of `vertex`.
    #[inline]
    pub fn neighbors(&self, vertex: u32) -> &[u32] {
        self.neighbors
            .get(vertex as usize)
            .map_or(&[], Vec::as_slice)
    }

    pub fn are_adjacent(&self, a: u32, b: u32) -> bool {
        self.neighbors(a).binary_search(&b).is_ok()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(Vec::len).sum::<usize>() / 2
    }

    /// Connected components, each sorted ascending, ordered by their lowest
    /// vertex. Isolated vertices form singleton components.
    pub fn components(&self) -> Vec<Vec<u32>> {
        let mut seen = vec![false; self.neighbors.len()];
        let mut components = Vec::new();

        for start in 0..self.neighbors.len() {
            if seen[start] {
                continue;
            }
            seen[start] = true;
            let mut component = vec![start as u32];
            let mut queue = VecDeque::from([start as u32]);

            while let Some(v) = queue.pop_front() {
                for &nb in self.neighbors(v) {
                    if !seen[nb as usize] {
                        seen[nb as usize] = true;
                        component.push(nb);
                        queue.push_back(nb);
                    }
                }
            }

            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Breadth-first layers from `start`: layer `d` holds every vertex at
    /// edge distance `d`, in discovery order.
    pub fn bfs_layers(&self, start: u32) -> Vec<Vec<u32>> {
        if start as usize >= self.neighbors.len() {
            return Vec::new();
        }

        let mut depth = vec![usize::MAX; self.neighbors.len()];
        depth[start as usize] = 0;
        let mut layers: Vec<Vec<u32>> = vec![vec![start]];
        let mut queue = VecDeque::from([start]);

        while let Some(v) = queue.pop_front() {
            let next = depth[v as usize] + 1;
            for &nb in self.neighbors(v) {
                if depth[nb as usize] == usize::MAX {
                    depth[nb as usize] = next;
                    if layers.len() == next {
                        layers.push(Vec::new());
                    }
                    layers[next].push(nb);
                    queue.push_back(nb);
                }
            }
        }

        layers
    }
}

/// Picks the canonical component: the largest one, ties going to the
/// component holding the lowest vertex index.
pub fn largest_component(components: &[Vec<u32>]) -> Option<&[u32]> {
    components
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.len().cmp(&b.len()).then(ib.cmp(ia)))
        .map(|(_, c)| c.as_slice())
}
