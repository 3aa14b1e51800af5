//! # Storage-Order Remapper
//!
//! Plane-Maker stores station and slot indices in the order
//!
//! ```text
//! 0, 1, 10, 11, .., n-1, 2, 3, .., 9
//! ```
//!
//! Counts of ten or fewer degenerate to ascending order. The same
//! permutation applies to both axes of the ring grid.


use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Logical indices in on-disk order for `count` entries.
///
/// # Example
///
/// ```rust
/// use body_grid::storage_order;
///
/// assert_eq!(storage_order(12), vec![0, 1, 10, 11, 2, 3, 4, 5, 6, 7, 8, 9]);
/// assert_eq!(storage_order(4), vec![0, 1, 2, 3]);
/// ```
pub fn storage_order(count: usize) -> Vec<usize> {
    let head = 0..count.min(2);
    let teens = 10.min(count)..count;
    let digits = 2.min(count)..10.min(count);
    head.chain(teens).chain(digits).collect()
}

/// A storage permutation and its inverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageOrder {
    /// On-disk position -> logical index
    logical: Vec<usize>,
    /// Logical index -> on-disk position
    position: Vec<usize>,
}

impl StorageOrder {
    pub fn new(count: usize) -> Self {
        let logical = storage_order(count);
        let mut position = vec![0; count];
        for (p, &i) in logical.iter().enumerate() {
            position[i] = p;
        }
        Self { logical, position }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.logical.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.logical.is_empty()
    }

    /// Logical index stored at on-disk position `p`.
    #[inline]
    pub fn logical(&self, p: usize) -> Option<usize> {
        self.logical.get(p).copied()
    }

    /// On-disk position of logical index `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Option<usize> {
        self.position.get(i).copied()
    }

    /// Logical indices in on-disk order.
    pub fn as_slice(&self) -> &[usize] {
        &self.logical
    }
}

/// One grid cell addressed both ways.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StorageCell {
    /// On-disk station position
    pub p: usize,
    /// On-disk slot position
    pub q: usize,
    /// Logical station index
    pub station: usize,
    /// Logical slot index
    pub slot: usize,
    pub point: DVec3,
}

/// Rings in logical order, read back in storage order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageGrid {
    rings: Vec<Vec<DVec3>>,
    stations: StorageOrder,
    slots: StorageOrder,
}

impl StorageGrid {
    /// Wraps logically ordered rings.
    ///
    /// Every ring must have the same length; the first ring sets the slot
    /// count.
    pub fn new(rings: Vec<Vec<DVec3>>) -> Self {
        let slot_count = rings.first().map_or(0, Vec::len);
        debug_assert!(rings.iter().all(|r| r.len() == slot_count));

        Self {
            stations: StorageOrder::new(rings.len()),
            slots: StorageOrder::new(slot_count),
            rings,
        }
    }

    #[inline]
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn station_order(&self) -> &StorageOrder {
        &self.stations
    }

    pub fn slot_order(&self) -> &StorageOrder {
        &self.slots
    }

    /// Rings in logical (nose to tail) order.
    pub fn rings(&self) -> &[Vec<DVec3>] {
        &self.rings
    }

    /// Point at logical station `i`, slot `j`.
    pub fn logical(&self, i: usize, j: usize) -> Option<DVec3> {
        self.rings.get(i)?.get(j).copied()
    }

    /// Cell at on-disk position `(p, q)`.
    pub fn at(&self, p: usize, q: usize) -> Option<StorageCell> {
        let station = self.stations.logical(p)?;
        let slot = self.slots.logical(q)?;
        Some(StorageCell {
            p,
            q,
            station,
            slot,
            point: self.logical(station, slot)?,
        })
    }

    /// On-disk position of logical `(i, j)`.
    pub fn storage_position(&self, i: usize, j: usize) -> Option<(usize, usize)> {
        Some((self.stations.position(i)?, self.slots.position(j)?))
    }

    /// All cells, stations outer and slots inner, in on-disk order.
    pub fn cells(&self) -> impl Iterator<Item = StorageCell> + '_ {
        (0..self.station_count())
            .flat_map(move |p| (0..self.slot_count()).filter_map(move |q| self.at(p, q)))
    }
}
