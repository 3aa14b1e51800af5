//! Centralized configuration values shared across the body grid pipeline.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// UNIT CONSTANTS
// =============================================================================

/// Feet per meter. Mesh input is in meters, every grid value is written in feet.
///
/// # Examples
/// ```
/// use config::constants::FT_PER_M;
/// let wingspan_ft = 10.0 * FT_PER_M;
/// assert!((wingspan_ft - 32.8084).abs() < 1.0e-9);
/// ```
pub const FT_PER_M: f64 = 3.28084;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Lateral magnitude (feet) below which a coordinate is snapped to exactly `0.0`.
///
/// Also used as the on-axis tolerance when splitting a station into its
/// positive half-ring.
///
/// # Examples
/// ```
/// use config::constants::CENTERLINE_EPSILON_FT;
/// let x: f64 = -3.0e-7;
/// let snapped = if x.abs() < CENTERLINE_EPSILON_FT { 0.0 } else { x };
/// assert!(snapped == 0.0 && snapped.is_sign_positive());
/// ```
pub const CENTERLINE_EPSILON_FT: f64 = 1.0e-6;

/// Longitudinal distance (feet) within which two vertices compete for the
/// same extremity (nose or tail).
///
/// # Examples
/// ```
/// use config::constants::LONGITUDINAL_TIE_EPSILON_FT;
/// assert!(LONGITUDINAL_TIE_EPSILON_FT < 1.0e-6);
/// ```
pub const LONGITUDINAL_TIE_EPSILON_FT: f64 = 1.0e-9;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Station capacity used when the destination file declares none.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TARGET_I;
/// assert_eq!(DEFAULT_TARGET_I, 20);
/// ```
pub const DEFAULT_TARGET_I: usize = 20;

/// Ring slot capacity used when the destination file declares none.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_TARGET_J;
/// assert_eq!(DEFAULT_TARGET_J / 2, 9);
/// ```
pub const DEFAULT_TARGET_J: usize = 18;

/// Expected vertex count per mid-station loop for the coordinate-sort fallback.
///
/// # Examples
/// ```
/// use config::constants::DEFAULT_VERTS_PER_LOOP;
/// let configured: Option<usize> = None;
/// assert_eq!(configured.unwrap_or(DEFAULT_VERTS_PER_LOOP), 16);
/// ```
pub const DEFAULT_VERTS_PER_LOOP: usize = 16;

/// Clearance (feet) added to the largest ring extent to form `_part_rad`.
///
/// Plane-Maker crops geometry outside the part radius.
///
/// # Examples
/// ```
/// use config::constants::RADIUS_MARGIN_FT;
/// let extent_ft = 4.5;
/// assert_eq!(extent_ft + RADIUS_MARGIN_FT, 5.5);
/// ```
pub const RADIUS_MARGIN_FT: f64 = 1.0;

/// Longitudinal spread (feet) above which a mid station is reported as
/// possibly mixing two loops.
///
/// # Examples
/// ```
/// use config::constants::MIXED_STATION_TOLERANCE_FT;
/// let (z_min, z_max) = (4.2, 5.5);
/// assert!(z_max - z_min > MIXED_STATION_TOLERANCE_FT);
/// ```
pub const MIXED_STATION_TOLERANCE_FT: f64 = 0.01;

/// Smallest usable station count: one tip and one tail.
pub const MIN_STATIONS: usize = 2;

/// Smallest usable ring width: one slot per side.
pub const MIN_SLOTS: usize = 2;

// =============================================================================
// GRID CAPACITY
// =============================================================================

/// Station and slot capacity of one body in the destination file
/// (`_locked/i_count` and `_locked/j_count`).
///
/// # Examples
/// ```
/// use config::constants::GridCapacity;
/// let capacity = GridCapacity::new(20, 18).expect("valid capacity");
/// assert_eq!(capacity.half(), 9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCapacity {
    stations: usize,
    slots: usize,
}

impl GridCapacity {
    /// Builds a capacity, rejecting grids that cannot hold a tip, a tail and
    /// a mirrored ring.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, GridCapacity};
    /// assert_eq!(GridCapacity::new(20, 17), Err(ConfigError::OddSlotCount(17)));
    /// ```
    pub fn new(stations: usize, slots: usize) -> Result<Self, ConfigError> {
        if stations < MIN_STATIONS {
            return Err(ConfigError::InvalidStationCount(stations));
        }
        if slots < MIN_SLOTS {
            return Err(ConfigError::InvalidSlotCount(slots));
        }
        if slots % 2 != 0 {
            return Err(ConfigError::OddSlotCount(slots));
        }
        Ok(Self { stations, slots })
    }

    /// Number of stations (`target_i`).
    #[inline]
    pub fn stations(&self) -> usize {
        self.stations
    }

    /// Number of ring slots per station (`target_j`), always even.
    #[inline]
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Slots per half-ring.
    #[inline]
    pub fn half(&self) -> usize {
        self.slots / 2
    }
}

impl Default for GridCapacity {
    fn default() -> Self {
        Self {
            stations: DEFAULT_TARGET_I,
            slots: DEFAULT_TARGET_J,
        }
    }
}

// =============================================================================
// ENGINE CONFIG
// =============================================================================

/// Immutable per-invocation settings for the reconstruction engine.
///
/// # Examples
/// ```
/// use config::constants::{EngineConfig, GridCapacity};
/// let config = EngineConfig::new(GridCapacity::default(), Some(12)).expect("valid config");
/// assert_eq!(config.verts_per_loop(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Destination grid size.
    pub capacity: GridCapacity,
    /// Loop size for the coordinate-sort fallback; `None` infers it from the
    /// mesh when possible.
    pub verts_per_loop: Option<usize>,
    /// Lateral snapping tolerance in feet.
    pub centerline_epsilon_ft: f64,
    /// Clearance added to the part radius in feet.
    pub radius_margin_ft: f64,
    /// Largest longitudinal spread of a mid station before it is flagged.
    pub mixed_station_tolerance_ft: f64,
}

impl EngineConfig {
    /// Builds a configuration with default tolerances.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, EngineConfig, GridCapacity};
    /// assert_eq!(
    ///     EngineConfig::new(GridCapacity::default(), Some(0)).unwrap_err(),
    ///     ConfigError::InvalidVertsPerLoop(0)
    /// );
    /// ```
    pub fn new(capacity: GridCapacity, verts_per_loop: Option<usize>) -> Result<Self, ConfigError> {
        if let Some(0) = verts_per_loop {
            return Err(ConfigError::InvalidVertsPerLoop(0));
        }
        Ok(Self {
            capacity,
            verts_per_loop,
            centerline_epsilon_ft: CENTERLINE_EPSILON_FT,
            radius_margin_ft: RADIUS_MARGIN_FT,
            mixed_station_tolerance_ft: MIXED_STATION_TOLERANCE_FT,
        })
    }

    /// Overrides the centerline tolerance.
    pub fn with_centerline_epsilon(mut self, epsilon_ft: f64) -> Result<Self, ConfigError> {
        if epsilon_ft.is_nan() || epsilon_ft <= 0.0 {
            return Err(ConfigError::InvalidTolerance(epsilon_ft));
        }
        self.centerline_epsilon_ft = epsilon_ft;
        Ok(self)
    }

    /// Overrides the part radius clearance.
    pub fn with_radius_margin(mut self, margin_ft: f64) -> Result<Self, ConfigError> {
        if !margin_ft.is_finite() || margin_ft < 0.0 {
            return Err(ConfigError::InvalidRadiusMargin(margin_ft));
        }
        self.radius_margin_ft = margin_ft;
        Ok(self)
    }

    /// Overrides the mixed-station tolerance.
    pub fn with_mixed_station_tolerance(mut self, tolerance_ft: f64) -> Result<Self, ConfigError> {
        if tolerance_ft.is_nan() || tolerance_ft <= 0.0 {
            return Err(ConfigError::InvalidTolerance(tolerance_ft));
        }
        self.mixed_station_tolerance_ft = tolerance_ft;
        Ok(self)
    }

    /// Configured loop size for the coordinate-sort fallback, or the default.
    ///
    /// The segmenter infers the loop size from the mesh before falling back
    /// to this default.
    #[inline]
    pub fn verts_per_loop(&self) -> usize {
        self.verts_per_loop.unwrap_or(DEFAULT_VERTS_PER_LOOP)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: GridCapacity::default(),
            verts_per_loop: None,
            centerline_epsilon_ft: CENTERLINE_EPSILON_FT,
            radius_margin_ft: RADIUS_MARGIN_FT,
            mixed_station_tolerance_ft: MIXED_STATION_TOLERANCE_FT,
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Raised when the station capacity cannot hold a tip and a tail.
    InvalidStationCount(usize),
    /// Raised when the ring width is below two slots.
    InvalidSlotCount(usize),
    /// Raised when the ring width cannot be split into two mirrored halves.
    OddSlotCount(usize),
    /// Raised when the fallback loop size is zero.
    InvalidVertsPerLoop(usize),
    /// Raised when a tolerance is zero, negative or NaN.
    InvalidTolerance(f64),
    /// Raised when the radius clearance is negative or not finite.
    InvalidRadiusMargin(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidStationCount(value) => {
                write!(f, "station count must be >= {MIN_STATIONS}: {value}")
            }
            ConfigError::InvalidSlotCount(value) => {
                write!(f, "slot count must be >= {MIN_SLOTS}: {value}")
            }
            ConfigError::OddSlotCount(value) => {
                write!(f, "slot count must be even to mirror a half-ring: {value}")
            }
            ConfigError::InvalidVertsPerLoop(value) => {
                write!(f, "verts_per_loop must be positive: {value}")
            }
            ConfigError::InvalidTolerance(value) => {
                write!(f, "tolerance must be positive: {value}")
            }
            ConfigError::InvalidRadiusMargin(value) => {
                write!(f, "radius margin must be finite and non-negative: {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
