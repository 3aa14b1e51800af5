//! # Config Crate
//!
//! Centralized configuration constants for the body grid pipeline.
//! Unit conversions, tolerances and the default Plane-Maker grid capacity
//! are defined here so the engine and the file collaborators agree on them.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{EngineConfig, GridCapacity, FT_PER_M};
//!
//! let capacity = GridCapacity::new(20, 18).unwrap();
//! let config = EngineConfig::new(capacity, None).unwrap();
//! assert_eq!(config.capacity.half(), 9);
//!
//! let one_meter_in_feet = 1.0 * FT_PER_M;
//! assert!(one_meter_in_feet > 3.28);
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **Explicit Capacity**: Grid dimensions are passed per invocation, never global
//! - **Plane-Maker Compatible**: Defaults match the stock body grid (20 x 18)

pub mod constants;
