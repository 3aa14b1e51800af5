//! # ACF I/O
//!
//! Drives the body grid engine from files: OBJ in, Plane-Maker `.acf` out.
//!
//! ## Architecture
//!
//! ```text
//! obj::load_obj -> body_grid::build_body_grid -> block::body_block_lines
//!               -> rewrite::replace_body_lines -> rewrite::write_lines_atomic
//! ```
//!
//! [`rebuild_bodies`] runs the whole chain and writes nothing unless every
//! assigned body succeeds.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use acf_io::{rebuild_bodies, BodyAssignment, RebuildRequest};
//!
//! let mut request = RebuildRequest::new(
//!     "c172.obj",
//!     "c172.acf",
//!     vec![BodyAssignment::new("fuselage", 0, "Fuselage")],
//! );
//! request.backup = true;
//! let report = rebuild_bodies(&request)?;
//! ```

pub mod block;
pub mod capacity;
pub mod error;
pub mod obj;
pub mod pipeline;
pub mod rewrite;

pub use block::{body_block_lines, fill_template, format_value};
pub use capacity::read_grid_capacity;
pub use error::{AcfError, AcfResult};
pub use obj::{classify_group, load_obj, parse_obj};
pub use pipeline::{rebuild_bodies, resolve_assignments, BodyAssignment, RebuildReport, RebuildRequest};
pub use rewrite::{read_lines, replace_body_lines, write_lines_atomic};
