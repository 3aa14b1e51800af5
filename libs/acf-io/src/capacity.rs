//! Locked grid capacity of an existing body.

use crate::error::AcfResult;
use config::constants::{GridCapacity, DEFAULT_TARGET_I, DEFAULT_TARGET_J};
use tracing::{debug, warn};

/// Reads `_locked/i_count` and `_locked/j_count` for `body_index`.
///
/// The first occurrence of each key wins. Missing or unreadable values fall
/// back to 20 stations by 18 slots.
///
/// # Errors
///
/// [`crate::AcfError::Config`] when the stored counts are not a valid grid
/// (for instance an odd slot count).
pub fn read_grid_capacity<S: AsRef<str>>(lines: &[S], body_index: usize) -> AcfResult<GridCapacity> {
    let i_key = format!("P _body/{body_index}/_locked/i_count");
    let j_key = format!("P _body/{body_index}/_locked/j_count");

    let mut stations = None;
    let mut slots = None;

    for line in lines {
        let line = line.as_ref().trim();
        if stations.is_none() && line.starts_with(&i_key) {
            stations = parse_count(line, body_index);
        } else if slots.is_none() && line.starts_with(&j_key) {
            slots = parse_count(line, body_index);
        }
        if stations.is_some() && slots.is_some() {
            break;
        }
    }

    let stations = stations.unwrap_or(DEFAULT_TARGET_I);
    let slots = slots.unwrap_or(DEFAULT_TARGET_J);
    debug!(body = body_index, stations, slots, "Grid capacity");

    Ok(GridCapacity::new(stations, slots)?)
}

fn parse_count(line: &str, body_index: usize) -> Option<usize> {
    let value = line.split_whitespace().last()?;
    match value.parse() {
        Ok(count) => Some(count),
        Err(_) => {
            warn!(body = body_index, line, "Ignoring unreadable locked count");
            None
        }
    }
}
