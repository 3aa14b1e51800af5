//! # Body Block
//!
//! Renders a [`BodyGrid`] as `P _body/<b>/...` property lines.
//!
//! Two ways:
//!
//! - [`body_block_lines`]: the full block with Plane-Maker's stock part
//!   properties
//! - [`fill_template`]: copies an existing zeroed block (usually written
//!   against `_body/b/`) line-for-line and only substitutes the body index,
//!   geometry and header values
//!
//! Geometry is written in storage order with 9 decimals. Values that round
//! to zero are written as `0.000000000`, never `-0.000000000`.


use crate::error::{AcfError, AcfResult};
use body_grid::BodyGrid;
use tracing::warn;

/// Prefix shared by every body property line.
pub const BODY_PREFIX: &str = "P _body/";

/// Formats a value with 9 decimals and no negative zero.
pub fn format_value(value: f64) -> String {
    let text = format!("{value:.9}");
    match text.strip_prefix('-') {
        Some(magnitude) if magnitude.bytes().all(|b| b == b'0' || b == b'.') => magnitude.to_string(),
        _ => text,
    }
}

/// Header values written next to the geometry.
struct Header {
    part_x: String,
    part_rad: String,
    r_dim: usize,
    s_dim: usize,
    i_count: usize,
    j_count: usize,
}

impl Header {
    fn new(grid: &BodyGrid) -> Self {
        let meta = &grid.metadata;
        Self {
            part_x: format_value(meta.lateral_offset_ft),
            part_rad: format_value(meta.radius_ft),
            r_dim: meta.ring_dim.min(meta.locked_j_count),
            s_dim: meta.station_count.min(meta.locked_i_count),
            i_count: meta.locked_i_count,
            j_count: meta.locked_j_count,
        }
    }

    /// Replacement value for a header key, if `key` is one.
    fn value(&self, key: &str, description: &str) -> Option<String> {
        let value = match key {
            "_descrip" => description.to_string(),
            "_locked/i_count" => self.i_count.to_string(),
            "_locked/j_count" => self.j_count.to_string(),
            "_r_dim" => self.r_dim.to_string(),
            "_s_dim" => self.s_dim.to_string(),
            "_part_rad" => self.part_rad.clone(),
            "_part_x" => self.part_x.clone(),
            "_part_y" | "_part_z" => format_value(0.0),
            _ => return None,
        };
        Some(value)
    }
}

/// `_geo_xyz` lines for every cell, in storage order.
fn geometry_lines(body_index: usize, grid: &BodyGrid) -> impl Iterator<Item = String> + '_ {
    grid.grid.cells().flat_map(move |cell| {
        cell.point.to_array().into_iter().enumerate().map(move |(k, value)| {
            format!(
                "{BODY_PREFIX}{body_index}/_geo_xyz/{},{},{k} {}",
                cell.station,
                cell.slot,
                format_value(value)
            )
        })
    })
}

/// Full property block for body `body_index`.
pub fn body_block_lines(body_index: usize, grid: &BodyGrid, description: &str) -> Vec<String> {
    let header = Header::new(grid);
    let p = |key: &str, value: &str| format!("{BODY_PREFIX}{body_index}/{key} {value}");
    let zero = format_value(0.0);
    let one = format_value(1.0);

    let mut lines = vec![
        p("_bot_s1", &zero),
        p("_bot_s2", &one),
        p("_bot_t1", &zero),
        p("_bot_t2", &one),
        p("_descrip", description),
        p("_engn_for_body", "-1"),
        p("_gear_for_body", "-1"),
    ];

    lines.extend(geometry_lines(body_index, grid));

    let stations = grid.grid.station_order().as_slice();
    let slots = grid.grid.slot_order().as_slice();
    for &i in stations {
        for &j in slots {
            lines.push(p(&format!("_locked/{i},{j}"), "0"));
        }
    }

    lines.extend([
        p("_locked/i_count", &header.i_count.to_string()),
        p("_locked/j_count", &header.j_count.to_string()),
        p("_part_area_rule", &one),
        p("_part_cd", "0.075000003"),
        p("_part_phi", &zero),
        p("_part_psi", &zero),
        p("_part_rad", &header.part_rad),
        p("_part_specs_eq", "1"),
        p("_part_specs_invis", "0"),
        p("_part_specs_rmod", "1"),
        p("_part_tex", "1"),
        p("_part_the", &zero),
        p("_part_x", &header.part_x),
        p("_part_y", &zero),
        p("_part_z", &zero),
        p("_r_dim", &header.r_dim.to_string()),
        p("_s_dim", &header.s_dim.to_string()),
        p("_top_s1", &zero),
        p("_top_s2", &one),
        p("_top_t1", &zero),
        p("_top_t2", &one),
    ]);

    lines
}

/// Splits `P _body/<b>/<key> <value>` into `(key, value)`.
///
/// The index segment may be anything, templates use the literal `b`.
fn split_body_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix(BODY_PREFIX)?;
    let (index, property) = rest.split_once('/')?;
    if index.is_empty() || property.is_empty() {
        return None;
    }
    Some(property.split_once(' ').unwrap_or((property, "")))
}

/// Parses `_geo_xyz/i,j,k` into its indices.
fn geo_indices(key: &str) -> Option<(usize, usize, usize)> {
    let mut parts = key.strip_prefix("_geo_xyz/")?.split(',');
    let i = parts.next()?.parse().ok()?;
    let j = parts.next()?.parse().ok()?;
    let k = parts.next()?.parse().ok()?;
    match (parts.next(), k) {
        (None, 0..=2) => Some((i, j, k)),
        _ => None,
    }
}

/// Station and slot extent of a template: largest `_geo_xyz` indices + 1.
fn template_extent<S: AsRef<str>>(template: &[S]) -> (usize, usize) {
    template
        .iter()
        .filter_map(|line| split_body_line(line.as_ref()))
        .filter_map(|(key, _)| geo_indices(key))
        .fold((0, 0), |(stations, slots), (i, j, _)| {
            (stations.max(i + 1), slots.max(j + 1))
        })
}

/// Fills a zeroed body block template with `grid`.
///
/// Every template line keeps its position. Body property lines take
/// `body_index` whatever their index segment was (`_body/b/` in stock
/// templates); `_geo_xyz` values come from the grid and header keys get the
/// computed values. Other body keys keep the template value, and lines that
/// are not body properties (blank lines included) are copied unchanged.
///
/// A template larger than the grid is filled with zeros past the grid.
///
/// # Errors
///
/// [`AcfError::TemplateTooSmall`] when the template's `_geo_xyz` extent
/// cannot hold every station and slot of the grid.
pub fn fill_template<S: AsRef<str>>(
    template: &[S],
    body_index: usize,
    grid: &BodyGrid,
    description: &str,
) -> AcfResult<Vec<String>> {
    let (stations, slots) = template_extent(template);
    let (grid_stations, grid_slots) = (grid.grid.station_count(), grid.grid.slot_count());

    if stations < grid_stations || slots < grid_slots {
        return Err(AcfError::TemplateTooSmall {
            stations,
            slots,
            grid_stations,
            grid_slots,
        });
    }
    if stations > grid_stations || slots > grid_slots {
        warn!(
            body = body_index,
            template_stations = stations,
            template_slots = slots,
            grid_stations,
            grid_slots,
            "Template is larger than the grid, extra cells written as zero"
        );
    }

    let header = Header::new(grid);

    Ok(template
        .iter()
        .map(|line| {
            let line = line.as_ref();
            let Some((key, template_value)) = split_body_line(line) else {
                return line.to_string();
            };

            let value = match geo_indices(key) {
                Some((i, j, k)) => {
                    let point = grid.grid.logical(i, j).unwrap_or_default();
                    format_value(point[k])
                }
                None => header
                    .value(key, description)
                    .unwrap_or_else(|| template_value.to_string()),
            };

            format!("{BODY_PREFIX}{body_index}/{key} {value}")
        })
        .collect())
}
