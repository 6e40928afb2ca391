//! Coordinate mapping between source and target grids.
//!
//! Produces, for a source and a target [`GeoReference`], the fractional
//! 0-based source pixel indices of every target pixel center. Both
//! resampling policies consume these coordinates, so geographic
//! reconciliation (containment, antimeridian unwrapping, off-by-one
//! correction of the generated center sequences) lives here and nowhere
//! else.

use geogrid_common::{GeoReference, GridError, GridResult};

/// Tolerance used when shifting a target span into the source's unwrapped
/// longitude frame, in degrees.
const SHIFT_TOL: f64 = 1e-9;

/// Fractional source-pixel coordinates of target pixel centers.
#[derive(Debug, Clone)]
pub struct MappedCoords {
    /// Column coordinate of each target pixel-center, length = target.cols.
    pub xi: Vec<f64>,
    /// Row coordinate of each target pixel-center, length = target.rows.
    pub yi: Vec<f64>,
}

/// Compute fractional source-pixel coordinates for each target pixel center.
///
/// Fails with a `Geometry` error if the target footprint is not contained
/// edge-to-edge in the source footprint, and with `ShapeMismatch` if the
/// generated coordinate arrays cannot be corrected to the exact target
/// dimensions.
pub fn map_coords(src: &GeoReference, target: &GeoReference) -> GridResult<MappedCoords> {
    if !src.contains(target) {
        return Err(GridError::geometry(
            "target grid is not completely contained by the source grid",
            target.extent(),
            src.extent(),
        ));
    }

    // Unwrap both longitude spans into increasing ranges, then express the
    // target in the source's frame. Only the intermediate longitude
    // arithmetic is shifted by 360°; the returned values are plain
    // fractional indices into the source array.
    let mut t_start_x = target.x_min;
    let mut t_stop_x = target.x_max_unwrapped();
    if src.crosses_antimeridian() {
        while t_start_x < src.west_edge() - SHIFT_TOL {
            t_start_x += 360.0;
            t_stop_x += 360.0;
        }
    }

    let lons = pixel_centers(t_start_x, t_stop_x, target.x_dim, target.cols)
        .ok_or_else(|| shape_error(target))?;
    let lats = pixel_centers(target.y_max, target.y_min, -target.y_dim, target.rows)
        .ok_or_else(|| shape_error(target))?;

    let xi = lons
        .iter()
        .map(|lon| (lon - src.x_min) / src.x_dim)
        .collect();
    let yi = lats
        .iter()
        .map(|lat| (src.y_max - lat) / src.y_dim)
        .collect();

    Ok(MappedCoords { xi, yi })
}

/// Generate the half-open arithmetic sequence `[start, stop)` with the given
/// signed step, then correct it to exactly `n` elements: one short appends
/// the stop value, one long drops the last. Returns None if the corrected
/// length still differs from `n`.
fn pixel_centers(start: f64, stop: f64, step: f64, n: usize) -> Option<Vec<f64>> {
    // Generate up to n + 2 elements so an over-long sequence is detected
    // as a mismatch instead of being silently truncated.
    let mut centers = Vec::with_capacity(n + 2);
    for k in 0..=(n + 1) {
        let v = start + step * k as f64;
        let past_stop = if step > 0.0 { v >= stop } else { v <= stop };
        if past_stop {
            break;
        }
        centers.push(v);
    }

    if centers.len() + 1 == n {
        centers.push(stop);
    } else if centers.len() == n + 1 {
        centers.pop();
    }

    if centers.len() == n {
        Some(centers)
    } else {
        None
    }
}

fn shape_error(target: &GeoReference) -> GridError {
    GridError::shape_mismatch(
        "interpolation coordinates",
        format!("{}x{}", target.rows, target.cols),
        "a coordinate sequence that could not be corrected to the target dimensions",
    )
}
