//! Area-weighted downsampling ("bin to grid").
//!
//! Aggregates fine source cells into coarser target cells. Each target cell
//! covers a window of source cells in index units; boundary source cells
//! contribute in proportion to the fraction of their footprint that overlaps
//! the target cell, interior cells contribute fully, and the output is the
//! weight-normalized mean. A constant-valued source therefore downsamples to
//! the same constant, whatever the target alignment.

use geogrid_common::{GeoReference, GridError, GridResult};

/// Weights smaller than this are treated as zero overlap; anything more
/// negative indicates a geometry violation upstream.
const WEIGHT_TOL: f64 = 1e-9;

/// Downsample one band plane onto the target grid.
///
/// `xi`/`yi` are the fractional source-pixel coordinates of the target pixel
/// centers from [`crate::mapper::map_coords`]. NaN source cells are ignored;
/// a window of only NaN cells yields NaN.
pub fn bin_to_grid(
    plane: &[f64],
    src: &GeoReference,
    target: &GeoReference,
    xi: &[f64],
    yi: &[f64],
) -> GridResult<Vec<f64>> {
    // Width and height of one target cell in source-index units.
    let ratio_x = target.x_dim / src.x_dim;
    let ratio_y = target.y_dim / src.y_dim;
    if ratio_x < 1.0 - WEIGHT_TOL || ratio_y < 1.0 - WEIGHT_TOL {
        return Err(GridError::invalid_argument(format!(
            "area resampling requires the target cell to be at least as coarse \
             as the source cell in both dimensions (got ratios {ratio_x}, {ratio_y})"
        )));
    }

    let mut output = Vec::with_capacity(yi.len() * xi.len());
    for &yc in yi {
        let (top, bottom, row_weights) = axis_window(yc, ratio_y, src.rows, src, target)?;
        for &xc in xi {
            let (left, right, col_weights) = axis_window(xc, ratio_x, src.cols, src, target)?;

            let mut weighted_sum = 0.0;
            let mut weight_total = 0.0;
            for (r, wy) in (top..=bottom).zip(row_weights.iter()) {
                for (c, wx) in (left..=right).zip(col_weights.iter()) {
                    let value = plane[r * src.cols + c];
                    if value.is_nan() {
                        continue;
                    }
                    let weight = wy * wx;
                    weighted_sum += weight * value;
                    weight_total += weight;
                }
            }

            if weight_total > 0.0 {
                output.push(weighted_sum / weight_total);
            } else {
                output.push(f64::NAN);
            }
        }
    }
    Ok(output)
}

/// Inclusive index window of source cells whose centers fall within half a
/// target-cell extent of `center`, with the linear overlap weight of each.
///
/// A source cell `k` occupies `[k - 0.5, k + 0.5]` in index units; the
/// target cell occupies `[center - ratio/2, center + ratio/2]`. The weight
/// is the length of their intersection, so interior cells get exactly 1.
fn axis_window(
    center: f64,
    ratio: f64,
    len: usize,
    src: &GeoReference,
    target: &GeoReference,
) -> GridResult<(usize, usize, Vec<f64>)> {
    let win_lo = center - ratio / 2.0;
    let win_hi = center + ratio / 2.0;
    let first = win_lo.ceil() as isize;
    let last = win_hi.floor() as isize;

    if first > last || first < 0 || last >= len as isize {
        // Can only happen if containment was violated upstream.
        return Err(GridError::geometry(
            format!("source window [{first}, {last}] is empty or out of range 0..{len}"),
            target.extent(),
            src.extent(),
        ));
    }

    let mut weights = Vec::with_capacity((last - first + 1) as usize);
    for k in first..=last {
        let cell_lo = k as f64 - 0.5;
        let cell_hi = k as f64 + 0.5;
        let overlap = win_hi.min(cell_hi) - win_lo.max(cell_lo);
        if overlap < -WEIGHT_TOL {
            return Err(GridError::geometry(
                format!("negative overlap weight {overlap} for source index {k}"),
                target.extent(),
                src.extent(),
            ));
        }
        weights.push(overlap.max(0.0));
    }

    Ok((first as usize, last as usize, weights))
}
