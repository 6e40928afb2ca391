//! Grid container façade combining a geo-reference and a data array.

use geogrid_common::{GeoReference, GridError, GridResult};
use tracing::debug;

use crate::area::bin_to_grid;
use crate::interp::{interpolate_plane, ResampleMethod};
use crate::mapper::map_coords;

/// A rectangular grid dataset: one [`GeoReference`] plus one owned data
/// array of `rows * cols * band_count` values.
///
/// Data is stored as band planes, each plane row-major top-to-bottom, with
/// NaN as the missing-value sentinel (format adapters convert their own
/// sentinels before handoff). The geo-reference and the data are only ever
/// replaced together: a resampling call either fully installs the new state
/// or leaves the container untouched.
#[derive(Debug, Clone)]
pub struct GridContainer {
    georef: GeoReference,
    data: Vec<f64>,
}

impl GridContainer {
    /// Create a container from a geo-reference and matching data array.
    ///
    /// Fails with `ShapeMismatch` if `data.len()` does not equal
    /// `rows * cols * band_count`.
    pub fn new(georef: GeoReference, data: Vec<f64>) -> GridResult<Self> {
        let expected = georef.rows * georef.cols * georef.band_count;
        if data.len() != expected {
            return Err(GridError::shape_mismatch(
                "container data",
                format!(
                    "{} values ({}x{}x{})",
                    expected, georef.rows, georef.cols, georef.band_count
                ),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self { georef, data })
    }

    /// The grid's geo-referencing record.
    pub fn georef(&self) -> &GeoReference {
        &self.georef
    }

    /// The grid data, band planes concatenated, each row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Extent of the pixel centers as (x_min, x_max, y_min, y_max).
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        self.georef.extent()
    }

    /// Value at (band, row, col), or None when any index is out of range.
    pub fn get(&self, band: usize, row: usize, col: usize) -> Option<f64> {
        if band >= self.georef.band_count || row >= self.georef.rows || col >= self.georef.cols {
            return None;
        }
        let plane = self.georef.rows * self.georef.cols;
        self.data
            .get(band * plane + row * self.georef.cols + col)
            .copied()
    }

    fn plane(&self, band: usize) -> &[f64] {
        let plane = self.georef.rows * self.georef.cols;
        &self.data[band * plane..(band + 1) * plane]
    }

    /// Downsample to a coarser target grid using fractional-area overlap
    /// weighting, band by band.
    ///
    /// On success the container's geo-reference takes the target's shape,
    /// extent, and cell size verbatim, keeping the source band metadata and
    /// timestamp. On failure the container is unchanged.
    pub fn resample_area(&mut self, target: &GeoReference) -> GridResult<()> {
        debug!(
            src_rows = self.georef.rows,
            src_cols = self.georef.cols,
            target_rows = target.rows,
            target_cols = target.cols,
            "area resampling grid"
        );
        let coords = map_coords(&self.georef, target)?;

        let mut new_data = Vec::with_capacity(target.rows * target.cols * self.georef.band_count);
        for band in 0..self.georef.band_count {
            let plane = bin_to_grid(
                self.plane(band),
                &self.georef,
                target,
                &coords.xi,
                &coords.yi,
            )?;
            new_data.extend(plane);
        }
        self.install(target, new_data)
    }

    /// Resample to an arbitrary target grid by point interpolation at each
    /// target pixel center, band by band.
    ///
    /// Same atomicity contract as [`GridContainer::resample_area`].
    pub fn resample_interpolate(
        &mut self,
        target: &GeoReference,
        method: ResampleMethod,
    ) -> GridResult<()> {
        debug!(
            src_rows = self.georef.rows,
            src_cols = self.georef.cols,
            target_rows = target.rows,
            target_cols = target.cols,
            method = %method,
            "interpolating grid"
        );
        let coords = map_coords(&self.georef, target)?;

        let mut new_data = Vec::with_capacity(target.rows * target.cols * self.georef.band_count);
        for band in 0..self.georef.band_count {
            let plane = interpolate_plane(
                self.plane(band),
                self.georef.rows,
                self.georef.cols,
                &coords.xi,
                &coords.yi,
                method,
            );
            new_data.extend(plane);
        }
        self.install(target, new_data)
    }

    /// Install resampled data and the target geometry, carrying over band
    /// metadata and timestamp. All fallible checks run before any state is
    /// touched.
    fn install(&mut self, target: &GeoReference, data: Vec<f64>) -> GridResult<()> {
        let expected = target.rows * target.cols * self.georef.band_count;
        if data.len() != expected {
            return Err(GridError::shape_mismatch(
                "resampled output",
                format!("{}x{}", target.rows, target.cols),
                format!("{} values per {} bands", data.len(), self.georef.band_count),
            ));
        }
        self.georef = GeoReference {
            rows: target.rows,
            cols: target.cols,
            x_min: target.x_min,
            x_max: target.x_max,
            y_min: target.y_min,
            y_max: target.y_max,
            x_dim: target.x_dim,
            y_dim: target.y_dim,
            band_count: self.georef.band_count,
            band_names: std::mem::take(&mut self.georef.band_names),
            timestamp: self.georef.timestamp,
        };
        self.data = data;
        Ok(())
    }

    /// Nearest-pixel value at a geographic coordinate, band 0.
    ///
    /// Wraps the query longitude by +360° when the grid footprint crosses
    /// the antimeridian and the query lies west of `x_min`. Fails with
    /// `OutOfBounds` when the resolved pixel is outside the array.
    pub fn value_at(&self, lat: f64, lon: f64) -> GridResult<f64> {
        let (row, col) = self.nearest_row_col(lat, lon)?;
        Ok(self.data[row * self.georef.cols + col])
    }

    /// Nearest-pixel values at a geographic coordinate, one per band.
    pub fn values_at(&self, lat: f64, lon: f64) -> GridResult<Vec<f64>> {
        let (row, col) = self.nearest_row_col(lat, lon)?;
        let plane = self.georef.rows * self.georef.cols;
        Ok((0..self.georef.band_count)
            .map(|band| self.data[band * plane + row * self.georef.cols + col])
            .collect())
    }

    fn nearest_row_col(&self, lat: f64, mut lon: f64) -> GridResult<(usize, usize)> {
        let g = &self.georef;
        if g.crosses_antimeridian() && lon < g.x_min {
            lon += 360.0;
        }
        let col = ((lon - g.x_min) / g.x_dim).round() as isize;
        let row = ((g.y_max - lat) / g.y_dim).round() as isize;
        if row < 0 || row >= g.rows as isize || col < 0 || col >= g.cols as isize {
            return Err(GridError::OutOfBounds {
                lat,
                lon,
                x_min: g.x_min,
                x_max: g.x_max,
                y_min: g.y_min,
                y_max: g.y_max,
            });
        }
        Ok((row as usize, col as usize))
    }

    /// Convert a geographic coordinate to (row, col). Purely linear; no
    /// bounds checking.
    pub fn row_col_at(&self, lat: f64, lon: f64) -> (isize, isize) {
        self.georef.lat_lon_to_row_col(lat, lon)
    }

    /// Convert (row, col) to the geographic coordinate of the cell center.
    /// Purely linear; no bounds checking.
    pub fn lat_lon_at(&self, row: usize, col: usize) -> (f64, f64) {
        self.georef.row_col_to_lat_lon(row, col)
    }
}
