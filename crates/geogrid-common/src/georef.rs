//! Geo-referencing record for pixel-registered rectangular grids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GridError, GridResult};

/// Tolerance for extent consistency checks, as a fraction of one cell.
const EXTENT_TOL: f64 = 1e-6;

/// Tolerance for edge-to-edge containment comparisons, in degrees.
const CONTAIN_TOL: f64 = 1e-9;

/// Geographic footprint, resolution, and shape of a rectilinear grid.
///
/// All grids are pixel registered: `x_min`/`y_max` are the longitude and
/// latitude of the *center* of the upper-left cell, not its corner.
///
/// When `x_min > x_max` the grid crosses the antimeridian (the true east
/// edge lies numerically west of the true west edge); all coordinate math
/// here unwraps the east bound by +360° before comparing.
///
/// Treated as immutable once constructed. [`GeoReference::new`] and
/// [`GeoReference::with_bands`] validate every invariant, so any instance
/// produced by this crate satisfies:
///
/// - `x_max = x_min + (cols - 1) * x_dim` (after unwrapping), to tolerance
/// - `y_min = y_max - (rows - 1) * y_dim`, to tolerance
/// - `x_dim, y_dim > 0` and finite; `rows, cols >= 1`
/// - `band_names.len() == band_count >= 1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoReference {
    /// Number of rows in the data array.
    pub rows: usize,
    /// Number of columns in the data array.
    pub cols: usize,
    /// Longitude of the center of the upper-left cell, in degrees.
    pub x_min: f64,
    /// Longitude of the center of the upper-right cell, in degrees.
    pub x_max: f64,
    /// Latitude of the center of the lower-left cell, in degrees.
    pub y_min: f64,
    /// Latitude of the center of the upper-left cell, in degrees.
    pub y_max: f64,
    /// Cell size in the X direction, in decimal degrees.
    pub x_dim: f64,
    /// Cell size in the Y direction, in decimal degrees.
    pub y_dim: f64,
    /// Number of bands (Z dimension) of the data array.
    pub band_count: usize,
    /// Band names, one per band.
    pub band_names: Vec<String>,
    /// Creation time of the data, if known.
    pub timestamp: Option<DateTime<Utc>>,
}

impl GeoReference {
    /// Create a single-band geo-reference, validating all invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        rows: usize,
        cols: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        x_dim: f64,
        y_dim: f64,
    ) -> GridResult<Self> {
        Self::with_bands(
            rows,
            cols,
            x_min,
            x_max,
            y_min,
            y_max,
            x_dim,
            y_dim,
            vec!["band_1".to_string()],
        )
    }

    /// Create a multi-band geo-reference, validating all invariants.
    #[allow(clippy::too_many_arguments)]
    pub fn with_bands(
        rows: usize,
        cols: usize,
        x_min: f64,
        x_max: f64,
        y_min: f64,
        y_max: f64,
        x_dim: f64,
        y_dim: f64,
        band_names: Vec<String>,
    ) -> GridResult<Self> {
        let georef = Self {
            rows,
            cols,
            x_min,
            x_max,
            y_min,
            y_max,
            x_dim,
            y_dim,
            band_count: band_names.len(),
            band_names,
            timestamp: None,
        };
        georef.validate()?;
        Ok(georef)
    }

    /// Attach a creation timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    fn validate(&self) -> GridResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GridError::invalid_argument(format!(
                "grid dimensions must be positive, got {}x{}",
                self.rows, self.cols
            )));
        }
        if !(self.x_dim > 0.0 && self.x_dim.is_finite())
            || !(self.y_dim > 0.0 && self.y_dim.is_finite())
        {
            return Err(GridError::invalid_argument(format!(
                "cell size must be positive and finite, got ({}, {})",
                self.x_dim, self.y_dim
            )));
        }
        if self.band_count == 0 || self.band_names.len() != self.band_count {
            return Err(GridError::invalid_argument(format!(
                "band_names length {} does not match band_count {}",
                self.band_names.len(),
                self.band_count
            )));
        }

        let expected_x = self.x_min + (self.cols - 1) as f64 * self.x_dim;
        if (self.x_max_unwrapped() - expected_x).abs() > EXTENT_TOL * self.x_dim {
            return Err(GridError::invalid_argument(format!(
                "x extent is inconsistent: x_min {} + (cols - 1) * x_dim = {}, but x_max is {}",
                self.x_min,
                expected_x,
                self.x_max_unwrapped()
            )));
        }
        let expected_y = self.y_max - (self.rows - 1) as f64 * self.y_dim;
        if (self.y_min - expected_y).abs() > EXTENT_TOL * self.y_dim {
            return Err(GridError::invalid_argument(format!(
                "y extent is inconsistent: y_max {} - (rows - 1) * y_dim = {}, but y_min is {}",
                self.y_max, expected_y, self.y_min
            )));
        }
        Ok(())
    }

    /// Extent of the pixel centers as (x_min, x_max, y_min, y_max).
    pub fn extent(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }

    /// True if the footprint crosses the antimeridian (±180° longitude).
    pub fn crosses_antimeridian(&self) -> bool {
        self.x_min > self.x_max
    }

    /// Eastmost pixel-center longitude, unwrapped past +180° if the grid
    /// crosses the antimeridian, so that it is always >= `x_min`.
    pub fn x_max_unwrapped(&self) -> f64 {
        if self.crosses_antimeridian() {
            self.x_max + 360.0
        } else {
            self.x_max
        }
    }

    /// Longitude of the west cell edge (half a cell beyond `x_min`).
    pub fn west_edge(&self) -> f64 {
        self.x_min - self.x_dim / 2.0
    }

    /// Longitude of the east cell edge, unwrapped (see `x_max_unwrapped`).
    pub fn east_edge_unwrapped(&self) -> f64 {
        self.x_max_unwrapped() + self.x_dim / 2.0
    }

    /// Latitude of the north cell edge.
    pub fn north_edge(&self) -> f64 {
        self.y_max + self.y_dim / 2.0
    }

    /// Latitude of the south cell edge.
    pub fn south_edge(&self) -> f64 {
        self.y_min - self.y_dim / 2.0
    }

    /// True iff `other`'s footprint lies entirely within this one,
    /// edge-to-edge, accounting for antimeridian wraparound on both sides.
    pub fn contains(&self, other: &GeoReference) -> bool {
        if other.north_edge() > self.north_edge() + CONTAIN_TOL
            || other.south_edge() < self.south_edge() - CONTAIN_TOL
        {
            return false;
        }

        // A wrapping target can only fit inside a wrapping source: a
        // non-wrapping source never covers the ±180° seam.
        if other.crosses_antimeridian() && !self.crosses_antimeridian() {
            return false;
        }

        let mut other_west = other.west_edge();
        let mut other_east = other.east_edge_unwrapped();
        if self.crosses_antimeridian() {
            // Express the target in the source's unwrapped longitude frame.
            while other_west < self.west_edge() - CONTAIN_TOL {
                other_west += 360.0;
                other_east += 360.0;
            }
        }

        other_west >= self.west_edge() - CONTAIN_TOL
            && other_east <= self.east_edge_unwrapped() + CONTAIN_TOL
    }

    /// Convert geographic coordinates to (row, col) indices using the
    /// pixel-center convention. Purely linear; no bounds checking, so the
    /// result may be negative or past the grid edge.
    pub fn lat_lon_to_row_col(&self, lat: f64, lon: f64) -> (isize, isize) {
        let col = ((lon - self.x_min) / self.x_dim).floor() as isize;
        let row = ((self.y_max - lat) / self.y_dim).floor() as isize;
        (row, col)
    }

    /// Convert (row, col) indices to the geographic coordinates of the cell
    /// center. Purely linear; no bounds checking.
    pub fn row_col_to_lat_lon(&self, row: usize, col: usize) -> (f64, f64) {
        let lon = self.x_min + col as f64 * self.x_dim;
        let lat = self.y_max - row as f64 * self.y_dim;
        (lat, lon)
    }
}
