//! Grid resampling core.
//!
//! This crate converts a source grid (arbitrary resolution, extent, and
//! pixel-center registration) into a destination grid of different
//! resolution and extent while preserving geographic alignment, including
//! grids that cross the antimeridian (±180° longitude). Two policies are
//! supported:
//!
//! - **Area-weighted downsampling** ("bin to grid"): aggregates fine source
//!   cells into coarser target cells by exact fractional-area overlap.
//! - **Point interpolation**: evaluates linear, cubic, quintic, or
//!   nearest-neighbor interpolation at each target pixel center.
//!
//! # Architecture
//!
//! ```text
//! format adapter (out of scope)
//!      │  GeoReference + data array
//!      ▼
//! GridContainer::resample_area(target)        GridContainer::resample_interpolate(target, method)
//!      │                                           │
//!      ├─► mapper::map_coords ──────────────────────┤   fractional source-pixel
//!      │        (containment check, antimeridian)   │   coordinates xi, yi
//!      ▼                                           ▼
//! area::bin_to_grid (per band)               interp::interpolate_plane (per band)
//!      │                                           │
//!      └─────────────► new data + target GeoReference installed atomically
//! ```
//!
//! # Example
//!
//! ```
//! use geogrid_resample::{GeoReference, GridContainer, ResampleMethod};
//!
//! let source = GeoReference::new(4, 4, 0.5, 3.5, 0.5, 3.5, 1.0, 1.0).unwrap();
//! let data: Vec<f64> = (1..=16).map(f64::from).collect();
//! let mut grid = GridContainer::new(source, data).unwrap();
//!
//! let target = GeoReference::new(3, 3, 1.0, 3.0, 1.0, 3.0, 1.0, 1.0).unwrap();
//! grid.resample_interpolate(&target, ResampleMethod::Linear).unwrap();
//! assert_eq!(grid.georef().rows, 3);
//! ```

pub mod area;
pub mod container;
pub mod interp;
pub mod mapper;

// Re-export commonly used types at crate root
pub use container::GridContainer;
pub use interp::ResampleMethod;
pub use mapper::{map_coords, MappedCoords};

pub use geogrid_common::{GeoReference, GridError, GridResult};
