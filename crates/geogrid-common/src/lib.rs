//! Common geo-referencing types shared across the geogrid crates.
//!
//! This crate holds the leaf types consumed by format adapters and by the
//! resampling crate: the [`GeoReference`] record describing a rectilinear,
//! pixel-registered grid footprint, and the [`GridError`] taxonomy.

pub mod error;
pub mod georef;

pub use error::{GridError, GridResult};
pub use georef::GeoReference;
