//! End-to-end resampling tests against reference scenarios.
//!
//! The area-resampling fixture mirrors the classic 5x6 -> 3x3 downsampling
//! scenario; expected values are the exact fractional-area weighted means
//! (sums of overlap-weighted values normalized by the summed weights).

use geogrid_resample::{GeoReference, GridContainer, GridError, ResampleMethod};

fn source_5x6() -> GridContainer {
    let georef = GeoReference::new(5, 6, 0.5, 5.5, 0.5, 4.5, 1.0, 1.0).unwrap();
    let data: Vec<f64> = (1..=30).map(f64::from).collect();
    GridContainer::new(georef, data).unwrap()
}

fn source_4x4() -> GridContainer {
    let georef = GeoReference::new(4, 4, 0.5, 3.5, 0.5, 3.5, 1.0, 1.0).unwrap();
    let data: Vec<f64> = (1..=16).map(f64::from).collect();
    GridContainer::new(georef, data).unwrap()
}

fn assert_close(got: &[f64], want: &[f64], tol: f64) {
    assert_eq!(got.len(), want.len());
    for (k, (g, w)) in got.iter().zip(want.iter()).enumerate() {
        assert!((g - w).abs() < tol, "index {k}: got {g}, want {w}");
    }
}

#[test]
fn area_resample_reference_scenario() {
    let mut grid = source_5x6();
    let target = GeoReference::new(3, 3, 1.75, 4.75, 0.75, 3.75, 1.5, 1.5).unwrap();
    grid.resample_area(&target).unwrap();

    assert_eq!(grid.georef().rows, 3);
    assert_eq!(grid.georef().cols, 3);
    assert_eq!(grid.extent(), (1.75, 4.75, 0.75, 3.75));

    let expected = [
        19.0 / 3.0,
        23.0 / 3.0,
        28.0 / 3.0,
        49.0 / 3.0,
        53.0 / 3.0,
        58.0 / 3.0,
        73.0 / 3.0,
        77.0 / 3.0,
        82.0 / 3.0,
    ];
    assert_close(grid.data(), &expected, 1e-9);
}

#[test]
fn area_resample_conserves_constant_field() {
    let georef = GeoReference::new(9, 9, 0.0, 8.0, 0.0, 8.0, 1.0, 1.0).unwrap();
    let mut grid = GridContainer::new(georef, vec![42.5; 81]).unwrap();

    // Deliberately misaligned target so every window has fractional edges.
    let target = GeoReference::new(3, 3, 1.3, 5.9, 1.7, 6.3, 2.3, 2.3).unwrap();
    grid.resample_area(&target).unwrap();

    for v in grid.data() {
        assert!((v - 42.5).abs() < 1e-9, "constant not conserved: {v}");
    }
}

#[test]
fn linear_interpolation_reference_scenario() {
    let target = GeoReference::new(3, 3, 1.0, 3.0, 1.0, 3.0, 1.0, 1.0).unwrap();
    let expected = [3.5, 4.5, 5.5, 7.5, 8.5, 9.5, 11.5, 12.5, 13.5];

    // Linear data: cubic and quintic must agree with linear exactly.
    for method in [
        ResampleMethod::Linear,
        ResampleMethod::Cubic,
        ResampleMethod::Quintic,
    ] {
        let mut grid = source_4x4();
        grid.resample_interpolate(&target, method).unwrap();
        assert_eq!(grid.georef().rows, 3);
        assert_eq!(grid.georef().cols, 3);
        assert_close(grid.data(), &expected, 1e-9);
    }
}

#[test]
fn nearest_interpolation_snaps_to_cells() {
    let mut grid = source_4x4();
    // Target centers sit exactly halfway between source centers; rounding
    // breaks ties away from zero, so each sample snaps east/south.
    let target = GeoReference::new(2, 2, 1.0, 3.0, 1.0, 3.0, 2.0, 2.0).unwrap();
    grid.resample_interpolate(&target, ResampleMethod::Nearest)
        .unwrap();
    assert_close(grid.data(), &[6.0, 8.0, 14.0, 16.0], 1e-12);
}

#[test]
fn identity_resample_reproduces_data() {
    let mut grid = source_4x4();
    let original = grid.data().to_vec();
    let target = grid.georef().clone();
    grid.resample_interpolate(&target, ResampleMethod::Linear)
        .unwrap();
    assert_close(grid.data(), &original, 1e-9);
}

#[test]
fn uncontained_target_fails_and_leaves_grid_unchanged() {
    let mut grid = source_5x6();
    let before_data = grid.data().to_vec();
    let before_georef = grid.georef().clone();

    // Pokes past the source's east edge.
    let target = GeoReference::new(3, 3, 3.25, 6.25, 0.75, 3.75, 1.5, 1.5).unwrap();

    let err = grid.resample_area(&target).unwrap_err();
    assert!(matches!(err, GridError::Geometry { .. }));
    let err = grid
        .resample_interpolate(&target, ResampleMethod::Linear)
        .unwrap_err();
    assert!(matches!(err, GridError::Geometry { .. }));

    assert_eq!(grid.data(), before_data.as_slice());
    assert_eq!(grid.georef(), &before_georef);
}

#[test]
fn antimeridian_source_round_trip() {
    // Source spans 170°E through the seam to 170°W.
    let georef = GeoReference::new(11, 21, 170.0, -170.0, 0.0, 10.0, 1.0, 1.0).unwrap();
    let data: Vec<f64> = (0..11 * 21).map(f64::from).collect();
    let mut grid = GridContainer::new(georef, data).unwrap();

    let target = GeoReference::new(7, 11, 175.0, -175.0, 2.0, 8.0, 1.0, 1.0).unwrap();
    grid.resample_interpolate(&target, ResampleMethod::Linear)
        .unwrap();

    assert_eq!(grid.georef().rows, 7);
    assert_eq!(grid.georef().cols, 11);
    assert!(grid.georef().crosses_antimeridian());
    // Upper-left target sample: row 2, col 5 of the source.
    assert!((grid.data()[0] - (2 * 21 + 5) as f64).abs() < 1e-9);
    assert!(grid.data().iter().all(|v| v.is_finite()));
}

#[test]
fn banded_grid_resamples_each_band_independently() {
    let georef = GeoReference::with_bands(
        4,
        4,
        0.5,
        3.5,
        0.5,
        3.5,
        1.0,
        1.0,
        vec!["pga".to_string(), "pgv".to_string()],
    )
    .unwrap();
    let band1: Vec<f64> = (1..=16).map(f64::from).collect();
    let band2: Vec<f64> = band1.iter().map(|v| v * 10.0).collect();
    let data: Vec<f64> = band1.iter().chain(band2.iter()).copied().collect();
    let mut grid = GridContainer::new(georef, data).unwrap();

    let target = GeoReference::new(3, 3, 1.0, 3.0, 1.0, 3.0, 1.0, 1.0).unwrap();
    grid.resample_interpolate(&target, ResampleMethod::Linear)
        .unwrap();

    let expected1 = [3.5, 4.5, 5.5, 7.5, 8.5, 9.5, 11.5, 12.5, 13.5];
    let expected2: Vec<f64> = expected1.iter().map(|v| v * 10.0).collect();
    assert_close(&grid.data()[..9], &expected1, 1e-9);
    assert_close(&grid.data()[9..], &expected2, 1e-9);

    // Band metadata and names survive resampling.
    assert_eq!(grid.georef().band_count, 2);
    assert_eq!(grid.georef().band_names, vec!["pga", "pgv"]);
}

#[test]
fn timestamp_survives_resampling() {
    let stamp = chrono::Utc::now();
    let georef = GeoReference::new(4, 4, 0.5, 3.5, 0.5, 3.5, 1.0, 1.0)
        .unwrap()
        .with_timestamp(stamp);
    let data: Vec<f64> = (1..=16).map(f64::from).collect();
    let mut grid = GridContainer::new(georef, data).unwrap();

    let target = GeoReference::new(3, 3, 1.0, 3.0, 1.0, 3.0, 1.0, 1.0).unwrap();
    grid.resample_interpolate(&target, ResampleMethod::Linear)
        .unwrap();
    assert_eq!(grid.georef().timestamp, Some(stamp));
}

#[test]
fn method_names_parse_or_fail_as_invalid_argument() {
    assert_eq!(
        "nearest".parse::<ResampleMethod>().unwrap(),
        ResampleMethod::Nearest
    );
    let err = "spline".parse::<ResampleMethod>().unwrap_err();
    assert!(matches!(err, GridError::InvalidArgument(_)));
}
