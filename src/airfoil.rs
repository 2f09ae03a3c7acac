//! Airfoil polar estimates backing the catalog's `Airfoil` records.
//!
//! Catalog polars are transcribed from three sources, in decreasing
//! confidence: published wind-tunnel literature (Abbott & von Doenhoff 1959;
//! Gryte et al. 2018 for the Skywalker X8 profile), external solver runs, and
//! a thickness-correlation estimate from generated coordinates. The solver
//! itself runs out of process during curation; this module covers the
//! literature table, the NACA 4-digit coordinate generator, and the
//! correlation fallback so validation can cross-check committed records.

use crate::catalog::Confidence;
use std::fmt;

/// Reynolds number the curated polars are referenced to.
pub const DEFAULT_REYNOLDS: f64 = 1.0e6;

/// How an estimate was produced.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EstimateMethod {
    /// Published wind-tunnel data.
    Literature,
    /// Thickness correlation over generated coordinates.
    CoordinateBased,
}

impl fmt::Display for EstimateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EstimateMethod::Literature => f.write_str("literature"),
            EstimateMethod::CoordinateBased => f.write_str("coordinate_based"),
        }
    }
}

/// Aerodynamic estimate for one airfoil.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AirfoilEstimate {
    pub cl_max: f64,
    pub cd_0: f64,
    pub alpha_stall_deg: f64,
    /// Pitching moment at zero lift; the correlation fallback cannot
    /// estimate it.
    pub cm_0: Option<f64>,
    pub method: EstimateMethod,
    pub confidence: Confidence,
}

/// Published polar values. Columns: CL_max, CD_0, stall angle (deg), CM_0.
const LITERATURE_POLARS: &[(&str, [f64; 4])] = &[
    ("NACA_0012", [1.30, 0.0055, 15.0, 0.0]),
    ("NACA_0015", [1.25, 0.0062, 14.5, 0.0]),
    ("NACA_2412", [1.50, 0.0058, 15.0, -0.048]),
    ("NACA_2415", [1.45, 0.0065, 14.5, -0.050]),
    ("NACA_4412", [1.65, 0.0062, 14.0, -0.085]),
    ("NACA_4415", [1.60, 0.0070, 13.5, -0.090]),
    ("NACA_4418", [1.55, 0.0080, 13.0, -0.095]),
    ("NACA_6412", [1.85, 0.0075, 13.0, -0.125]),
    ("Skywalker_X8", [1.50, 0.021, 14.0, -0.035]),
    ("Eppler_387", [1.40, 0.007, 12.5, -0.060]),
    ("Eppler_214", [1.55, 0.0068, 13.0, -0.075]),
    ("MH_60", [1.35, 0.006, 12.0, -0.045]),
    ("MH_78", [1.50, 0.0068, 12.5, -0.070]),
    ("LS_0413", [1.60, 0.0068, 14.5, -0.085]),
    ("Clark_Y", [1.45, 0.0065, 15.0, -0.058]),
];

/// UIUC coordinate-database file names for the curated airfoil set, used by
/// the external, manually run downloader.
const UIUC_COORDINATE_FILES: &[(&str, &str)] = &[
    ("NACA_0012", "naca0012.dat"),
    ("NACA_0015", "naca0015.dat"),
    ("NACA_2412", "naca2412.dat"),
    ("NACA_2415", "naca2415.dat"),
    ("NACA_4412", "naca4412.dat"),
    ("NACA_4415", "naca4415.dat"),
    ("NACA_4418", "naca4418.dat"),
    ("NACA_6412", "naca6412.dat"),
    ("Eppler_387", "e387.dat"),
    ("Eppler_214", "e214.dat"),
    ("MH_60", "mh60.dat"),
    ("MH_78", "mh78.dat"),
    ("LS_0413", "ls0413.dat"),
    ("Clark_Y", "clarky.dat"),
    // The Skywalker X8 flies a NACA 4415 section (Gryte 2018).
    ("Skywalker_X8", "naca4415.dat"),
];

/// Published polar for a curated airfoil, when the literature covers it.
pub fn literature_polar(name: &str) -> Option<AirfoilEstimate> {
    LITERATURE_POLARS
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, [cl_max, cd_0, alpha_stall_deg, cm_0])| AirfoilEstimate {
            cl_max: *cl_max,
            cd_0: *cd_0,
            alpha_stall_deg: *alpha_stall_deg,
            cm_0: Some(*cm_0),
            method: EstimateMethod::Literature,
            confidence: Confidence::High,
        })
}

/// UIUC coordinate file for a curated airfoil name.
pub fn uiuc_coordinate_file(name: &str) -> Option<&'static str> {
    UIUC_COORDINATE_FILES
        .iter()
        .find(|(entry, _)| *entry == name)
        .map(|(_, file)| *file)
}

/// Estimate an airfoil's polar, preferring literature over the coordinate
/// correlation. Returns `None` for names with neither a literature entry nor
/// derivable coordinates.
pub fn estimate(name: &str) -> Option<AirfoilEstimate> {
    if let Some(polar) = literature_polar(name) {
        return Some(polar);
    }
    coordinates_for(name, 100).map(|coords| coordinate_estimate(&coords))
}

/// Generate NACA 4-digit coordinates with cosine spacing.
///
/// Points run from the trailing edge over the upper surface to the leading
/// edge and back along the lower surface, the usual coordinate-file
/// convention. Returns `None` unless `code` is exactly four digits.
pub fn naca4_coordinates(code: &str, n_points: usize) -> Option<Vec<(f64, f64)>> {
    if code.len() != 4 || !code.bytes().all(|b| b.is_ascii_digit()) || n_points < 2 {
        return None;
    }
    let digits: Vec<u32> = code.chars().filter_map(|c| c.to_digit(10)).collect();
    let m = f64::from(digits[0]) / 100.0;
    let p = f64::from(digits[1]) / 10.0;
    let t = f64::from(digits[2] * 10 + digits[3]) / 100.0;

    let mut upper = Vec::with_capacity(n_points);
    let mut lower = Vec::with_capacity(n_points);

    for i in 0..n_points {
        let beta = std::f64::consts::PI * i as f64 / (n_points - 1) as f64;
        let x = (1.0 - beta.cos()) / 2.0;

        let yt = 5.0
            * t
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4));

        // Symmetric sections (and degenerate camber positions) have a flat
        // camber line.
        let (yc, dyc_dx) = if m == 0.0 || p == 0.0 {
            (0.0, 0.0)
        } else if x < p {
            (
                m / p.powi(2) * (2.0 * p * x - x.powi(2)),
                2.0 * m / p.powi(2) * (p - x),
            )
        } else {
            (
                m / (1.0 - p).powi(2) * ((1.0 - 2.0 * p) + 2.0 * p * x - x.powi(2)),
                2.0 * m / (1.0 - p).powi(2) * (p - x),
            )
        };

        let theta = dyc_dx.atan();
        upper.push((x - yt * theta.sin(), yc + yt * theta.cos()));
        lower.push((x + yt * theta.sin(), yc - yt * theta.cos()));
    }

    let mut coords: Vec<(f64, f64)> = upper.into_iter().rev().collect();
    coords.extend(lower.into_iter().skip(1));
    Some(coords)
}

fn coordinates_for(name: &str, n_points: usize) -> Option<Vec<(f64, f64)>> {
    if let Some(code) = name.strip_prefix("NACA_") {
        return naca4_coordinates(code, n_points);
    }
    if name == "Skywalker_X8" {
        return naca4_coordinates("4415", n_points);
    }
    None
}

/// Thickness-correlation estimate over a coordinate set.
fn coordinate_estimate(coords: &[(f64, f64)]) -> AirfoilEstimate {
    let max_y = coords.iter().map(|(_, y)| *y).fold(f64::NEG_INFINITY, f64::max);
    let min_y = coords.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
    let thickness = max_y - min_y;

    let cl_max = if thickness < 0.12 {
        1.3
    } else if thickness < 0.15 {
        1.5
    } else {
        1.4
    };

    AirfoilEstimate {
        cl_max,
        cd_0: 0.0055 + 0.01 * thickness,
        alpha_stall_deg: 15.0 - 2.0 * (thickness - 0.12) / 0.03,
        cm_0: None,
        method: EstimateMethod::CoordinateBased,
        confidence: Confidence::Medium,
    }
}
