//! Propeller CT/CP lookup with a three-tier match strategy.
//!
//! The wind-tunnel coefficient table only covers the geometries that were
//! actually measured, so lookups degrade in steps: an exact diameter×pitch
//! match, then the nearest measured geometry scaled by a Reynolds-regime
//! correction, then a flat conservative efficiency. Each tier reports its
//! accuracy so downstream sizing can weigh the numbers accordingly.
//!
//! The Reynolds exponents follow Deters et al. (2014): thrust scaling is
//! steep in the laminar regime below Re 50k, transitions linearly to 100k,
//! and flattens in the turbulent regime. Power is roughly half as sensitive.

use crate::catalog::{ComponentCatalog, PropellerAeroRecord};

/// Sea-level standard air density, kg/m³.
pub const RHO_SEA_LEVEL: f64 = 1.225;

/// Scaled matches require the pitch/diameter ratio within ±5%; validation
/// showed scaling errors past 40% once P/D diverges further.
pub const PD_RATIO_TOLERANCE: f64 = 0.05;

/// Scaled matches additionally require the diameter within ±30% for physical
/// similarity.
pub const DIAMETER_TOLERANCE: f64 = 0.30;

/// Flat total efficiency of the fallback tier.
pub const SIMPLE_ETA_TOTAL: f64 = 0.50;

/// Confidence tier of a performance lookup.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Accuracy {
    /// Exact wind-tunnel geometry, roughly ±5%.
    High,
    /// Reynolds-scaled from a similar geometry, roughly ±15%.
    Medium,
    /// Flat efficiency model, roughly ±30%.
    Low,
}

/// Result of a performance lookup.
#[derive(Clone, Debug, PartialEq)]
pub enum PropellerPerformance {
    /// The requested geometry is in the table.
    Exact {
        /// Table key the coefficients came from.
        source: String,
        ct_coeffs: Vec<f64>,
        cp_coeffs: Vec<f64>,
        j_range: [f64; 2],
        ct_r2: Option<f64>,
        cp_r2: Option<f64>,
    },
    /// Coefficients scaled from the nearest measured geometry.
    Scaled {
        source: String,
        ct_coeffs: Vec<f64>,
        cp_coeffs: Vec<f64>,
        j_range: [f64; 2],
        /// Relative P/D mismatch against the source geometry.
        pd_error: f64,
    },
    /// No similar geometry measured; flat efficiency only.
    Simple { eta_total: f64 },
}

impl PropellerPerformance {
    pub fn accuracy(&self) -> Accuracy {
        match self {
            PropellerPerformance::Exact { .. } => Accuracy::High,
            PropellerPerformance::Scaled { .. } => Accuracy::Medium,
            PropellerPerformance::Simple { .. } => Accuracy::Low,
        }
    }

    /// Table key the coefficients came from, when any did.
    pub fn source(&self) -> Option<&str> {
        match self {
            PropellerPerformance::Exact { source, .. }
            | PropellerPerformance::Scaled { source, .. } => Some(source),
            PropellerPerformance::Simple { .. } => None,
        }
    }

    fn coefficients(&self) -> Option<(&[f64], &[f64])> {
        match self {
            PropellerPerformance::Exact {
                ct_coeffs,
                cp_coeffs,
                ..
            }
            | PropellerPerformance::Scaled {
                ct_coeffs,
                cp_coeffs,
                ..
            } => Some((ct_coeffs, cp_coeffs)),
            PropellerPerformance::Simple { .. } => None,
        }
    }

    /// Thrust in N at advance ratio `j`: `CT · ρ · n² · D⁴`.
    ///
    /// The fallback tier has no coefficients and yields `None`.
    pub fn thrust_n(&self, j: f64, rpm: f64, diameter_m: f64, rho: f64) -> Option<f64> {
        let (ct_coeffs, _) = self.coefficients()?;
        let n = rpm / 60.0;
        let ct = polyval(ct_coeffs, j);
        Some(ct * rho * n.powi(2) * diameter_m.powi(4))
    }

    /// Shaft power in W at advance ratio `j`: `CP · ρ · n³ · D⁵`.
    pub fn power_w(&self, j: f64, rpm: f64, diameter_m: f64, rho: f64) -> Option<f64> {
        let (_, cp_coeffs) = self.coefficients()?;
        let n = rpm / 60.0;
        let cp = polyval(cp_coeffs, j);
        Some(cp * rho * n.powi(3) * diameter_m.powi(5))
    }

    /// Propulsive efficiency `η = J · CT / CP`, or the flat fallback value.
    pub fn efficiency(&self, j: f64) -> f64 {
        match self.coefficients() {
            Some((ct_coeffs, cp_coeffs)) => {
                let ct = polyval(ct_coeffs, j);
                let cp = polyval(cp_coeffs, j);
                if cp > 0.0 { j * ct / cp } else { 0.0 }
            }
            None => match self {
                PropellerPerformance::Simple { eta_total } => *eta_total,
                _ => 0.0,
            },
        }
    }
}

/// Performance lookups over one catalog's `PropellerAero` table.
///
/// The model borrows an explicitly constructed catalog; there is no shared
/// global instance.
#[derive(Clone, Copy, Debug)]
pub struct PropellerModel<'a> {
    catalog: &'a ComponentCatalog,
}

impl<'a> PropellerModel<'a> {
    pub fn new(catalog: &'a ComponentCatalog) -> Self {
        Self { catalog }
    }

    /// Look up performance coefficients for a geometry in mm.
    pub fn performance(&self, diameter_mm: f64, pitch_mm: f64) -> PropellerPerformance {
        let d = diameter_mm.round();
        let p = pitch_mm.round();
        let key = format!("{}x{}", d as i64, p as i64);

        if let Some(record) = self.catalog.propeller_aero.get(&key) {
            return PropellerPerformance::Exact {
                source: key,
                ct_coeffs: record.ct_coeffs.clone(),
                cp_coeffs: record.cp_coeffs.clone(),
                j_range: record.j_range(),
                ct_r2: record.ct_r2,
                cp_r2: record.cp_r2,
            };
        }

        if let Some((record, pd_error)) = self.find_closest(d, p) {
            let (ct_coeffs, cp_coeffs) = scale_coefficients(record, d, p);
            return PropellerPerformance::Scaled {
                source: format!("{}x{}", record.d_mm as i64, record.p_mm as i64),
                ct_coeffs,
                cp_coeffs,
                j_range: record.j_range(),
                pd_error,
            };
        }

        PropellerPerformance::Simple {
            eta_total: SIMPLE_ETA_TOTAL,
        }
    }

    /// Nearest measured geometry by diameter among records whose P/D ratio is
    /// within tolerance. Returns the record and its relative P/D mismatch.
    fn find_closest(&self, d: f64, p: f64) -> Option<(&'a PropellerAeroRecord, f64)> {
        if d <= 0.0 {
            return None;
        }
        let target_pd = p / d;
        let mut best: Option<(&PropellerAeroRecord, f64)> = None;
        let mut best_size_diff = f64::INFINITY;

        for record in self.catalog.propeller_aero.records() {
            if record.d_mm <= 0.0 {
                continue;
            }
            let pd_diff = if target_pd > 0.0 {
                (record.pd_ratio() - target_pd).abs() / target_pd
            } else {
                1.0
            };
            if pd_diff > PD_RATIO_TOLERANCE {
                continue;
            }
            let size_diff = (record.d_mm - d).abs() / d;
            if size_diff < best_size_diff {
                best_size_diff = size_diff;
                best = Some((record, pd_diff));
            }
        }

        if best_size_diff < DIAMETER_TOLERANCE {
            best
        } else {
            None
        }
    }
}

/// Scale CT/CP coefficients from a measured geometry to the target using a
/// Reynolds-regime exponent. The relative Reynolds number for a fixed rpm is
/// proportional to pitch × diameter, so the constants cancel in the ratio.
fn scale_coefficients(base: &PropellerAeroRecord, d: f64, p: f64) -> (Vec<f64>, Vec<f64>) {
    let re_base = relative_reynolds(base.d_mm, base.p_mm);
    let re_target = relative_reynolds(d, p);

    let n_ct = reynolds_exponent_ct(re_base, re_target);
    let n_cp = reynolds_exponent_cp(re_base, re_target);

    let re_ratio = re_target / re_base;
    let ct_scale = re_ratio.powf(-n_ct);
    let cp_scale = re_ratio.powf(-n_cp);

    let ct = base.ct_coeffs.iter().map(|c| c * ct_scale).collect();
    let cp = base.cp_coeffs.iter().map(|c| c * cp_scale).collect();
    (ct, cp)
}

fn relative_reynolds(d_mm: f64, p_mm: f64) -> f64 {
    p_mm * d_mm
}

/// Reynolds exponent for CT scaling: 0.15 in the laminar regime below 50k,
/// linear transition to 0.08 by 100k, flat above.
fn reynolds_exponent_ct(re1: f64, re2: f64) -> f64 {
    let re_avg = (re1 + re2) / 2.0;
    if re_avg < 50_000.0 {
        0.15
    } else if re_avg < 100_000.0 {
        let fraction = (re_avg - 50_000.0) / 50_000.0;
        0.15 - 0.07 * fraction
    } else {
        0.08
    }
}

/// Reynolds exponent for CP scaling. Power is less Re-sensitive than thrust.
fn reynolds_exponent_cp(re1: f64, re2: f64) -> f64 {
    let re_avg = (re1 + re2) / 2.0;
    if re_avg < 50_000.0 {
        0.08
    } else if re_avg < 100_000.0 {
        let fraction = (re_avg - 50_000.0) / 50_000.0;
        0.08 - 0.04 * fraction
    } else {
        0.04
    }
}

/// Evaluate a polynomial given coefficients in highest-degree-first order.
pub fn polyval(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, c| acc * x + c)
}
