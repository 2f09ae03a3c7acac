//! ESC/motor matching over a loaded catalog.
//!
//! Matching is a read-only pass over the ESC section: filter by current
//! headroom, cell-range compatibility, weight ceiling and BEC availability,
//! then score the survivors on efficiency against weight and cost. An OPTO
//! controller can still win when a BEC is required; it is just charged the
//! weight and cost of the external UBEC it would need.

use crate::catalog::{ComponentCatalog, EscRecord};
use std::fmt;

/// Selection margin applied to the motor's current draw.
pub const CURRENT_SAFETY_MARGIN: f64 = 0.20;

/// Operating constraint: the motor must draw at most this fraction of the
/// controller's continuous rating.
pub const CURRENT_HEADROOM_FACTOR: f64 = 0.80;

/// Typical avionics bus requirement the BEC must cover.
pub const AVIONICS_VOLTAGE_V: f64 = 5.0;
pub const AVIONICS_CURRENT_A: f64 = 2.0;

/// Weight and cost of the external UBEC an OPTO controller needs.
const UBEC_WEIGHT_G: f64 = 20.0;
const UBEC_COST_USD: f64 = 25.0;

/// Internal resistance assumed when a datasheet omits it, mΩ.
const DEFAULT_RESISTANCE_MOHM: f64 = 2.0;

/// What the candidate controller must accommodate.
#[derive(Clone, Copy, Debug)]
pub struct EscRequirements {
    /// Motor maximum current draw, A.
    pub motor_current_a: f64,
    /// Battery series cell count.
    pub battery_cells: u32,
    /// Optional controller weight ceiling, grams.
    pub weight_limit_g: Option<f64>,
    /// Whether the airframe powers its avionics from the controller's BEC.
    pub require_bec: bool,
}

/// Names of every compatible controller, in catalog order.
pub fn compatible_escs<'a>(catalog: &'a ComponentCatalog, req: &EscRequirements) -> Vec<&'a str> {
    let required_current = req.motor_current_a * (1.0 + CURRENT_SAFETY_MARGIN);
    let mut compatible = Vec::new();

    for (name, esc) in catalog.escs.iter() {
        if esc.cont_current().unwrap_or(0.0) < required_current {
            continue;
        }

        let cells_min = esc.cells_min().unwrap_or(0);
        let cells_max = esc.cells_max().unwrap_or(0);
        if !(cells_min <= req.battery_cells && req.battery_cells <= cells_max) {
            continue;
        }

        if let Some(limit) = req.weight_limit_g {
            let mut weight = esc.weight_g.unwrap_or(0.0);
            if req.require_bec && !esc.has_bec() {
                weight += UBEC_WEIGHT_G;
            }
            if weight > limit {
                continue;
            }
        }

        compatible.push(name);
    }

    compatible
}

/// Pick the best compatible controller.
///
/// Score: `efficiency × 2 − weight_g/100 − cost_usd/1000`, with the UBEC
/// penalties applied to OPTO controllers when a BEC is required. Returns
/// `None` when nothing is compatible.
pub fn select_optimal<'a>(catalog: &'a ComponentCatalog, req: &EscRequirements) -> Option<&'a str> {
    let mut best: Option<(&str, f64)> = None;

    for name in compatible_escs(catalog, req) {
        let esc = catalog.escs.get(name)?;
        let efficiency = esc.efficiency.unwrap_or(0.90);
        let mut weight = esc.weight_g.unwrap_or(100.0);
        let mut cost = esc.cost_usd.unwrap_or(100.0);

        if req.require_bec && !esc.has_bec() {
            weight += UBEC_WEIGHT_G;
            cost += UBEC_COST_USD;
        }

        let score = efficiency * 2.0 - weight / 100.0 - cost / 1000.0;
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((name, score));
        }
    }

    best.map(|(name, _)| name)
}

/// Outcome of the current-headroom operating constraint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurrentHeadroom {
    pub satisfied: bool,
    /// Relative margin: `(0.8 × I_esc − I_motor) / I_motor`.
    pub margin: f64,
}

/// Check `I_motor ≤ 0.8 × I_esc` for one controller.
pub fn current_headroom(motor_current_a: f64, esc: &EscRecord) -> CurrentHeadroom {
    let limit = CURRENT_HEADROOM_FACTOR * esc.cont_current().unwrap_or(0.0);
    let margin = if motor_current_a > 0.0 {
        (limit - motor_current_a) / motor_current_a
    } else {
        1.0
    };
    CurrentHeadroom {
        satisfied: motor_current_a <= limit,
        margin,
    }
}

/// Voltage drop across the controller at the given current: `I × R`.
pub fn voltage_drop_v(motor_current_a: f64, esc: &EscRecord) -> f64 {
    let resistance_ohm = esc.resistance_mohm.unwrap_or(DEFAULT_RESISTANCE_MOHM) / 1000.0;
    motor_current_a * resistance_ohm
}

/// Conduction loss in the controller at the given current: `I² × R`.
pub fn power_loss_w(motor_current_a: f64, esc: &EscRecord) -> f64 {
    let resistance_ohm = esc.resistance_mohm.unwrap_or(DEFAULT_RESISTANCE_MOHM) / 1000.0;
    motor_current_a * motor_current_a * resistance_ohm
}

/// Whether a controller's BEC can power the avionics bus.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BecVerdict {
    /// Integrated BEC covers the requirement.
    Adequate { voltage_v: f64, current_a: f64 },
    /// OPTO controller; an external UBEC is needed.
    OptoOnly,
    /// BEC voltage is outside the ±0.5 V window around the requirement.
    VoltageMismatch { available_v: f64, required_v: f64 },
    /// BEC cannot source the required current.
    CurrentShortfall { available_a: f64, required_a: f64 },
}

impl BecVerdict {
    pub fn is_adequate(&self) -> bool {
        matches!(self, BecVerdict::Adequate { .. })
    }
}

impl fmt::Display for BecVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BecVerdict::Adequate {
                voltage_v,
                current_a,
            } => write!(f, "BEC OK: {voltage_v}V/{current_a}A"),
            BecVerdict::OptoOnly => write!(f, "OPTO controller, external UBEC required"),
            BecVerdict::VoltageMismatch {
                available_v,
                required_v,
            } => write!(f, "BEC voltage {available_v}V does not match required {required_v}V"),
            BecVerdict::CurrentShortfall {
                available_a,
                required_a,
            } => write!(f, "BEC current {available_a}A below required {required_a}A"),
        }
    }
}

/// Check one controller's BEC against an avionics requirement.
pub fn bec_capability(esc: &EscRecord, required_v: f64, required_a: f64) -> BecVerdict {
    let voltage = esc.bec_voltage_v.unwrap_or(0.0);
    let current = esc.bec_current_a.unwrap_or(0.0);

    if voltage == 0.0 {
        return BecVerdict::OptoOnly;
    }
    if (voltage - required_v).abs() > 0.5 {
        return BecVerdict::VoltageMismatch {
            available_v: voltage,
            required_v,
        };
    }
    if current < required_a {
        return BecVerdict::CurrentShortfall {
            available_a: current,
            required_a,
        };
    }
    BecVerdict::Adequate {
        voltage_v: voltage,
        current_a: current,
    }
}
