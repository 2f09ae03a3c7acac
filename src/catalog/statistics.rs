//! On-demand summary statistics over a loaded catalog.
//!
//! Everything here is a pure read computed from the in-memory document:
//! per-category record counts, verified-record counts for categories that
//! carry a `VERIFIED` flag, and min/max/mean summaries of weight and cost.
//! The results serialize to JSON for the `catalog-stats` helper.

use crate::catalog::identity::Category;
use crate::catalog::model::ComponentCatalog;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize)]
/// Snapshot-wide summary keyed by category name.
pub struct CatalogStatistics {
    pub categories: BTreeMap<String, CategoryStatistics>,
    pub total_components: usize,
}

impl CatalogStatistics {
    /// Summary for one category. Every category is present, including empty
    /// ones.
    pub fn category(&self, category: Category) -> &CategoryStatistics {
        &self.categories[category.as_str()]
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct CategoryStatistics {
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_g: Option<NumericSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<NumericSummary>,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl NumericSummary {
    /// Summarize the present values of an optional attribute. Absent values
    /// are skipped rather than treated as zero; a category with no values at
    /// all yields no summary.
    pub fn of(values: impl Iterator<Item = Option<f64>>) -> Option<Self> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        for value in values.flatten() {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        Some(Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Compute the full summary for one catalog.
pub fn compute(catalog: &ComponentCatalog) -> CatalogStatistics {
    let mut categories = BTreeMap::new();

    categories.insert(
        Category::Battery.as_str().to_string(),
        CategoryStatistics {
            count: catalog.batteries.len(),
            verified: None,
            weight_g: NumericSummary::of(catalog.batteries.records().map(|r| r.weight_g)),
            cost_usd: NumericSummary::of(catalog.batteries.records().map(|r| r.cost_usd)),
        },
    );
    categories.insert(
        Category::Motor.as_str().to_string(),
        CategoryStatistics {
            count: catalog.motors.len(),
            verified: Some(catalog.motors.records().filter(|r| r.is_verified()).count()),
            weight_g: NumericSummary::of(catalog.motors.records().map(|r| r.weight_g)),
            cost_usd: NumericSummary::of(catalog.motors.records().map(|r| r.cost_usd)),
        },
    );
    categories.insert(
        Category::Esc.as_str().to_string(),
        CategoryStatistics {
            count: catalog.escs.len(),
            verified: Some(catalog.escs.records().filter(|r| r.is_verified()).count()),
            weight_g: NumericSummary::of(catalog.escs.records().map(|r| r.weight_g)),
            cost_usd: NumericSummary::of(catalog.escs.records().map(|r| r.cost_usd)),
        },
    );
    categories.insert(
        Category::Propeller.as_str().to_string(),
        CategoryStatistics {
            count: catalog.propellers.len(),
            verified: None,
            weight_g: NumericSummary::of(catalog.propellers.records().map(|r| r.weight_g)),
            cost_usd: NumericSummary::of(catalog.propellers.records().map(|r| r.cost_usd)),
        },
    );
    categories.insert(
        Category::PropellerAero.as_str().to_string(),
        CategoryStatistics {
            count: catalog.propeller_aero.len(),
            ..CategoryStatistics::default()
        },
    );
    categories.insert(
        Category::Airfoil.as_str().to_string(),
        CategoryStatistics {
            count: catalog.airfoils.len(),
            ..CategoryStatistics::default()
        },
    );

    CatalogStatistics {
        total_components: catalog.total_components(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn summary_skips_absent_values() {
        let summary = NumericSummary::of(
            [Some(10.0), None, Some(30.0), Some(20.0)].into_iter(),
        )
        .unwrap();
        assert_eq!(summary.min, 10.0);
        assert_eq!(summary.max, 30.0);
        assert!((summary.mean - 20.0).abs() < 1e-12);
    }

    #[test]
    fn summary_of_nothing_is_none() {
        assert!(NumericSummary::of([None, None].into_iter()).is_none());
        assert!(NumericSummary::of(std::iter::empty()).is_none());
    }

    #[test]
    fn compute_counts_every_category() {
        let catalog: ComponentCatalog = serde_json::from_value(json!({
            "Battery": {
                "A": {"CAPACITY": 5000.0, "WEIGHT": 500.0, "COST": 60.0},
                "B": {"CAPACITY": 9000.0, "WEIGHT": 900.0}
            },
            "Motor": {
                "M": {"KV": 700.0, "VERIFIED": true}
            }
        }))
        .unwrap();
        let stats = compute(&catalog);

        assert_eq!(stats.category(Category::Battery).count, 2);
        assert_eq!(stats.category(Category::Motor).count, 1);
        assert_eq!(stats.category(Category::Motor).verified, Some(1));
        assert_eq!(stats.category(Category::Esc).count, 0);
        assert_eq!(stats.total_components, 3);

        let weight = stats.category(Category::Battery).weight_g.unwrap();
        assert_eq!(weight.min, 500.0);
        assert_eq!(weight.max, 900.0);
        assert!((weight.mean - 700.0).abs() < 1e-12);

        // Only one battery states a cost; the mean reflects present values.
        let cost = stats.category(Category::Battery).cost_usd.unwrap();
        assert_eq!(cost.mean, 60.0);
    }
}
