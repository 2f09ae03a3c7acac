//! Embedded shape contract for catalog snapshots.
//!
//! The schema under `schema/uav_catalog.schema.json` pins the top-level
//! category-keyed shape: known category names only, category values are
//! objects of named records, plus the `_metadata` and `model_replacements`
//! blocks the validated snapshots carry. It is compiled once and applied to
//! the raw document before typed deserialization so malformed snapshots are
//! rejected with the full violation list instead of the first serde error.

use jsonschema::JSONSchema;
use serde_json::Value;
use std::sync::OnceLock;

static SCHEMA_TEXT: &str = include_str!("../schema/uav_catalog.schema.json");
static SCHEMA_VALUE: OnceLock<Value> = OnceLock::new();
static COMPILED: OnceLock<JSONSchema> = OnceLock::new();

fn compiled_schema() -> &'static JSONSchema {
    COMPILED.get_or_init(|| {
        let value = SCHEMA_VALUE
            .get_or_init(|| serde_json::from_str(SCHEMA_TEXT).expect("embedded schema is valid JSON"));
        JSONSchema::compile(value).expect("embedded schema compiles")
    })
}

/// Validate a raw snapshot document against the shape contract.
///
/// Returns every violation rather than short-circuiting so a hand-edited
/// snapshot surfaces all of its problems in one pass.
pub(crate) fn validate_document(document: &Value) -> Result<(), Vec<String>> {
    let schema = compiled_schema();
    if let Err(errors) = schema.validate(document) {
        let details: Vec<String> = errors.map(|err| err.to_string()).collect();
        return Err(details);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_category_keyed_document() {
        let doc = json!({
            "Battery": {"A": {"CAPACITY": 5000, "VOLTAGE": 14.8}},
            "Motor": {},
            "_metadata": {"version": "v1.0.0"},
            "model_replacements": {"old": "new"}
        });
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn rejects_non_object_top_level() {
        assert!(validate_document(&json!([1, 2, 3])).is_err());
        assert!(validate_document(&json!("catalog")).is_err());
    }

    #[test]
    fn rejects_unknown_category() {
        let errors = validate_document(&json!({"Payload": {}})).unwrap_err();
        assert!(!errors.is_empty());
    }

    #[test]
    fn rejects_scalar_section_values() {
        let doc = json!({"Battery": {"A": 5000}});
        assert!(validate_document(&doc).is_err());
    }
}
