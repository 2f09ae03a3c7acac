use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Versioned key for a catalog snapshot (e.g., `v1.1.0_validated`).
///
/// Snapshots are distinct immutable files; the key comes from the snapshot's
/// `_metadata.version` when present, otherwise from the file stem. Consumers
/// use it to resolve components against the snapshot they were curated in.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotKey(pub String);

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Top-level component grouping in a snapshot document.
///
/// The set is fixed: snapshots with other top-level keys are rejected at load
/// rather than silently carried along. `Airfoil` sections may be spelled
/// `Wing` in older snapshots; both parse to the same category.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Category {
    Battery,
    Motor,
    Esc,
    Propeller,
    PropellerAero,
    Airfoil,
}

impl Category {
    /// Every category, in the order snapshots conventionally list them.
    pub const ALL: [Category; 6] = [
        Category::Battery,
        Category::Motor,
        Category::Esc,
        Category::Propeller,
        Category::PropellerAero,
        Category::Airfoil,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Battery => "Battery",
            Category::Motor => "Motor",
            Category::Esc => "ESC",
            Category::Propeller => "Propeller",
            Category::PropellerAero => "PropellerAero",
            Category::Airfoil => "Airfoil",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Battery" => Some(Category::Battery),
            "Motor" => Some(Category::Motor),
            "ESC" => Some(Category::Esc),
            "Propeller" => Some(Category::Propeller),
            "PropellerAero" => Some(Category::PropellerAero),
            "Airfoil" | "Wing" => Some(Category::Airfoil),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Category::from_str(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown category '{value}'")))
    }
}

/// Provenance confidence recorded on validated airfoil records.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_and_accepts_wing_alias() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            let back: Category = serde_json::from_str(&json).unwrap();
            assert_eq!(back, category);
        }

        let wing: Category = serde_json::from_str("\"Wing\"").unwrap();
        assert_eq!(wing, Category::Airfoil);
        assert_eq!(serde_json::to_string(&wing).unwrap(), "\"Airfoil\"");
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(serde_json::from_str::<Category>("\"Payload\"").is_err());
        assert!(Category::from_str("payload").is_none());
    }

    #[test]
    fn confidence_serializes_lowercase() {
        let json = serde_json::to_string(&Confidence::High).unwrap();
        assert_eq!(json, "\"high\"");
        let back: Confidence = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(back, Confidence::Medium);
    }

    #[test]
    fn snapshot_key_round_trips() {
        let key = SnapshotKey("v1.1.0_validated".to_string());
        let serialized = serde_json::to_string(&key).unwrap();
        assert_eq!(serialized, "\"v1.1.0_validated\"");
        let parsed: SnapshotKey = serde_json::from_str(&serialized).unwrap();
        assert_eq!(parsed, key);
    }
}
