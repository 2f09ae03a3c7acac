//! Insertion-ordered component sections.
//!
//! Snapshot categories are JSON objects whose key order is meaningful:
//! enumeration reports names in source-document order, not sorted. `Section`
//! deserializes a category object into a vector of named records, preserving
//! encounter order and rejecting duplicate names so a snapshot cannot
//! silently shadow a component.

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// One category's records, in source-document order.
#[derive(Clone, Debug, PartialEq)]
pub struct Section<T> {
    entries: Vec<(String, T)>,
}

impl<T> Section<T> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Component names in source-document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Resolve a record by name.
    ///
    /// Sections are small curated sets; a linear scan keeps the structure a
    /// plain ordered vector.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    /// Records without their names, in source-document order.
    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, record)| record)
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> FromIterator<(String, T)> for Section<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<T: Serialize> Serialize for Section<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Section<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(SectionVisitor {
            marker: PhantomData,
        })
    }
}

struct SectionVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for SectionVisitor<T> {
    type Value = Section<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of named component records")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries: Vec<(String, T)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, record)) = access.next_entry::<String, T>()? {
            if entries.iter().any(|(existing, _)| *existing == name) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate component name '{name}'"
                )));
            }
            entries.push((name, record));
        }
        Ok(Section { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn preserves_source_order() {
        let doc = r#"{"Zulu": {"a": 1.0}, "Alpha": {"a": 2.0}, "Mike": {"a": 3.0}}"#;
        let section: Section<BTreeMap<String, f64>> = serde_json::from_str(doc).unwrap();
        let names: Vec<&str> = section.names().collect();
        assert_eq!(names, vec!["Zulu", "Alpha", "Mike"]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let doc = r#"{"Twin": {"a": 1.0}, "Twin": {"a": 2.0}}"#;
        let result: Result<Section<BTreeMap<String, f64>>, _> = serde_json::from_str(doc);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate component name 'Twin'"), "{err}");
    }

    #[test]
    fn get_resolves_by_name() {
        let section: Section<BTreeMap<String, f64>> =
            serde_json::from_value(json!({"One": {"a": 1.0}, "Two": {"a": 2.0}})).unwrap();
        assert!(section.get("Two").is_some());
        assert!(section.get("Three").is_none());
    }

    #[test]
    fn serializes_in_order() {
        let doc = r#"{"B": {}, "A": {}}"#;
        let section: Section<BTreeMap<String, f64>> = serde_json::from_str(doc).unwrap();
        let out = serde_json::to_string(&section).unwrap();
        assert_eq!(out, r#"{"B":{},"A":{}}"#);
    }
}
