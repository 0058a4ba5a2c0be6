use anyhow::{Context, Result};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

/// Ordered column-name -> selector pairs. Fields are filled in this order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMapping {
    fields: Vec<(String, String)>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a column. Re-inserting an existing column replaces its selector
    /// and keeps its original position.
    pub fn insert(&mut self, column: impl Into<String>, selector: impl Into<String>) {
        let column = column.into();
        let selector = selector.into();
        match self.fields.iter_mut().find(|(c, _)| *c == column) {
            Some((_, existing)) => *existing = selector,
            None => self.fields.push((column, selector)),
        }
    }

    pub fn with(mut self, column: impl Into<String>, selector: impl Into<String>) -> Self {
        self.insert(column, selector);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(c, s)| (c.as_str(), s.as_str()))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Load a mapping from a YAML or JSON object (`column: selector` pairs).
    /// JSON is a subset of YAML, so one parser covers both.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read field mapping {}", path.display()))?;
        Self::from_yaml_str(&contents)
            .with_context(|| format!("Invalid field mapping in {}", path.display()))
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let mapping: FieldMapping = serde_yaml::from_str(contents)?;
        if mapping.is_empty() {
            anyhow::bail!("Field mapping must contain at least one column");
        }
        Ok(mapping)
    }
}

impl Default for FieldMapping {
    /// The sample form: first name, last name and e-mail edit boxes
    fn default() -> Self {
        Self::new()
            .with("Nome", "role:Edit|name:Nome")
            .with("Cognome", "role:Edit|name:Cognome")
            .with("Email", "role:Edit|name:Email")
    }
}

impl Serialize for FieldMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct FieldMappingVisitor;

impl<'de> Visitor<'de> for FieldMappingVisitor {
    type Value = FieldMapping;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of column names to selectors")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut mapping = FieldMapping::new();
        while let Some((column, selector)) = access.next_entry::<String, String>()? {
            if mapping.columns().any(|c| c == column) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate column '{column}'"
                )));
            }
            mapping.insert(column, selector);
        }
        Ok(mapping)
    }
}

impl<'de> Deserialize<'de> for FieldMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(FieldMappingVisitor)
    }
}
