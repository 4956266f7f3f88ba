use serde_json::{Map, Value};

use super::error::FilterError;
use crate::data::Alumnus;

/// Ordered list of field names requested through repeated `field` query parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldFilter {
    fields: Vec<String>,
}

impl FieldFilter {
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Build a mapping of exactly the requested fields, in request order.
    ///
    /// Fails on the first field the record does not have. A field named twice
    /// keeps its first position.
    pub fn apply(&self, record: &Alumnus) -> Result<Map<String, Value>, FilterError> {
        let mut projected = Map::new();
        for name in &self.fields {
            let value = record
                .field(name)
                .ok_or_else(|| FilterError::UnknownField(name.clone()))?;
            if !projected.contains_key(name) {
                projected.insert(name.clone(), value);
            }
        }
        Ok(projected)
    }
}

impl From<Vec<String>> for FieldFilter {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}
