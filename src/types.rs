//! Shared types used across the codebase

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::filter::FieldFilter;

/// Verdict carried by a policy statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    Allow,
    Deny,
}

/// A record lookup as seen by the record handler.
///
/// Empty parameter maps are stored as `None`, so "no query string" and
/// "empty query string" behave the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupRequest {
    pub method: String,
    pub path: String,
    /// Raw path parameter, possibly spanning several segments on greedy routes
    pub path_parameter: Option<String>,
    pub query: Option<HashMap<String, String>>,
    pub multi_value_query: Option<HashMap<String, Vec<String>>>,
}

impl LookupRequest {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_path_parameter(mut self, value: impl Into<String>) -> Self {
        self.path_parameter = Some(value.into());
        self
    }

    /// Add a query parameter the way the gateway does: the single-value map
    /// keeps the last value, the multi-value map keeps all of them.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        self.multi_value_query
            .get_or_insert_with(HashMap::new)
            .entry(key.clone())
            .or_default()
            .push(value.clone());
        self.query.get_or_insert_with(HashMap::new).insert(key, value);
        self
    }

    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.as_ref()?.get(key).map(String::as_str)
    }

    pub fn has_query(&self) -> bool {
        self.query.as_ref().is_some_and(|q| !q.is_empty())
    }

    /// Fields requested through repeated `field` parameters
    pub fn field_filter(&self) -> FieldFilter {
        self.multi_value_query
            .as_ref()
            .and_then(|q| q.get("field"))
            .cloned()
            .map(FieldFilter::from)
            .unwrap_or_default()
    }
}
