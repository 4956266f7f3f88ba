use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::types::LookupRequest;

/// Inbound proxy-integration event, as delivered by the gateway
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
    #[serde(default)]
    pub multi_value_query_string_parameters: Option<HashMap<String, Vec<String>>>,
}

impl ProxyRequest {
    pub fn new(http_method: impl Into<String>, resource: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            path: path.into(),
            resource: Some(resource.into()),
            ..Default::default()
        }
    }

    pub fn with_path_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_parameters
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Fill both query maps from raw `key=value` pairs in request order
    pub fn with_query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        if pairs.is_empty() {
            return self;
        }
        let mut single = HashMap::new();
        let mut multi: HashMap<String, Vec<String>> = HashMap::new();
        for (key, value) in pairs {
            multi.entry(key.clone()).or_default().push(value.clone());
            single.insert(key, value);
        }
        self.query_string_parameters = Some(single);
        self.multi_value_query_string_parameters = Some(multi);
        self
    }
}

impl From<ProxyRequest> for LookupRequest {
    fn from(event: ProxyRequest) -> Self {
        // `proxy` on greedy routes, `uname` on the single-segment route
        let path_parameter = event
            .path_parameters
            .filter(|p| !p.is_empty())
            .and_then(|mut p| p.remove("proxy").or_else(|| p.remove("uname")));

        LookupRequest {
            method: event.http_method,
            path: event.path,
            path_parameter,
            query: event.query_string_parameters.filter(|q| !q.is_empty()),
            multi_value_query: event
                .multi_value_query_string_parameters
                .filter(|q| !q.is_empty()),
        }
    }
}

/// Outbound proxy-integration response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl ProxyResponse {
    /// Response carrying a body; always tagged as JSON
    pub fn with_body(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self {
            status_code,
            headers: Some(headers),
            body: Some(body.into()),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status_code: 204,
            headers: None,
            body: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_gateway_event() {
        let event: ProxyRequest = serde_json::from_value(json!({
            "resource": "/alumnus/{proxy+}",
            "path": "/alumnus/frank/foo",
            "httpMethod": "GET",
            "headers": { "Accept": "*/*" },
            "pathParameters": { "proxy": "frank/foo" },
            "queryStringParameters": null,
            "multiValueQueryStringParameters": null
        }))
        .unwrap();

        let lookup = LookupRequest::from(event);
        assert_eq!(lookup.method, "GET");
        assert_eq!(lookup.path_parameter.as_deref(), Some("frank/foo"));
        assert!(lookup.query.is_none());
    }

    #[test]
    fn empty_maps_become_absent() {
        let event: ProxyRequest = serde_json::from_value(json!({
            "path": "/alumnus",
            "httpMethod": "GET",
            "pathParameters": {},
            "queryStringParameters": {},
            "multiValueQueryStringParameters": {}
        }))
        .unwrap();

        let lookup = LookupRequest::from(event);
        assert!(lookup.path_parameter.is_none());
        assert!(lookup.query.is_none());
        assert!(lookup.multi_value_query.is_none());
    }

    #[test]
    fn query_pairs_fill_both_maps() {
        let event = ProxyRequest::new("GET", "/alumnus", "/alumnus").with_query_pairs(vec![
            ("uname".into(), "johndoe".into()),
            ("field".into(), "email".into()),
            ("field".into(), "id".into()),
        ]);
        let single = event.query_string_parameters.as_ref().unwrap();
        let multi = event.multi_value_query_string_parameters.as_ref().unwrap();
        assert_eq!(single["field"], "id");
        assert_eq!(multi["field"], vec!["email".to_string(), "id".to_string()]);
    }

    #[test]
    fn no_content_serializes_status_only() {
        let value = serde_json::to_value(ProxyResponse::no_content()).unwrap();
        assert_eq!(value, json!({ "statusCode": 204 }));
    }
}
