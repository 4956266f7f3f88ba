// handlers/alumnus.rs - record handler shared by the GET and ANY APIs
//
// Each step short-circuits: parameter check, method check, identifier
// extraction, lookup, optional field projection, response.

use serde_json::Value;
use tracing::{debug, info};

use crate::api::ProxyResponse;
use crate::data::{alumni, find_by_uname, Alumnus};
use crate::error::ApiError;
use crate::types::LookupRequest;

/// Collection resource; requests here must carry `?uname=`
pub const BASE_PATH: &str = "/alumnus";

const MISSING_UNAME: &str = "uname is a required query parameter";

/// Serve one lookup against the fixed record set
pub fn handle(request: &LookupRequest) -> ProxyResponse {
    handle_with(request, alumni())
}

/// Serve one lookup against `source`
pub fn handle_with(request: &LookupRequest, source: &[Alumnus]) -> ProxyResponse {
    match lookup(request, source) {
        Ok(Some(body)) => ProxyResponse::with_body(200, body.to_string()),
        Ok(None) => ProxyResponse::no_content(),
        Err(e) => e.into_proxy_response(),
    }
}

fn lookup(request: &LookupRequest, source: &[Alumnus]) -> Result<Option<Value>, ApiError> {
    // Gateway-side parameter validation is off, so the handler enforces it
    if request.path == BASE_PATH && request.query_value("uname").is_none() {
        info!("Missing uname query parameter, exiting");
        return Err(ApiError::bad_request(MISSING_UNAME));
    }

    if request.method != "GET" {
        info!("{} not supported", request.method);
        return Err(ApiError::not_implemented(format!("{} not supported", request.method)));
    }

    let Some(uname) = extract_identifier(request) else {
        info!("No identifier in path {}, exiting", request.path);
        return Err(ApiError::bad_request(MISSING_UNAME));
    };

    let Some(alumnus) = find_by_uname(&uname, source) else {
        info!("{} not found, exiting", uname);
        return Ok(None);
    };

    let field_filter = request.field_filter();
    let body = if field_filter.is_empty() {
        serde_json::to_value(alumnus).map_err(|e| {
            tracing::error!("Failed to serialize record: {}", e);
            ApiError::internal_server_error("Failed to format response")
        })?
    } else {
        match field_filter.apply(alumnus) {
            Ok(projected) => Value::Object(projected),
            Err(e) => {
                info!("filter {:?} is invalid ({}), exiting", field_filter.fields(), e);
                return Err(e.into());
            }
        }
    };

    debug!("Result: {}", body);
    Ok(Some(body))
}

/// Username to look up.
///
/// The path parameter is read first and only its first segment counts
/// (`frank` from `frank/foo`). On the base path a query string then
/// overwrites it with `uname`.
fn extract_identifier(request: &LookupRequest) -> Option<String> {
    let mut identifier = request
        .path_parameter
        .as_deref()
        .and_then(|param| param.split('/').next())
        .map(str::to_string);

    if request.path == BASE_PATH && request.has_query() {
        if let Some(uname) = request.query_value("uname") {
            identifier = Some(uname.to_string());
        }
    }

    identifier
}
