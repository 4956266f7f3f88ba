use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::Response,
};

use crate::api::AuthorizerEvent;
use crate::auth::Authorizer;
use crate::error::ApiError;

/// What one REST API needs to run its token authorizer
#[derive(Clone, Debug)]
pub struct AuthorizerBinding {
    pub authorizer: Arc<Authorizer>,
    /// `arn:aws:execute-api:{region}:{account}:{api id}/{stage}`
    pub arn_prefix: String,
}

impl AuthorizerBinding {
    pub fn new(authorizer: Arc<Authorizer>, arn_prefix: impl Into<String>) -> Self {
        Self {
            authorizer,
            arn_prefix: arn_prefix.into(),
        }
    }

    /// Method ARN for one request, e.g. `.../dev/GET/alumnus/johndoe`
    pub fn method_arn(&self, method: &Method, path: &str) -> String {
        format!(
            "{}/{}/{}",
            self.arn_prefix,
            method.as_str(),
            path.trim_start_matches('/')
        )
    }
}

/// Token authorizer middleware.
///
/// Runs the authorizer on every request (results are never cached) and
/// forwards only requests whose policy allows the method ARN.
pub async fn token_authorizer_middleware(
    State(binding): State<AuthorizerBinding>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token(request.headers()).map_err(|msg| {
        tracing::debug!("Rejected before authorizer: {}", msg);
        ApiError::unauthorized("Unauthorized")
    })?;

    let method_arn = binding.method_arn(request.method(), request.uri().path());
    let event = AuthorizerEvent::token(method_arn.clone(), token);
    let response = binding.authorizer.handle_event(&event).await?;

    if !response.policy_document.allows(&method_arn) {
        tracing::warn!("Access denied for {} on {}", response.principal_id, method_arn);
        return Err(ApiError::forbidden(
            "User is not authorized to access this resource with an explicit deny",
        ));
    }

    tracing::debug!("Access granted for {} on {}", response.principal_id, method_arn);
    Ok(next.run(request).await)
}

/// Identity source is the raw Authorization header value
fn extract_token(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let token = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if token.trim().is_empty() {
        return Err("Empty authorization token".to_string());
    }
    Ok(token.to_string())
}
