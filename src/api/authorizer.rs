use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::Effect;

pub const POLICY_VERSION: &str = "2012-10-17";
pub const INVOKE_ACTION: &str = "execute-api:Invoke";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizerType {
    Token,
}

/// Token authorizer input event
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerEvent {
    #[serde(rename = "type")]
    pub authorizer_type: AuthorizerType,
    pub method_arn: String,
    pub authorization_token: String,
}

impl AuthorizerEvent {
    pub fn token(method_arn: impl Into<String>, authorization_token: impl Into<String>) -> Self {
        Self {
            authorizer_type: AuthorizerType::Token,
            method_arn: method_arn.into(),
            authorization_token: authorization_token.into(),
        }
    }
}

// The token must never reach logs
impl fmt::Debug for AuthorizerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizerEvent")
            .field("authorizer_type", &self.authorizer_type)
            .field("method_arn", &self.method_arn)
            .field("authorization_token", &"[REDACTED]")
            .finish()
    }
}

/// Token authorizer output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizerResponse {
    pub principal_id: String,
    pub policy_document: PolicyDocument,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    pub version: String,
    pub statement: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    pub action: String,
    pub effect: Effect,
    pub resource: String,
}
