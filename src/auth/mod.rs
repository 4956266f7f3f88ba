pub mod policy;
pub mod secret;

use std::sync::Arc;

use crate::api::authorizer::{
    AuthorizerEvent, AuthorizerResponse, PolicyDocument, Statement, INVOKE_ACTION, POLICY_VERSION,
};
use crate::types::Effect;

pub use secret::{generate_secret, FileSecretStore, SecretError, SecretStore, StaticSecretStore};

/// Principal reported for every decision
pub const PRINCIPAL: &str = "api_user";

/// Outcome of a single token check, scoped to one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationDecision {
    pub principal: String,
    pub effect: Effect,
    pub resource: String,
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        self.effect == Effect::Allow
    }

    pub fn to_response(&self) -> AuthorizerResponse {
        AuthorizerResponse {
            principal_id: self.principal.clone(),
            policy_document: PolicyDocument {
                version: POLICY_VERSION.to_string(),
                statement: vec![Statement {
                    action: INVOKE_ACTION.to_string(),
                    effect: self.effect,
                    resource: self.resource.clone(),
                }],
            },
        }
    }
}

/// Token authorizer: compares the caller's token with the current secret.
///
/// Stateless apart from the injected store; nothing is cached between calls.
#[derive(Clone)]
pub struct Authorizer {
    store: Arc<dyn SecretStore>,
    secret_id: String,
}

impl Authorizer {
    pub fn new(store: Arc<dyn SecretStore>, secret_id: impl Into<String>) -> Self {
        Self {
            store,
            secret_id: secret_id.into(),
        }
    }

    /// Decide whether `token` may invoke `method_arn`.
    ///
    /// A secret store failure is returned as an error, never as a Deny.
    pub async fn authorize(&self, token: &str, method_arn: &str) -> Result<AuthorizationDecision, SecretError> {
        let secret = self.store.get_secret_value(&self.secret_id).await?;

        let effect = if token == secret { Effect::Allow } else { Effect::Deny };
        let decision = AuthorizationDecision {
            principal: PRINCIPAL.to_string(),
            effect,
            resource: method_arn.to_string(),
        };

        match effect {
            Effect::Allow => tracing::debug!(
                "{}",
                serde_json::to_string(&decision.to_response()).unwrap_or_default()
            ),
            Effect::Deny => tracing::info!("Client failed to provide valid authorization token"),
        }

        Ok(decision)
    }

    /// Gateway-facing entry point: token event in, policy document out
    pub async fn handle_event(&self, event: &AuthorizerEvent) -> Result<AuthorizerResponse, SecretError> {
        let decision = self
            .authorize(&event.authorization_token, &event.method_arn)
            .await?;
        Ok(decision.to_response())
    }
}

impl std::fmt::Debug for Authorizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorizer")
            .field("secret_id", &self.secret_id)
            .finish_non_exhaustive()
    }
}
