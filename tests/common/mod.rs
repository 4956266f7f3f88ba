#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;

use alumnus_api::auth::{Authorizer, SecretStore, StaticSecretStore};
use alumnus_api::gateway;
use alumnus_api::middleware::AuthorizerBinding;

pub const SECRET_ID: &str = "arn:aws:secretsmanager:us-east-1:000000000000:secret:alumnus-token";
pub const TOKEN: &str = "m2PSsz675otmFIoFbiFc4tEGEzM7I1K9";

pub struct TestGateway {
    pub get_url: String,
    pub any_url: String,
}

pub fn authorizer_with(store: impl SecretStore + 'static) -> Arc<Authorizer> {
    Arc::new(Authorizer::new(Arc::new(store), SECRET_ID))
}

pub fn default_authorizer() -> Arc<Authorizer> {
    authorizer_with(StaticSecretStore::new().with_secret(SECRET_ID, TOKEN))
}

async fn spawn(app: Router) -> Result<String> {
    // Ephemeral port per test keeps tests isolated
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to bind test listener")?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{}", addr))
}

/// Boot both REST APIs in-process, sharing one authorizer
pub async fn start_gateway(authorizer: Arc<Authorizer>) -> Result<TestGateway> {
    let get_url = spawn(gateway::get_api(AuthorizerBinding::new(
        authorizer.clone(),
        "arn:aws:execute-api:us-east-1:000000000000:getapi/dev",
    )))
    .await?;
    let any_url = spawn(gateway::any_api(AuthorizerBinding::new(
        authorizer,
        "arn:aws:execute-api:us-east-1:000000000000:anyapi/dev",
    )))
    .await?;
    Ok(TestGateway { get_url, any_url })
}

pub async fn ensure_gateway() -> Result<TestGateway> {
    start_gateway(default_authorizer()).await
}
