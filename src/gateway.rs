use std::future::IntoFuture;
use std::sync::Arc;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::auth::Authorizer;
use crate::config::{GatewayConfig, RestApiConfig};
use crate::handlers::gateway as proxy;
use crate::middleware::{token_authorizer_middleware, AuthorizerBinding};

/// "Alumnus GET API Example": GET on /alumnus and /alumnus/{uname}
pub fn get_api(binding: AuthorizerBinding) -> Router {
    Router::new()
        .route("/alumnus", get(proxy::alumnus_collection))
        .route("/alumnus/:uname", get(proxy::alumnus_member))
        .route_layer(middleware::from_fn_with_state(binding, token_authorizer_middleware))
        .layer(TraceLayer::new_for_http())
}

/// "Alumnus ANY API Example": any method on /alumnus and /alumnus/{proxy+}
pub fn any_api(binding: AuthorizerBinding) -> Router {
    Router::new()
        .route("/alumnus", any(proxy::alumnus_collection))
        .route("/alumnus/*proxy", any(proxy::alumnus_greedy))
        .route_layer(middleware::from_fn_with_state(binding, token_authorizer_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Serve both REST APIs until either listener fails.
///
/// The two APIs get separate authorizer bindings over one shared authorizer.
pub async fn serve(gateway: &GatewayConfig, authorizer: Arc<Authorizer>) -> anyhow::Result<()> {
    let get_app = get_api(AuthorizerBinding::new(
        authorizer.clone(),
        gateway.arn_prefix(&gateway.get_api),
    ));
    let any_app = any_api(AuthorizerBinding::new(
        authorizer,
        gateway.arn_prefix(&gateway.any_api),
    ));

    let get_listener = bind(&gateway.bind_host, &gateway.get_api).await?;
    let any_listener = bind(&gateway.bind_host, &gateway.any_api).await?;

    tokio::try_join!(
        axum::serve(get_listener, get_app).into_future(),
        axum::serve(any_listener, any_app).into_future(),
    )?;
    Ok(())
}

async fn bind(host: &str, api: &RestApiConfig) -> anyhow::Result<tokio::net::TcpListener> {
    let bind_addr = format!("{}:{}", host, api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {} for {}: {}", bind_addr, api.name, e))?;
    tracing::info!("{} listening on http://{}", api.name, listener.local_addr()?);
    Ok(listener)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::StaticSecretStore;
    use axum::{
        body::Body,
        http::{header::AUTHORIZATION, Request, StatusCode},
    };
    use tower::ServiceExt;

    const TOKEN: &str = "0123456789abcdef0123456789abcdef";

    fn binding() -> AuthorizerBinding {
        let store = StaticSecretStore::new().with_secret("api-token", TOKEN);
        AuthorizerBinding::new(
            Arc::new(Authorizer::new(Arc::new(store), "api-token")),
            "arn:aws:execute-api:us-east-1:000000000000:test/dev",
        )
    }

    fn request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn get_api_serves_query_lookup() {
        let response = get_api(binding())
            .oneshot(request("GET", "/alumnus?uname=janedoe&field=email", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, r#"{"email":"janedoe@example.com"}"#);
    }

    #[tokio::test]
    async fn get_api_serves_path_lookup() {
        let response = get_api(binding())
            .oneshot(request("GET", "/alumnus/bobsmith", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#""id":4"#));
    }

    #[tokio::test]
    async fn missing_token_is_401() {
        let response = get_api(binding())
            .oneshot(request("GET", "/alumnus?uname=johndoe", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn wrong_token_is_403() {
        let response = any_api(binding())
            .oneshot(request("GET", "/alumnus?uname=johndoe", Some("nope")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn any_api_greedy_path_uses_first_segment() {
        let response = any_api(binding())
            .oneshot(request("GET", "/alumnus/mds/ignored/segments", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains(r#""uname":"mds""#));
    }

    #[tokio::test]
    async fn any_api_rejects_other_methods_with_501() {
        let response = any_api(binding())
            .oneshot(request("DELETE", "/alumnus/johndoe", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body_string(response).await, "DELETE not supported");
    }

    #[tokio::test]
    async fn any_api_base_path_without_uname_is_400_before_method_check() {
        let response = any_api(binding())
            .oneshot(request("POST", "/alumnus", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn secret_store_failure_is_500() {
        let broken = AuthorizerBinding::new(
            Arc::new(Authorizer::new(Arc::new(StaticSecretStore::new()), "api-token")),
            "arn:aws:execute-api:us-east-1:000000000000:test/dev",
        );
        let response = get_api(broken)
            .oneshot(request("GET", "/alumnus?uname=johndoe", Some(TOKEN)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
