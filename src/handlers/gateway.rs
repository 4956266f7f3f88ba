// handlers/gateway.rs - proxy integrations for the local gateway
//
// Each route turns the HTTP request into the proxy event the record handler
// would receive behind a real gateway, then writes its proxy response back.

use axum::{
    extract::{Path, Query},
    http::Method,
};

use crate::api::{ProxyRequest, ProxyResponse};
use crate::types::LookupRequest;

use super::alumnus::{self, BASE_PATH};

type QueryPairs = Query<Vec<(String, String)>>;

fn invoke(event: ProxyRequest) -> ProxyResponse {
    alumnus::handle(&LookupRequest::from(event))
}

/// /alumnus (GET on the GET API, ANY on the ANY API)
pub async fn alumnus_collection(method: Method, Query(pairs): QueryPairs) -> ProxyResponse {
    invoke(ProxyRequest::new(method.as_str(), BASE_PATH, BASE_PATH).with_query_pairs(pairs))
}

/// /alumnus/{uname} on the GET API
pub async fn alumnus_member(
    method: Method,
    Path(uname): Path<String>,
    Query(pairs): QueryPairs,
) -> ProxyResponse {
    let path = format!("{}/{}", BASE_PATH, uname);
    invoke(
        ProxyRequest::new(method.as_str(), "/alumnus/{uname}", path)
            .with_path_parameter("uname", uname)
            .with_query_pairs(pairs),
    )
}

/// /alumnus/{proxy+} on the ANY API
pub async fn alumnus_greedy(
    method: Method,
    Path(proxy): Path<String>,
    Query(pairs): QueryPairs,
) -> ProxyResponse {
    let path = format!("{}/{}", BASE_PATH, proxy);
    invoke(
        ProxyRequest::new(method.as_str(), "/alumnus/{proxy+}", path)
            .with_path_parameter("proxy", proxy)
            .with_query_pairs(pairs),
    )
}
