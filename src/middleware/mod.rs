pub mod auth;
pub mod response;

pub use auth::{token_authorizer_middleware, AuthorizerBinding};
