pub mod authorizer;
pub mod proxy;

pub use authorizer::{AuthorizerEvent, AuthorizerResponse, PolicyDocument, Statement};
pub use proxy::{ProxyRequest, ProxyResponse};
