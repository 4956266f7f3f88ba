// handlers/mod.rs - record handlers
//
// alumnus: the lookup logic itself, transport-agnostic (LookupRequest in,
//          ProxyResponse out). Used by the gateway and the `invoke` command.
// gateway: axum routes that wrap HTTP requests into proxy events.

pub mod alumnus;
pub mod gateway;

pub use alumnus::{handle, BASE_PATH};
