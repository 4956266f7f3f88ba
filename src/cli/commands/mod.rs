pub mod authorize;
pub mod invoke;
pub mod secret;
