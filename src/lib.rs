pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod filter;
pub mod gateway;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod types;
