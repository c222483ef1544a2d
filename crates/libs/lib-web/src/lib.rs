//! # Web Library
//!
//! HTTP handlers, middleware, services, and server setup.

pub mod handlers;
pub mod middleware;
pub mod services;
pub mod server;

#[cfg(test)]
mod test_utils;

pub use server::{create_router, init_tracing, start_server, AppState};
