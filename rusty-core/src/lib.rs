use std::sync::Arc;

use rusty_paginator::Paginator;
use twilight_http::Client;

/// Environment-driven bot configuration.
pub mod config;

pub use config::Config;

/// Shared application context passed into command handlers.
///
/// Cheap to clone because it only stores reference-counted shared state.
#[derive(Clone)]
pub struct Context {
    pub http: Arc<Client>,
    pub paginator: Paginator<Client>,
    pub config: Arc<Config>,
}

impl Context {
    /// Create a new application context.
    pub fn new(http: Arc<Client>, paginator: Paginator<Client>, config: Config) -> Self {
        Self {
            http,
            paginator,
            config: Arc::new(config),
        }
    }
}
