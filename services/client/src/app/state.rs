//! services/client/src/app/state.rs
//!
//! Defines the application's shared state: the port adapters plus the
//! state container, created once at startup and passed to all coordinators.

use crate::app::store::Store;
use crate::config::Config;
use galmaetgil_core::ports::{BackendService, Notifier, TokenStore};
use std::sync::Arc;

/// The shared application state.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendService>,
    pub tokens: Arc<dyn TokenStore>,
    pub notifier: Arc<dyn Notifier>,
    pub config: Arc<Config>,
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn BackendService>,
        tokens: Arc<dyn TokenStore>,
        notifier: Arc<dyn Notifier>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            backend,
            tokens,
            notifier,
            config,
            store: Arc::new(Store::new()),
        }
    }

    /// The bearer credential to attach to authenticated calls, if any.
    /// The ambient-session sentinel is never sent as a bearer value.
    pub fn bearer_token(&self) -> Option<String> {
        match self.tokens.read() {
            Ok(Some(token)) if token != crate::app::session::AMBIENT_SENTINEL => Some(token),
            _ => None,
        }
    }
}
