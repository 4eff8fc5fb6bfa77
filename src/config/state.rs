// Application state module
// Owns the read-only configuration and the process-wide collaborators

use crate::routing::HandlerRegistry;
use crate::session::SessionManager;

use super::types::Config;

/// Application state shared across requests
///
/// Configuration is read-only after start-up; the handler registry is
/// populated once before the listener starts; sessions serialize their own
/// access per client.
pub struct AppState {
    pub config: Config,
    pub registry: HandlerRegistry,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(config: Config, registry: HandlerRegistry) -> Self {
        Self {
            config,
            registry,
            sessions: SessionManager::new(),
        }
    }
}
