//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once in `main` and injected into Axum handlers via
//! the `State` extractor. It owns the session store, the tenancy scope, the
//! fixture catalog and the live feed buffers. Nothing here is a global:
//! tests construct their own state with [`test_helpers::test_app_state`].

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::ConsoleConfig;
use crate::error::ConsoleError;
use crate::services::catalog::Catalog;
use crate::services::feeds::{ActivityFeed, LogBuffer};
use crate::services::kv::KeyValueStore;
use crate::services::session::SessionStore;
use crate::services::tenancy::TenancyScope;

/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub session: Arc<SessionStore>,
    pub scope: Arc<RwLock<TenancyScope>>,
    pub catalog: Arc<Catalog>,
    pub activity: Arc<ActivityFeed>,
    pub logs: Arc<LogBuffer>,
}

impl AppState {
    /// Build state from config, a persisted session cache, and fixtures.
    ///
    /// The session store starts in the loading state; call
    /// `state.session.restore()` before serving.
    ///
    /// # Errors
    ///
    /// Returns `NoOrganizations` if the catalog has no organizations.
    pub fn new(config: ConsoleConfig, cache: Arc<dyn KeyValueStore>, catalog: Catalog) -> Result<Self, ConsoleError> {
        let scope = TenancyScope::new(catalog.organizations.clone())?;
        let session = SessionStore::new(cache, config.mock_delay);
        let logs = LogBuffer::new(config.log_buffer);
        Ok(Self {
            config: Arc::new(config),
            session: Arc::new(session),
            scope: Arc::new(RwLock::new(scope)),
            catalog: Arc::new(catalog),
            activity: Arc::new(ActivityFeed::new()),
            logs: Arc::new(logs),
        })
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
