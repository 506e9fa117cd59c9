//! Storefront State Management
//!
//! This module holds the application state shared by all handlers: the
//! read-only catalog and the per-session storefront state.

use std::sync::Arc;

use dashmap::DashMap;

use crate::catalog::Product;
use crate::session::models::SessionSnapshot;
use crate::session::Session;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the catalog and every live session
pub struct AppState {
    /// Products in catalog order. Never mutated after startup.
    pub catalog: Arc<Vec<Arc<Product>>>,

    /// In-memory sessions, keyed by session id.
    /// Each session owns its own cart; nothing is shared between entries.
    pub sessions: DashMap<String, Session>,
}

impl AppState {
    /// Creates a state serving `products` with no sessions yet
    pub fn new(products: Vec<Product>) -> Self {
        tracing::info!(products = products.len(), "storefront state ready");

        Self {
            catalog: Arc::new(products.into_iter().map(Arc::new).collect()),
            sessions: DashMap::new(),
        }
    }

    /// Looks up a catalog product by id
    pub fn product(&self, product_id: &str) -> Option<Arc<Product>> {
        self.catalog.iter().find(|p| p.id == product_id).cloned()
    }

    /// Snapshot of an existing session. Never creates one.
    pub fn session_snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        self.sessions.get(session_id).map(|s| s.snapshot())
    }

    /// Runs `f` against the session `session_id`, creating it on first use.
    ///
    /// The entry stays locked while `f` runs, so operations on one session
    /// are applied one at a time.
    pub fn with_session<R>(&self, session_id: &str, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self
            .sessions
            .entry(session_id.to_string())
            .or_insert_with(|| {
                tracing::info!(session_id, "new session");
                Session::new()
            });
        f(&mut session)
    }
}
