//! Server dependencies for domain activities (using traits for testability)

use anyhow::Result;
use std::sync::Arc;

use crate::kernel::{BaseRoutingStore, MemoryRoutingStore, RoutingTx};

// =============================================================================
// ServerDeps
// =============================================================================

/// Dependencies every activity receives. The store is injected here rather
/// than reached through a process-wide handle.
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseRoutingStore>,
}

impl ServerDeps {
    pub fn new(store: Arc<dyn BaseRoutingStore>) -> Self {
        Self { store }
    }

    /// Dependencies backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryRoutingStore::new()))
    }

    pub async fn begin(&self) -> Result<Box<dyn RoutingTx>> {
        self.store.begin().await
    }
}
