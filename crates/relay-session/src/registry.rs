//! Connection registry — the live identifier → connection table.

use std::sync::Arc;

use dashmap::DashMap;

use crate::handle::ConnectionHandle;

/// Thread-safe registry of all active connections, keyed by the
/// client-chosen identifier.
///
/// Uniqueness is caller-asserted: a later connection under the same
/// identifier silently overwrites the earlier mapping. An entry exists
/// iff the corresponding connection is (to the router's last knowledge)
/// open; it is removed synchronously on close notification.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    connections: DashMap<String, Arc<ConnectionHandle>>,
}

impl SessionRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Inserts a connection, returning the handle it displaced, if any.
    pub fn insert(&self, handle: Arc<ConnectionHandle>) -> Option<Arc<ConnectionHandle>> {
        self.connections.insert(handle.identifier.clone(), handle)
    }

    /// Looks up the connection registered under an identifier.
    pub fn get(&self, identifier: &str) -> Option<Arc<ConnectionHandle>> {
        self.connections
            .get(identifier)
            .map(|entry| entry.value().clone())
    }

    /// Removes the entry for an identifier, returning the handle if one
    /// was registered.
    pub fn remove(&self, identifier: &str) -> Option<Arc<ConnectionHandle>> {
        self.connections.remove(identifier).map(|(_, handle)| handle)
    }

    /// Returns all registered identifiers, sorted for stable logging.
    pub fn roster(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .connections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        ids.sort();
        ids
    }

    /// Returns the number of registered connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Returns `true` when no connections are registered.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}
