//! Process-local store.

use async_trait::async_trait;
use signup_core::registrant::Registrant;
use tokio::sync::RwLock;

use crate::{RegistrantStore, StoreError};

/// Registrants kept in memory; lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    registrants: RwLock<Vec<Registrant>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing list.
    pub fn with_registrants(registrants: Vec<Registrant>) -> Self {
        Self {
            registrants: RwLock::new(registrants),
        }
    }
}

#[async_trait]
impl RegistrantStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        Ok(self.registrants.read().await.clone())
    }

    async fn add(&self, registrant: Registrant) -> Result<Registrant, StoreError> {
        self.registrants.write().await.push(registrant.clone());
        Ok(registrant)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.registrants.read().await.len())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.registrants.write().await.clear();
        Ok(())
    }
}
