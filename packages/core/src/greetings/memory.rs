//! In-memory greeting repository.
//!
//! `MemoryGreetingRepository` owns a `Vec<Greeting>` in insertion order.
//! The vector sits behind a `tokio::sync::RwLock`, so a single instance
//! wrapped in `Arc` can be shared between the Axum handler tasks.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::error::{GreetingError, GreetingResult};
use super::repository::GreetingRepository;
use super::types::{Greeting, GreetingFilter};

/// Lock-guarded, insertion-ordered greeting store.
#[derive(Debug, Default)]
pub struct MemoryGreetingRepository {
    greetings: RwLock<Vec<Greeting>>,
}

impl MemoryGreetingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing greetings, keeping their order.
    pub fn with_greetings(greetings: Vec<Greeting>) -> Self {
        Self {
            greetings: RwLock::new(greetings),
        }
    }
}

#[async_trait]
impl GreetingRepository for MemoryGreetingRepository {
    async fn create(&self, greeting: Greeting) -> GreetingResult<()> {
        let mut greetings = self.greetings.write().await;
        if greetings.iter().any(|g| g.id == greeting.id) {
            tracing::warn!(id = %greeting.id, "Storing greeting with duplicate id");
        }
        greetings.push(greeting);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> GreetingResult<Option<Greeting>> {
        let greetings = self.greetings.read().await;
        Ok(greetings.iter().find(|g| g.id == id).cloned())
    }

    async fn get_all(&self) -> GreetingResult<Vec<Greeting>> {
        Ok(self.greetings.read().await.clone())
    }

    async fn get_filtered(&self, filter: &GreetingFilter) -> GreetingResult<Vec<Greeting>> {
        let greetings = self.greetings.read().await;
        Ok(greetings
            .iter()
            .filter(|g| filter.matches(g))
            .cloned()
            .collect())
    }

    async fn update(&self, greeting: Greeting) -> GreetingResult<()> {
        let mut greetings = self.greetings.write().await;
        let existing = greetings
            .iter_mut()
            .find(|g| g.id == greeting.id)
            .ok_or_else(|| GreetingError::not_found(greeting.id))?;

        existing.apply_update(&greeting);
        Ok(())
    }

    async fn len(&self) -> GreetingResult<usize> {
        Ok(self.greetings.read().await.len())
    }
}
