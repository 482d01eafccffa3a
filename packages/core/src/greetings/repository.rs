//! Greeting Repository Interface
//!
//! Storage abstraction the greeting and invoice services are written
//! against. Backing stores other than [`MemoryGreetingRepository`] plug in
//! by implementing this trait.
//!
//! [`MemoryGreetingRepository`]: super::memory::MemoryGreetingRepository

use async_trait::async_trait;
use uuid::Uuid;

use super::error::GreetingResult;
use super::types::{Greeting, GreetingFilter};

/// CRUD-style access to stored greetings. There is no delete.
#[async_trait]
pub trait GreetingRepository: Send + Sync {
    /// Append a greeting. Ids are not checked for uniqueness.
    async fn create(&self, greeting: Greeting) -> GreetingResult<()>;

    /// First greeting with the given id, or `None` when there is none.
    async fn get(&self, id: Uuid) -> GreetingResult<Option<Greeting>>;

    /// Every stored greeting, in insertion order.
    async fn get_all(&self) -> GreetingResult<Vec<Greeting>>;

    /// Greetings matching `filter`, in insertion order.
    async fn get_filtered(&self, filter: &GreetingFilter) -> GreetingResult<Vec<Greeting>> {
        let greetings = self.get_all().await?;
        Ok(greetings.into_iter().filter(|g| filter.matches(g)).collect())
    }

    /// Overwrite `from`, `to` and `message` of the greeting sharing
    /// `greeting.id`. Fails with `NotFound` when no such greeting exists.
    async fn update(&self, greeting: Greeting) -> GreetingResult<()>;

    /// Number of stored greetings.
    async fn len(&self) -> GreetingResult<usize> {
        Ok(self.get_all().await?.len())
    }
}
