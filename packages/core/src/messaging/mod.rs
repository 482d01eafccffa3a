//! Greeting Notification Interface
//!
//! The greeting service hands every created or updated greeting to a
//! [`MessagingService`]. Delivery is fire-and-forget from the caller's
//! point of view: failures are reported back but never undo the mutation.

use async_trait::async_trait;

use crate::greetings::{Greeting, GreetingError};

pub mod log;
pub mod webhook;

pub use log::LogMessagingService;
pub use webhook::WebhookMessagingService;

/// Sink for greeting notifications.
#[async_trait]
pub trait MessagingService: Send + Sync {
    /// Deliver a notification for `greeting`.
    async fn send(&self, greeting: &Greeting) -> Result<(), GreetingError>;

    /// Name of this sink for logging.
    fn name(&self) -> &str;
}
