use async_trait::async_trait;

use super::MessagingService;
use crate::greetings::{Greeting, GreetingError};

/// Messaging sink that only emits a structured log event.
///
/// Used when no webhook target is configured.
#[derive(Debug, Clone, Default)]
pub struct LogMessagingService;

#[async_trait]
impl MessagingService for LogMessagingService {
    async fn send(&self, greeting: &Greeting) -> Result<(), GreetingError> {
        tracing::info!(
            id = %greeting.id,
            from = %greeting.from,
            to = %greeting.to,
            "Greeting notification"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
