//! Webhook greeting delivery.
//!
//! POSTs each greeting as JSON to a single configured URL. A non-2xx
//! response or a transport failure is surfaced as
//! [`GreetingError::Messaging`]; there is no retry.

use async_trait::async_trait;
use reqwest::Client;

use super::MessagingService;
use crate::greetings::{Greeting, GreetingError};

#[derive(Clone)]
pub struct WebhookMessagingService {
    url: String,
    http: Client,
}

impl WebhookMessagingService {
    pub fn new(url: String) -> Self {
        Self {
            url,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl MessagingService for WebhookMessagingService {
    async fn send(&self, greeting: &Greeting) -> Result<(), GreetingError> {
        let response = self
            .http
            .post(&self.url)
            .json(greeting)
            .send()
            .await
            .map_err(|err| GreetingError::messaging(err.to_string()))?;

        if !response.status().is_success() {
            return Err(GreetingError::messaging(format!(
                "Webhook {} returned HTTP {}",
                self.url,
                response.status()
            )));
        }

        tracing::debug!(id = %greeting.id, url = %self.url, "Greeting delivered to webhook");
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}
