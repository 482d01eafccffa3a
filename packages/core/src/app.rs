//! Application assembly.
//!
//! Turns a [`Config`] into the shared [`AppState`]: the in-memory
//! repository, the messaging sink chosen by configuration, the auth
//! handler and the metrics registry.

use std::sync::Arc;

use crate::api::AppState;
use crate::auth::ApiKeyAuthHandler;
use crate::config::Config;
use crate::error::AppError;
use crate::greetings::{GreetingRepository, GreetingService, MemoryGreetingRepository};
use crate::invoices::GreetingInvoiceService;
use crate::messaging::{LogMessagingService, MessagingService, WebhookMessagingService};
use crate::metrics::AppMetrics;

pub fn build_state(config: &Config) -> Result<AppState, AppError> {
    let metrics = Arc::new(
        AppMetrics::new().map_err(|err| AppError::Internal(err.to_string()))?,
    );

    let repository: Arc<dyn GreetingRepository> = Arc::new(MemoryGreetingRepository::new());

    let messaging: Arc<dyn MessagingService> = match &config.messaging_webhook_url {
        Some(url) => {
            tracing::info!("Greeting notifications go to webhook {}", url);
            Arc::new(WebhookMessagingService::new(url.clone()))
        }
        None => {
            tracing::info!("No webhook configured; greeting notifications are logged only");
            Arc::new(LogMessagingService)
        }
    };

    let auth = ApiKeyAuthHandler::new(config.api_keys.iter().cloned());
    if auth.is_open() {
        tracing::warn!("API_KEYS is empty; every request will be authorized");
    }

    let greetings = GreetingService::new(repository.clone(), messaging)
        .with_metrics(metrics.clone());
    let invoices = GreetingInvoiceService::new(repository, config.pricing.clone());

    Ok(AppState {
        greetings: Arc::new(greetings),
        invoices: Arc::new(invoices),
        auth: Arc::new(auth),
        metrics,
    })
}
