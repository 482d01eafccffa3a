//! Greeting business operations.
//!
//! Wraps a [`GreetingRepository`] and a [`MessagingService`]: every
//! successful create or update is followed by a notification. A failed
//! notification is logged and counted but the stored change stands.

use std::sync::Arc;

use uuid::Uuid;

use super::error::GreetingResult;
use super::repository::GreetingRepository;
use super::types::{Greeting, GreetingFilter};
use crate::messaging::MessagingService;
use crate::metrics::AppMetrics;

pub struct GreetingService {
    repository: Arc<dyn GreetingRepository>,
    messaging: Arc<dyn MessagingService>,
    metrics: Option<Arc<AppMetrics>>,
}

impl GreetingService {
    pub fn new(
        repository: Arc<dyn GreetingRepository>,
        messaging: Arc<dyn MessagingService>,
    ) -> Self {
        Self {
            repository,
            messaging,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<AppMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub async fn create(&self, greeting: Greeting) -> GreetingResult<()> {
        tracing::info!(id = %greeting.id, from = %greeting.from, to = %greeting.to, "Creating greeting");
        self.repository.create(greeting.clone()).await?;

        if let Some(metrics) = &self.metrics {
            metrics.greetings_created_total.inc();
            match self.repository.len().await {
                Ok(stored) => metrics.greetings_stored.set(stored as f64),
                Err(err) => tracing::warn!("Could not refresh stored greeting gauge: {}", err),
            }
        }

        self.notify(&greeting).await;
        Ok(())
    }

    pub async fn update(&self, greeting: Greeting) -> GreetingResult<()> {
        tracing::info!(id = %greeting.id, "Updating greeting");
        self.repository.update(greeting.clone()).await?;

        if let Some(metrics) = &self.metrics {
            metrics.greetings_updated_total.inc();
        }

        self.notify(&greeting).await;
        Ok(())
    }

    pub async fn get(&self, id: Uuid) -> GreetingResult<Option<Greeting>> {
        self.repository.get(id).await
    }

    pub async fn get_all(&self) -> GreetingResult<Vec<Greeting>> {
        self.repository.get_all().await
    }

    pub async fn get_filtered(&self, filter: &GreetingFilter) -> GreetingResult<Vec<Greeting>> {
        if filter.is_empty() {
            return self.repository.get_all().await;
        }
        self.repository.get_filtered(filter).await
    }

    async fn notify(&self, greeting: &Greeting) {
        match self.messaging.send(greeting).await {
            Ok(()) => {
                if let Some(metrics) = &self.metrics {
                    metrics.messages_sent_total.inc();
                }
            }
            Err(err) => {
                tracing::warn!(
                    id = %greeting.id,
                    sink = self.messaging.name(),
                    "Greeting notification failed: {}",
                    err
                );
                if let Some(metrics) = &self.metrics {
                    metrics.message_errors_total.inc();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::greetings::{GreetingError, MemoryGreetingRepository};

    /// Records every greeting it is asked to send.
    #[derive(Default)]
    struct RecordingMessaging {
        sent: Mutex<Vec<Greeting>>,
    }

    #[async_trait]
    impl MessagingService for RecordingMessaging {
        async fn send(&self, greeting: &Greeting) -> Result<(), GreetingError> {
            self.sent.lock().await.push(greeting.clone());
            Ok(())
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    struct FailingMessaging;

    #[async_trait]
    impl MessagingService for FailingMessaging {
        async fn send(&self, _greeting: &Greeting) -> Result<(), GreetingError> {
            Err(GreetingError::messaging("queue unavailable"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    /// Memory store whose `len` always fails, standing in for a backend
    /// where counting is a separate, fallible query.
    #[derive(Default)]
    struct UncountableRepository {
        inner: MemoryGreetingRepository,
    }

    #[async_trait]
    impl GreetingRepository for UncountableRepository {
        async fn create(&self, greeting: Greeting) -> GreetingResult<()> {
            self.inner.create(greeting).await
        }

        async fn get(&self, id: Uuid) -> GreetingResult<Option<Greeting>> {
            self.inner.get(id).await
        }

        async fn get_all(&self) -> GreetingResult<Vec<Greeting>> {
            self.inner.get_all().await
        }

        async fn update(&self, greeting: Greeting) -> GreetingResult<()> {
            self.inner.update(greeting).await
        }

        async fn len(&self) -> GreetingResult<usize> {
            Err(GreetingError::validation("count unavailable"))
        }
    }

    fn service_with(messaging: Arc<dyn MessagingService>) -> (GreetingService, Arc<AppMetrics>) {
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let service = GreetingService::new(Arc::new(MemoryGreetingRepository::new()), messaging)
            .with_metrics(metrics.clone());
        (service, metrics)
    }

    #[tokio::test]
    async fn create_stores_and_notifies() {
        let messaging = Arc::new(RecordingMessaging::default());
        let (service, metrics) = service_with(messaging.clone());
        let greeting = Greeting::new("Alice", "Bob", "Hi");

        service.create(greeting.clone()).await.unwrap();

        assert_eq!(service.get(greeting.id).await.unwrap(), Some(greeting.clone()));
        assert_eq!(*messaging.sent.lock().await, vec![greeting]);
        assert!((metrics.greetings_created_total.get() - 1.0).abs() < f64::EPSILON);
        assert!((metrics.greetings_stored.get() - 1.0).abs() < f64::EPSILON);
        assert!((metrics.messages_sent_total.get() - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn update_notifies_with_new_content() {
        let messaging = Arc::new(RecordingMessaging::default());
        let (service, _) = service_with(messaging.clone());
        let original = Greeting::new("Alice", "Bob", "Hi");
        service.create(original.clone()).await.unwrap();

        let mut changed = original.clone();
        changed.message = "Hello again".to_string();
        service.update(changed).await.unwrap();

        let sent = messaging.sent.lock().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[1].message, "Hello again");
        assert_eq!(
            service.get(original.id).await.unwrap().unwrap().message,
            "Hello again"
        );
    }

    #[tokio::test]
    async fn update_of_missing_greeting_propagates_not_found_without_notifying() {
        let messaging = Arc::new(RecordingMessaging::default());
        let (service, metrics) = service_with(messaging.clone());

        let err = service
            .update(Greeting::new("Alice", "Bob", "Hi"))
            .await
            .unwrap_err();

        assert!(matches!(err, GreetingError::NotFound { .. }));
        assert!(messaging.sent.lock().await.is_empty());
        assert!(metrics.greetings_updated_total.get().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn messaging_failure_does_not_undo_create() {
        let (service, metrics) = service_with(Arc::new(FailingMessaging));
        let greeting = Greeting::new("Alice", "Bob", "Hi");

        service.create(greeting.clone()).await.unwrap();

        assert_eq!(service.get_all().await.unwrap(), vec![greeting]);
        assert!((metrics.message_errors_total.get() - 1.0).abs() < f64::EPSILON);
        assert!(metrics.messages_sent_total.get().abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn get_filtered_delegates_to_repository() {
        let (service, _) = service_with(Arc::new(RecordingMessaging::default()));
        service.create(Greeting::new("Alice", "Bob", "Hi")).await.unwrap();
        service.create(Greeting::new("Carol", "Bob", "Hey")).await.unwrap();

        let everything = service.get_filtered(&GreetingFilter::default()).await.unwrap();
        assert_eq!(everything.len(), 2);

        let from_carol = service
            .get_filtered(&GreetingFilter::new(Some("carol"), None))
            .await
            .unwrap();
        assert_eq!(from_carol.len(), 1);
        assert_eq!(from_carol[0].message, "Hey");
    }

    #[tokio::test]
    async fn failed_count_does_not_fail_a_stored_create() {
        let metrics = Arc::new(AppMetrics::new().unwrap());
        let messaging = Arc::new(RecordingMessaging::default());
        let service = GreetingService::new(
            Arc::new(UncountableRepository::default()),
            messaging.clone(),
        )
        .with_metrics(metrics.clone());
        let greeting = Greeting::new("Alice", "Bob", "Hi");

        service.create(greeting.clone()).await.unwrap();

        assert_eq!(service.get(greeting.id).await.unwrap(), Some(greeting));
        assert!((metrics.greetings_created_total.get() - 1.0).abs() < f64::EPSILON);
        assert_eq!(messaging.sent.lock().await.len(), 1);
    }
}
