//! Invoice computation over the greeting repository.
//!
//! Invoices are derived on demand: nothing is stored. For a given month
//! every greeting whose UTC timestamp falls inside it is grouped by exact
//! sender label, one invoice per sender, ordered by sender.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;

use super::types::{Invoice, InvoicePricing};
use crate::greetings::{Greeting, GreetingError, GreetingRepository};

#[async_trait]
pub trait InvoiceService: Send + Sync {
    /// Invoices for every sender with greetings in `year`/`month`.
    async fn get_invoices(&self, year: i32, month: u32) -> Result<Vec<Invoice>, GreetingError>;
}

pub struct GreetingInvoiceService {
    repository: Arc<dyn GreetingRepository>,
    pricing: InvoicePricing,
}

impl GreetingInvoiceService {
    pub fn new(repository: Arc<dyn GreetingRepository>, pricing: InvoicePricing) -> Self {
        Self { repository, pricing }
    }

    fn build_invoice(&self, sender: String, year: i32, month: u32, greetings: Vec<Greeting>) -> Invoice {
        let greeting_count = greetings.len();
        Invoice {
            sender,
            year,
            month,
            greetings,
            greeting_count,
            price_per_greeting: self.pricing.price_per_greeting,
            total_cost: greeting_count as f64 * self.pricing.price_per_greeting,
            currency: self.pricing.currency.clone(),
        }
    }
}

#[async_trait]
impl InvoiceService for GreetingInvoiceService {
    async fn get_invoices(&self, year: i32, month: u32) -> Result<Vec<Invoice>, GreetingError> {
        if !(1..=12).contains(&month) {
            return Err(GreetingError::validation(format!(
                "month must be between 1 and 12, got {}",
                month
            )));
        }

        let mut by_sender: BTreeMap<String, Vec<Greeting>> = BTreeMap::new();
        for greeting in self.repository.get_all().await? {
            if greeting.timestamp.year() == year && greeting.timestamp.month() == month {
                by_sender
                    .entry(greeting.from.clone())
                    .or_default()
                    .push(greeting);
            }
        }

        tracing::debug!(year, month, senders = by_sender.len(), "Computed invoices");

        Ok(by_sender
            .into_iter()
            .map(|(sender, greetings)| self.build_invoice(sender, year, month, greetings))
            .collect())
    }
}
