use serde::{Deserialize, Serialize};

use crate::greetings::Greeting;

/// Default price charged per greeting.
pub const DEFAULT_PRICE_PER_GREETING: f64 = 10.0;

/// Default invoice currency code.
pub const DEFAULT_CURRENCY: &str = "SEK";

/// Bill for every greeting one sender sent in a calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub sender: String,
    pub year: i32,
    pub month: u32,
    pub greetings: Vec<Greeting>,
    pub greeting_count: usize,
    pub price_per_greeting: f64,
    pub total_cost: f64,
    pub currency: String,
}

/// Pricing applied when building invoices.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoicePricing {
    pub price_per_greeting: f64,
    pub currency: String,
}

impl Default for InvoicePricing {
    fn default() -> Self {
        Self {
            price_per_greeting: DEFAULT_PRICE_PER_GREETING,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}
