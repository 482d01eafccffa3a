//! Monthly invoicing of greeting senders.

pub mod service;
pub mod types;

pub use service::{GreetingInvoiceService, InvoiceService};
pub use types::{Invoice, InvoicePricing};
