//! Greeting Domain Module
//!
//! The greeting record, its repository abstraction with the in-memory
//! backing store, and the service that notifies the messaging layer after
//! every mutation.

pub mod error;
pub mod memory;
pub mod repository;
pub mod service;
pub mod types;

pub use error::GreetingError;
pub use memory::MemoryGreetingRepository;
pub use repository::GreetingRepository;
pub use service::GreetingService;
pub use types::{Greeting, GreetingFilter};
