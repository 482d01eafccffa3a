//! Error types for greeting operations

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by the greeting repository and the services built on it.
#[derive(Error, Debug)]
pub enum GreetingError {
    #[error("Greeting with id: {id} not found")]
    NotFound { id: Uuid },

    #[error("Invalid input: {message}")]
    Validation { message: String },

    #[error("Messaging error: {message}")]
    Messaging { message: String },
}

impl GreetingError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation { message: message.into() }
    }

    pub fn messaging(message: impl Into<String>) -> Self {
        Self::Messaging { message: message.into() }
    }
}

/// Result type for greeting operations
pub type GreetingResult<T> = Result<T, GreetingError>;
