//! Request authorization.
//!
//! Entry points ask an [`AuthHandler`] for a yes/no decision before they
//! touch any service. [`ApiKeyAuthHandler`] compares the `X-Api-Key`
//! header against a fixed key set; it is an access gate, not identity.

use std::collections::HashSet;

use async_trait::async_trait;
use axum::http::HeaderMap;

/// Header carrying the caller's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

#[async_trait]
pub trait AuthHandler: Send + Sync {
    async fn is_authorized(&self, headers: &HeaderMap) -> bool;
}

/// Authorizes requests whose `X-Api-Key` header is one of the configured
/// keys. With no keys configured every request is allowed.
#[derive(Debug, Clone, Default)]
pub struct ApiKeyAuthHandler {
    keys: HashSet<String>,
}

impl ApiKeyAuthHandler {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// `true` when no keys are configured and every request passes.
    pub fn is_open(&self) -> bool {
        self.keys.is_empty()
    }
}

#[async_trait]
impl AuthHandler for ApiKeyAuthHandler {
    async fn is_authorized(&self, headers: &HeaderMap) -> bool {
        if self.is_open() {
            return true;
        }

        headers
            .get(API_KEY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(|key| self.keys.contains(key.trim()))
            .unwrap_or(false)
    }
}
