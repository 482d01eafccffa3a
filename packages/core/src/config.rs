use std::collections::HashMap;
use std::env;

use crate::cli::Cli;
use crate::invoices::types::{InvoicePricing, DEFAULT_CURRENCY, DEFAULT_PRICE_PER_GREETING};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub api_keys: Vec<String>,
    pub messaging_webhook_url: Option<String>,
    pub pricing: InvoicePricing,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(&env::vars().collect())
    }

    /// Build a config from an explicit variable map. `from_env` delegates
    /// here so parsing can be tested without touching process state.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, String> {
        let var = |name: &str| {
            vars.get(name)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or(DEFAULT_HOST).to_string();

        let port = match var("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("PORT must be a valid port number, got {}", raw))?,
            None => DEFAULT_PORT,
        };

        let api_keys = var("API_KEYS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|k| !k.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        let messaging_webhook_url = var("MESSAGING_WEBHOOK_URL").map(str::to_owned);

        let price_per_greeting = match var("GREETING_PRICE") {
            Some(raw) => {
                let price = raw
                    .parse::<f64>()
                    .map_err(|_| "GREETING_PRICE must be a valid number")?;
                if !price.is_finite() || price < 0.0 {
                    return Err(format!("GREETING_PRICE must be a non-negative number, got {}", raw));
                }
                price
            }
            None => DEFAULT_PRICE_PER_GREETING,
        };

        let currency = var("INVOICE_CURRENCY").unwrap_or(DEFAULT_CURRENCY).to_string();

        Ok(Self {
            host,
            port,
            api_keys,
            messaging_webhook_url,
            pricing: InvoicePricing {
                price_per_greeting,
                currency,
            },
        })
    }

    /// Command-line flags take precedence over the environment.
    pub fn apply_cli(mut self, cli: &Cli) -> Self {
        if let Some(host) = &cli.host {
            self.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.port = port;
        }
        if let Some(url) = &cli.webhook_url {
            self.messaging_webhook_url = Some(url.clone());
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
