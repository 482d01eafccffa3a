use clap::Parser;

/// Greeting Service CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "greeting-service",
    version,
    about = "Greeting and invoice HTTP API backed by an in-memory store"
)]
pub struct Cli {
    /// Address to bind the HTTP server to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Webhook URL that receives greeting notifications
    #[arg(long)]
    pub webhook_url: Option<String>,
}
