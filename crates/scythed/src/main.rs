//! scythed — transport boundary for the termination decision engine.
//!
//! Thin adapter over the pure engine in `scythe-policy`:
//! - `decide` — one-shot: read the event JSON from a file or stdin, print
//!   `{"InstanceIDs": [...]}` on stdout
//! - `serve` — HTTP endpoint: `POST /v1/decide`
//!
//! Errors are surfaced to the caller (non-zero exit, HTTP error status)
//! rather than returned as an empty list, so the orchestrator can fall
//! back to its default termination policy.
//!
//! # Usage
//!
//! ```text
//! scythed decide --event scale-in.json --audit
//! scythed serve --port 8087 --config policy.toml
//! ```

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use scythe_core::{DecisionResponse, PolicyConfig, ScaleInEvent};

mod api;

#[derive(Parser)]
#[command(name = "scythed", about = "Custom termination policy decision engine")]
struct Cli {
    /// TOML policy config; `SCYTHE_*` environment variables override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decide on a single scale-in event and print the response.
    Decide {
        /// Event JSON file; reads stdin when omitted.
        #[arg(long)]
        event: Option<PathBuf>,

        /// Also print the full audit trail to stderr.
        #[arg(long)]
        audit: bool,
    },
    /// Serve decisions over HTTP.
    Serve {
        /// Port to listen on.
        #[arg(long, default_value = "8087")]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,scythed=debug,scythe=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = PolicyConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Decide { event, audit } => run_decide(&config, event.as_deref(), audit),
        Command::Serve { port } => api::serve(config, port).await,
    }
}

fn run_decide(config: &PolicyConfig, event_path: Option<&Path>, audit: bool) -> anyhow::Result<()> {
    let raw = match event_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading event from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let event = ScaleInEvent::parse(&raw)?;
    let audited = scythe_policy::decide(&event, config)?;

    if audit {
        eprintln!("{}", serde_json::to_string_pretty(&audited)?);
    }
    println!(
        "{}",
        serde_json::to_string(&DecisionResponse::from(&audited.decision))?
    );
    Ok(())
}
