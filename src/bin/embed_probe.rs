//! Embedding probe CLI
//!
//! Builds the fallback orchestrator from the environment (or a YAML file),
//! embeds the given texts and prints what happened.

use anyhow::Context;
use clap::Parser;
use embedding_fallback::utils::logging::{init_json_tracing, init_tracing};
use embedding_fallback::{EmbeddingConfig, FallbackOrchestrator};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, info};

#[derive(Debug, Parser)]
#[command(name = "embed-probe", version, about = "Probe embedding providers through the fallback chain")]
struct Args {
    /// YAML configuration file; the environment is used when omitted
    #[arg(short, long, env = "EMBEDDING_CONFIG")]
    config: Option<PathBuf>,

    /// Only report whether any provider is healthy
    #[arg(long)]
    health: bool,

    /// Clear failure counters and cached health before probing
    #[arg(long)]
    reset: bool,

    /// Emit JSON logs
    #[arg(long)]
    json_logs: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: Level,

    /// Texts to embed
    texts: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    if args.json_logs {
        init_json_tracing(args.log_level);
    } else {
        init_tracing(args.log_level);
    }

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> anyhow::Result<bool> {
    let config = match &args.config {
        Some(path) => EmbeddingConfig::from_file(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => EmbeddingConfig::from_env().context("reading configuration from environment")?,
    };
    let orchestrator = FallbackOrchestrator::from_config(&config).await?;

    if args.reset {
        orchestrator.reset_failures().await;
    }

    if args.health {
        let healthy = orchestrator.health_check().await;
        println!("healthy: {}", healthy);
        return Ok(healthy);
    }

    let ok = if args.texts.is_empty() {
        info!("No texts given, nothing to embed");
        true
    } else {
        match orchestrator.generate_batch(&args.texts).await? {
            Some(embeddings) => {
                for (text, embedding) in args.texts.iter().zip(&embeddings) {
                    println!("{:>5} dims  {}", embedding.len(), text);
                }
                true
            }
            None => {
                println!("all providers failed");
                false
            }
        }
    };

    let stats = orchestrator.get_provider_stats().await;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(ok)
}
