//! Users API service.
//!
//! # Architecture Overview
//!
//! ```text
//!   Client ──▶ HttpServer (background task) ──▶ Router ──▶ User handlers
//!                                                              │
//!                                           decode / validate  │
//!                                                              ▼
//!   Client ◀── Response writer ◀───────────────────────── Storage port
//!                                                     (sqlite | memory)
//!
//!   main task: load config → start → wait for SIGINT/SIGTERM → drain (5s) → exit
//! ```

use std::path::PathBuf;

use clap::Parser;

use users_api::config::load_config;
use users_api::lifecycle::startup;

#[derive(Parser)]
#[command(name = "users-api")]
#[command(about = "HTTP service for creating and reading user records", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, env = "CONFIG_PATH")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    startup::run(config).await?;

    Ok(())
}
