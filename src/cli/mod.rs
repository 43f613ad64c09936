use clap::{Parser, Subcommand};

use crate::core::error::GatewayError;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "automaton-mcp-gateway")]
#[command(about = "MCP gateway for the Automaton desktop-automation service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway (default when no subcommand is given)
    Serve,
    /// Health check the service
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate configuration
    Config {
        /// Validate config without starting the service
        #[arg(long)]
        validate: bool,
    },
    /// Show service status
    Status {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Test automation backend connectivity
    TestBackend {
        /// Backend URL; defaults to AUTOMATON_BASE_URL
        #[arg(short, long)]
        url: Option<String>,
    },
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    run_commands(cli.command.unwrap_or(Commands::Serve)).await
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Serve => match crate::infra::boot::run_server().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(()) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Config { validate: _ } => match validate_config() {
            Ok(()) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::Status { url } => match show_status(&url).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("❌ Status check failed: {e}");
                ExitCode::FAILURE
            }
        },
        Commands::TestBackend { url } => match test_backend(url).await {
            Ok(()) => {
                println!("✅ Backend is reachable");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Backend test failed: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

async fn health_check(url: &str) -> Result<(), GatewayError> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{url}/healthz"))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), GatewayError> {
    let cfg = crate::infra::config::Config::from_env_and_toml();

    if !matches!(cfg.mode.as_str(), "server" | "stdio") {
        return Err(format!("Invalid MODE: {}. Must be 'server' or 'stdio'", cfg.mode).into());
    }
    if cfg.backend.base_url.is_none() {
        println!("⚠️  AUTOMATON_BASE_URL not set; tools will report an unconfigured backend");
    }
    Ok(())
}

async fn show_status(url: &str) -> Result<(), GatewayError> {
    health_check(url).await?;
    println!("✅ Service is up at {url}");

    let client = reqwest::Client::new();
    let response = client
        .post(format!("{url}/mcp"))
        .json(&serde_json::json!({"jsonrpc":"2.0","id":1,"method":"tools/list"}))
        .timeout(std::time::Duration::from_secs(2))
        .send()
        .await?;
    let body: serde_json::Value = response.json().await?;
    let count = body["result"]["tools"].as_array().map(Vec::len).unwrap_or(0);
    println!("   {count} tools registered");
    Ok(())
}

async fn test_backend(url: Option<String>) -> Result<(), GatewayError> {
    let base = url
        .or_else(|| std::env::var("AUTOMATON_BASE_URL").ok())
        .ok_or(GatewayError::Message("no backend URL given and AUTOMATON_BASE_URL not set".into()))?;
    let client = crate::clients::automaton::AutomatonRemote::new(base);
    if client.health().await {
        Ok(())
    } else {
        Err("backend /health did not return success".into())
    }
}
