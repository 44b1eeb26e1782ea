//! Self-check service and smoke-test harness entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use selfcheck::api::{create_router, AppState};
use selfcheck::config::Config;
use selfcheck::metrics;
use selfcheck::reporter::{ReporterConfig, StatusReporter};
use selfcheck::smoke::{SmokeConfig, SmokeRunner};
use selfcheck::utils::shutdown_signal;
use selfcheck::SelfCheckError;

/// Service status endpoints and live smoke test.
#[derive(Parser, Debug)]
#[command(name = "selfcheck")]
#[command(about = "Serve status endpoints or smoke-test a running service")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the status endpoints (default).
    Serve {
        /// HTTP server port (overrides PORT).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Probe a running service's basic endpoints.
    Smoke {
        /// Base URL of the target (overrides SMOKE_BASE_URL).
        #[arg(long)]
        base_url: Option<String>,

        /// Startup delay in milliseconds (overrides SMOKE_STARTUP_DELAY_MS).
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Check configuration validity.
    CheckConfig,
}

/// Which part of the toolkit a configuration is loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Serve,
    Smoke,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("selfcheck=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    if args.json_logs {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    // Initialize metrics
    metrics::init_metrics();

    match args.command {
        Some(Command::Serve { port }) => cmd_serve(port).await,
        Some(Command::Smoke { base_url, delay_ms }) => cmd_smoke(base_url, delay_ms).await,
        Some(Command::CheckConfig) => cmd_check_config(),
        None => cmd_serve(None).await,
    }
}

/// Load and validate configuration for `mode`, logging any failure.
///
/// Each mode checks only the settings it uses; smoke runs also skip
/// server-only variables.
fn load_config(mode: Mode) -> selfcheck::Result<Config> {
    let loaded = match mode {
        Mode::Serve => Config::load(),
        Mode::Smoke => Config::load_for_smoke(),
    };
    let config = loaded.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        SelfCheckError::from(e)
    })?;

    let validated = match mode {
        Mode::Serve => config.validate_server(),
        Mode::Smoke => config.validate_smoke(),
    };
    validated.map_err(|e| {
        error!("Invalid configuration: {}", e);
        SelfCheckError::from(e)
    })?;

    Ok(config)
}

/// Serve the status endpoints until a shutdown signal arrives.
async fn cmd_serve(port_override: Option<u16>) -> anyhow::Result<()> {
    info!("Loading configuration...");
    let config = load_config(Mode::Serve)?;
    let port = port_override.unwrap_or(config.port);

    let reporter = StatusReporter::new(ReporterConfig::from_config(&config));
    info!("Environment: {}", reporter.environment());

    let router = create_router(AppState::new(reporter), &config.status_root);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    info!("Status endpoints: /api/{0} and /api/{0}/auth", config.status_root);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

/// Run the smoke test. Always exits successfully once the smoke settings load.
async fn cmd_smoke(base_url: Option<String>, delay_ms: Option<u64>) -> anyhow::Result<()> {
    let mut config = load_config(Mode::Smoke)?;
    if let Some(url) = base_url {
        config.smoke_base_url = url;
    }
    if let Some(delay) = delay_ms {
        config.smoke_startup_delay_ms = delay;
    }
    if let Err(e) = config.validate_smoke() {
        error!("Invalid smoke configuration: {}", e);
        return Err(SelfCheckError::from(e).into());
    }

    println!("======================================================================");
    println!("SMOKE TEST - {}", config.smoke_base_url);
    println!("======================================================================");
    println!(
        "Waiting {}ms for the target to start...",
        config.smoke_startup_delay_ms
    );

    let runner = SmokeRunner::new(SmokeConfig::from_config(&config))?;
    let report = runner.run_with(|result| println!("{}", result)).await;

    println!("----------------------------------------------------------------------");
    println!("Passed: {}  Failed: {}", report.passed(), report.failed());
    println!("{}", selfcheck::smoke::COMPLETION_MARKER);
    println!("======================================================================");

    Ok(())
}

/// Check configuration validity.
fn cmd_check_config() -> anyhow::Result<()> {
    println!("======================================================================");
    println!("SELFCHECK - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Loading configuration... ");
    let config = match Config::load() {
        Ok(c) => {
            println!("OK");
            c
        }
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration load failed"));
        }
    };

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.environment());
    println!("  Port: {}", config.port);
    println!("  Status Root: /api/{}", config.status_root);
    println!("  Smoke Target: {}", config.smoke_base_url);
    println!("  Smoke Startup Delay: {}ms", config.smoke_startup_delay_ms);
    println!("  Smoke Timeout: {}ms", config.smoke_timeout_ms);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}
