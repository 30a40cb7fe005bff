/*
[INPUT]:  CLI arguments, .env / BINANCE_* environment, optional secrets file, OS shutdown signals
[OUTPUT]: Placed orders, account summaries, or a running web UI
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

mod cli;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use futures_testnet_bot::logging::init_logging;
use futures_testnet_bot::report::OutputFormat;
use futures_testnet_bot::web::{self, AppState, DEFAULT_BIND};
use futures_testnet_bot::{BotConfig, TradingBot};

#[derive(Parser, Debug)]
#[command(
    name = "futures-testnet-bot",
    version,
    about = "Tiny Binance Futures Testnet trading helper"
)]
struct Cli {
    /// Secrets file (yaml, toml or json); overrides environment values
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    /// Log directory; defaults to BINANCE_LOG_DIR or ./logs
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place a MARKET, LIMIT or STOP_LIMIT order
    Order(cli::OrderArgs),
    /// Show USDT wallet and available balance
    Account,
    /// Build an order through prompts, then place it
    Interactive,
    /// Start the web order form
    Serve {
        #[arg(long, value_name = "ADDR", default_value = DEFAULT_BIND)]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Cli::parse();

    let config = BotConfig::load(args.config_path.as_deref()).context("load configuration")?;
    let log_dir = args.log_dir.clone().unwrap_or_else(|| config.log_dir.clone());
    let _log_guard = init_logging(&args.log_level, &log_dir)?;

    info!(
        config_path = ?args.config_path,
        log_dir = %log_dir.display(),
        testnet = config.testnet,
        "starting futures-testnet-bot"
    );

    let bot = TradingBot::from_config(&config).context("create trading bot")?;

    match args.command {
        Command::Order(order) => {
            cli::run_order(&bot, order.to_params(), config.min_notional, order.output).await
        }
        Command::Account => cli::run_account(&bot).await,
        Command::Interactive => match cli::prompt_order()? {
            Some(params) => {
                cli::run_order(&bot, params, config.min_notional, OutputFormat::Table).await
            }
            None => Ok(ExitCode::SUCCESS),
        },
        Command::Serve { bind } => {
            let listener = TcpListener::bind(&bind)
                .await
                .with_context(|| format!("bind web UI to {bind}"))?;
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());

            let state = AppState::new(Arc::new(bot), config.min_notional);
            web::serve(listener, state, shutdown).await?;
            info!("shutdown complete");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        // Registered before the server starts so an early SIGTERM is not lost.
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                let shutdown_clone = shutdown.clone();
                tokio::spawn(async move {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                });
            }
            Err(err) => {
                warn!(error = %err, "failed to install SIGTERM handler");
            }
        }
    }
}
