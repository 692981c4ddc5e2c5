use anyhow::Result;
use clap::Parser;
use isimctl_common::Cancelled;
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;
mod config;
mod executor;
mod simctl;
mod simulator;
mod tui;

use cli::commands::AppContext;
use cli::{Cli, Commands};

const EXIT_CANCELLED: u8 = 130;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Setup logging; stdout belongs to the UI
    let log_level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = config::load_config(&cli.config)?;

    if !config.ui.color {
        colored::control::set_override(false);
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupted");
            on_interrupt.cancel();
        }
    });

    let ctx = AppContext {
        config,
        cancel,
        ui: tui::Ui::new(),
    };

    let result = match cli.command {
        Commands::List { search_term, all } => cli::commands::list::run(search_term, all, &ctx).await,
        Commands::Boot { confirm } => cli::commands::boot::run(confirm, &ctx).await,
        Commands::Open { confirm } => cli::commands::open::run(confirm, &ctx).await,
        Commands::Config { command } => cli::commands::config::run(command, &cli.config).await,
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) if err.is::<Cancelled>() => {
            ctx.ui.restore();
            Ok(ExitCode::from(EXIT_CANCELLED))
        }
        Err(err) => Err(err),
    }
}
