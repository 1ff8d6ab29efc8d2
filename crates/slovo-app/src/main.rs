use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use slovo_config::Config;
use tokio::signal;
use tracing_subscriber::EnvFilter;

pub mod cli;
pub mod controller;
pub mod events;
pub mod io;
pub mod state;
pub mod types;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::Args;
use self::controller::{AppController, InputMode};
use self::state::AppState;

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::new()),
    }
}

/// Logs go to stderr so tables on stdout stay clean
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Text from `--text`, `--file`, or piped stdin
async fn read_input(args: &Args) -> anyhow::Result<Option<String>> {
    if let Some(text) = &args.text {
        return Ok(Some(text.clone()));
    }

    if let Some(path) = &args.file {
        tracing::info!("Reading text from {}", path.display());
        return Ok(Some(tokio::fs::read_to_string(path).await?));
    }

    if !args.interactive && !atty::is(atty::Stream::Stdin) {
        let text = tokio::task::spawn_blocking(|| {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).map(|_| text)
        })
        .await??;
        return Ok(Some(text));
    }

    Ok(None)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = load_config(args.config.as_deref())?;
    init_tracing(&config);

    let input = read_input(&args).await?;
    let mode = if args.interactive || input.is_none() {
        InputMode::Interactive
    } else {
        InputMode::Batch
    };

    // Backend selection happens once, before any request is accepted
    let state = Arc::new(AppState::initialize(config).await?);
    if let Some(warning) = state.session.backend_warning() {
        eprintln!("warning: {warning}");
    }
    if mode == InputMode::Interactive {
        println!("{}", ui::HELP);
    }

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(args.initial_events(input), mode);

    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
            joined = tasks.join_next() => match joined {
                None => break,
                Some(Ok(Ok(()))) => {}
                Some(Ok(Err(e))) => {
                    tracing::error!("task failed: {e}");
                    break;
                }
                Some(Err(e)) => {
                    tracing::error!("task panicked: {e}");
                    break;
                }
            }
        }
    }

    controller.shutdown();
    tasks.shutdown().await;
    Ok(())
}
