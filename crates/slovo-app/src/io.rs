use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::thread::JoinHandle;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;

use crate::types::AppEvent;
use crate::ui::ChartKind;

/// Why a line could not become an event
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command :{0} (try :help)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

/// `:command args` lines are commands, anything else is text to analyze.
/// Blank lines produce nothing.
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(command) = line.strip_prefix(':') else {
        return Ok(Some(AppEvent::Analyze(line.to_string())));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let args: Vec<&str> = parts.collect();

    const EXPORT_USAGE: &str = ":export PATH [csv|tsv|json|xlsx]";

    let event = match (name.as_str(), args.as_slice()) {
        ("lemmas" | "l", []) => AppEvent::ShowLemmas,
        ("lemmas" | "l", _) => return Err(CommandError::Usage(":lemmas")),
        ("stats" | "s", []) => AppEvent::ShowStatistics,
        ("stats" | "s", _) => return Err(CommandError::Usage(":stats")),
        ("chart" | "c", []) => AppEvent::ShowChart(ChartKind::Bar),
        ("chart" | "c", [kind]) => match kind.to_lowercase().as_str() {
            "bar" => AppEvent::ShowChart(ChartKind::Bar),
            "pie" => AppEvent::ShowChart(ChartKind::Pie),
            _ => return Err(CommandError::Usage(":chart bar|pie")),
        },
        ("chart" | "c", _) => return Err(CommandError::Usage(":chart bar|pie")),
        ("export" | "e", [path]) => AppEvent::Export {
            path: PathBuf::from(path),
            format: None,
        },
        ("export" | "e", [path, format]) => AppEvent::Export {
            path: PathBuf::from(path),
            format: Some(format.parse().map_err(|_| CommandError::Usage(EXPORT_USAGE))?),
        },
        ("export" | "e", _) => return Err(CommandError::Usage(EXPORT_USAGE)),
        ("backend" | "b", []) => AppEvent::ShowBackend,
        ("backend" | "b", _) => return Err(CommandError::Usage(":backend")),
        ("help" | "h" | "?", _) => AppEvent::Help,
        ("quit" | "q" | "exit", []) => AppEvent::Quit,
        ("quit" | "q" | "exit", _) => return Err(CommandError::Usage(":quit")),
        (other, _) => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(event))
}

fn prompt(interactive: bool) {
    if interactive {
        print!("> ");
        let _ = std::io::stdout().flush();
    }
}

/// Read commands from stdin on a dedicated thread until quit, EOF or cancellation
pub fn spawn_stdin_reader(tx: AsyncSender<AppEvent>, cancel: CancellationToken) -> JoinHandle<()> {
    let tx = tx.to_sync();

    std::thread::spawn(move || {
        let interactive = atty::is(atty::Stream::Stdin);
        let stdin = std::io::stdin();
        tracing::info!("Reading commands from stdin");

        prompt(interactive);
        for line in stdin.lock().lines() {
            if cancel.is_cancelled() {
                break;
            }

            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("Failed to read stdin: {}", e);
                    break;
                }
            };

            match parse_command(&line) {
                Ok(Some(event)) => {
                    let quit = event == AppEvent::Quit;
                    if tx.send(event).is_err() || quit {
                        return;
                    }
                }
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            }
            prompt(interactive);
        }

        if !cancel.is_cancelled() {
            let _ = tx.send(AppEvent::Quit);
        }
        tracing::info!("Stdin reader stopping");
    })
}
