use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use slovo_core::AnalysisError;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;
use crate::types::{AppEvent, UiEvent};
use crate::ui::HELP;

pub mod analyze;
pub mod backend;
pub mod export;
pub mod statistics;

use analyze::handle_analyze;
use backend::handle_show_backend;
use export::handle_export;
use statistics::{handle_show_chart, handle_show_lemmas, handle_show_statistics};

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<UiEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    tracing::info!("Event loop started");

    loop {
        let event = tokio::select! {
            event = ui_to_app_rx.recv() => event?,
            _ = cancel.cancelled() => {
                tracing::info!("Event loop cancelled");
                break;
            }
        };

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        if event == AppEvent::Quit {
            break;
        }

        handle_event(state.clone(), &app_to_ui_tx, event).await?;
    }

    app_to_ui_tx.send(UiEvent::Shutdown).await?;
    Ok(())
}

pub async fn handle_event(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::Analyze(text) => handle_analyze(state, text, app_to_ui_tx).await?,
        AppEvent::ShowLemmas => handle_show_lemmas(&state, app_to_ui_tx).await?,
        AppEvent::ShowStatistics => handle_show_statistics(&state, app_to_ui_tx).await?,
        AppEvent::ShowChart(kind) => handle_show_chart(&state, kind, app_to_ui_tx).await?,
        AppEvent::Export { path, format } => {
            handle_export(state, path, format, app_to_ui_tx).await?
        }
        AppEvent::ShowBackend => handle_show_backend(&state, app_to_ui_tx).await?,
        AppEvent::Help => app_to_ui_tx.send(UiEvent::Notice(HELP.to_string())).await?,
        AppEvent::Quit => {}
    }

    Ok(())
}

/// Informational conditions become notices, everything else an error
pub(crate) fn report_failure(e: &AnalysisError) -> UiEvent {
    if e.is_informational() {
        tracing::info!("{}", e);
        UiEvent::Notice(e.to_string())
    } else {
        tracing::error!("{}", e);
        UiEvent::Error(e.to_string())
    }
}
