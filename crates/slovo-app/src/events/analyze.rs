use std::sync::Arc;

use kanal::AsyncSender;

use crate::events::report_failure;
use crate::state::AppState;
use crate::types::UiEvent;

pub async fn handle_analyze(
    state: Arc<AppState>,
    text: String,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    tracing::debug!("Analyzing {} chars", text.chars().count());

    let session = state.session.clone();
    let outcome = tokio::task::spawn_blocking(move || session.analyze(&text)).await?;

    let event = match outcome {
        Ok(report) => UiEvent::Report(report),
        Err(e) => report_failure(&e),
    };
    app_to_ui_tx.send(event).await?;

    Ok(())
}
