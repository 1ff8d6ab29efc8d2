use kanal::AsyncSender;

use crate::events::report_failure;
use crate::state::AppState;
use crate::types::UiEvent;
use crate::ui::ChartKind;

pub async fn handle_show_lemmas(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let event = match state.session.latest() {
        Ok(report) => UiEvent::Lemmas(report),
        Err(e) => report_failure(&e),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_show_statistics(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let outcome = state.session.statistics().and_then(|rows| {
        let total = state.session.latest()?.total_words;
        Ok(UiEvent::Statistics { rows, total })
    });

    let event = outcome.unwrap_or_else(|e| report_failure(&e));
    app_to_ui_tx.send(event).await?;
    Ok(())
}

pub async fn handle_show_chart(
    state: &AppState,
    kind: ChartKind,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let event = match state.session.coefficients() {
        Ok(coefficients) => UiEvent::Chart { kind, coefficients },
        Err(e) => report_failure(&e),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}
