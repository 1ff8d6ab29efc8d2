use kanal::AsyncSender;

use crate::state::AppState;
use crate::types::UiEvent;

pub async fn handle_show_backend(
    state: &AppState,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let session = &state.session;
    app_to_ui_tx
        .send(UiEvent::Backend {
            kind: session.backend_kind(),
            name: session.backend_name(),
            warning: session.backend_warning().map(ToString::to_string),
            runs: session.runs(),
        })
        .await?;
    Ok(())
}
