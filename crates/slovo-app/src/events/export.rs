use std::path::PathBuf;
use std::sync::Arc;

use kanal::AsyncSender;
use slovo_export::{ExportError, ExportFormat, ExportOptions};

use crate::state::AppState;
use crate::types::UiEvent;

/// An explicit format replaces the path's extension
fn target_path(path: PathBuf, format: Option<ExportFormat>) -> PathBuf {
    match format {
        Some(format) if ExportFormat::from_path(&path) != Some(format) => {
            path.with_extension(format.extension())
        }
        _ => path,
    }
}

pub async fn handle_export(
    state: Arc<AppState>,
    path: PathBuf,
    format: Option<ExportFormat>,
    app_to_ui_tx: &AsyncSender<UiEvent>,
) -> anyhow::Result<()> {
    let options = {
        let config = state.config.read().await;
        ExportOptions::from_config(&config.export)
    };

    let outcome = match options {
        Ok(options) => {
            let path = target_path(path, format);
            let session = state.session.clone();
            tokio::task::spawn_blocking(move || {
                slovo_export::export_session(&session, &path, &options)
            })
            .await?
        }
        Err(e) => Err(e),
    };

    let event = match outcome {
        Ok(outcome) => UiEvent::Exported(outcome),
        Err(e) => report_export_failure(&e),
    };
    app_to_ui_tx.send(event).await?;
    Ok(())
}

fn report_export_failure(e: &ExportError) -> UiEvent {
    if e.is_informational() {
        tracing::info!("{}", e);
        UiEvent::Notice(e.to_string())
    } else {
        tracing::error!("Export failed: {}", e);
        UiEvent::Error(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_path() {
        assert_eq!(
            target_path(PathBuf::from("out/lemmas"), Some(ExportFormat::Tsv)),
            PathBuf::from("out/lemmas.tsv")
        );
        assert_eq!(
            target_path(PathBuf::from("lemmas.csv"), Some(ExportFormat::Json)),
            PathBuf::from("lemmas.json")
        );
        assert_eq!(
            target_path(PathBuf::from("lemmas.csv"), None),
            PathBuf::from("lemmas.csv")
        );
    }
}
