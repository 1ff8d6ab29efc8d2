use std::time::Duration;

use tokio::time::timeout;

use crate::controller::ChannelSet;
use crate::io::parse_command;
use crate::types::{AppEvent, UiEvent};
use crate::ui::ui_loop;

#[tokio::test]
async fn test_sync_sender_reaches_async_receiver() {
    let channels = ChannelSet::new();
    let tx = channels.ui_to_app.0.clone_sync();

    // Same path the stdin reader takes
    std::thread::spawn(move || {
        for line in [":stats", "Кошка сидела", ":quit"] {
            if let Ok(Some(event)) = parse_command(line) {
                tx.send(event).expect("send failed");
            }
        }
    });

    let rx = channels.ui_to_app.1.clone();
    let mut received = Vec::new();
    while received.last() != Some(&AppEvent::Quit) {
        let event = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("Timeout - event never arrived!")
            .expect("Channel error");
        received.push(event);
    }

    assert_eq!(
        received,
        vec![
            AppEvent::ShowStatistics,
            AppEvent::Analyze("Кошка сидела".to_string()),
            AppEvent::Quit,
        ]
    );
}

#[tokio::test]
async fn test_ui_loop_stops_on_shutdown() {
    let (tx, rx) = kanal::unbounded_async::<UiEvent>();
    tx.send(UiEvent::Notice("No text to analyze".to_string()))
        .await
        .unwrap();
    tx.send(UiEvent::Shutdown).await.unwrap();

    let result = timeout(Duration::from_secs(2), ui_loop(rx)).await;
    assert!(matches!(result, Ok(Ok(()))));
}

#[tokio::test]
async fn test_batch_mode_runs_to_completion() {
    use std::sync::Arc;

    use slovo_config::Config;

    use crate::controller::{AppController, InputMode};
    use crate::state::AppState;

    let mut config = Config::default();
    config.model.enabled = false;
    let state = Arc::new(AppState::initialize(config).await.unwrap());
    let controller = AppController::new(state.clone());

    let mut tasks = controller.spawn_tasks(
        vec![
            AppEvent::Analyze("Кошка сидела на ковре".to_string()),
            AppEvent::ShowStatistics,
        ],
        InputMode::Batch,
    );

    let finished = timeout(Duration::from_secs(10), async {
        while let Some(result) = tasks.join_next().await {
            result.expect("task panicked").expect("task failed");
        }
    })
    .await;

    assert!(finished.is_ok(), "Timeout - batch run never finished");
    assert_eq!(state.session.runs(), 1);
}
