use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::types::{AppEvent, UiEvent};
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<UiEvent>, AsyncReceiver<UiEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(64),
            ui_to_app: kanal::bounded_async(64),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Where requests come from after the initial ones
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Only the initial requests, then exit
    Batch,
    /// Keep reading commands from stdin
    Interactive,
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(
        &self,
        initial: Vec<AppEvent>,
        mode: InputMode,
    ) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop
        tasks.spawn(ui_loop(self.channels.app_to_ui.1.clone()));

        // Initial requests, then stdin in interactive mode
        let tx = self.channels.ui_to_app.0.clone();
        let cancel = self.cancel_token.child_token();
        tasks.spawn(async move {
            for event in initial {
                tx.send(event).await?;
            }
            match mode {
                InputMode::Batch => tx.send(AppEvent::Quit).await?,
                InputMode::Interactive => {
                    spawn_stdin_reader(tx, cancel);
                }
            }
            anyhow::Ok(())
        });

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
