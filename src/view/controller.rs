//! Effect executor around [`ViewState`].
//!
//! Presentation layers feed it user actions and orchestrator events; it applies the
//! transition and carries out whatever the transition asked for.

use super::state::{Action, Effect, ViewState};
use crate::model::{AppEvent, Draft};
use crate::orchestrator::UiCommand;
use std::time::Instant;
use tokio::sync::mpsc::UnboundedSender;

/// Platform clipboard write primitive.
pub trait ClipboardSink {
    fn write_text(&mut self, text: &str) -> anyhow::Result<()>;
}

pub struct ViewController<C: ClipboardSink> {
    state: ViewState,
    cmd_tx: UnboundedSender<UiCommand>,
    clipboard: C,
}

impl<C: ClipboardSink> ViewController<C> {
    pub fn new(draft: Draft, cmd_tx: UnboundedSender<UiCommand>, clipboard: C) -> Self {
        Self {
            state: ViewState::new(draft),
            cmd_tx,
            clipboard,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        let Some(effect) = self.state.apply(action) else {
            return;
        };
        match effect {
            Effect::Dispatch(request) => {
                let generation = request.generation();
                if self.cmd_tx.send(UiCommand::Submit(request)).is_err() {
                    // Orchestrator is gone; settle as a failure so the view does not hang in Pending.
                    tracing::error!(generation, "orchestrator channel closed");
                    self.state.apply(Action::Settled {
                        generation,
                        outcome: crate::model::GenerationOutcome::Failure {
                            message: crate::error::GENERATION_FAILED_MESSAGE.to_string(),
                        },
                    });
                }
            }
            Effect::CopyToClipboard(text) => {
                if let Err(e) = self.clipboard.write_text(&text) {
                    tracing::warn!(error = %e, "clipboard write failed");
                    self.state.apply(Action::CopyFailed {
                        now: Instant::now(),
                    });
                }
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Settled {
                generation,
                outcome,
            } => {
                tracing::trace!(generation, current = self.state.generation(), "outcome received");
                self.dispatch(Action::Settled {
                    generation,
                    outcome,
                })
            }
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.dispatch(Action::Tick { now });
    }
}
