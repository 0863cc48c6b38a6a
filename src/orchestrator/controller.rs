//! Request lifecycle controller.
//!
//! Receives submissions from the view, runs each one as its own task, and reports the
//! tagged outcome back. The view decides whether an outcome is still current.

use super::request::RequestOrchestrator;
use crate::model::{AppEvent, GenerationOutcome, GenerationRequest};
use anyhow::Result;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

/// Commands emitted by UI layers.
#[derive(Debug, Clone)]
pub enum UiCommand {
    Submit(GenerationRequest),
    Quit,
}

/// Run submissions on behalf of the UI until it quits or drops its sender.
pub(crate) async fn run_controller(
    orchestrator: RequestOrchestrator,
    event_tx: UnboundedSender<AppEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut in_flight: JoinSet<(u64, GenerationOutcome)> = JoinSet::new();

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UiCommand::Submit(request)) => {
                        let orch = orchestrator.clone();
                        in_flight.spawn(async move {
                            let outcome = orch.submit(&request).await;
                            (request.generation(), outcome)
                        });
                    }
                    Some(UiCommand::Quit) | None => {
                        if !in_flight.is_empty() {
                            tracing::debug!(
                                outstanding = in_flight.len(),
                                "abandoning in-flight requests on quit"
                            );
                        }
                        in_flight.shutdown().await;
                        break Ok(());
                    }
                }
            }
            // Idle when nothing is in flight; `join_next` would resolve to None immediately.
            joined = async {
                if in_flight.is_empty() {
                    futures::future::pending().await
                } else {
                    in_flight.join_next().await
                }
            } => {
                match joined {
                    Some(Ok((generation, outcome))) => {
                        let _ = event_tx.send(AppEvent::Settled { generation, outcome });
                    }
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "generation task did not complete");
                    }
                    None => {}
                }
            }
        }
    }
}
