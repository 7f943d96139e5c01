//! Async "select agent" notifications.
//!
//! Clicking an agent fires a notification that resolves the agent on a
//! detached worker and reports back through a channel, the same way file
//! picking does. Notifications are not cancellable; results carry the agent
//! id so the receiver can apply them idempotently.

use crate::model::{Agent, ReplaySnapshot};
use eframe::egui;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// Outcome of a select-agent notification.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub agent_id: u64,
    /// `None` when the id is not in the snapshot the click was made against.
    pub agent: Option<Agent>,
}

/// Channel-based bridge between click handling and the update loop.
pub struct AgentSelectionChannel {
    sender: Sender<SelectionResult>,
    receiver: Receiver<SelectionResult>,
}

impl Default for AgentSelectionChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentSelectionChannel {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Fires a select-agent notification for `agent_id`.
    ///
    /// On native: awaited on a new thread using pollster.
    /// On WASM: uses wasm_bindgen_futures::spawn_local.
    ///
    /// The result is sent through the channel and ctx.request_repaint() is
    /// called so the update loop picks it up.
    pub fn select(&self, ctx: egui::Context, snapshot: Arc<ReplaySnapshot>, agent_id: u64) {
        let sender = self.sender.clone();
        log::debug!("Selecting agent {}", agent_id);

        #[cfg(not(target_arch = "wasm32"))]
        {
            std::thread::spawn(move || {
                let result = pollster::block_on(resolve_agent(snapshot, agent_id));
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = resolve_agent(snapshot, agent_id).await;
                let _ = sender.send(result);
                ctx.request_repaint();
            });
        }
    }

    /// Non-blocking check for completed notifications.
    pub fn try_recv(&self) -> Option<SelectionResult> {
        self.receiver.try_recv().ok()
    }
}

async fn resolve_agent(snapshot: Arc<ReplaySnapshot>, agent_id: u64) -> SelectionResult {
    let agent = snapshot.find_agent(agent_id).cloned();
    if agent.is_none() {
        log::warn!("Selected agent {} is not in the current snapshot", agent_id);
    }
    SelectionResult { agent_id, agent }
}
