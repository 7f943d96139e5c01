//! Clicked-agent state.

use crate::model::Agent;
use crate::selection::SelectionResult;

/// The agent most recently clicked on the map.
#[derive(Default)]
pub struct SelectionState {
    /// Id of the latest select-agent notification.
    pub requested: Option<u64>,
    /// Resolved agent for `requested`, once its notification lands.
    pub agent: Option<Agent>,
}

impl SelectionState {
    /// Records a click; the agent is filled in by [`Self::apply`].
    pub fn request(&mut self, agent_id: u64) {
        self.requested = Some(agent_id);
    }

    /// Applies a notification result by id.
    ///
    /// Results for anything other than the latest request are ignored, so
    /// duplicated or reordered notifications leave the same state behind.
    /// Returns whether the state changed.
    pub fn apply(&mut self, result: SelectionResult) -> bool {
        if self.requested != Some(result.agent_id) {
            log::debug!(
                "Ignoring stale selection for agent {} (latest is {:?})",
                result.agent_id,
                self.requested
            );
            return false;
        }
        if self.agent == result.agent {
            return false;
        }
        self.agent = result.agent;
        true
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.agent.as_ref().map(|a| a.id)
    }

    pub fn clear(&mut self) {
        self.requested = None;
        self.agent = None;
    }
}
