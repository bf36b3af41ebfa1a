//! Client-side state machines behind the dashboard.

pub mod activity;
pub mod budget;
pub mod decisions;
pub mod pool;
pub mod trip;

pub use activity::ActivityStore;
pub use budget::BudgetSummary;
pub use decisions::DecisionLedger;
pub use pool::ReplacementPool;
pub use trip::{SimulationDelays, TripDraft, TripFormError, TripStore};

use crate::model::{AgentAction, AgentState};

/// Where store operations report what the "agent" is doing.
///
/// Both dashboard sources implement this, so the same store code drives the
/// demo feed and the live overlay.
pub trait AgentSink {
    fn add_action(&mut self, action: AgentAction);
    fn set_agent_state(&mut self, state: AgentState);
}
