use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the simulated assistant is currently "doing". Drives status badges
/// and copy; carries no behaviour of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgentState {
    Idle,
    Initializing,
    #[serde(rename = "Searching Flights")]
    SearchingFlights,
    #[serde(rename = "Searching Lodging")]
    SearchingLodging,
    #[serde(rename = "Searching Activities")]
    SearchingActivities,
    #[serde(rename = "Re-optimizing")]
    Reoptimizing,
    #[serde(rename = "Re-optimizing (Flights)")]
    ReoptimizingFlights,
    #[serde(rename = "Re-optimizing (Lodging)")]
    ReoptimizingLodging,
    #[serde(rename = "Re-optimizing (Activities)")]
    ReoptimizingActivities,
    #[serde(rename = "Waiting for Approval")]
    WaitingForApproval,
    #[default]
    Monitoring,
    Paused,
}

impl AgentState {
    pub fn label(&self) -> &'static str {
        match self {
            AgentState::Idle => "Idle",
            AgentState::Initializing => "Initializing",
            AgentState::SearchingFlights => "Searching Flights",
            AgentState::SearchingLodging => "Searching Lodging",
            AgentState::SearchingActivities => "Searching Activities",
            AgentState::Reoptimizing => "Re-optimizing",
            AgentState::ReoptimizingFlights => "Re-optimizing (Flights)",
            AgentState::ReoptimizingLodging => "Re-optimizing (Lodging)",
            AgentState::ReoptimizingActivities => "Re-optimizing (Activities)",
            AgentState::WaitingForApproval => "Waiting for Approval",
            AgentState::Monitoring => "Monitoring",
            AgentState::Paused => "Paused",
        }
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Search,
    Compare,
    Alert,
    Optimize,
    Monitor,
    Sms,
    Trip,
    Reject,
}

/// One entry of the activity feed. The feed is append-only, newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentAction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    pub summary: String,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rationale: Vec<String>,
    pub sms_sent: bool,
}

impl AgentAction {
    /// New action stamped now, with an id of the form `<prefix>-<uuid>`.
    pub fn new(prefix: &str, kind: ActionKind, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            id: format!("{}-{}", prefix, uuid::Uuid::new_v4().simple()),
            timestamp: Utc::now(),
            kind,
            summary: summary.into(),
            detail: detail.into(),
            rationale: Vec::new(),
            sms_sent: false,
        }
    }

    pub fn with_rationale(mut self, rationale: Vec<String>) -> Self {
        self.rationale = rationale;
        self
    }
}

/// Counters shown on the impact panel. Simulated in demo mode, derived from
/// whatever the backend returned in live mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactMetrics {
    pub money_saved: f64,
    pub baseline_price: f64,
    pub time_saved_hours: f64,
    pub alerts_sent: u64,
    pub options_evaluated: u64,
}
