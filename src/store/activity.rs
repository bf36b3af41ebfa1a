use chrono::Utc;
use tracing::debug;

use super::pool::ReplacementPool;
use super::trip::SimulationDelays;
use super::AgentSink;
use crate::kernel::{Tick, TimerQueue};
use crate::mock;
use crate::model::{
    ActionKind, ActivityDecision, ActivityOption, ActivityPreference, ActivityPreferences,
    AgentAction, AgentState, DecisionStatus, PlannedActivity,
};

#[derive(Debug, Clone)]
enum ActivityTask {
    Replace { activity_id: String, reason: String },
    ReplaceAll { strategy: String, activity_ids: Vec<String> },
}

/// Suggested activities versus the itinerary.
#[derive(Debug, Clone)]
pub struct ActivityStore {
    suggestions: Vec<ActivityOption>,
    planned: Vec<PlannedActivity>,
    decisions: Vec<ActivityDecision>,
    pool: ReplacementPool<ActivityOption>,
    preferences: ActivityPreferences,
    paused: bool,
    timers: TimerQueue<ActivityTask>,
    delays: SimulationDelays,
    now: Tick,
}

impl Default for ActivityStore {
    fn default() -> Self {
        Self::new(mock::activities(), mock::replacement_activities())
    }
}

impl ActivityStore {
    pub fn new(suggestions: Vec<ActivityOption>, pool: Vec<ActivityOption>) -> Self {
        Self {
            suggestions,
            planned: Vec::new(),
            decisions: Vec::new(),
            pool: ReplacementPool::new("act-rep", pool),
            preferences: ActivityPreferences::default(),
            paused: false,
            timers: TimerQueue::new(),
            delays: SimulationDelays::default(),
            now: Tick::new(),
        }
    }

    pub fn with_delays(mut self, delays: SimulationDelays) -> Self {
        self.delays = delays;
        self
    }

    pub fn suggestions(&self) -> &[ActivityOption] {
        &self.suggestions
    }

    pub fn planned(&self) -> &[PlannedActivity] {
        &self.planned
    }

    pub fn decisions(&self) -> &[ActivityDecision] {
        &self.decisions
    }

    pub fn decision(&self, activity_id: &str) -> Option<&ActivityDecision> {
        self.decisions.iter().find(|d| d.activity_id == activity_id)
    }

    pub fn preferences(&self) -> &ActivityPreferences {
        &self.preferences
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Sum of planned activity prices.
    pub fn planned_spend(&self) -> f64 {
        self.planned.iter().map(|p| p.activity.price).sum()
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    /// Moves a suggestion into the plan and backfills its slot from the pool.
    /// Unknown ids are ignored.
    pub fn select_activity(&mut self, activity_id: &str, sink: &mut dyn AgentSink) -> bool {
        let Some(idx) = self.suggestions.iter().position(|a| a.id == activity_id) else {
            return false;
        };
        let activity = match self.pool.next() {
            Some(replacement) => std::mem::replace(&mut self.suggestions[idx], replacement),
            None => self.suggestions.remove(idx),
        };
        debug!(activity_id, title = %activity.title, "activity planned");
        self.decisions.retain(|d| d.activity_id != activity_id);

        sink.add_action(AgentAction::new(
            "act-activity-select",
            ActionKind::Optimize,
            format!("Activity added: {}", activity.title),
            "Added to your itinerary. TripMaster is adjusting remaining suggestions.",
        ));
        self.planned.push(PlannedActivity {
            activity_id: activity.id.clone(),
            activity,
        });
        true
    }

    pub fn reject_activity(&mut self, activity_id: &str, reason: &str, sink: &mut dyn AgentSink) {
        self.decisions.retain(|d| d.activity_id != activity_id);
        self.decisions.push(ActivityDecision {
            activity_id: activity_id.to_string(),
            status: DecisionStatus::Replacing,
            reject_reason: Some(reason.to_string()),
            timestamp: Utc::now(),
        });

        sink.set_agent_state(AgentState::ReoptimizingActivities);
        sink.add_action(AgentAction::new(
            "act-activity-reject",
            ActionKind::Reject,
            format!("Rejected activity — \"{}\"", reason),
            "TripMaster is finding a better option based on your feedback.",
        ));

        self.timers.schedule(
            self.now.after(self.delays.activity_reject),
            ActivityTask::Replace {
                activity_id: activity_id.to_string(),
                reason: reason.to_string(),
            },
        );
    }

    /// Takes an activity back out of the plan; a fresh suggestion is appended.
    pub fn remove_from_plan(&mut self, activity_id: &str, sink: &mut dyn AgentSink) -> bool {
        let Some(idx) = self.planned.iter().position(|p| p.activity_id == activity_id) else {
            return false;
        };
        let removed = self.planned.remove(idx);
        if let Some(replacement) = self.pool.next() {
            self.suggestions.push(replacement);
        }
        sink.add_action(AgentAction::new(
            "act-activity-remove",
            ActionKind::Optimize,
            format!("Removed {} from plan", removed.activity.title),
            "TripMaster suggested a replacement option.",
        ));
        true
    }

    /// Replaces the whole suggestion list. Ignored while planning is paused.
    pub fn reoptimize_activities(&mut self, strategy: &str, sink: &mut dyn AgentSink) -> bool {
        if self.paused {
            debug!(strategy, "activity planning paused; re-optimize ignored");
            return false;
        }
        let activity_ids: Vec<String> = self.suggestions.iter().map(|a| a.id.clone()).collect();
        self.decisions.retain(|d| !activity_ids.contains(&d.activity_id));
        let now = Utc::now();
        self.decisions.extend(activity_ids.iter().map(|id| ActivityDecision {
            activity_id: id.clone(),
            status: DecisionStatus::Replacing,
            reject_reason: None,
            timestamp: now,
        }));

        sink.set_agent_state(AgentState::ReoptimizingActivities);
        sink.add_action(AgentAction::new(
            "act-activity-reopt",
            ActionKind::Optimize,
            format!("Re-optimizing activities — {}", strategy),
            format!("TripMaster is curating new options based on \"{}\" preference.", strategy),
        ));

        self.timers.schedule(
            self.now.after(self.delays.activity_reoptimize),
            ActivityTask::ReplaceAll {
                strategy: strategy.to_string(),
                activity_ids,
            },
        );
        true
    }

    /// Flips a curation toggle and re-optimizes with `"<label>: on|off"`.
    pub fn toggle_preference(&mut self, pref: ActivityPreference, sink: &mut dyn AgentSink) -> bool {
        let enabled = self.preferences.toggle(pref);
        let strategy = format!("{}: {}", pref.label(), if enabled { "on" } else { "off" });
        self.reoptimize_activities(&strategy, sink);
        enabled
    }

    pub fn pause_planning(&mut self, sink: &mut dyn AgentSink) {
        self.paused = true;
        sink.set_agent_state(AgentState::Paused);
    }

    pub fn resume_planning(&mut self, sink: &mut dyn AgentSink) {
        self.paused = false;
        sink.set_agent_state(AgentState::Monitoring);
    }

    pub fn advance(&mut self, now: Tick, sink: &mut dyn AgentSink) {
        if now > self.now {
            self.now = now;
        }
        for task in self.timers.drain_due(self.now) {
            match task {
                ActivityTask::Replace { activity_id, reason } => {
                    let mut title = None;
                    if let Some(slot) = self.suggestions.iter_mut().find(|a| a.id == activity_id) {
                        if let Some(replacement) = self.pool.next() {
                            title = Some(replacement.title.clone());
                            *slot = replacement;
                        }
                    }
                    self.decisions.retain(|d| d.activity_id != activity_id);
                    sink.set_agent_state(AgentState::Monitoring);
                    // planned or removed in the meantime
                    let Some(title) = title else {
                        debug!(%activity_id, "rejected activity no longer suggested");
                        continue;
                    };
                    sink.add_action(AgentAction::new(
                        "act-activity-replace",
                        ActionKind::Optimize,
                        format!("Found new option: {}", title),
                        format!("Replaced based on your feedback: \"{}\".", reason),
                    ));
                }
                ActivityTask::ReplaceAll { strategy, activity_ids } => {
                    for slot in self.suggestions.iter_mut() {
                        if let Some(replacement) = self.pool.next() {
                            *slot = replacement;
                        }
                    }
                    self.decisions.retain(|d| !activity_ids.contains(&d.activity_id));
                    sink.set_agent_state(AgentState::Monitoring);
                    sink.add_action(AgentAction::new(
                        "act-activity-reopt-done",
                        ActionKind::Optimize,
                        format!("Found new activities — {}", strategy),
                        format!("Replaced {} activities with better matches.", activity_ids.len()),
                    ));
                }
            }
        }
    }
}
