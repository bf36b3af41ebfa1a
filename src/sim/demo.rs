use chrono::Utc;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info};

use crate::kernel::{ticks_for, HashJitter, Jitter, Tick};
use crate::mock;
use crate::model::{AgentAction, AgentState, ImpactMetrics};
use crate::store::AgentSink;

pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_INTERVAL: Duration = Duration::from_secs(10);

const STEP_COUNT: u8 = 5;

/// Agent state, newest-first action log and impact counters.
#[derive(Debug, Clone)]
pub struct AgentFeed {
    pub state: AgentState,
    pub actions: VecDeque<AgentAction>,
    pub metrics: ImpactMetrics,
    /// Progress indicator, cycles 1..=5.
    pub current_step: u8,
}

impl AgentFeed {
    /// Feed seeded with the mock history.
    pub fn seeded() -> Self {
        Self {
            state: AgentState::Monitoring,
            actions: mock::initial_actions().into(),
            metrics: mock::metrics(),
            current_step: STEP_COUNT,
        }
    }

    pub fn latest(&self) -> Option<&AgentAction> {
        self.actions.front()
    }
}

impl AgentSink for AgentFeed {
    fn add_action(&mut self, action: AgentAction) {
        self.actions.push_front(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.state = state;
    }
}

/// Scripted "agent" activity for demo mode.
///
/// While enabled, every period one synthetic action lands at the front of the
/// feed, the agent state steps through a fixed cycle and the metrics creep up.
/// The period is picked once per enable, between `min_interval` and
/// `max_interval`.
pub struct DemoSimulator {
    feed: AgentFeed,
    enabled: bool,
    period_ticks: u64,
    next_fire: Option<Tick>,
    state_cursor: usize,
    action_cursor: usize,
    states: Vec<AgentState>,
    templates: Vec<AgentAction>,
    min_interval: Duration,
    max_interval: Duration,
    jitter: Box<dyn Jitter>,
}

impl std::fmt::Debug for DemoSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DemoSimulator")
            .field("enabled", &self.enabled)
            .field("period_ticks", &self.period_ticks)
            .field("next_fire", &self.next_fire)
            .field("state", &self.feed.state)
            .finish()
    }
}

impl Default for DemoSimulator {
    fn default() -> Self {
        Self::new(Box::new(HashJitter::from_clock()))
    }
}

impl DemoSimulator {
    pub fn new(jitter: Box<dyn Jitter>) -> Self {
        Self {
            feed: AgentFeed::seeded(),
            enabled: false,
            period_ticks: 0,
            next_fire: None,
            state_cursor: 0,
            action_cursor: 0,
            states: mock::demo_agent_states(),
            templates: mock::demo_action_templates(),
            min_interval: DEFAULT_MIN_INTERVAL,
            max_interval: DEFAULT_MAX_INTERVAL,
            jitter,
        }
    }

    pub fn with_interval(mut self, min: Duration, max: Duration) -> Self {
        self.min_interval = min;
        self.max_interval = max.max(min);
        self
    }

    pub fn feed(&self) -> &AgentFeed {
        &self.feed
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn next_fire(&self) -> Option<Tick> {
        self.next_fire
    }

    pub fn period_ticks(&self) -> u64 {
        self.period_ticks
    }

    /// Starts or stops the loop. Starting picks a fresh period counted from
    /// `now`; stopping drops the pending fire.
    pub fn set_enabled(&mut self, enabled: bool, now: Tick) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            let min = ticks_for(self.min_interval);
            let max = ticks_for(self.max_interval);
            self.period_ticks = self.jitter.next_in(min, max + 1).max(1);
            self.next_fire = Some(Tick { frame: now.frame + self.period_ticks });
            info!(period_ticks = self.period_ticks, "demo mode on");
        } else {
            self.next_fire = None;
            info!("demo mode off");
        }
    }

    /// Fires every interval due by `now`. Returns how many events were emitted.
    pub fn advance(&mut self, now: Tick) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_fire {
            if due > now {
                break;
            }
            self.emit();
            fired += 1;
            self.next_fire = Some(Tick { frame: due.frame + self.period_ticks });
        }
        fired
    }

    fn emit(&mut self) {
        if !self.states.is_empty() {
            self.feed.state = self.states[self.state_cursor % self.states.len()];
        }
        self.feed.current_step = (self.feed.current_step % STEP_COUNT) + 1;

        if !self.templates.is_empty() {
            let template = &self.templates[self.action_cursor % self.templates.len()];
            let action = AgentAction {
                id: format!("demo-{}", uuid::Uuid::new_v4().simple()),
                timestamp: Utc::now(),
                ..template.clone()
            };
            let sms = action.sms_sent;
            debug!(summary = %action.summary, state = %self.feed.state, "demo event");
            self.feed.actions.push_front(action);

            let metrics = &mut self.feed.metrics;
            metrics.options_evaluated += self.jitter.next_in(10, 40);
            metrics.money_saved += self.jitter.next_in(0, 8) as f64;
            if sms {
                metrics.alerts_sent += 1;
            }
        }

        self.state_cursor += 1;
        self.action_cursor += 1;
    }

    /// Back to the seeded feed and the start of both cycles. The loop keeps
    /// its enabled state.
    pub fn reset(&mut self) {
        self.feed = AgentFeed::seeded();
        self.state_cursor = 0;
        self.action_cursor = 0;
    }
}

impl AgentSink for DemoSimulator {
    fn add_action(&mut self, action: AgentAction) {
        self.feed.add_action(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.feed.set_agent_state(state);
    }
}
