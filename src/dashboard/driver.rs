use std::collections::HashSet;

use tokio::time::{interval, Duration, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::{DashboardMode, DashboardPage, DashboardView};
use crate::kernel::{ticks_for, TICK_MS};
use crate::model::{AgentAction, AgentState};

/// Wall-clock driver: one logical tick per `TICK_MS`, live polling every
/// `poll_interval`, until cancelled.
#[derive(Debug)]
pub struct Driver {
    page: DashboardPage,
    cancel: CancellationToken,
    poll_ticks: u64,
    seen: HashSet<(String, String)>,
    last_mode: DashboardMode,
    last_state: AgentState,
}

/// Live ids are positional, so an action is known by id and summary together.
fn action_keys(view: &DashboardView) -> HashSet<(String, String)> {
    view.actions.iter().map(|a| (a.id.clone(), a.summary.clone())).collect()
}

impl Driver {
    pub fn new(page: DashboardPage, cancel: CancellationToken) -> Self {
        let poll_ticks = ticks_for(page.config().poll_interval).max(1);
        let view = page.view();
        Self {
            seen: action_keys(&view),
            last_mode: view.mode,
            last_state: view.agent_state,
            page,
            cancel,
            poll_ticks,
        }
    }

    pub fn page(&self) -> &DashboardPage {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut DashboardPage {
        &mut self.page
    }

    pub fn into_page(self) -> DashboardPage {
        self.page
    }

    /// Advances one tick. Returns the actions that appeared since the last
    /// step, newest first. A mode switch reports nothing and starts over
    /// from the new source's feed.
    pub async fn tick_step(&mut self) -> Vec<AgentAction> {
        let now = self.page.now().next();
        self.page.advance(now);

        if self.page.mode() == DashboardMode::Live && now.frame % self.poll_ticks == 0 {
            if let Err(err) = self.page.refresh().await {
                warn!(error = %err, "poll failed");
            }
        }

        let view = self.page.view();
        if view.agent_state != self.last_state {
            info!(from = %self.last_state, to = %view.agent_state, "agent state");
            self.last_state = view.agent_state;
        }

        let keys = action_keys(&view);
        if view.mode != self.last_mode {
            info!(from = ?self.last_mode, to = ?view.mode, "dashboard mode changed");
            self.last_mode = view.mode;
            self.seen = keys;
            return Vec::new();
        }
        let fresh: Vec<AgentAction> = view
            .actions
            .iter()
            .filter(|a| !self.seen.contains(&(a.id.clone(), a.summary.clone())))
            .cloned()
            .collect();
        self.seen = keys;
        for action in fresh.iter().rev() {
            info!(kind = ?action.kind, sms = action.sms_sent, "{}", action.summary);
        }
        fresh
    }

    pub async fn run(mut self) -> DashboardPage {
        info!(mode = ?self.page.mode(), tick_ms = TICK_MS, "dashboard driver started");

        if self.page.mode() == DashboardMode::Live {
            if let Err(err) = self.page.refresh().await {
                warn!(error = %err, "initial refresh failed");
            }
        }

        let mut cadence = interval(Duration::from_millis(TICK_MS));
        cadence.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => break,
                _ = cadence.tick() => {}
            }
            self.tick_step().await;
        }

        info!(frame = self.page.now().frame, "dashboard driver stopped");
        self.page
    }
}
