use async_trait::async_trait;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use super::{DashboardError, DashboardMode, DashboardSource, DashboardView, SimulationControl};
use crate::config::DashboardConfig;
use crate::kernel::Tick;
use crate::model::{AgentAction, AgentState, Category, ImpactMetrics, Preferences};
use crate::services::api::{mappers, ApiClient, ApiError};
use crate::store::{AgentSink, TripDraft, TripFormError, TripStore};

/// Agent activity as seen in live mode: local optimistic entries on top of
/// what the backend last reported.
#[derive(Debug, Clone)]
pub struct LiveFeed {
    local_actions: VecDeque<AgentAction>,
    reasoning: Vec<AgentAction>,
    logs: Vec<AgentAction>,
    api_state: AgentState,
    local_state: Option<AgentState>,
}

impl Default for LiveFeed {
    fn default() -> Self {
        Self {
            local_actions: VecDeque::new(),
            reasoning: Vec::new(),
            logs: Vec::new(),
            api_state: AgentState::Idle,
            local_state: None,
        }
    }
}

impl LiveFeed {
    /// Local override wins until the backend's own state moves.
    pub fn state(&self) -> AgentState {
        self.local_state.unwrap_or(self.api_state)
    }

    pub fn api_state(&self) -> AgentState {
        self.api_state
    }

    pub fn has_override(&self) -> bool {
        self.local_state.is_some()
    }

    /// Local actions first, newest first, then reasoning, then logs.
    pub fn actions(&self) -> Vec<AgentAction> {
        self.local_actions
            .iter()
            .chain(self.reasoning.iter())
            .chain(self.logs.iter())
            .cloned()
            .collect()
    }

    fn update_remote(&mut self, api_state: AgentState, reasoning: Vec<AgentAction>, logs: Vec<AgentAction>) {
        if api_state != self.api_state {
            debug!(from = %self.api_state, to = %api_state, "backend agent state changed");
            self.api_state = api_state;
            self.local_state = None;
        }
        self.reasoning = reasoning;
        self.logs = logs;
    }
}

impl AgentSink for LiveFeed {
    fn add_action(&mut self, action: AgentAction) {
        self.local_actions.push_front(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.local_state = Some(state);
    }
}

/// Dashboard backed by the TripMaster API, polled on refresh.
#[derive(Debug)]
pub struct LiveDashboard {
    client: ApiClient,
    store: TripStore,
    feed: LiveFeed,
    pending: Vec<SimulationControl>,
    loading: bool,
    error: Option<String>,
}

impl LiveDashboard {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_client(config, ApiClient::new(config.api_base_url.clone()))
    }

    pub fn with_client(config: &DashboardConfig, client: ApiClient) -> Self {
        Self {
            client,
            store: TripStore::empty().with_delays(config.delays.clone()),
            feed: LiveFeed::default(),
            pending: Vec::new(),
            loading: true,
            error: None,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn feed(&self) -> &LiveFeed {
        &self.feed
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Mutations waiting for the next refresh.
    pub fn pending_mutations(&self) -> &[SimulationControl] {
        &self.pending
    }

    pub fn metrics(&self) -> ImpactMetrics {
        let actions = self.feed.actions();
        ImpactMetrics {
            alerts_sent: actions.iter().filter(|a| a.sms_sent).count() as u64,
            options_evaluated: (self.store.flights().len() + self.store.lodging().len()) as u64,
            ..ImpactMetrics::default()
        }
    }

    async fn flush_mutations(&mut self) {
        for control in std::mem::take(&mut self.pending) {
            match call(&self.client, control).await {
                Ok(message) => debug!(?control, ?message, "mutation sent"),
                Err(err) => warn!(?control, error = %err, "mutation failed"),
            }
        }
    }

    async fn poll(&mut self) -> Result<(), ApiError> {
        let (trip, reasoning, logs) = tokio::try_join!(
            self.client.get_trip(),
            self.client.get_reasoning(),
            self.client.get_logs(),
        )?;

        let api_state = match trip.trip {
            Some(api_trip) => {
                let (flights, lodging) = mappers::map_options(&api_trip);
                debug!(trip_id = %api_trip.id, flights = flights.len(), lodging = lodging.len(), "trip polled");
                self.store.sync_remote(mappers::map_trip(&api_trip), flights, lodging);
                mappers::agent_state(api_trip.state)
            }
            None => {
                self.store.clear_remote();
                AgentState::Idle
            }
        };
        self.feed.update_remote(
            api_state,
            mappers::map_reasoning(&reasoning.reasoning),
            mappers::map_logs(&logs.logs),
        );
        Ok(())
    }
}

async fn call(client: &ApiClient, control: SimulationControl) -> Result<Option<String>, ApiError> {
    let response = match control {
        SimulationControl::SimulateDelay => client.simulate_delay().await?,
        SimulationControl::SimulateCancel => client.simulate_cancel().await?,
        SimulationControl::Approve => client.approve().await?,
        SimulationControl::Modify => client.modify().await?,
    };
    Ok(response.message)
}

impl AgentSink for LiveDashboard {
    fn add_action(&mut self, action: AgentAction) {
        self.feed.add_action(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.feed.set_agent_state(state);
    }
}

#[async_trait]
impl DashboardSource for LiveDashboard {
    fn mode(&self) -> DashboardMode {
        DashboardMode::Live
    }

    fn view(&self) -> DashboardView {
        let mut view = DashboardView::from_store(
            DashboardMode::Live,
            &self.store,
            self.feed.state(),
            self.feed.actions(),
            self.metrics(),
        );
        view.is_loading = self.loading;
        view.error = self.error.clone();
        view
    }

    fn store(&self) -> &TripStore {
        &self.store
    }

    fn sink(&mut self) -> &mut dyn AgentSink {
        self
    }

    fn select_option(&mut self, option_id: &str, category: Category) -> bool {
        self.store.select_option(option_id, category)
    }

    fn unselect_option(&mut self, option_id: &str, category: Category) -> bool {
        self.store.unselect_option(option_id, category, &mut self.feed)
    }

    fn reject_option(&mut self, option_id: &str, category: Category, reason: &str) {
        self.store.reject_option(option_id, category, reason, &mut self.feed);
        self.pending.push(SimulationControl::Modify);
    }

    fn toggle_monitor(&mut self, option_id: &str) -> Option<bool> {
        self.store.toggle_monitor(option_id)
    }

    fn reoptimize(&mut self, category: Category, strategy: &str) {
        self.store.reoptimize(category, strategy, &mut self.feed);
        self.pending.push(SimulationControl::Modify);
    }

    fn create_trip(&mut self, draft: &TripDraft) -> Result<String, TripFormError> {
        self.store.create_trip(draft, &mut self.feed)
    }

    fn switch_trip(&mut self, trip_id: &str) -> bool {
        self.store.switch_trip(trip_id)
    }

    fn delete_trip(&mut self, trip_id: &str) -> bool {
        self.store.delete_trip(trip_id, &mut self.feed)
    }

    fn update_budget(&mut self, amount: f64) -> Result<(), TripFormError> {
        self.store.update_budget(amount)
    }

    fn update_preferences(&mut self, preferences: Preferences) {
        self.store.update_preferences(preferences, &mut self.feed);
    }

    fn pause_monitoring(&mut self) {
        self.store.pause_monitoring(&mut self.feed);
    }

    fn resume_monitoring(&mut self) {
        self.store.resume_monitoring(&mut self.feed);
    }

    fn advance(&mut self, now: Tick) {
        self.store.advance(now, &mut self.feed);
    }

    async fn refresh(&mut self) -> Result<(), DashboardError> {
        self.flush_mutations().await;
        let result = self.poll().await;
        self.loading = false;
        match result {
            Ok(()) => {
                if self.error.take().is_some() {
                    info!("backend reachable again");
                }
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, base_url = %self.client.base_url(), "refresh failed");
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    async fn control(&mut self, control: SimulationControl) -> Result<Option<String>, DashboardError> {
        info!(?control, "sending control");
        let message = call(&self.client, control).await?;
        self.refresh().await?;
        Ok(message)
    }
}
