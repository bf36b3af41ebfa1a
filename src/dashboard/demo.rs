use async_trait::async_trait;
use tracing::debug;

use super::{DashboardError, DashboardMode, DashboardSource, DashboardView, SimulationControl};
use crate::config::DashboardConfig;
use crate::kernel::{HashJitter, Jitter, Tick};
use crate::model::{AgentAction, AgentState, Category, Preferences};
use crate::sim::DemoSimulator;
use crate::store::{AgentSink, TripDraft, TripFormError, TripStore};

/// Mock data plus the scripted simulator. Used when no backend is reachable.
#[derive(Debug)]
pub struct DemoDashboard {
    store: TripStore,
    sim: DemoSimulator,
}

impl DemoDashboard {
    /// Seeded from the mock tables, simulator running from `now`.
    pub fn new(config: &DashboardConfig, now: Tick) -> Self {
        Self::with_jitter(config, now, Box::new(HashJitter::from_clock()))
    }

    pub fn with_jitter(config: &DashboardConfig, now: Tick, jitter: Box<dyn Jitter>) -> Self {
        let mut store = TripStore::demo().with_delays(config.delays.clone());
        let mut sim = DemoSimulator::new(jitter).with_interval(config.demo_min_interval, config.demo_max_interval);
        store.advance(now, &mut sim);
        sim.set_enabled(true, now);
        Self { store, sim }
    }

    pub fn simulator(&self) -> &DemoSimulator {
        &self.sim
    }
}

impl AgentSink for DemoDashboard {
    fn add_action(&mut self, action: AgentAction) {
        self.sim.add_action(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.sim.set_agent_state(state);
    }
}

#[async_trait]
impl DashboardSource for DemoDashboard {
    fn mode(&self) -> DashboardMode {
        DashboardMode::Demo
    }

    fn view(&self) -> DashboardView {
        let feed = self.sim.feed();
        DashboardView::from_store(
            DashboardMode::Demo,
            &self.store,
            feed.state,
            feed.actions.iter().cloned().collect(),
            feed.metrics.clone(),
        )
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
        self.store.unselect_option(option_id, category, &mut self.sim)
    }

    fn reject_option(&mut self, option_id: &str, category: Category, reason: &str) {
        self.store.reject_option(option_id, category, reason, &mut self.sim);
    }

    fn toggle_monitor(&mut self, option_id: &str) -> Option<bool> {
        self.store.toggle_monitor(option_id)
    }

    fn reoptimize(&mut self, category: Category, strategy: &str) {
        self.store.reoptimize(category, strategy, &mut self.sim);
    }

    fn create_trip(&mut self, draft: &TripDraft) -> Result<String, TripFormError> {
        self.store.create_trip(draft, &mut self.sim)
    }

    fn switch_trip(&mut self, trip_id: &str) -> bool {
        self.store.switch_trip(trip_id)
    }

    fn delete_trip(&mut self, trip_id: &str) -> bool {
        self.store.delete_trip(trip_id, &mut self.sim)
    }

    fn update_budget(&mut self, amount: f64) -> Result<(), TripFormError> {
        self.store.update_budget(amount)
    }

    fn update_preferences(&mut self, preferences: Preferences) {
        self.store.update_preferences(preferences, &mut self.sim);
    }

    fn pause_monitoring(&mut self) {
        self.store.pause_monitoring(&mut self.sim);
    }

    fn resume_monitoring(&mut self) {
        self.store.resume_monitoring(&mut self.sim);
    }

    fn advance(&mut self, now: Tick) {
        self.store.advance(now, &mut self.sim);
        self.sim.advance(now);
    }

    fn set_simulation_enabled(&mut self, enabled: bool, now: Tick) {
        self.sim.set_enabled(enabled, now);
    }

    fn reset_simulation(&mut self) {
        debug!("demo feed reset");
        self.sim.reset();
    }

    async fn refresh(&mut self) -> Result<(), DashboardError> {
        Ok(())
    }

    async fn control(&mut self, control: SimulationControl) -> Result<Option<String>, DashboardError> {
        debug!(?control, "control ignored in demo mode");
        Ok(None)
    }
}
