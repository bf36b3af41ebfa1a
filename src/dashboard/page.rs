use tracing::{info, warn};

use super::{
    DashboardError, DashboardMode, DashboardSource, DashboardView, DemoDashboard, LiveDashboard, SimulationControl,
};
use crate::config::DashboardConfig;
use crate::kernel::Tick;
use crate::model::ActivityPreference;
use crate::store::{ActivityStore, BudgetSummary};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Error { message: String },
    Empty,
    Ready,
}

/// The dashboard screen: one source, the activity planner, and the clock
/// both run on.
pub struct DashboardPage {
    config: DashboardConfig,
    source: Box<dyn DashboardSource>,
    activities: ActivityStore,
    now: Tick,
}

impl std::fmt::Debug for DashboardPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardPage")
            .field("mode", &self.source.mode())
            .field("now", &self.now)
            .finish()
    }
}

impl DashboardPage {
    /// Source picked from `config.mode`.
    pub fn new(config: DashboardConfig) -> Self {
        let now = Tick::new();
        let source: Box<dyn DashboardSource> = match config.mode {
            DashboardMode::Live => Box::new(LiveDashboard::new(&config)),
            DashboardMode::Demo => Box::new(DemoDashboard::new(&config, now)),
        };
        Self::with_source(config, source)
    }

    pub fn with_source(config: DashboardConfig, source: Box<dyn DashboardSource>) -> Self {
        let activities = ActivityStore::default().with_delays(config.delays.clone());
        Self {
            config,
            source,
            activities,
            now: Tick::new(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn mode(&self) -> DashboardMode {
        self.source.mode()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn source(&self) -> &dyn DashboardSource {
        self.source.as_ref()
    }

    pub fn source_mut(&mut self) -> &mut dyn DashboardSource {
        self.source.as_mut()
    }

    pub fn activities(&self) -> &ActivityStore {
        &self.activities
    }

    pub fn view(&self) -> DashboardView {
        self.source.view()
    }

    pub fn state(&self) -> PageState {
        let view = self.source.view();
        if view.is_loading {
            return PageState::Loading;
        }
        if let Some(message) = view.error {
            return PageState::Error { message };
        }
        if view.trip.is_none() {
            return PageState::Empty;
        }
        PageState::Ready
    }

    pub fn budget(&self) -> BudgetSummary {
        BudgetSummary::for_stores(self.source.store(), &self.activities)
    }

    /// Moves the shared clock forward and fires whatever is due.
    pub fn advance(&mut self, now: Tick) {
        if now > self.now {
            self.now = now;
        }
        self.source.advance(self.now);
        self.activities.advance(self.now, self.source.sink());
    }

    /// Refreshes the source. A failed live refresh switches to demo mode when
    /// `auto_fallback` is set.
    pub async fn refresh(&mut self) -> Result<(), DashboardError> {
        match self.source.refresh().await {
            Ok(()) => Ok(()),
            Err(err) if self.config.auto_fallback && self.source.mode() == DashboardMode::Live => {
                warn!(error = %err, "live data unavailable, falling back to demo mode");
                self.use_demo();
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    /// Starts over on a fresh live source, synced to the page clock, and
    /// refreshes it.
    pub async fn retry(&mut self) -> Result<(), DashboardError> {
        info!(base_url = %self.config.api_base_url, "retrying live mode");
        self.source = Box::new(LiveDashboard::new(&self.config));
        self.source.advance(self.now);
        self.refresh().await
    }

    pub fn use_demo(&mut self) {
        info!("switching to demo mode");
        self.source = Box::new(DemoDashboard::new(&self.config, self.now));
    }

    /// Turns the scripted agent loop on or off without leaving the source.
    pub fn set_simulation_enabled(&mut self, enabled: bool) {
        self.source.set_simulation_enabled(enabled, self.now);
    }

    /// Restores the seeded agent feed. No-op outside demo mode.
    pub fn reset_demo(&mut self) {
        self.source.reset_simulation();
    }

    pub async fn control(&mut self, control: SimulationControl) -> Result<Option<String>, DashboardError> {
        self.source.control(control).await
    }

    pub fn select_activity(&mut self, activity_id: &str) -> bool {
        self.activities.select_activity(activity_id, self.source.sink())
    }

    pub fn reject_activity(&mut self, activity_id: &str, reason: &str) {
        self.activities.reject_activity(activity_id, reason, self.source.sink());
    }

    pub fn remove_from_plan(&mut self, activity_id: &str) -> bool {
        self.activities.remove_from_plan(activity_id, self.source.sink())
    }

    pub fn reoptimize_activities(&mut self, strategy: &str) -> bool {
        self.activities.reoptimize_activities(strategy, self.source.sink())
    }

    pub fn toggle_preference(&mut self, pref: ActivityPreference) -> bool {
        self.activities.toggle_preference(pref, self.source.sink())
    }

    pub fn pause_planning(&mut self) {
        self.activities.pause_planning(self.source.sink());
    }

    pub fn resume_planning(&mut self) {
        self.activities.resume_planning(self.source.sink());
    }
}
