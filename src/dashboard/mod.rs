//! One dashboard interface, two data sources.
//!
//! [`DemoDashboard`] runs entirely on mock data and the scripted simulator;
//! [`LiveDashboard`] polls the backend and overlays the same client-side
//! decision logic. The page picks one from configuration and can fall back
//! from live to demo.

pub mod demo;
pub mod driver;
pub mod live;
pub mod page;

pub use demo::DemoDashboard;
pub use driver::Driver;
pub use live::LiveDashboard;
pub use page::{DashboardPage, PageState};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::kernel::Tick;
use crate::model::{AgentAction, AgentState, Category, FlightOption, ImpactMetrics, LodgingOption, OptionDecision, Preferences, Trip};
use crate::services::api::ApiError;
use crate::store::{AgentSink, TripDraft, TripFormError, TripStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardMode {
    Live,
    Demo,
}

/// Backend simulation and approval controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationControl {
    SimulateDelay,
    SimulateCancel,
    Approve,
    Modify,
}

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Form(#[from] TripFormError),
}

/// Everything the presentation layer renders, in one snapshot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub mode: DashboardMode,
    pub trips: Vec<Trip>,
    pub trip: Option<Trip>,
    pub agent_state: AgentState,
    pub flights: Vec<FlightOption>,
    pub lodging: Vec<LodgingOption>,
    pub actions: Vec<AgentAction>,
    pub decisions: Vec<OptionDecision>,
    pub selected_flight_id: Option<String>,
    pub selected_lodging_id: Option<String>,
    pub metrics: ImpactMetrics,
    pub budget: f64,
    pub preferences: Preferences,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl DashboardView {
    pub(crate) fn from_store(
        mode: DashboardMode,
        store: &TripStore,
        agent_state: AgentState,
        actions: Vec<AgentAction>,
        metrics: ImpactMetrics,
    ) -> Self {
        let trip = store.active_trip().cloned();
        Self {
            mode,
            trips: store.trips().to_vec(),
            budget: trip.as_ref().map(|t| t.budget).unwrap_or(0.0),
            trip,
            agent_state,
            flights: store.flights().to_vec(),
            lodging: store.lodging().to_vec(),
            actions,
            decisions: store.decisions().to_vec(),
            selected_flight_id: store.selected_id(Category::Flight).map(str::to_string),
            selected_lodging_id: store.selected_id(Category::Lodging).map(str::to_string),
            metrics,
            preferences: store.preferences().clone(),
            is_loading: false,
            error: None,
        }
    }
}

/// The shape both sources expose to the page.
#[async_trait]
pub trait DashboardSource: AgentSink + Send {
    fn mode(&self) -> DashboardMode;

    fn view(&self) -> DashboardView;

    fn store(&self) -> &TripStore;

    /// The source's feed, for stores living outside it.
    fn sink(&mut self) -> &mut dyn AgentSink;

    fn decision(&self, option_id: &str) -> Option<&OptionDecision> {
        self.store().decision(option_id)
    }

    fn select_option(&mut self, option_id: &str, category: Category) -> bool;
    fn unselect_option(&mut self, option_id: &str, category: Category) -> bool;
    fn reject_option(&mut self, option_id: &str, category: Category, reason: &str);
    fn toggle_monitor(&mut self, option_id: &str) -> Option<bool>;
    fn reoptimize(&mut self, category: Category, strategy: &str);

    fn create_trip(&mut self, draft: &TripDraft) -> Result<String, TripFormError>;
    fn switch_trip(&mut self, trip_id: &str) -> bool;
    fn delete_trip(&mut self, trip_id: &str) -> bool;
    fn update_budget(&mut self, amount: f64) -> Result<(), TripFormError>;
    fn update_preferences(&mut self, preferences: Preferences);

    fn pause_monitoring(&mut self);
    fn resume_monitoring(&mut self);

    /// Applies every delayed completion due by `now`.
    fn advance(&mut self, now: Tick);

    /// Starts or stops the scripted agent loop. Only demo mode has one.
    fn set_simulation_enabled(&mut self, _enabled: bool, _now: Tick) {}

    /// Puts the scripted agent back at the start of its script.
    fn reset_simulation(&mut self) {}

    /// Pulls fresh data. A no-op for sources without a backend.
    async fn refresh(&mut self) -> Result<(), DashboardError>;

    /// Runs a backend control. Returns the server's message, if any.
    async fn control(&mut self, control: SimulationControl) -> Result<Option<String>, DashboardError>;
}
