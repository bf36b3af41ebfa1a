use chrono::{NaiveDate, Utc};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use super::decisions::DecisionLedger;
use super::pool::ReplacementPool;
use super::AgentSink;
use crate::kernel::{Tick, TimerQueue};
use crate::mock;
use crate::model::{
    ActionKind, AgentAction, AgentState, Category, DecisionStatus, FlightOption, LodgingOption, OptionDecision,
    OptionRecord, PreferenceBias, Preferences, Trip, TripStatus,
};

/// Fixed lengths of the fake asynchronous work.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDelays {
    pub option_reject: Duration,
    pub option_reoptimize: Duration,
    pub activity_reject: Duration,
    pub activity_reoptimize: Duration,
    /// Offsets from trip creation of the Searching Flights, Searching Lodging
    /// and Monitoring phases.
    pub trip_phases: [Duration; 3],
}

impl Default for SimulationDelays {
    fn default() -> Self {
        Self {
            option_reject: Duration::from_millis(2500),
            option_reoptimize: Duration::from_millis(1800),
            activity_reject: Duration::from_millis(2200),
            activity_reoptimize: Duration::from_millis(2000),
            trip_phases: [
                Duration::from_millis(2000),
                Duration::from_millis(4000),
                Duration::from_millis(6000),
            ],
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TripFormError {
    #[error("origin is required")]
    MissingOrigin,
    #[error("destination is required")]
    MissingDestination,
    #[error("departure date {0} is in the past")]
    DepartInPast(NaiveDate),
    #[error("return date must not be before departure date")]
    ReturnBeforeDepart,
    #[error("budget must be greater than zero")]
    NonPositiveBudget,
    #[error("at least one traveler is required")]
    NoTravelers,
    #[error("no active trip")]
    NoActiveTrip,
}

/// Input of the new-trip form.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDraft {
    pub origin: String,
    pub destination: String,
    pub depart_date: NaiveDate,
    pub return_date: NaiveDate,
    pub budget: f64,
    pub travelers: u32,
    pub date_flexible: bool,
    pub preference_bias: Option<PreferenceBias>,
}

impl TripDraft {
    /// Checks the form rules against `today` and returns the normalised
    /// draft (codes trimmed and upper-cased).
    pub fn validate(&self, today: NaiveDate) -> Result<TripDraft, TripFormError> {
        let origin = self.origin.trim().to_uppercase();
        let destination = self.destination.trim().to_uppercase();
        if origin.is_empty() {
            return Err(TripFormError::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(TripFormError::MissingDestination);
        }
        if self.depart_date < today {
            return Err(TripFormError::DepartInPast(self.depart_date));
        }
        if self.return_date < self.depart_date {
            return Err(TripFormError::ReturnBeforeDepart);
        }
        if !(self.budget > 0.0) {
            return Err(TripFormError::NonPositiveBudget);
        }
        if self.travelers == 0 {
            return Err(TripFormError::NoTravelers);
        }
        Ok(TripDraft {
            origin,
            destination,
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone)]
enum TripTask {
    Replace {
        option_id: String,
        category: Category,
        reason: String,
    },
    Reoptimize {
        category: Category,
        strategy: String,
        option_ids: Vec<String>,
    },
    Phase {
        state: AgentState,
        announce: Option<(String, String)>,
    },
}

/// Trips, flight/lodging candidates and the user's decisions on them.
///
/// All mutation is optimistic local state. Anything that "takes time" is
/// queued on the store's timer queue and applied by [`TripStore::advance`].
#[derive(Debug, Clone)]
pub struct TripStore {
    trips: Vec<Trip>,
    active_trip_id: Option<String>,
    flights: Vec<FlightOption>,
    lodging: Vec<LodgingOption>,
    seed_flights: Vec<FlightOption>,
    seed_lodging: Vec<LodgingOption>,
    ledger: DecisionLedger,
    preferences: Preferences,
    flight_pool: ReplacementPool<FlightOption>,
    lodging_pool: ReplacementPool<LodgingOption>,
    timers: TimerQueue<TripTask>,
    delays: SimulationDelays,
    now: Tick,
}

impl TripStore {
    pub fn new(trips: Vec<Trip>, flights: Vec<FlightOption>, lodging: Vec<LodgingOption>) -> Self {
        let active_trip_id = trips.first().map(|t| t.id.clone());
        Self {
            trips,
            active_trip_id,
            seed_flights: flights.clone(),
            seed_lodging: lodging.clone(),
            flights,
            lodging,
            ledger: DecisionLedger::new(),
            preferences: mock::preferences(),
            flight_pool: ReplacementPool::new("fl-rep", mock::replacement_flights()),
            lodging_pool: ReplacementPool::new("lg-rep", mock::replacement_lodgings()),
            timers: TimerQueue::new(),
            delays: SimulationDelays::default(),
            now: Tick::new(),
        }
    }

    /// Store seeded from the mock tables.
    pub fn demo() -> Self {
        Self::new(mock::trips(), mock::flights(), mock::lodgings())
    }

    /// Store with no trips, waiting for backend data.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    pub fn with_delays(mut self, delays: SimulationDelays) -> Self {
        self.delays = delays;
        self
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn active_trip(&self) -> Option<&Trip> {
        let id = self.active_trip_id.as_deref()?;
        self.trips.iter().find(|t| t.id == id)
    }

    pub fn flights(&self) -> &[FlightOption] {
        &self.flights
    }

    pub fn lodging(&self) -> &[LodgingOption] {
        &self.lodging
    }

    pub fn decisions(&self) -> &[OptionDecision] {
        self.ledger.all()
    }

    pub fn decision(&self, option_id: &str) -> Option<&OptionDecision> {
        self.ledger.get(option_id)
    }

    pub fn selected_id(&self, category: Category) -> Option<&str> {
        self.ledger.selected(category)
    }

    pub fn selected_flight(&self) -> Option<&FlightOption> {
        let id = self.ledger.selected(Category::Flight)?;
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn selected_lodging(&self) -> Option<&LodgingOption> {
        let id = self.ledger.selected(Category::Lodging)?;
        self.lodging.iter().find(|l| l.id == id)
    }

    pub fn pending_tasks(&self) -> usize {
        self.timers.len()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn delays(&self) -> &SimulationDelays {
        &self.delays
    }

    /// Validates and adds a trip, makes it active, and kicks off the scripted
    /// Initializing → Searching → Monitoring sequence.
    pub fn create_trip(&mut self, draft: &TripDraft, sink: &mut dyn AgentSink) -> Result<String, TripFormError> {
        let draft = draft.validate(Utc::now().date_naive())?;
        let trip = Trip {
            id: format!("trip-{}", uuid::Uuid::new_v4().simple()),
            origin: draft.origin.clone(),
            destination: draft.destination.clone(),
            depart_date: draft.depart_date,
            return_date: draft.return_date,
            budget: draft.budget,
            travelers: draft.travelers,
            status: TripStatus::Planning,
            date_flexible: draft.date_flexible,
            preference_bias: draft.preference_bias,
        };
        let id = trip.id.clone();
        info!(trip_id = %id, origin = %trip.origin, destination = %trip.destination, "trip created");

        self.trips.push(trip);
        self.activate(Some(id.clone()));

        sink.add_action(AgentAction::new(
            "act-trip",
            ActionKind::Trip,
            format!("Trip created: {} → {}", draft.origin, draft.destination),
            format!(
                "New trip for {} traveler(s), {} to {}, budget ${}.",
                draft.travelers, draft.depart_date, draft.return_date, draft.budget
            ),
        ));
        sink.set_agent_state(AgentState::Initializing);

        let [searching_flights, searching_lodging, monitoring] = self.delays.trip_phases;
        self.timers.schedule(
            self.now.after(searching_flights),
            TripTask::Phase { state: AgentState::SearchingFlights, announce: None },
        );
        self.timers.schedule(
            self.now.after(searching_lodging),
            TripTask::Phase {
                state: AgentState::SearchingLodging,
                announce: Some((draft.origin, draft.destination)),
            },
        );
        self.timers.schedule(
            self.now.after(monitoring),
            TripTask::Phase { state: AgentState::Monitoring, announce: None },
        );
        Ok(id)
    }

    /// Returns false for an unknown trip id.
    pub fn switch_trip(&mut self, trip_id: &str) -> bool {
        if !self.trips.iter().any(|t| t.id == trip_id) {
            return false;
        }
        debug!(trip_id, "switching trip");
        self.activate(Some(trip_id.to_string()));
        true
    }

    /// Removes a trip. Deleting the active one moves to the first remaining
    /// trip, or to the empty state when none is left.
    pub fn delete_trip(&mut self, trip_id: &str, sink: &mut dyn AgentSink) -> bool {
        let Some(idx) = self.trips.iter().position(|t| t.id == trip_id) else {
            return false;
        };
        let removed = self.trips.remove(idx);
        info!(trip_id, "trip deleted");

        if self.active_trip_id.as_deref() == Some(trip_id) {
            let next = self.trips.first().map(|t| t.id.clone());
            self.activate(next);
        }

        sink.add_action(AgentAction::new(
            "act-trip-delete",
            ActionKind::Trip,
            format!("Trip removed: {} → {}", removed.origin, removed.destination),
            "TripMaster stopped monitoring this trip.",
        ));
        true
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Replaces the standing travel preferences the agent searches with.
    pub fn update_preferences(&mut self, preferences: Preferences, sink: &mut dyn AgentSink) {
        debug!(?preferences, "travel preferences updated");
        self.preferences = preferences;
        sink.add_action(AgentAction::new(
            "act-preferences",
            ActionKind::Optimize,
            "Travel preferences updated",
            "TripMaster will apply your new preferences to upcoming searches.",
        ));
    }

    pub fn update_budget(&mut self, amount: f64) -> Result<(), TripFormError> {
        if !(amount > 0.0) {
            return Err(TripFormError::NonPositiveBudget);
        }
        let trip = self.active_trip_mut().ok_or(TripFormError::NoActiveTrip)?;
        trip.budget = amount;
        debug!(trip_id = %trip.id, amount, "budget updated");
        Ok(())
    }

    fn activate(&mut self, trip_id: Option<String>) {
        self.active_trip_id = trip_id;
        self.ledger.clear();
        if self.active_trip_id.is_some() {
            self.flights = self.seed_flights.clone();
            self.lodging = self.seed_lodging.clone();
        } else {
            self.flights.clear();
            self.lodging.clear();
        }
    }

    fn active_trip_mut(&mut self) -> Option<&mut Trip> {
        let id = self.active_trip_id.as_deref()?;
        self.trips.iter_mut().find(|t| t.id == id)
    }

    fn set_active_status(&mut self, status: TripStatus) {
        if let Some(trip) = self.active_trip_mut() {
            if trip.status != status {
                debug!(trip_id = %trip.id, from = ?trip.status, to = ?status, "trip status");
                trip.status = status;
            }
        }
    }

    /// A trip stays locked only while both categories have a selection.
    fn reconcile_lock(&mut self) {
        let both = self.ledger.selected(Category::Flight).is_some()
            && self.ledger.selected(Category::Lodging).is_some();
        match self.active_trip().map(|t| t.status) {
            Some(TripStatus::Locked) if !both => self.set_active_status(TripStatus::Monitoring),
            Some(_) if both => self.set_active_status(TripStatus::Locked),
            _ => {}
        }
    }

    fn contains(&self, option_id: &str, category: Category) -> bool {
        match category {
            Category::Flight => self.flights.iter().any(|f| f.id == option_id),
            Category::Lodging => self.lodging.iter().any(|l| l.id == option_id),
        }
    }

    /// Selects an option, clearing any other selection in its category.
    /// Locks the trip once both categories are chosen. Unknown ids are ignored.
    pub fn select_option(&mut self, option_id: &str, category: Category) -> bool {
        if !self.contains(option_id, category) {
            return false;
        }
        self.ledger.select(option_id, category);
        debug!(option_id, %category, "option selected");
        if self.ledger.selected(category.other()).is_some() {
            self.set_active_status(TripStatus::Locked);
        }
        true
    }

    /// Clears the selection on `option_id`. Returns false, with no effect,
    /// when that option is not the category's selection.
    pub fn unselect_option(&mut self, option_id: &str, category: Category, sink: &mut dyn AgentSink) -> bool {
        if self.ledger.selected(category) != Some(option_id) {
            return false;
        }
        self.ledger.remove(option_id);
        self.reconcile_lock();
        sink.add_action(AgentAction::new(
            "act-unselect",
            ActionKind::Optimize,
            format!("{} selection cleared", category.title()),
            format!("TripMaster is ready to help you pick a new {} option.", category),
        ));
        true
    }

    /// Marks the option as replacing and schedules its swap for the next
    /// record from the replacement pool.
    pub fn reject_option(&mut self, option_id: &str, category: Category, reason: &str, sink: &mut dyn AgentSink) {
        self.ledger.mark_replacing(option_id, category, Some(reason));
        self.reconcile_lock();

        sink.set_agent_state(reoptimizing_state(category));
        sink.add_action(AgentAction::new(
            "act-reject",
            ActionKind::Reject,
            format!("Rejected {} option — \"{}\"", category, reason),
            "User declined an option. TripMaster is finding a replacement based on the feedback.",
        ));

        let due = self.now.after(self.delays.option_reject);
        self.timers.schedule(
            due,
            TripTask::Replace {
                option_id: option_id.to_string(),
                category,
                reason: reason.to_string(),
            },
        );
        debug!(option_id, %category, due = due.frame, "replacement scheduled");
    }

    pub fn toggle_monitor(&mut self, option_id: &str) -> Option<bool> {
        self.ledger.toggle_monitor(option_id)
    }

    /// Replaces every option in `category` except the current selection.
    pub fn reoptimize(&mut self, category: Category, strategy: &str, sink: &mut dyn AgentSink) {
        let selected = self.ledger.selected(category).map(str::to_string);
        let option_ids: Vec<String> = match category {
            Category::Flight => self.flights.iter().map(|f| f.id.clone()).collect::<Vec<_>>(),
            Category::Lodging => self.lodging.iter().map(|l| l.id.clone()).collect::<Vec<_>>(),
        }
        .into_iter()
        .filter(|id| Some(id) != selected.as_ref())
        .collect();

        for id in &option_ids {
            self.ledger.mark_replacing(id, category, None);
        }

        sink.set_agent_state(reoptimizing_state(category));
        sink.add_action(AgentAction::new(
            "act-reopt",
            ActionKind::Optimize,
            format!("Re-optimizing {}s — {}", category, strategy),
            format!(
                "TripMaster is replacing current {} options based on the \"{}\" strategy.",
                category, strategy
            ),
        ));

        self.timers.schedule(
            self.now.after(self.delays.option_reoptimize),
            TripTask::Reoptimize {
                category,
                strategy: strategy.to_string(),
                option_ids,
            },
        );
    }

    pub fn pause_monitoring(&mut self, sink: &mut dyn AgentSink) {
        sink.set_agent_state(AgentState::Paused);
        sink.add_action(AgentAction::new(
            "act-pause",
            ActionKind::Monitor,
            "Monitoring paused",
            "TripMaster stopped live tracking. You can resume anytime.",
        ));
    }

    pub fn resume_monitoring(&mut self, sink: &mut dyn AgentSink) {
        sink.set_agent_state(AgentState::Monitoring);
        sink.add_action(AgentAction::new(
            "act-resume",
            ActionKind::Monitor,
            "Monitoring resumed",
            "TripMaster is watching for price drops again.",
        ));
    }

    /// Moves the store clock to `now` and applies every completion due.
    pub fn advance(&mut self, now: Tick, sink: &mut dyn AgentSink) {
        if now > self.now {
            self.now = now;
        }
        for task in self.timers.drain_due(self.now) {
            self.apply(task, sink);
        }
    }

    fn apply(&mut self, task: TripTask, sink: &mut dyn AgentSink) {
        match task {
            TripTask::Replace { option_id, category, reason } => {
                let swapped = match category {
                    Category::Flight => swap_from_pool(&mut self.flights, &option_id, &mut self.flight_pool),
                    Category::Lodging => swap_from_pool(&mut self.lodging, &option_id, &mut self.lodging_pool),
                };
                debug!(option_id, %category, swapped, "replacement resolved");
                self.ledger.remove(&option_id);
                self.reconcile_lock();
                sink.set_agent_state(AgentState::Monitoring);
                sink.add_action(AgentAction::new(
                    "act-replace",
                    ActionKind::Optimize,
                    format!("Replaced {} option with a new find", category),
                    format!("Found a better match based on your feedback: \"{}\".", reason),
                ));
            }
            TripTask::Reoptimize { category, strategy, option_ids } => {
                let mut replaced = 0;
                for id in &option_ids {
                    let swapped = match category {
                        Category::Flight => swap_from_pool(&mut self.flights, id, &mut self.flight_pool),
                        Category::Lodging => swap_from_pool(&mut self.lodging, id, &mut self.lodging_pool),
                    };
                    if swapped {
                        replaced += 1;
                    }
                }
                self.ledger.remove_all(&option_ids);
                self.reconcile_lock();
                sink.set_agent_state(AgentState::Monitoring);
                sink.add_action(AgentAction::new(
                    "act-reopt-done",
                    ActionKind::Optimize,
                    format!("Found new {} options — {}", category, strategy),
                    format!("Replaced {} options with better matches.", replaced),
                ));
            }
            TripTask::Phase { state, announce } => {
                sink.set_agent_state(state);
                if let Some((origin, destination)) = announce {
                    sink.add_action(AgentAction::new(
                        "act-search",
                        ActionKind::Search,
                        format!("TripMaster initiated search for {} → {}", origin, destination),
                        "Scanning flights and lodging for your trip.",
                    ));
                }
            }
        }
    }

    /// Adopts the backend's view of the trip and its options. The local budget
    /// survives while the trip id is unchanged; decisions on options that
    /// disappeared are dropped unless a replacement is still in flight.
    pub fn sync_remote(&mut self, mut trip: Trip, flights: Vec<FlightOption>, lodging: Vec<LodgingOption>) {
        let same_trip = self.active_trip_id.as_deref() == Some(trip.id.as_str());
        if same_trip {
            if let Some(local) = self.active_trip() {
                trip.budget = local.budget;
            }
        } else {
            debug!(trip_id = %trip.id, "backend trip changed");
            self.ledger.clear();
        }

        self.active_trip_id = Some(trip.id.clone());
        self.trips = vec![trip];
        self.seed_flights = flights.clone();
        self.seed_lodging = lodging.clone();
        self.flights = flights;
        self.lodging = lodging;

        let flights = &self.flights;
        let lodging = &self.lodging;
        self.ledger.retain(|d| {
            d.status == DecisionStatus::Replacing
                || match d.category {
                    Category::Flight => flights.iter().any(|f| f.id == d.option_id),
                    Category::Lodging => lodging.iter().any(|l| l.id == d.option_id),
                }
        });
        // The backend's status stands unless local selections lock the trip.
        if self.ledger.selected(Category::Flight).is_some() && self.ledger.selected(Category::Lodging).is_some() {
            self.set_active_status(TripStatus::Locked);
        }
    }

    /// Backend reports no trip.
    pub fn clear_remote(&mut self) {
        self.trips.clear();
        self.seed_flights.clear();
        self.seed_lodging.clear();
        self.activate(None);
    }
}

fn reoptimizing_state(category: Category) -> AgentState {
    match category {
        Category::Flight => AgentState::ReoptimizingFlights,
        Category::Lodging => AgentState::ReoptimizingLodging,
    }
}

/// Swaps the record with `id` for the pool's next one, in place.
fn swap_from_pool<T: OptionRecord>(list: &mut [T], id: &str, pool: &mut ReplacementPool<T>) -> bool {
    let Some(slot) = list.iter_mut().find(|item| item.id() == id) else {
        return false;
    };
    match pool.next() {
        Some(replacement) => {
            *slot = replacement;
            true
        }
        None => false,
    }
}
