use chrono::{Duration, Utc};
use fareline::kernel::Tick;
use fareline::model::{ActionKind, AgentAction, AgentState, Category, DecisionStatus, Preferences, TripStatus};
use fareline::store::{AgentSink, TripDraft, TripFormError, TripStore};

#[derive(Default)]
struct Recorder {
    actions: Vec<AgentAction>,
    states: Vec<AgentState>,
}

impl AgentSink for Recorder {
    fn add_action(&mut self, action: AgentAction) {
        self.actions.push(action);
    }

    fn set_agent_state(&mut self, state: AgentState) {
        self.states.push(state);
    }
}

fn at(frame: u64) -> Tick {
    Tick { frame }
}

fn draft(origin: &str, destination: &str, budget: f64, travelers: u32) -> TripDraft {
    let today = Utc::now().date_naive();
    TripDraft {
        origin: origin.into(),
        destination: destination.into(),
        depart_date: today + Duration::days(30),
        return_date: today + Duration::days(34),
        budget,
        travelers,
        date_flexible: false,
        preference_bias: None,
    }
}

#[test]
fn test_one_selection_per_category() {
    let mut store = TripStore::demo();

    assert!(store.select_option("fl-1", Category::Flight));
    assert!(store.select_option("fl-2", Category::Flight));

    let selected: Vec<_> = store
        .decisions()
        .iter()
        .filter(|d| d.category == Category::Flight && d.status == DecisionStatus::Selected)
        .collect();
    assert_eq!(selected.len(), 1);
    assert_eq!(store.selected_id(Category::Flight), Some("fl-2"));
    assert!(store.decision("fl-1").is_none(), "displaced selection should be dropped");
}

#[test]
fn test_unknown_option_is_ignored() {
    let mut store = TripStore::demo();
    assert!(!store.select_option("fl-404", Category::Flight));
    assert!(!store.select_option("fl-1", Category::Lodging), "id belongs to the other category");
    assert!(store.decisions().is_empty());
}

#[test]
fn test_lock_and_unlock() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.select_option("fl-1", Category::Flight);
    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Monitoring));

    store.select_option("lg-2", Category::Lodging);
    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Locked));

    assert!(store.unselect_option("lg-2", Category::Lodging, &mut sink));
    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Monitoring));
    assert!(store.selected_id(Category::Lodging).is_none());
    assert_eq!(sink.actions.len(), 1);
    assert_eq!(sink.actions[0].summary, "Lodging selection cleared");
}

#[test]
fn test_unselect_of_unselected_option_keeps_lock() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.select_option("fl-1", Category::Flight);
    store.select_option("lg-1", Category::Lodging);

    assert!(!store.unselect_option("fl-2", Category::Flight, &mut sink));
    assert!(!store.unselect_option("lg-1", Category::Flight, &mut sink), "category must match the selection");

    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Locked));
    assert_eq!(store.selected_id(Category::Flight), Some("fl-1"));
    assert_eq!(store.selected_id(Category::Lodging), Some("lg-1"));
    assert!(sink.actions.is_empty());
}

#[test]
fn test_update_preferences() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();
    assert!(store.preferences().avoid_red_eyes);

    let preferences = Preferences {
        avoid_red_eyes: false,
        max_stops: 0,
        ..store.preferences().clone()
    };
    store.update_preferences(preferences.clone(), &mut sink);

    assert_eq!(store.preferences(), &preferences);
    assert_eq!(sink.actions[0].summary, "Travel preferences updated");
}

#[test]
fn test_reject_replaces_in_place_after_delay() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.reject_option("fl-2", Category::Flight, "Too expensive", &mut sink);

    let decision = store.decision("fl-2").cloned();
    assert_eq!(decision.as_ref().map(|d| d.status), Some(DecisionStatus::Replacing));
    assert_eq!(decision.and_then(|d| d.reject_reason).as_deref(), Some("Too expensive"));
    assert_eq!(sink.states, vec![AgentState::ReoptimizingFlights]);
    assert_eq!(sink.actions[0].kind, ActionKind::Reject);
    assert!(sink.actions[0].summary.contains("Too expensive"));

    // 2.5s at 100ms per tick
    store.advance(at(24), &mut sink);
    assert_eq!(store.flights()[1].id, "fl-2", "replacement must not land early");

    store.advance(at(25), &mut sink);
    let ids: Vec<_> = store.flights().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["fl-1", "fl-rep-1", "fl-3"]);
    assert_eq!(store.flights()[1].airline, "Alaska");
    assert!(store.decision("fl-2").is_none());
    assert_eq!(sink.states.last(), Some(&AgentState::Monitoring));
    assert_eq!(sink.actions.last().map(|a| a.kind), Some(ActionKind::Optimize));
    assert_eq!(store.pending_tasks(), 0);
}

#[test]
fn test_rejecting_selected_option_unlocks() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.select_option("fl-1", Category::Flight);
    store.select_option("lg-1", Category::Lodging);
    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Locked));

    store.reject_option("fl-1", Category::Flight, "Wrong airport", &mut sink);
    assert!(store.selected_id(Category::Flight).is_none());
    assert_eq!(store.active_trip().map(|t| t.status), Some(TripStatus::Monitoring));
}

#[test]
fn test_reoptimize_keeps_selection() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.select_option("fl-1", Category::Flight);
    store.reoptimize(Category::Flight, "cheaper", &mut sink);

    assert_eq!(store.decision("fl-2").map(|d| d.status), Some(DecisionStatus::Replacing));
    assert_eq!(store.decision("fl-3").map(|d| d.status), Some(DecisionStatus::Replacing));
    assert_eq!(store.decision("fl-1").map(|d| d.status), Some(DecisionStatus::Selected));
    assert_eq!(sink.states, vec![AgentState::ReoptimizingFlights]);

    // 1.8s
    store.advance(at(18), &mut sink);
    let ids: Vec<_> = store.flights().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["fl-1", "fl-rep-1", "fl-rep-2"]);
    assert_eq!(store.selected_id(Category::Flight), Some("fl-1"));
    assert_eq!(store.decisions().len(), 1);
    assert_eq!(sink.states.last(), Some(&AgentState::Monitoring));
    assert!(sink.actions.last().is_some_and(|a| a.detail.contains("Replaced 2")));
}

#[test]
fn test_create_trip_runs_search_sequence() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    let id = store.create_trip(&draft("den", " san ", 700.0, 1), &mut sink).expect("valid draft");

    let trip = store.active_trip().cloned().expect("new trip is active");
    assert_eq!(trip.id, id);
    assert_eq!(trip.origin, "DEN");
    assert_eq!(trip.destination, "SAN");
    assert_eq!(trip.budget, 700.0);
    assert_eq!(trip.travelers, 1);
    assert_eq!(trip.status, TripStatus::Planning);
    assert_eq!(store.trips().len(), 3);
    assert_eq!(sink.states, vec![AgentState::Initializing]);
    assert_eq!(sink.actions[0].kind, ActionKind::Trip);

    store.advance(at(20), &mut sink);
    assert_eq!(sink.states.last(), Some(&AgentState::SearchingFlights));

    store.advance(at(40), &mut sink);
    assert_eq!(sink.states.last(), Some(&AgentState::SearchingLodging));
    assert!(sink.actions.last().is_some_and(|a| a.kind == ActionKind::Search && a.summary.contains("DEN → SAN")));

    store.advance(at(60), &mut sink);
    assert_eq!(
        sink.states,
        vec![
            AgentState::Initializing,
            AgentState::SearchingFlights,
            AgentState::SearchingLodging,
            AgentState::Monitoring,
        ]
    );
}

#[test]
fn test_create_trip_validation() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();
    let today = Utc::now().date_naive();

    assert_eq!(store.create_trip(&draft("  ", "SAN", 700.0, 1), &mut sink), Err(TripFormError::MissingOrigin));
    assert_eq!(store.create_trip(&draft("DEN", "", 700.0, 1), &mut sink), Err(TripFormError::MissingDestination));
    assert_eq!(store.create_trip(&draft("DEN", "SAN", 0.0, 1), &mut sink), Err(TripFormError::NonPositiveBudget));
    assert_eq!(store.create_trip(&draft("DEN", "SAN", 700.0, 0), &mut sink), Err(TripFormError::NoTravelers));

    let mut past = draft("DEN", "SAN", 700.0, 1);
    past.depart_date = today - Duration::days(1);
    assert!(matches!(store.create_trip(&past, &mut sink), Err(TripFormError::DepartInPast(_))));

    let mut backwards = draft("DEN", "SAN", 700.0, 1);
    backwards.return_date = backwards.depart_date - Duration::days(1);
    assert_eq!(store.create_trip(&backwards, &mut sink), Err(TripFormError::ReturnBeforeDepart));

    assert_eq!(store.trips().len(), 2);
    assert!(sink.actions.is_empty());
    assert!(sink.states.is_empty());
}

#[test]
fn test_switch_and_delete_trips() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.select_option("fl-1", Category::Flight);
    assert!(!store.switch_trip("trip-404"));
    assert!(store.switch_trip("trip-2"));
    assert_eq!(store.active_trip().map(|t| t.id.as_str()), Some("trip-2"));
    assert!(store.decisions().is_empty(), "decisions belong to the previous trip");

    assert!(store.delete_trip("trip-2", &mut sink));
    assert_eq!(store.active_trip().map(|t| t.id.as_str()), Some("trip-1"));
    assert_eq!(sink.actions.len(), 1);

    assert!(store.delete_trip("trip-1", &mut sink));
    assert!(store.active_trip().is_none());
    assert!(store.flights().is_empty());
    assert!(store.lodging().is_empty());
    assert!(!store.delete_trip("trip-1", &mut sink));
}

#[test]
fn test_toggle_monitor_and_budget() {
    let mut store = TripStore::demo();

    assert_eq!(store.toggle_monitor("fl-1"), None);
    store.select_option("fl-1", Category::Flight);
    assert_eq!(store.toggle_monitor("fl-1"), Some(true));
    assert_eq!(store.toggle_monitor("fl-1"), Some(false));

    assert_eq!(store.update_budget(-5.0), Err(TripFormError::NonPositiveBudget));
    assert!(store.update_budget(2400.0).is_ok());
    assert_eq!(store.active_trip().map(|t| t.budget), Some(2400.0));

    let mut empty = TripStore::empty();
    assert_eq!(empty.update_budget(100.0), Err(TripFormError::NoActiveTrip));
}

#[test]
fn test_pause_and_resume_monitoring() {
    let mut store = TripStore::demo();
    let mut sink = Recorder::default();

    store.pause_monitoring(&mut sink);
    store.resume_monitoring(&mut sink);

    assert_eq!(sink.states, vec![AgentState::Paused, AgentState::Monitoring]);
    assert!(sink.actions.iter().all(|a| a.kind == ActionKind::Monitor));
}

#[test]
fn test_sync_remote_keeps_local_budget_and_live_decisions() {
    let mut store = TripStore::empty();
    let mut trip = fareline::mock::trip();
    trip.budget = 0.0;

    store.sync_remote(trip.clone(), fareline::mock::flights(), fareline::mock::lodgings());
    store.update_budget(1500.0).expect("trip is active");
    store.select_option("fl-1", Category::Flight);
    store.select_option("lg-3", Category::Lodging);

    // lg-3 disappears from the backend's plan
    let mut lodging = fareline::mock::lodgings();
    lodging.truncate(2);
    store.sync_remote(trip.clone(), fareline::mock::flights(), lodging);

    assert_eq!(store.active_trip().map(|t| t.budget), Some(1500.0));
    assert_eq!(store.selected_id(Category::Flight), Some("fl-1"));
    assert!(store.selected_id(Category::Lodging).is_none());

    let mut other = trip;
    other.id = "trip-remote-2".into();
    store.sync_remote(other, fareline::mock::flights(), fareline::mock::lodgings());
    assert!(store.decisions().is_empty());
    assert_eq!(store.active_trip().map(|t| t.budget), Some(0.0));

    store.clear_remote();
    assert!(store.active_trip().is_none());
    assert!(store.trips().is_empty());
}
