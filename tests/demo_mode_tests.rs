use fareline::config::DashboardConfig;
use fareline::dashboard::{DashboardMode, DashboardSource, DemoDashboard, SimulationControl};
use fareline::kernel::{FixedJitter, HashJitter, Jitter, Tick};
use fareline::model::{AgentState, Category, TripStatus};
use fareline::sim::DemoSimulator;

fn at(frame: u64) -> Tick {
    Tick { frame }
}

fn pinned(value: f64) -> DemoSimulator {
    DemoSimulator::new(Box::new(FixedJitter(value)))
}

#[test]
fn test_one_action_per_interval_at_front() {
    let mut sim = pinned(0.0);
    let seeded = sim.feed().actions.len();
    let evaluated = sim.feed().metrics.options_evaluated;

    sim.set_enabled(true, at(0));
    assert_eq!(sim.period_ticks(), 50, "5s lower bound at 100ms ticks");

    assert_eq!(sim.advance(at(49)), 0);
    assert_eq!(sim.feed().actions.len(), seeded);

    assert_eq!(sim.advance(at(50)), 1);
    let feed = sim.feed();
    assert_eq!(feed.actions.len(), seeded + 1);
    let newest = feed.latest().expect("action emitted");
    assert!(newest.id.starts_with("demo-"));
    assert_eq!(newest.summary, "Rescanned fares for your dates");
    assert_eq!(feed.state, AgentState::SearchingFlights);
    assert_eq!(feed.current_step, 1);
    assert_eq!(feed.metrics.options_evaluated, evaluated + 10);

    assert_eq!(sim.advance(at(100)), 1);
    assert_eq!(sim.feed().state, AgentState::Reoptimizing);
    assert_eq!(sim.feed().metrics.alerts_sent, 4, "second template is an sms alert");
}

#[test]
fn test_states_cycle_in_order() {
    let mut sim = pinned(0.0);
    sim.set_enabled(true, at(0));

    let mut seen = Vec::new();
    for step in 1..=6 {
        sim.advance(at(step * 50));
        seen.push(sim.feed().state);
    }
    assert_eq!(
        seen,
        vec![
            AgentState::SearchingFlights,
            AgentState::Reoptimizing,
            AgentState::SearchingLodging,
            AgentState::WaitingForApproval,
            AgentState::Monitoring,
            AgentState::SearchingFlights,
        ]
    );
}

#[test]
fn test_catches_up_on_missed_intervals() {
    let mut sim = pinned(0.0);
    sim.set_enabled(true, at(0));
    assert_eq!(sim.advance(at(250)), 5);
    assert_eq!(sim.next_fire(), Some(at(300)));
}

#[test]
fn test_disabling_stops_emission() {
    let mut sim = pinned(0.0);
    sim.set_enabled(true, at(0));
    sim.advance(at(50));
    let count = sim.feed().actions.len();

    sim.set_enabled(false, at(60));
    assert!(!sim.is_enabled());
    assert_eq!(sim.next_fire(), None);
    assert_eq!(sim.advance(at(10_000)), 0);
    assert_eq!(sim.feed().actions.len(), count);

    sim.set_enabled(true, at(10_000));
    assert_eq!(sim.next_fire(), Some(at(10_050)));
}

#[test]
fn test_period_stays_within_bounds() {
    let mut sim = pinned(0.999);
    sim.set_enabled(true, at(0));
    assert_eq!(sim.period_ticks(), 100, "10s upper bound");

    let mut jitter = HashJitter::new(7);
    for _ in 0..200 {
        let v = jitter.next_in(50, 101);
        assert!((50..=100).contains(&v));
    }
}

#[test]
fn test_reset_restores_seed() {
    let mut sim = pinned(0.0);
    sim.set_enabled(true, at(0));
    sim.advance(at(150));
    sim.reset();
    assert_eq!(sim.feed().actions.len(), 5);
    assert_eq!(sim.feed().state, AgentState::Monitoring);
    assert!(sim.is_enabled());
}

#[tokio::test]
async fn test_demo_dashboard_routes_store_effects_into_feed() {
    let config = DashboardConfig::default();
    let mut demo = DemoDashboard::with_jitter(&config, at(0), Box::new(FixedJitter(0.0)));

    assert_eq!(demo.mode(), DashboardMode::Demo);
    let view = demo.view();
    assert_eq!(view.trip.as_ref().map(|t| t.id.as_str()), Some("trip-1"));
    assert_eq!(view.flights.len(), 3);
    assert_eq!(view.lodging.len(), 3);
    assert_eq!(view.actions.len(), 5);
    assert_eq!(view.metrics.money_saved, 184.0);

    assert!(demo.select_option("fl-1", Category::Flight));
    assert!(demo.select_option("lg-2", Category::Lodging));
    assert_eq!(demo.view().trip.map(|t| t.status), Some(TripStatus::Locked));
    assert_eq!(demo.view().selected_lodging_id.as_deref(), Some("lg-2"));

    demo.reject_option("fl-3", Category::Flight, "Red-eye");
    assert_eq!(demo.view().agent_state, AgentState::ReoptimizingFlights);
    assert_eq!(demo.view().actions.len(), 6);

    // the reject lands at 25 ticks, before the first demo tick at 50
    demo.advance(at(25));
    let view = demo.view();
    assert_eq!(view.flights[2].id, "fl-rep-1");
    assert_eq!(view.agent_state, AgentState::Monitoring);

    demo.set_simulation_enabled(false, at(30));
    demo.advance(at(500));
    assert_eq!(demo.view().actions.len(), 7);

    assert!(demo.refresh().await.is_ok());
    assert_eq!(demo.control(SimulationControl::Approve).await.ok(), Some(None));
}
