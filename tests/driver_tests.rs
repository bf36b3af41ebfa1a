use std::time::Duration;

use fareline::config::DashboardConfig;
use fareline::dashboard::{DashboardMode, DashboardPage, DemoDashboard, Driver};
use fareline::kernel::{FixedJitter, Tick};
use fareline::model::AgentState;
use tokio_util::sync::CancellationToken;

fn demo_page() -> DashboardPage {
    let config = DashboardConfig {
        mode: DashboardMode::Demo,
        ..DashboardConfig::default()
    };
    let source = DemoDashboard::with_jitter(&config, Tick::new(), Box::new(FixedJitter(0.0)));
    DashboardPage::with_source(config, Box::new(source))
}

#[tokio::test]
async fn test_tick_step_reports_new_actions() {
    let mut driver = Driver::new(demo_page(), CancellationToken::new());

    for _ in 0..49 {
        assert!(driver.tick_step().await.is_empty());
    }
    let fresh = driver.tick_step().await;
    assert_eq!(fresh.len(), 1);
    assert!(fresh[0].id.starts_with("demo-"));
    assert_eq!(driver.page().now(), Tick { frame: 50 });
    assert_eq!(driver.page().view().agent_state, AgentState::SearchingFlights);
}

#[tokio::test]
async fn test_fallback_does_not_report_seeded_feed() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let page = DashboardPage::new(DashboardConfig {
        api_base_url: url,
        poll_interval: Duration::from_millis(100),
        ..DashboardConfig::default()
    });
    let mut driver = Driver::new(page, CancellationToken::new());

    assert!(driver.tick_step().await.is_empty(), "demo feed after fallback is not new activity");
    assert_eq!(driver.page().mode(), DashboardMode::Demo);
    assert!(!driver.page().view().actions.is_empty());
    assert!(driver.tick_step().await.is_empty());
}

#[tokio::test]
async fn test_reset_demo_restores_seeded_feed() {
    let mut page = demo_page();
    let seeded = page.view().actions.len();

    page.advance(Tick { frame: 50 });
    assert_eq!(page.view().agent_state, AgentState::SearchingFlights);
    assert_eq!(page.view().actions.len(), seeded + 1);

    page.reset_demo();
    let view = page.view();
    assert_eq!(view.agent_state, AgentState::Monitoring);
    assert_eq!(view.actions.len(), seeded);
    assert!(view.preferences.avoid_red_eyes);
}

#[tokio::test]
async fn test_page_routes_activity_effects_to_source() {
    let mut page = demo_page();

    assert!(page.select_activity("act-1"));
    let view = page.view();
    assert_eq!(view.actions[0].summary, "Activity added: Katz's Delicatessen");
    assert_eq!(page.budget().activity_spend, 35.0);

    page.reject_activity("act-2", "Too much walking");
    assert_eq!(page.view().agent_state, AgentState::ReoptimizingActivities);

    // 2.2s, before the first demo tick
    page.advance(Tick { frame: 22 });
    assert_eq!(page.view().agent_state, AgentState::Monitoring);
    assert!(page.activities().decisions().is_empty());

    page.pause_planning();
    assert!(!page.reoptimize_activities("Budget friendly"));
    page.resume_planning();
    assert!(page.reoptimize_activities("Budget friendly"));

    page.set_simulation_enabled(false);
    page.advance(Tick { frame: 1_000 });
    assert_eq!(page.view().actions[0].summary, "Found new activities — Budget friendly");
}

#[tokio::test]
async fn test_run_stops_on_cancel() {
    let cancel = CancellationToken::new();
    let driver = Driver::new(demo_page(), cancel.clone());
    let handle = tokio::spawn(driver.run());

    tokio::time::sleep(Duration::from_millis(350)).await;
    cancel.cancel();

    let page = tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("driver stops promptly")
        .expect("driver task completes");
    assert!(page.now().frame >= 1);
    assert_eq!(page.mode(), DashboardMode::Demo);
}
