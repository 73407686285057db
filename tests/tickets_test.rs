//! Ticket board integration tests

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::TestApp;
use grievance_desk::egui_app::home::HomeScreen;
use grievance_desk::egui_app::tickets::{LoadState, RefreshOutcome, TicketBoard, TicketSource};
use grievance_desk::egui_app::{Navigator, Screen};
use grievance_desk::shared::ticket::TicketStatus;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

fn tickets_body() -> serde_json::Value {
    json!([
        {"id": 1, "employee_name": "Asha", "sub_category": "Bus Late", "status": "Open"},
        {"ticket_id": "T-9", "employee_id": 42, "status": "in progress"}
    ])
}

#[tokio::test]
async fn test_dashboard_without_token_never_requests() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&app.server)
        .await;
    app.navigation.navigate(Screen::AdminDashboard);

    let board = TicketBoard::new(&app.services, TicketSource::Dashboard);
    assert_eq!(board.refresh().await, RefreshOutcome::SessionExpired);

    assert_eq!(board.state(), LoadState::Idle);
    assert_eq!(app.navigation.history(), vec![Screen::AdminLogin]);
    assert_eq!(app.request_count().await, 0);
}

#[tokio::test]
async fn test_dashboard_lists_tickets() {
    let app = TestApp::logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tickets_body()))
        .mount(&app.server)
        .await;

    let board = TicketBoard::new(&app.services, TicketSource::Dashboard);
    assert_eq!(board.refresh().await, RefreshOutcome::Applied);

    let LoadState::Ready(tickets) = board.state() else {
        panic!("expected tickets, got {:?}", board.state());
    };
    assert_eq!(tickets.len(), 2);
    assert_eq!(tickets[0].display_name(), "Asha");
    assert_eq!(tickets[0].display_status(), TicketStatus::Open);
    assert_eq!(tickets[1].display_name(), "42");
    assert_eq!(tickets[1].sub_category_label(), "Unspecified");
    assert_eq!(tickets[1].display_status(), TicketStatus::InProgress);
}

#[tokio::test]
async fn test_admin_reports_source_uses_its_route() {
    let app = TestApp::logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/reports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&app.server)
        .await;

    let board = TicketBoard::new(&app.services, TicketSource::AdminReports);
    board.refresh().await;
    assert_eq!(board.state(), LoadState::Empty);
}

#[tokio::test]
async fn test_empty_body_is_empty_list() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&app.server)
        .await;

    let board = TicketBoard::new(&app.services, TicketSource::Home);
    board.refresh().await;
    assert_eq!(board.state(), LoadState::Empty);
}

#[tokio::test]
async fn test_server_error_shows_retry_message() {
    let app = TestApp::logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    let board = TicketBoard::new(&app.services, TicketSource::Dashboard);
    board.refresh().await;
    assert_eq!(
        board.state(),
        LoadState::Failed("Failed to fetch tickets. Please try again.".to_string())
    );
    assert_eq!(app.current(), Screen::Home);
}

#[tokio::test]
async fn test_home_board_is_anonymous() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tickets_body()))
        .expect(1)
        .mount(&app.server)
        .await;

    let home = HomeScreen::new(&app.services);
    assert_eq!(home.on_focus().await, RefreshOutcome::Applied);

    assert!(matches!(home.board().state(), LoadState::Ready(ref t) if t.len() == 2));
    assert_eq!(app.current(), Screen::Home);
}

#[tokio::test]
async fn test_home_entries_navigate() {
    let app = TestApp::start().await;
    let home = HomeScreen::new(&app.services);

    let entry = HomeScreen::entries()[2];
    home.open(&entry);

    assert_eq!(app.current(), entry.screen);
    assert_eq!(app.navigation.depth(), 2);
}

#[tokio::test]
async fn test_blur_discards_in_flight_result() {
    let app = TestApp::logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tickets_body())
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&app.server)
        .await;

    let board = Arc::new(TicketBoard::new(&app.services, TicketSource::Dashboard));
    let pending = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(board.state().is_loading());

    board.on_blur();

    assert_eq!(assert_ok!(pending.await), RefreshOutcome::Discarded);
    assert_eq!(board.state(), LoadState::Idle);
}

#[tokio::test]
async fn test_newest_refresh_wins() {
    let app = TestApp::logged_in().await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(tickets_body())
                .set_delay(Duration::from_millis(300)),
        )
        .up_to_n_times(1)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tickets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&app.server)
        .await;

    let board = Arc::new(TicketBoard::new(&app.services, TicketSource::Dashboard));
    let slow = tokio::spawn({
        let board = board.clone();
        async move { board.refresh().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(board.refresh().await, RefreshOutcome::Applied);
    assert_eq!(assert_ok!(slow.await), RefreshOutcome::Discarded);
    assert_eq!(board.state(), LoadState::Empty);
}
