//! Debounced employee lookup integration tests

mod common;

use std::time::Duration;

use assert_matches::assert_matches;
use common::{wait_for, TestApp, TEST_DEBOUNCE};
use grievance_desk::egui_app::lookup::{lookup_name, EmployeeDetails, LookupError};
use grievance_desk::egui_app::report_form::ReportForm;
use grievance_desk::shared::report::ReportKind;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_employee(app: &TestApp, id: &str, name: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": name}))
                .set_delay(delay),
        )
        .mount(&app.server)
        .await;
}

#[tokio::test]
async fn test_name_appears_after_debounce() {
    let app = TestApp::start().await;
    mount_employee(&app, "101", "Ravi Kumar", Duration::ZERO).await;
    let form = ReportForm::new(&app.services, ReportKind::Hostel);

    form.set_employee_id("101");
    assert_eq!(form.snapshot().lookup.name, None);

    wait_for(|| form.snapshot().lookup.name.is_some()).await;
    let lookup = form.snapshot().lookup;
    assert_eq!(lookup.name.as_deref(), Some("Ravi Kumar"));
    assert_eq!(lookup.employee_id, "101");
    assert!(!lookup.loading);
    assert_eq!(
        app.services.employee.details(),
        Some(EmployeeDetails {
            employee_id: "101".to_string(),
            name: "Ravi Kumar".to_string()
        })
    );
}

#[tokio::test]
async fn test_rapid_edits_issue_one_request() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "One"})))
        .expect(0)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ten"})))
        .expect(0)
        .mount(&app.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/101"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ravi"})))
        .expect(1)
        .mount(&app.server)
        .await;
    let form = ReportForm::new(&app.services, ReportKind::Transport);

    form.set_employee_id("1");
    form.set_employee_id("10");
    form.set_employee_id("101");

    wait_for(|| form.snapshot().lookup.name.is_some()).await;
    assert_eq!(form.snapshot().lookup.name.as_deref(), Some("Ravi"));
}

#[tokio::test]
async fn test_stale_response_never_overwrites_newer_id() {
    let app = TestApp::start().await;
    mount_employee(&app, "1", "Stale Name", Duration::from_millis(300)).await;
    mount_employee(&app, "2", "Fresh Name", Duration::ZERO).await;
    let form = ReportForm::new(&app.services, ReportKind::Company);

    form.set_employee_id("1");
    // Let the first lookup get past the debounce and onto the wire
    tokio::time::sleep(TEST_DEBOUNCE + Duration::from_millis(50)).await;
    form.set_employee_id("2");

    wait_for(|| form.snapshot().lookup.name.is_some()).await;
    tokio::time::sleep(Duration::from_millis(400)).await;

    let lookup = form.snapshot().lookup;
    assert_eq!(lookup.name.as_deref(), Some("Fresh Name"));
    assert_eq!(lookup.employee_id, "2");
}

#[tokio::test]
async fn test_unknown_employee_shows_inline_error() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/users/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "no such user"})))
        .mount(&app.server)
        .await;
    let form = ReportForm::new(&app.services, ReportKind::Harassment);

    form.set_employee_id("404");

    wait_for(|| form.snapshot().lookup.error.is_some()).await;
    let lookup = form.snapshot().lookup;
    assert_eq!(lookup.error.as_deref(), Some("Employee not found."));
    assert_eq!(lookup.name, None);
    // The lookup failure does not block the form
    assert_eq!(form.snapshot().error, None);
}

#[tokio::test]
async fn test_server_failure_shows_fetch_error() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/users/7"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;
    let form = ReportForm::new(&app.services, ReportKind::Hostel);

    form.set_employee_id("7");

    wait_for(|| form.snapshot().lookup.error.is_some()).await;
    assert_eq!(
        form.snapshot().lookup.error.as_deref(),
        Some("Unable to fetch employee name.")
    );
}

#[tokio::test]
async fn test_clearing_the_id_clears_the_name() {
    let app = TestApp::start().await;
    mount_employee(&app, "101", "Ravi", Duration::ZERO).await;
    let form = ReportForm::new(&app.services, ReportKind::Hostel);

    form.set_employee_id("101");
    wait_for(|| form.snapshot().lookup.name.is_some()).await;

    form.set_employee_id("   ");
    let lookup = form.snapshot().lookup;
    assert_eq!(lookup.name, None);
    assert_eq!(lookup.error, None);
    assert!(!lookup.loading);
}

#[tokio::test]
async fn test_lookup_name_direct() {
    let app = TestApp::start().await;
    Mock::given(method("GET"))
        .and(path("/users/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "  "})))
        .mount(&app.server)
        .await;
    mount_employee(&app, "6", "Dev", Duration::ZERO).await;

    let routes = app.services.config.routes();
    assert_matches!(
        lookup_name(&app.services.auth, routes, "5").await,
        Err(LookupError::NotFound(id)) if id == "5"
    );
    assert_eq!(
        assert_ok!(lookup_name(&app.services.auth, routes, "6").await),
        "Dev"
    );
}
