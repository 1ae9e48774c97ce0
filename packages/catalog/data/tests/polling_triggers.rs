mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use common::*;
use linkflow::{ConnectorError, utils::http::MockTransport};
use linkflow_catalog_data::data::{
    google::calendar::event_changed::CalendarEventChangedNode,
    jira::issue_updated::JiraIssueUpdatedNode, stripe::new_customer::NewStripeCustomerNode,
    surveymonkey::new_response::NewSurveyMonkeyResponseNode,
    typeform::new_response::NewTypeformResponseNode,
    zendesk::ticket_created::ZendeskTicketCreatedNode,
};
use linkflow_types::json::json;

#[tokio::test]
async fn typeform_uses_last_run_verbatim() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"items": [{"token": "a"}, {"token": "b"}]}));

    let last_run = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut ctx = context(&mock, typeform())
        .with_last_run(Some(last_run))
        .with_input("form_id", json!("abc123"));

    let outputs = catalog(NewTypeformResponseNode::new())
        .execute("data_typeform_new_response", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.url, "https://api.typeform.com/forms/abc123/responses");
    assert_eq!(request.query_value("since"), Some("2024-01-01T00:00:00Z"));
    assert_eq!(request.header_value("authorization"), Some("Bearer tfp_123"));

    assert_eq!(outputs["count"], json!(2));
    assert_eq!(outputs["records"][1]["token"], json!("b"));
    assert_eq!(outputs["next_last_run"], json!(now().to_rfc3339()));
}

#[tokio::test]
async fn stripe_falls_back_to_lookback() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"object": "list", "data": []}));

    let mut ctx = context(&mock, stripe());
    let outputs = catalog(NewStripeCustomerNode::new())
        .execute("data_stripe_new_customer", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    let expected = (now() - chrono::Duration::hours(1)).timestamp().to_string();
    assert_eq!(request.query_value("created[gte]"), Some(expected.as_str()));
    assert_eq!(request.header_value("authorization"), Some("Bearer sk_test_123"));
    assert_eq!(outputs["count"], json!(0));
    assert_eq!(outputs["records"], json!([]));
}

#[tokio::test]
async fn zendesk_searches_created_tickets() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"results": [{"id": 7}], "count": 1}));

    let last_run = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap();
    let mut ctx = context(&mock, zendesk()).with_last_run(Some(last_run));

    catalog(ZendeskTicketCreatedNode::new())
        .execute("data_zendesk_ticket_created", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.url, "https://acme.zendesk.com/api/v2/search.json");
    assert_eq!(
        request.query_value("query"),
        Some("type:ticket created>=2024-05-31T23:30:00Z")
    );
    assert!(
        request
            .header_value("authorization")
            .is_some_and(|value| value.starts_with("Basic "))
    );
}

#[tokio::test]
async fn zendesk_keeps_tickets_from_the_last_run_second() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"results": [], "count": 0}));

    let last_run = Utc.with_ymd_and_hms(2024, 5, 31, 23, 30, 0).unwrap()
        + chrono::Duration::milliseconds(700);
    let mut ctx = context(&mock, zendesk()).with_last_run(Some(last_run));

    catalog(ZendeskTicketCreatedNode::new())
        .execute("data_zendesk_ticket_created", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        request.query_value("query"),
        Some("type:ticket created>=2024-05-31T23:30:00Z")
    );
}

#[tokio::test]
async fn surveymonkey_formats_without_offset() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"data": [{"id": "r1"}]}));

    let last_run = Utc.with_ymd_and_hms(2024, 2, 29, 8, 15, 30).unwrap();
    let mut ctx = oauth_context(&mock)
        .with_last_run(Some(last_run))
        .with_input("survey_id", json!("9001"));

    let outputs = catalog(NewSurveyMonkeyResponseNode::new())
        .execute("data_surveymonkey_new_response", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        request.url,
        "https://api.surveymonkey.com/v3/surveys/9001/responses/bulk"
    );
    assert_eq!(request.query_value("start_modified_at"), Some("2024-02-29T08:15:30"));
    assert_eq!(outputs["count"], json!(1));
}

#[tokio::test]
async fn jira_builds_minute_precision_jql() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"issues": [{"key": "OPS-1"}]}));

    let last_run = Utc.with_ymd_and_hms(2024, 5, 1, 9, 45, 12).unwrap();
    let mut ctx = context(&mock, jira())
        .with_last_run(Some(last_run))
        .with_input("project_key", json!("OPS"));

    catalog(JiraIssueUpdatedNode::new())
        .execute("data_jira_issue_updated", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(request.url, "https://acme.atlassian.net/rest/api/3/search/jql");
    assert_eq!(
        request.query_value("jql"),
        Some("project = \"OPS\" AND updated >= \"2024-05-01 09:45\" ORDER BY updated ASC")
    );
}

#[tokio::test]
async fn calendar_polls_updated_min_on_default_calendar() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"items": [{"id": "e1", "status": "cancelled"}]}));

    let mut ctx = oauth_context(&mock);
    let outputs = catalog(CalendarEventChangedNode::new())
        .execute("data_google_calendar_event_changed", &mut ctx)
        .await
        .unwrap();

    let request = mock.last_request().unwrap();
    assert_eq!(
        request.url,
        "https://www.googleapis.com/calendar/v3/calendars/primary/events"
    );
    assert_eq!(request.query_value("updatedMin"), Some("2024-06-01T11:00:00Z"));
    assert_eq!(request.query_value("showDeleted"), Some("true"));
    assert_eq!(outputs["records"][0]["status"], json!("cancelled"));
}

#[tokio::test]
async fn upstream_failures_surface_as_status_errors() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_raw(401, "{\"message\":\"invalid token\"}");

    let mut ctx = context(&mock, typeform()).with_input("form_id", json!("abc123"));
    let err = catalog(NewTypeformResponseNode::new())
        .execute("data_typeform_new_response", &mut ctx)
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::HttpStatus { status: 401, .. })
    ));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn non_array_records_are_a_decode_error() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"data": {"unexpected": true}}));

    let mut ctx = context(&mock, stripe());
    let err = catalog(NewStripeCustomerNode::new())
        .execute("data_stripe_new_customer", &mut ctx)
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::Decode(_))
    ));
}

fn oauth_context(
    mock: &Arc<MockTransport>,
) -> linkflow::flow::execution::context::ExecutionContext {
    context(mock, oauth())
}
