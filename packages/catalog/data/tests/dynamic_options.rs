mod common;

use std::sync::Arc;

use common::*;
use linkflow::{ConnectorError, flow::options::OptionItem, utils::http::MockTransport};
use linkflow_catalog_data::data::{
    asana::create_task::CreateAsanaTaskNode,
    google::calendar::create_event::CreateCalendarEventNode,
    jira::create_issue::CreateJiraIssueNode, slack::send_message::SendSlackMessageNode,
    surveymonkey::new_response::NewSurveyMonkeyResponseNode,
    trello::create_card::CreateTrelloCardNode, typeform::new_response::NewTypeformResponseNode,
};
use linkflow_types::json::json;

#[tokio::test]
async fn asana_workspaces_then_projects() {
    let catalog = catalog(CreateAsanaTaskNode::new());
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"data": [{"gid": "42", "name": "Acme"}]}))
        .respond_json(200, json!({"data": [{"gid": "77", "name": "Launch"}]}));

    let workspaces = catalog
        .resolve_options("data_asana_create_task", "workspace", &mut context(&mock, oauth()))
        .await
        .unwrap();
    assert_eq!(workspaces, vec![OptionItem::new("42", "Acme")]);

    let mut ctx = context(&mock, oauth()).with_input("workspace", json!("42"));
    let projects = catalog
        .resolve_options("data_asana_create_task", "project", &mut ctx)
        .await
        .unwrap();
    assert_eq!(projects, vec![OptionItem::new("77", "Launch")]);
    assert_eq!(mock.last_request().unwrap().query_value("workspace"), Some("42"));
}

#[tokio::test]
async fn dependent_options_wait_for_their_parent() {
    let mock = Arc::new(MockTransport::new());

    let err = catalog(CreateTrelloCardNode::new())
        .resolve_options("data_trello_create_card", "list_id", &mut context(&mock, trello()))
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::MissingInput(pin)) if pin == "board_id"
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn trello_lists_of_board() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!([{"id": "l1", "name": "To Do"}, {"id": "l2", "name": "Done"}]));

    let mut ctx = context(&mock, trello()).with_input("board_id", json!("b1"));
    let lists = catalog(CreateTrelloCardNode::new())
        .resolve_options("data_trello_create_card", "list_id", &mut ctx)
        .await
        .unwrap();

    assert_eq!(lists.len(), 2);
    assert_eq!(lists[1], OptionItem::new("l2", "Done"));
    let request = mock.last_request().unwrap();
    assert_eq!(request.url, "https://api.trello.com/1/boards/b1/lists");
    assert_eq!(request.query_value("key"), Some("trello-key"));
}

#[tokio::test]
async fn options_need_credentials() {
    let mock = Arc::new(MockTransport::new());

    let err = catalog(SendSlackMessageNode::new())
        .resolve_options(
            "data_slack_send_message",
            "channel",
            &mut context(&mock, Default::default()),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::MissingCredentials { .. })
    ));
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test]
async fn slack_channels_surface_api_errors() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"ok": false, "error": "missing_scope"}));

    let err = catalog(SendSlackMessageNode::new())
        .resolve_options("data_slack_send_message", "channel", &mut context(&mock, oauth()))
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::Api { message, .. }) if message == "missing_scope"
    ));
}

#[tokio::test]
async fn calendars_forms_surveys_and_projects() {
    let mock = Arc::new(MockTransport::new());
    mock.respond_json(200, json!({"items": [{"id": "primary", "summary": "Ada"}]}))
        .respond_json(200, json!({"items": [{"id": "f1", "title": "Feedback"}]}))
        .respond_json(200, json!({"data": [{"id": "9001", "title": "NPS"}]}))
        .respond_json(200, json!({"values": [{"key": "OPS", "name": "Operations"}]}));

    let calendars = catalog(CreateCalendarEventNode::new())
        .resolve_options(
            "data_google_calendar_create_event",
            "calendar_id",
            &mut context(&mock, oauth()),
        )
        .await
        .unwrap();
    assert_eq!(calendars, vec![OptionItem::new("primary", "Ada")]);

    let forms = catalog(NewTypeformResponseNode::new())
        .resolve_options("data_typeform_new_response", "form_id", &mut context(&mock, typeform()))
        .await
        .unwrap();
    assert_eq!(forms, vec![OptionItem::new("f1", "Feedback")]);

    let surveys = catalog(NewSurveyMonkeyResponseNode::new())
        .resolve_options(
            "data_surveymonkey_new_response",
            "survey_id",
            &mut context(&mock, oauth()),
        )
        .await
        .unwrap();
    assert_eq!(surveys, vec![OptionItem::new("9001", "NPS")]);

    let projects = catalog(CreateJiraIssueNode::new())
        .resolve_options("data_jira_create_issue", "project_key", &mut context(&mock, jira()))
        .await
        .unwrap();
    assert_eq!(projects, vec![OptionItem::new("OPS", "Operations")]);
}

#[tokio::test]
async fn static_pins_have_no_options() {
    let mock = Arc::new(MockTransport::new());

    let err = catalog(CreateJiraIssueNode::new())
        .resolve_options("data_jira_create_issue", "summary", &mut context(&mock, jira()))
        .await
        .unwrap_err();

    assert!(matches!(
        ConnectorError::find(&err),
        Some(ConnectorError::NoDynamicOptions { .. })
    ));
}
