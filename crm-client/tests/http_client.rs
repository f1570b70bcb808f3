use crm_client::{ClientError, CrmApi, HttpCrmApi};
use reqwest::StatusCode;
use serde_json::json;
use shared_types::{CreateDealRequest, DealStage, TaskStatus, UpdateDealRequest, UpdateTaskRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_list_deals_decodes_embedded_contact() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/deals"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 7,
                "name": "Website redesign",
                "value": 1234.5,
                "stage": "Proposal Sent",
                "contactId": 3,
                "contact": {
                    "id": 3,
                    "name": "Ada",
                    "email": "ada@example.com",
                    "phone": null,
                    "createdAt": 1760000000
                },
                "createdAt": 1760000100
            },
            {
                "id": 6,
                "name": "Cold lead",
                "value": 10,
                "stage": "Lead",
                "contactId": null,
                "contact": null,
                "createdAt": 1760000000
            }
        ])))
        .mount(&server)
        .await;

    let api = HttpCrmApi::new(server.uri());
    let deals = api.list_deals().await.unwrap();

    assert_eq!(deals.len(), 2);
    assert_eq!(deals[0].stage, DealStage::ProposalSent);
    assert_eq!(deals[0].contact.as_ref().map(|c| c.id), Some(3));
    assert_eq!(deals[1].contact_id, None);
}

#[tokio::test]
async fn test_create_deal_sends_camel_case_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/deals"))
        .and(body_json(json!({
            "name": "Support plan",
            "value": 500.0,
            "stage": "Negotiation",
            "contactId": 3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Support plan",
            "value": 500.0,
            "stage": "Negotiation",
            "contactId": 3,
            "contact": null,
            "createdAt": 1760000000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCrmApi::new(server.uri());
    let deal = api
        .create_deal(&CreateDealRequest {
            name: "Support plan".to_string(),
            value: 500.0,
            stage: DealStage::Negotiation,
            contact_id: Some(3),
        })
        .await
        .unwrap();
    assert_eq!(deal.id, 12);
}

#[tokio::test]
async fn test_partial_update_sends_only_supplied_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/deals/12"))
        .and(body_json(json!({ "contactId": null })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 12,
            "name": "Support plan",
            "value": 500.0,
            "stage": "Negotiation",
            "contactId": null,
            "contact": null,
            "createdAt": 1760000000
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/tasks/4"))
        .and(body_json(json!({ "status": "In Progress" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 4,
            "task": "Book venue",
            "status": "In Progress",
            "priority": "Low",
            "dueDate": "2026-11-01",
            "createdAt": 1760000000
        })))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpCrmApi::new(server.uri());
    let deal = api
        .update_deal(
            12,
            &UpdateDealRequest {
                contact_id: Some(None),
                ..UpdateDealRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(deal.contact_id, None);

    let task = api
        .update_task(
            4,
            &UpdateTaskRequest {
                status: Some(TaskStatus::InProgress),
                ..UpdateTaskRequest::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(task.description, "Book venue");
}

#[tokio::test]
async fn test_error_body_becomes_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/deals/77"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Error deleting deal",
            "details": "deal 77 not found"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/77"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let api = HttpCrmApi::new(server.uri());

    let err = api.delete_deal(77).await.unwrap_err();
    match &err {
        ClientError::Http { status, message } => {
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(message.as_deref(), Some("Error deleting deal"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let err = api.delete_task(77).await.unwrap_err();
    assert!(matches!(err, ClientError::Http { message: None, .. }));
    assert_eq!(err.user_message("Failed to delete task"), "Failed to delete task");
}

#[tokio::test]
async fn test_delete_task_and_undecodable_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Task deleted" })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/contacts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let api = HttpCrmApi::new(server.uri());
    api.delete_task(4).await.unwrap();
    assert!(matches!(
        api.list_contacts().await,
        Err(ClientError::Decode(_))
    ));
}
