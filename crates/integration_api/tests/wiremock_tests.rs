//! Integration tests for the gateway and resource clients (wiremock-based)

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use domain::{DemandForecastQuery, NewLeak, Page, Timestamp};
use integration_api::{
    ApiConfig, ApiError, ApiGateway, AssetsClient, ComplaintsClient, CredentialSource,
    DemandClient, NotificationsClient, UsersClient, WaterInfrastructureClient, WaterQualityClient,
};
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

#[derive(Default)]
struct RecordingCredentials {
    token: Option<&'static str>,
    refusals: AtomicUsize,
    refused: Mutex<Vec<String>>,
}

impl RecordingCredentials {
    fn with_token(token: &'static str) -> Self {
        Self {
            token: Some(token),
            ..Self::default()
        }
    }

    fn refusals(&self) -> usize {
        self.refusals.load(Ordering::SeqCst)
    }

    fn refused(&self) -> Vec<String> {
        self.refused.lock().unwrap().clone()
    }
}

#[async_trait]
impl CredentialSource for RecordingCredentials {
    fn bearer_token(&self) -> Option<String> {
        self.token.map(str::to_string)
    }

    async fn on_unauthorized(&self, refused: &str) {
        self.refusals.fetch_add(1, Ordering::SeqCst);
        self.refused.lock().unwrap().push(refused.to_string());
    }
}

fn config_for_mock(server: &MockServer) -> ApiConfig {
    ApiConfig::for_testing(format!("{}/api", server.uri()))
}

fn gateway_for(server: &MockServer, credentials: &Arc<RecordingCredentials>) -> ApiGateway {
    let source: Arc<dyn CredentialSource> = Arc::clone(credentials) as Arc<dyn CredentialSource>;
    ApiGateway::with_credentials(config_for_mock(server), source).unwrap()
}

fn complaint_json(id: i64) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "full_name": format!("Resident {id}"),
        "category": "leak",
        "description": "Water on the street",
        "status": "pending",
        "created_at": "2024-05-01T10:00:00Z"
    })
}

#[tokio::test]
async fn list_forwards_page_and_keeps_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/complaints"))
        .and(query_param("skip", "0"))
        .and(query_param("limit", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            complaint_json(3),
            complaint_json(1),
            complaint_json(2)
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::default());
    let client = ComplaintsClient::new(gateway_for(&server, &credentials));
    let complaints = client.list(Page::new(0, 50)).await.unwrap();

    let ids: Vec<i64> = complaints.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![3, 1, 2]);
}

#[tokio::test]
async fn every_paged_listing_forwards_skip_and_limit() {
    const PAGED: [&str; 5] = [
        "/api/water-infrastructure/leaks",
        "/api/water-quality/alerts",
        "/api/assets/9/maintenance",
        "/api/demand/distribution-plans",
        "/api/notifications/user",
    ];

    let server = MockServer::start().await;
    for route in PAGED {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("skip", "20"))
            .and(query_param("limit", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .named(route)
            .mount(&server)
            .await;
    }

    let credentials = Arc::new(RecordingCredentials::default());
    let gateway = gateway_for(&server, &credentials);
    let page = Page::new(20, 7);

    let leaks = WaterInfrastructureClient::new(gateway.clone())
        .all_leaks(page)
        .await
        .unwrap();
    let alerts = WaterQualityClient::new(gateway.clone())
        .alerts(page)
        .await
        .unwrap();
    let history = AssetsClient::new(gateway.clone())
        .maintenance_history(9, page)
        .await
        .unwrap();
    let plans = DemandClient::new(gateway.clone())
        .distribution_plans(page)
        .await
        .unwrap();
    let inbox = NotificationsClient::new(gateway)
        .for_current_user(page)
        .await
        .unwrap();

    assert!(leaks.is_empty() && alerts.is_empty() && history.is_empty());
    assert!(plans.is_empty() && inbox.is_empty());
}

#[tokio::test]
async fn bearer_credential_is_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/current"))
        .and(header("authorization", "Bearer tok-42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": 42,
            "username": "alice",
            "role": "engineer",
            "created_at": "2024-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::with_token("tok-42"));
    let client = UsersClient::new(gateway_for(&server, &credentials));
    let user = client.current().await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, domain::Role::Engineer);
}

#[tokio::test]
async fn unauthorized_response_notifies_credential_source() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "detail": "Could not validate credentials" })),
        )
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::with_token("expired"));
    let client = AssetsClient::new(gateway_for(&server, &credentials));
    let err = client.list(Page::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(credentials.refusals(), 1);
    assert_eq!(credentials.refused(), vec!["expired".to_string()]);
}

#[tokio::test]
async fn unauthorized_without_credential_is_not_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::default());
    let client = AssetsClient::new(gateway_for(&server, &credentials));
    let err = client.list(Page::default()).await.unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(credentials.refusals(), 0);
}

#[tokio::test]
async fn failed_login_does_not_touch_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/token"))
        .and(body_json(serde_json::json!({ "username": "alice", "password": "wrong" })))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({ "detail": "Incorrect username or password" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::with_token("still-valid"));
    let client = UsersClient::new(gateway_for(&server, &credentials));
    let err = client
        .authenticate("alice", &SecretString::from("wrong".to_string()))
        .await
        .unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(credentials.refusals(), 0);
}

#[tokio::test]
async fn login_is_sent_without_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/token"))
        .respond_with(|request: &Request| {
            if request.headers.contains_key("authorization") {
                ResponseTemplate::new(400)
            } else {
                ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "access_token": "fresh",
                    "token_type": "bearer",
                    "user_id": 1,
                    "username": "alice"
                }))
            }
        })
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::with_token("old"));
    let client = UsersClient::new(gateway_for(&server, &credentials));
    let token = client
        .authenticate("alice", &SecretString::from("secret".to_string()))
        .await
        .unwrap();

    assert_eq!(token.access_token, "fresh");
    assert_eq!(token.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn validation_detail_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/water-infrastructure/7/leaks"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "detail": [{ "loc": ["body", "severity"], "msg": "field required", "type": "value_error.missing" }]
        })))
        .mount(&server)
        .await;

    let credentials = Arc::new(RecordingCredentials::with_token("tok"));
    let client = WaterInfrastructureClient::new(gateway_for(&server, &credentials));
    let leak = NewLeak {
        infrastructure_id: 7,
        leak_detected_at: "2024-06-01T08:00:00Z".parse::<Timestamp>().unwrap(),
        severity: String::new(),
        description: None,
    };
    let err = client.create_leak(&leak).await.unwrap_err();

    match err {
        ApiError::Rejected { status, detail } => {
            assert_eq!(status, 422);
            assert_eq!(detail, "severity: field required");
        },
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn slow_backend_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/demand"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ApiConfig {
        timeout_secs: 1,
        ..config_for_mock(&server)
    };
    let client = DemandClient::new(ApiGateway::new(config).unwrap());
    let err = client.list(Page::default()).await.unwrap_err();

    assert!(matches!(err, ApiError::Timeout { timeout_secs: 1 }));
    assert!(err.is_transport());
}

#[tokio::test]
async fn unreachable_backend_is_a_connection_error() {
    let config = ApiConfig::for_testing("http://127.0.0.1:9/api");
    let client = NotificationsClient::new(ApiGateway::new(config).unwrap());
    let err = client.for_current_user(Page::default()).await.unwrap_err();

    assert!(err.is_transport(), "unexpected error: {err:?}");
}

#[tokio::test]
async fn cancelled_scope_abandons_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets/maintenance-due"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([]))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let token = CancellationToken::new();
    let gateway = ApiGateway::new(ApiConfig {
        timeout_secs: 10,
        ..config_for_mock(&server)
    })
    .unwrap()
    .scoped(token.clone());
    let client = AssetsClient::new(gateway);

    let canceller = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        token.cancel();
    });
    let err = client.maintenance_due().await.unwrap_err();
    canceller.await.unwrap();

    assert!(matches!(err, ApiError::Cancelled));
}

#[tokio::test]
async fn forecast_sends_only_set_filters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/demand/forecast"))
        .and(query_param("location", "Central"))
        .and(query_param("date_to", "2024-12-31"))
        .and(query_param_is_missing("date_from"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = DemandClient::new(ApiGateway::new(config_for_mock(&server)).unwrap());
    let query = DemandForecastQuery {
        location: Some("Central".to_string()),
        date_from: None,
        date_to: Some("2024-12-31".to_string()),
    };
    let records = client.forecast(&query).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn assign_passes_assignee_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/complaints/12/assign"))
        .and(query_param("assigned_to", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "message": "Complaint assigned" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ComplaintsClient::new(ApiGateway::new(config_for_mock(&server)).unwrap());
    let ack = client.assign(12, 5).await.unwrap();
    assert_eq!(ack.message, "Complaint assigned");
}

#[tokio::test]
async fn mark_all_read_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/notifications/read-all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/notifications/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "message": "deleted" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = NotificationsClient::new(ApiGateway::new(config_for_mock(&server)).unwrap());
    client.mark_all_read().await.unwrap();
    client.delete(3).await.unwrap();
}

#[tokio::test]
async fn missing_record_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/assets/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "detail": "Asset not found" })),
        )
        .mount(&server)
        .await;

    let client = AssetsClient::new(ApiGateway::new(config_for_mock(&server)).unwrap());
    let err = client.get(99).await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { ref detail } if detail == "Asset not found"));
    assert_eq!(err.user_message(), "Asset not found");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/users/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = UsersClient::new(ApiGateway::new(config_for_mock(&server)).unwrap());
    let err = client.get(1).await.unwrap_err();
    assert!(matches!(err, ApiError::Parse(_)));
}
