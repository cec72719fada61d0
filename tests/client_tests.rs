use mockito::{Matcher, Server};
use serde_json::json;
use tokio::sync::Mutex;
use tokio_test::{assert_err, assert_ok};
use trip_planner_rs::{
    Amount, AuthRequest, BackendClient, BackendResponse, ClientConfig, ClientError,
    ContactRequest, FinalizeRequest, GenerateRequest, ModifyRequest, PassportUpload,
    TripLogRequest, BACKEND_URL_ENV, DEFAULT_BACKEND_URL,
};

/// Serializes tests that touch the process environment.
static ENV_LOCK: Mutex<()> = Mutex::const_new(());

fn client_for(server: &Server) -> BackendClient {
    BackendClient::new(ClientConfig::new(server.url()))
}

#[tokio::test]
async fn test_json_success_resolves_to_exact_object() {
    let mut server = Server::new_async().await;
    let body = json!({"logged": true, "id": 42, "tags": ["a", "b"], "nested": {"x": null}});
    let mock = server
        .mock("POST", "/api/log_search")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"destination": "GOI", "days": 4})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let request = TripLogRequest {
        destination: "GOI".to_string(),
        days: Some(4),
        ..TripLogRequest::default()
    };
    let response = assert_ok!(client_for(&server).log_search(&request).await);

    assert_eq!(response, BackendResponse::Json(body));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_text_success_resolves_to_raw_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/contact")
        .with_status(201)
        .with_body("thanks, we'll be in touch")
        .create_async()
        .await;

    let request = ContactRequest {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        ..ContactRequest::default()
    };
    let response = assert_ok!(client_for(&server).send_contact(&request).await);

    assert_eq!(
        response,
        BackendResponse::Text("thanks, we'll be in touch".to_string())
    );
}

#[tokio::test]
async fn test_json_error_body_is_passed_through() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/signin")
        .with_status(401)
        .with_body(r#"{"error":"X"}"#)
        .create_async()
        .await;

    let err = assert_err!(
        client_for(&server)
            .sign_in(&AuthRequest::new("a@b.com", "wrong"))
            .await
    );

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.body(), Some(&json!({"error": "X"})));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_empty_error_body_reports_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/signup")
        .with_status(409)
        .create_async()
        .await;

    let err = assert_err!(
        client_for(&server)
            .sign_up(&AuthRequest::new("a@b.com", "pw"))
            .await
    );

    assert_eq!(err.body(), Some(&json!({"error": "HTTP 409"})));
}

#[tokio::test]
async fn test_text_error_body_is_wrapped() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/modify_itinerary")
        .with_status(502)
        .with_body("boom")
        .create_async()
        .await;

    let request = ModifyRequest {
        current_itinerary: "<p>Day 1</p>".to_string(),
        modification_prompt: "more food".to_string(),
        context: None,
        user_id: None,
    };
    let err = assert_err!(client_for(&server).modify_itinerary(&request).await);

    assert!(matches!(err, ClientError::Api { status: 502, .. }));
    assert_eq!(err.body(), Some(&json!({"error": "boom"})));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_generate_itinerary_scenario() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate_itinerary")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "departure_city": "BOM",
            "destination": "DEL",
            "days": 3,
            "theme": "Solo Adventure"
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"itinerary":"<p>Day 1</p>"}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new("BOM", "DEL", 3).with_theme("Solo Adventure");
    let response = assert_ok!(client_for(&server).generate_itinerary(&request).await);

    assert_eq!(
        response.body(),
        &BackendResponse::Json(json!({"success": true, "itinerary": "<p>Day 1</p>"}))
    );
    let record = response.record().unwrap();
    assert!(record.success);
    assert_eq!(record.itinerary.as_deref(), Some("<p>Day 1</p>"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_contact_internal_error_scenario() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/contact")
        .with_status(500)
        .with_body("Internal Error")
        .create_async()
        .await;

    let request = ContactRequest {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        ..ContactRequest::default()
    };
    let err = assert_err!(client_for(&server).send_contact(&request).await);

    assert_eq!(err.body(), Some(&json!({"error": "Internal Error"})));
    assert_eq!(err.to_string(), "Backend returned HTTP 500: Internal Error");
}

#[tokio::test]
async fn test_finalize_packages_decodes_packages() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/finalize_packages")
        .match_body(Matcher::PartialJson(json!({
            "itinerary": "<p>Day 1</p>",
            "context": {"destination": "DEL"}
        })))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "packages": [{
                    "package_name": "Comfort",
                    "description": "3-star hotel, direct flights",
                    "total_cost": 42000,
                    "flight_cost": 12000,
                    "estimated_hotel_cost": 15000,
                    "activity_cost": 6000,
                    "estimated_food_cost": 6000,
                    "estimated_transport_cost": 3000
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = FinalizeRequest {
        itinerary: "<p>Day 1</p>".to_string(),
        context: json!({"destination": "DEL", "num_days": 3}),
        user_id: Some("guest".to_string()),
    };
    let response = assert_ok!(client_for(&server).finalize_packages(&request).await);

    let packages = response.into_record().unwrap().packages.unwrap();
    assert_eq!(packages.len(), 1);
    assert_eq!(packages[0].package_name, "Comfort");
    assert_eq!(packages[0].total_cost.as_f64(), Some(42000.0));
    assert_eq!(packages[0].itemized_total(), 42000.0);
}

#[tokio::test]
async fn test_typed_endpoint_resolves_text_success() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate_itinerary")
        .with_status(200)
        .with_body("queued")
        .create_async()
        .await;

    let response = assert_ok!(
        client_for(&server)
            .generate_itinerary(&GenerateRequest::new("BOM", "DEL", 2))
            .await
    );

    assert_eq!(response.body(), &BackendResponse::Text("queued".to_string()));
    assert!(response.record().is_none());
    assert!(response.mismatch().is_some());
}

#[tokio::test]
async fn test_float_duration_resolves() {
    let mut server = Server::new_async().await;
    let body = json!({"success": true, "cheapest_flights": [{"duration_minutes": 125.0}]});
    server
        .mock("POST", "/api/generate_itinerary")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let response = assert_ok!(
        client_for(&server)
            .generate_itinerary(&GenerateRequest::new("BOM", "DEL", 2))
            .await
    );

    assert_eq!(response.body(), &BackendResponse::Json(body));
    let flights = response.into_record().unwrap().cheapest_flights.unwrap();
    assert_eq!(
        flights[0].duration_minutes.as_ref().and_then(Amount::as_f64),
        Some(125.0)
    );
}

#[tokio::test]
async fn test_body_without_success_flag_resolves() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/generate_itinerary")
        .with_status(200)
        .with_body(r#"{"error":"no flights found"}"#)
        .create_async()
        .await;

    let response = assert_ok!(
        client_for(&server)
            .generate_itinerary(&GenerateRequest::new("BOM", "DEL", 2))
            .await
    );

    assert_eq!(
        response.body().as_json(),
        Some(&json!({"error": "no flights found"}))
    );
    assert!(!response.record().unwrap().success);
}

#[tokio::test]
async fn test_string_package_cost_resolves() {
    let mut server = Server::new_async().await;
    let body = json!({
        "success": true,
        "packages": [{"package_name": "Budget", "total_cost": "18,000"}]
    });
    server
        .mock("POST", "/api/finalize_packages")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let request = FinalizeRequest {
        itinerary: "<p>Day 1</p>".to_string(),
        context: json!({}),
        user_id: None,
    };
    let response = assert_ok!(client_for(&server).finalize_packages(&request).await);

    assert_eq!(serde_json::to_value(&response).unwrap(), body);
    let packages = response.into_record().unwrap().packages.unwrap();
    assert_eq!(packages[0].total_cost, Amount::Text("18,000".to_string()));
    assert_eq!(packages[0].total_cost.as_f64(), Some(18000.0));
}

#[tokio::test]
async fn test_unexpected_shape_still_resolves_with_body() {
    let mut server = Server::new_async().await;
    let body = json!({"success": true, "updated_itinerary": {"html": "<p>v2</p>"}});
    server
        .mock("POST", "/api/modify_itinerary")
        .with_status(200)
        .with_body(body.to_string())
        .create_async()
        .await;

    let request = ModifyRequest {
        current_itinerary: "<p>v1</p>".to_string(),
        modification_prompt: "shorter".to_string(),
        context: None,
        user_id: None,
    };
    let response = assert_ok!(client_for(&server).modify_itinerary(&request).await);

    assert_eq!(response.body(), &BackendResponse::Json(body));
    assert!(response.mismatch().unwrap().contains("updated_itinerary"));
    assert!(matches!(response.decode(), Err(ClientError::Decode(_))));
}

#[tokio::test]
async fn test_passport_upload_sends_multipart() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/scan_passport")
        .match_header(
            "content-type",
            Matcher::Regex(r"^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="file"; filename="passport.jpg""#.to_string()),
            Matcher::Regex("fake-jpeg-bytes".to_string()),
        ]))
        .with_status(200)
        .with_body(r#"{"country":"IND","visa_free":["Thailand"]}"#)
        .create_async()
        .await;

    let upload = PassportUpload::new("passport.jpg", b"fake-jpeg-bytes".to_vec());
    let value = assert_ok!(client_for(&server).upload_passport(upload).await);

    assert_eq!(value, json!({"country": "IND", "visa_free": ["Thailand"]}));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_passport_upload_error_message_is_body_text() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/scan_passport")
        .with_status(422)
        .with_body("image too blurry")
        .create_async()
        .await;

    let upload = PassportUpload::new("passport.png", vec![0u8; 16]);
    let err = assert_err!(client_for(&server).upload_passport(upload).await);

    assert!(matches!(err, ClientError::Upload { status: 422, .. }));
    assert_eq!(err.to_string(), "image too blurry");
}

#[tokio::test]
async fn test_passport_upload_empty_error_uses_status() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/scan_passport")
        .with_status(500)
        .create_async()
        .await;

    let upload = PassportUpload::new("passport.png", vec![0u8; 16]);
    let err = assert_err!(client_for(&server).upload_passport(upload).await);

    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_passport_upload_requires_json_success() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/scan_passport")
        .with_status(200)
        .with_body("scanned")
        .create_async()
        .await;

    let upload = PassportUpload::new("passport.png", vec![0u8; 16]);
    let err = assert_err!(client_for(&server).upload_passport(upload).await);

    assert!(matches!(err, ClientError::Decode(_)));
}

#[tokio::test]
async fn test_transport_failure_is_propagated() {
    // Nothing listens on port 1.
    let client = BackendClient::new(ClientConfig::new("http://127.0.0.1:1"));
    let err = assert_err!(client.sign_in(&AuthRequest::new("a@b.com", "pw")).await);

    assert!(matches!(err, ClientError::Transport(_)), "{err:?}");
    assert_eq!(err.status(), None);
    assert_eq!(err.error_code(), "TRANSPORT_ERROR");
}

#[tokio::test]
async fn test_base_url_resolved_from_environment() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/signup")
        .with_status(200)
        .with_body(r#"{"ok":true}"#)
        .create_async()
        .await;

    let url = server.url();
    let config = ClientConfig::from_lookup(|key| {
        (key == BACKEND_URL_ENV).then(|| format!("{url}/"))
    });
    let client = BackendClient::new(config);
    assert_eq!(client.base_url(), url);

    let response = assert_ok!(client.sign_up(&AuthRequest::new("a@b.com", "pw")).await);
    assert_eq!(response.as_json(), Some(&json!({"ok": true})));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_requests_follow_backend_url_variable() {
    let _guard = ENV_LOCK.lock().await;
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contact")
        .with_status(200)
        .with_body("sent")
        .create_async()
        .await;

    std::env::set_var(BACKEND_URL_ENV, server.url());
    let client = BackendClient::new(ClientConfig::from_env());
    std::env::remove_var(BACKEND_URL_ENV);

    let request = ContactRequest {
        first_name: "A".to_string(),
        last_name: "B".to_string(),
        email: "a@b.com".to_string(),
        ..ContactRequest::default()
    };
    let response = assert_ok!(client.send_contact(&request).await);

    assert_eq!(response.as_text(), Some("sent"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unset_backend_url_targets_default_endpoint() {
    let _guard = ENV_LOCK.lock().await;
    std::env::remove_var(BACKEND_URL_ENV);

    let config = ClientConfig::from_env();
    let client = BackendClient::new(config.clone());

    assert_eq!(client.base_url(), DEFAULT_BACKEND_URL);
    assert_eq!(
        config.endpoint(trip_planner_rs::CONTACT_PATH),
        "http://127.0.0.1:8000/api/contact"
    );
}
