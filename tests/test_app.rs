use axum::{
    body,
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pricewatch::alerts::EmailSender;
use pricewatch::app_state::AppState;
use pricewatch::configuration::DatabaseSettings;
use pricewatch::create_app;
use pricewatch::db::{Database, DatabaseProduct};
use std::env;
use tower::ServiceExt;

pub async fn read_body(body: Body) -> String {
    let bytes = body::to_bytes(body, usize::MAX).await.expect("Failed");
    String::from_utf8(bytes.to_vec()).expect("response was not valid utf-8")
}

async fn create_db() -> Database {
    let directory = env::current_dir().expect("Failed to find current directory");
    let settings = DatabaseSettings {
        file_path: Some(format!("{}/tests/data.json", directory.to_str().unwrap())),
        ..Default::default()
    };
    Database::try_from(&settings)
        .await
        .expect("Failed to create in memory db")
}

async fn create_test_app() -> (Router, AppState) {
    let db = create_db().await;
    create_app(db, EmailSender::LogOnly).expect("Failed to create an app")
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn health_check_works() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health_check")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn products_works() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);
    let products =
        serde_json::from_str::<Vec<DatabaseProduct>>(&text).expect("Failed to parse products");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Sweet cherries");
}

#[tokio::test]
async fn n_product_works() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/n_products")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);
    assert_eq!(text.parse::<i32>().expect("Failed to parse to integer"), 2);
}

#[tokio::test]
async fn unknown_product_id_fails() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/product/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn alert_with_invalid_email_fails() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/alert",
            r#"{"product_id": 1, "email": "not-an-email", "alert_type": "below", "target_price": "50"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn negative_price_update_fails() {
    let (app, _) = create_test_app().await;

    let response = app
        .oneshot(json_request(
            "PUT",
            "/product/1/price",
            r#"{"new_price": "-1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn price_drop_triggers_registered_alert() {
    let (app, state) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/alert",
            r#"{"product_id": 1, "email": "test@test.com", "alert_type": "below", "target_price": "50"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/product/1/price",
            r#"{"new_price": "45.00"}"#,
        ))
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);

    let outcome: serde_json::Value = serde_json::from_str(&text).expect("Failed to parse outcome");
    assert_eq!(outcome["alerts"]["delivered"], 1);
    assert_eq!(outcome["alerts"]["failed"], 0);

    // The fixture has no alerts, so the first registration gets id 1.
    let log = state
        .db
        .delivery_log_for(1)
        .await
        .expect("Failed to read delivery log");
    assert_eq!(log.len(), 1);
    assert!(log[0].email_sent);
}

#[tokio::test]
async fn update_without_crossing_notifies_nobody() {
    let (app, state) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/alert",
            r#"{"product_id": 1, "email": "test@test.com", "alert_type": "below", "target_price": "30"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/product/1/price",
            r#"{"new_price": "45.00"}"#,
        ))
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);

    let outcome: serde_json::Value = serde_json::from_str(&text).expect("Failed to parse outcome");
    assert_eq!(outcome["alerts"]["delivered"], 0);

    let log = state
        .db
        .delivery_log_for(1)
        .await
        .expect("Failed to read delivery log");
    assert!(log.is_empty());
}

#[tokio::test]
async fn deactivated_alert_is_not_notified() {
    let (app, _) = create_test_app().await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/alert",
            r#"{"product_id": 1, "email": "test@test.com", "alert_type": "change", "target_price": "0"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/alert/1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/product/1/price",
            r#"{"new_price": "60.00"}"#,
        ))
        .await
        .unwrap();
    let (parts, body) = response.into_parts();
    let text = read_body(body).await;
    assert_eq!(parts.status, StatusCode::OK);

    let outcome: serde_json::Value = serde_json::from_str(&text).expect("Failed to parse outcome");
    assert_eq!(outcome["alerts"]["delivered"], 0);
}
