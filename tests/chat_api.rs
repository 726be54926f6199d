//! HTTP-level tests for the chat router, driven through `tower::ServiceExt::oneshot`
//! against the dataset shipped in `data/`.
#![cfg(feature = "server")]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use fin_chat::{load_csv, router, AppState, QueryResolver, TopicMatching, ERROR_RESPONSE};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app_with(matching: TopicMatching) -> axum::Router {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/financial_data.csv");
    let table = load_csv(&path).expect("shipped dataset should load");
    router(AppState::new(
        QueryResolver::new(Arc::new(table)).with_matching(matching),
    ))
}

fn app() -> axum::Router {
    app_with(TopicMatching::CaseSensitive)
}

async fn post_chat(app: axum::Router, body: impl Into<Body>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn ask(message: &str, company: Option<&str>) -> String {
    let body = match company {
        Some(c) => json!({ "message": message, "company_name": c }),
        None => json!({ "message": message }),
    };
    let (status, value) = post_chat(app(), body.to_string()).await;
    assert_eq!(status, StatusCode::OK);
    value["response"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn total_revenue_defaults_to_apple() {
    assert_eq!(
        ask("What is the total revenue?", None).await,
        "The total revenue for Apple in the most recent year is $383,285.00."
    );
}

#[tokio::test]
async fn net_income_change_for_apple_decreased() {
    assert_eq!(
        ask("net income change", Some("Apple")).await,
        "The net income for Apple has decreased by 2.81% over the last year."
    );
}

#[tokio::test]
async fn net_income_change_for_tesla_increased() {
    assert_eq!(
        ask("net income change", Some("tesla")).await,
        "The net income for tesla has increased by 19.44% over the last year."
    );
}

#[tokio::test]
async fn liabilities_change_for_microsoft() {
    assert_eq!(
        ask("liabilities change", Some("Microsoft")).await,
        "The liabilities for Microsoft have increased by 3.76% over the last year."
    );
}

#[tokio::test]
async fn growth_answers_use_latest_year() {
    assert_eq!(
        ask("revenue growth", Some("Apple")).await,
        "The revenue growth percentage for Apple in the most recent year is -2.80%."
    );
    assert_eq!(
        ask("assets growth", Some("Tesla")).await,
        "The assets growth percentage for Tesla in the most recent year is 29.49%."
    );
}

#[tokio::test]
async fn unknown_company_reports_insufficient_data() {
    assert_eq!(
        ask("total assets", Some("Netflix")).await,
        "Not enough data to report total assets for Netflix."
    );
    assert_eq!(
        ask("liabilities change", Some("Netflix")).await,
        "Not enough data to calculate liabilities change over the last year."
    );
}

#[tokio::test]
async fn greeting_and_fallback() {
    assert_eq!(ask("hey there", None).await, "Hello! How can I help you today?");
    assert_eq!(
        ask("dividend payout", None).await,
        "Sorry, I can only provide information on revenue, net income, liabilities, assets, and growth metrics."
    );
}

#[tokio::test]
async fn uppercase_triggers_only_match_when_case_insensitive() {
    let fallback = ask("Total Assets", None).await;
    assert!(fallback.starts_with("Sorry"), "{}", fallback);

    let body = json!({ "message": "Total Assets" }).to_string();
    let (_, value) = post_chat(app_with(TopicMatching::CaseInsensitive), body).await;
    assert_eq!(
        value["response"],
        "The total assets for Apple in the most recent year are $352,583.00."
    );
}

#[tokio::test]
async fn missing_or_empty_message_returns_generic_error() {
    for body in [
        json!({}).to_string(),
        json!({ "message": "" }).to_string(),
        json!({ "message": null, "company_name": "Apple" }).to_string(),
        "this is not json".to_string(),
        String::new(),
    ] {
        let (status, value) = post_chat(app(), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(value, json!({ "response": ERROR_RESPONSE }));
    }
}

#[tokio::test]
async fn health_reports_loaded_dataset() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value, json!({ "status": "ok", "records": 9, "companies": 3 }));
}

#[tokio::test]
async fn index_serves_html() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(String::from_utf8_lossy(&bytes).contains("/chat"));
}

#[tokio::test]
async fn whitespace_message_gets_fallback() {
    assert_eq!(
        ask("   ", None).await,
        "Sorry, I can only provide information on revenue, net income, liabilities, assets, and growth metrics."
    );
}

#[tokio::test]
async fn blank_company_is_a_company_without_records() {
    assert_eq!(ask("hello", Some("")).await, "Hello! How can I help you today?");
    assert_eq!(
        ask("net income change", Some("")).await,
        "Not enough data to calculate net income change over the last year."
    );
}
