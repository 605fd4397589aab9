#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use formrule_core::i18n::{I18n, MessageCatalog};
use http_body_util::BodyExt;
use tower::ServiceExt;

use formrule_api::config::{parse_origins, ServerConfig};
use formrule_api::router::build_app_router;
use formrule_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: parse_origins("http://localhost:5173").unwrap(),
        request_timeout_secs: 30,
        default_language: "en-US".to_string(),
        message_catalog_path: None,
    }
}

/// Build the full application router with the default formatter.
pub fn build_test_app() -> Router {
    build_app_with_i18n(I18n::default())
}

/// Build the full application router with a German translation of the
/// default either-rule message.
pub fn build_translated_app() -> Router {
    let mut catalog = MessageCatalog::new();
    catalog.insert(
        "de",
        formrule_core::validation::either::DEFAULT_MESSAGE,
        "Entweder '{attribute}' oder '{other_attributes}' muss ausgefüllt sein",
    );
    build_app_with_i18n(I18n::new(Arc::new(catalog), "en-US"))
}

fn build_app_with_i18n(i18n: I18n) -> Router {
    let config = test_config();
    let state = AppState { i18n };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
