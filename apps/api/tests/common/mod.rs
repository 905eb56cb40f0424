//! Shared harness for the HTTP tests: an in-memory database behind the real
//! router, driven with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::collections::HashMap;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sweetify_api::{AppState, ApiConfig};
use sweetify_db::{Database, DbConfig};

pub struct TestApp {
    pub router: Router,
    pub db: Database,
}

impl TestApp {
    pub async fn new() -> Self {
        let vars: HashMap<&str, &str> = HashMap::from([("JWT_SECRET", "integration-test-secret")]);
        let config = ApiConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
            .expect("test config");

        let db = Database::new(DbConfig::in_memory())
            .await
            .expect("in-memory database");

        let router = sweetify_api::app(AppState::new(db.clone(), config));
        TestApp { router, db }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("infallible router");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, token, Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token, None).await
    }

    /// Registers an account and returns its token.
    pub async fn register(&self, username: &str, role: &str) -> String {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({ "username": username, "password": "password123", "role": role }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register {username}: {body}");
        body["token"].as_str().expect("token").to_string()
    }

    pub async fn customer_token(&self) -> String {
        self.register("customer", "customer").await
    }

    pub async fn admin_token(&self) -> String {
        self.register("admin", "admin").await
    }

    /// Creates a sweet through the API and returns its id.
    pub async fn create_sweet(&self, admin: &str, name: &str, price: f64, quantity: i64) -> String {
        let (status, body) = self
            .post(
                "/api/sweets",
                Some(admin),
                json!({
                    "name": name,
                    "category": "Candy",
                    "price": price,
                    "quantity": quantity,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create {name}: {body}");
        body["_id"].as_str().expect("_id").to_string()
    }

    pub async fn stock_of(&self, token: &str, sweet_id: &str) -> i64 {
        let (status, body) = self.get(&format!("/api/sweets/{sweet_id}"), Some(token)).await;
        assert_eq!(status, StatusCode::OK);
        body["quantity"].as_i64().expect("quantity")
    }
}

pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
