#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, Bytes, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use std::sync::Arc;
use std::time::Duration;
use store::{
    InMemoryItemRepository, InMemoryObjectMemberRepository, Item, ItemRepository, ObjectId,
    ObjectMember, ObjectMemberKey, ObjectMemberRepository, StoreError,
};
use tower::ServiceExt;

use api::AppState;

pub struct TestApp {
    pub router: Router,
    pub items: Arc<InMemoryItemRepository>,
    pub links: Arc<InMemoryObjectMemberRepository>,
}

impl TestApp {
    pub fn new() -> Self {
        let items = Arc::new(InMemoryItemRepository::new());
        let links = Arc::new(InMemoryObjectMemberRepository::new());
        let state = AppState::new(items.clone(), links.clone());
        Self {
            router: api::app(state, Duration::from_secs(5)),
            items,
            links,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        send(&self.router, Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: serde_json::Value) -> TestResponse {
        send(&self.router, Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> TestResponse {
        send(&self.router, Method::POST, uri, Some(body.to_string())).await
    }
}

pub fn degraded_app() -> Router {
    api::app(AppState::degraded(), Duration::from_secs(5))
}

pub fn failing_app() -> Router {
    let failing = Arc::new(FailingRepository);
    api::app(
        AppState::new(failing.clone(), failing),
        Duration::from_secs(5),
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        match serde_json::from_slice(&self.body) {
            Ok(value) => value,
            Err(err) => panic!(
                "response body is not JSON: {err}; body={}",
                String::from_utf8_lossy(&self.body)
            ),
        }
    }

    pub fn error(&self) -> String {
        self.json()["error"]
            .as_str()
            .unwrap_or_else(|| panic!("no error message in {}", self.json()))
            .to_string()
    }
}

pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(body) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(body)
        }
        None => Body::empty(),
    };
    let request = builder
        .body(body)
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    let response = router
        .clone()
        .oneshot(request)
        .await
        .unwrap_or_else(|err| panic!("router request failed: {err}"));

    let status = response.status();
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap_or_else(|err| panic!("failed to read response body: {err}"));
    TestResponse { status, body }
}

/// Repository whose every call fails like a dropped database connection
pub struct FailingRepository;

fn connection_lost() -> StoreError {
    StoreError::Database("connection reset by peer".to_string())
}

#[async_trait]
impl ItemRepository for FailingRepository {
    async fn create(&self, _name: &str) -> store::Result<Item> {
        Err(connection_lost())
    }

    async fn get(&self, _id: &ObjectId) -> store::Result<Option<Item>> {
        Err(connection_lost())
    }

    async fn list(&self, _limit: i64) -> store::Result<Vec<Item>> {
        Err(connection_lost())
    }

    async fn delete(&self, _id: &ObjectId) -> store::Result<bool> {
        Err(connection_lost())
    }
}

#[async_trait]
impl ObjectMemberRepository for FailingRepository {
    async fn create(&self, _key: &ObjectMemberKey) -> store::Result<ObjectMember> {
        Err(connection_lost())
    }

    async fn delete_by_id(&self, _id: &str) -> store::Result<bool> {
        Err(connection_lost())
    }
}
