use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use tower::ServiceExt;

use crate::app::{app, AppState};
use crate::config::{ApiConfig, SecurityConfig, MIN_BCRYPT_COST};
use crate::models::{Item, User};
use crate::services::{ItemStore, UserStore};
use crate::storage::{MemoryStore, RecordStore, StorageError};

/// Router over in-memory stores, driven without a socket
pub struct TestContext {
    pub state: AppState,
    router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_item_backend(Arc::new(MemoryStore::<Item>::new()))
    }

    /// Swap the item backend, e.g. for one that fails
    pub fn with_item_backend(items: Arc<dyn RecordStore<Item>>) -> Self {
        let users: Arc<dyn RecordStore<User>> = Arc::new(MemoryStore::<User>::new());
        let security = SecurityConfig {
            bcrypt_cost: MIN_BCRYPT_COST,
            token_bytes: 32,
        };
        let api = ApiConfig {
            enable_cors: false,
            enable_request_logging: false,
            max_request_size_bytes: 64 * 1024,
        };

        let state = AppState::new(ItemStore::new(items), UserStore::new(users, &security));
        let router = app(state.clone(), &api);

        Self { state, router }
    }

    /// Send a JSON request and decode the JSON response (Null when empty)
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = body.map(|v| v.to_string()).unwrap_or_default();
        self.request_raw(method, uri, token, &body).await
    }

    /// Send a raw body with a JSON content type
    pub async fn request_raw(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let content_type = (!body.is_empty()).then_some("application/json");
        self.request_with_content_type(method, uri, token, content_type, body)
            .await
    }

    /// Send a raw body with an arbitrary (or no) content type
    pub async fn request_with_content_type(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: &str,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, value)
    }

    /// Register an account with password "pw" and return its token
    pub async fn register_and_login(&self, email: &str) -> String {
        let credentials = json!({ "email": email, "password": "pw" });

        let (status, _) = self
            .request(Method::POST, "/register", None, Some(credentials.clone()))
            .await;
        assert_eq!(status, StatusCode::OK, "registration of {email} failed");

        let (status, body) = self.request(Method::POST, "/login", None, Some(credentials)).await;
        assert_eq!(status, StatusCode::OK, "login of {email} failed");

        body["token"].as_str().unwrap().to_string()
    }
}

/// Backend whose every operation fails with an I/O error
pub struct BrokenStore;

#[async_trait]
impl<T: Send + Sync> RecordStore<T> for BrokenStore {
    async fn load(&self) -> Result<Vec<T>, StorageError> {
        Err(Self::error())
    }

    async fn save(&self, _records: &[T]) -> Result<(), StorageError> {
        Err(Self::error())
    }

    fn location(&self) -> String {
        "broken".to_string()
    }
}

impl BrokenStore {
    fn error() -> StorageError {
        StorageError::Io {
            path: PathBuf::from("broken.json"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk on fire"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_and_login_helper_issues_working_token() {
        let ctx = TestContext::new();
        let token = ctx.register_and_login("helper@example.com").await;

        let user = ctx.state.users.validate_token(&token).await.unwrap();
        assert_eq!(user.map(|u| u.email), Some("helper@example.com".to_string()));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let ctx = TestContext::new();
        let (status, _) = ctx.request(Method::GET, "/nope", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
