use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::{ApiConfig, AppConfig, StorageBackend};
use crate::handlers;
use crate::middleware::bearer_auth_middleware;
use crate::models::{Item, User};
use crate::services::{ItemStore, UserStore};
use crate::storage::{JsonFileStore, MemoryStore, RecordStore};

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub items: Arc<ItemStore>,
    pub users: Arc<UserStore>,
}

impl AppState {
    pub fn new(items: ItemStore, users: UserStore) -> Self {
        Self {
            items: Arc::new(items),
            users: Arc::new(users),
        }
    }

    /// Build both stores on the configured backend
    pub fn from_config(config: &AppConfig) -> Self {
        let (items, users): (Arc<dyn RecordStore<Item>>, Arc<dyn RecordStore<User>>) =
            match config.storage.backend {
                StorageBackend::File => (
                    Arc::new(JsonFileStore::<Item>::new(config.storage.items_path())),
                    Arc::new(JsonFileStore::<User>::new(config.storage.users_path())),
                ),
                StorageBackend::Memory => (
                    Arc::new(MemoryStore::<Item>::new()),
                    Arc::new(MemoryStore::<User>::new()),
                ),
            };

        tracing::info!(
            "Using {:?} storage (items: {}, users: {})",
            config.storage.backend,
            items.location(),
            users.location()
        );

        Self::new(ItemStore::new(items), UserStore::new(users, &config.security))
    }
}

pub fn app(state: AppState, api: &ApiConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_public_routes())
        .merge(item_public_routes())
        // Protected
        .merge(item_protected_routes(state.clone()))
        // Global middleware
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    let router = if api.enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    let router = if api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use handlers::public::auth;

    Router::new()
        .route("/register", post(auth::register_post))
        .route("/login", post(auth::login_post))
}

fn item_public_routes() -> Router<AppState> {
    use handlers::public::items;

    Router::new()
        .route("/items", get(items::items_get))
        .route("/items/:id", get(items::item_get))
}

fn item_protected_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::items;

    Router::new()
        .route("/items", post(items::items_post))
        .route("/updateitems", put(items::items_put))
        // route_layer: unmatched paths stay 404/405 instead of 401
        .route_layer(middleware::from_fn_with_state(state, bearer_auth_middleware))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Catalog API",
        "version": version,
        "endpoints": {
            "register": "POST /register (public)",
            "login": "POST /login (public)",
            "list_items": "GET /items (public)",
            "get_item": "GET /items/:id (public)",
            "create_item": "POST /items (bearer token)",
            "update_items": "PUT /updateitems (bearer token)",
            "health": "GET /health (public)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match tokio::try_join!(state.items.list(), state.users.count()) {
        Ok((items, users)) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "items": items.len(),
                "users": users,
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "error": "storage unavailable",
                })),
            )
        }
    }
}
