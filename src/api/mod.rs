use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::ListParams;
use crate::state::SharedState;

mod arcs;
pub mod auth;
mod characters;
mod crews;
mod episodes;
mod error;
mod exports;
mod fruits;
mod holders;
mod stats;
mod system;
pub mod types;
mod validation;

pub use error::ApiError;
pub use types::*;
pub use validation::ListQuery;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub start_time: std::time::Instant,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Arc<RwLock<Config>> {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn catalog_service(&self) -> &Arc<dyn crate::services::CatalogService> {
        &self.shared.catalog_service
    }

    #[must_use]
    pub fn admin_service(&self) -> &Arc<dyn crate::services::AdminService> {
        &self.shared.admin_service
    }

    #[must_use]
    pub fn auth_service(&self) -> &Arc<dyn crate::services::AuthService> {
        &self.shared.auth_service
    }

    /// Resolves a collection query against the configured page sizes.
    pub async fn list_params(&self, query: ListQuery) -> Result<ListParams, ApiError> {
        let config = self.config().read().await;
        query.into_params(&config.api)
    }
}

#[must_use]
pub fn create_app_state(shared: Arc<SharedState>) -> Arc<AppState> {
    Arc::new(AppState {
        shared,
        start_time: std::time::Instant::now(),
    })
}

pub async fn create_app_state_from_config(config: Config) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    Ok(create_app_state(shared))
}

pub async fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config().read().await.server.cors_allowed_origins.clone();

    let api_router = Router::new()
        .merge(create_public_router())
        .nest("/admin", create_admin_router(state.clone()))
        .route("/auth/login", post(auth::login))
        .with_state(state);

    let cors_layer = if cors_origins.iter().any(|origin| origin == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .nest("/api", api_router)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}

fn create_public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(system::health))
        .route("/characters", get(characters::list_characters))
        .route("/characters/{id}", get(characters::get_character))
        .route("/crews", get(crews::list_crews))
        .route("/crews/{id}", get(crews::get_crew))
        .route("/fruits", get(fruits::list_fruits))
        .route("/fruits/{id}", get(fruits::get_fruit))
        .route("/arcs", get(arcs::list_arcs))
        .route("/arcs/{id}", get(arcs::get_arc))
        .route("/episodes", get(episodes::list_episodes))
        .route("/episodes/{id}", get(episodes::get_episode))
}

fn create_admin_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/arcs", post(arcs::create_arc))
        .route(
            "/arcs/{id}",
            put(arcs::update_arc).delete(arcs::delete_arc),
        )
        .route("/arcs/{id}/episodes", post(arcs::add_episode))
        .route("/episodes", post(episodes::create_episode))
        .route(
            "/episodes/{id}",
            put(episodes::update_episode).delete(episodes::delete_episode),
        )
        .route("/crews", post(crews::create_crew))
        .route(
            "/crews/{id}",
            put(crews::update_crew).delete(crews::delete_crew),
        )
        .route("/crews/{id}/members", put(crews::set_members))
        .route("/characters", post(characters::create_character))
        .route(
            "/characters/{id}",
            put(characters::update_character).delete(characters::delete_character),
        )
        .route("/characters/{id}/holders", post(characters::add_holder))
        .route("/characters/export/pdf", post(exports::character_pdf))
        .route("/characters/export/csv", post(exports::characters_csv))
        .route("/fruits", post(fruits::create_fruit))
        .route(
            "/fruits/{id}",
            put(fruits::update_fruit).delete(fruits::delete_fruit),
        )
        .route("/fruits/{id}/holders", post(fruits::add_holder))
        .route("/fruits/export/pdf", post(exports::fruit_pdf))
        .route("/fruits/export/csv", post(exports::fruits_csv))
        .route("/holders", post(holders::create_holder))
        .route(
            "/holders/{id}",
            put(holders::update_holder).delete(holders::delete_holder),
        )
        .route("/stats", get(stats::dashboard))
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
