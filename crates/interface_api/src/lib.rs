//! HTTP API Layer
//!
//! This crate provides the REST API for the claims-intake system using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers per concern (auth, insurance, claims,
//!   detection, reports)
//! - **Middleware**: Bearer authentication with revocation check, tracing,
//!   audit logging
//! - **Pipeline**: Per-image analysis orchestration shared by the
//!   submission and detection endpoints
//! - **Storage**: Filesystem image store with collision-resistant names
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, config::ApiConfig};
//!
//! let app = create_router(pool, ApiConfig::from_env()?);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod pipeline;
pub mod storage;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use domain_assessment::decode::MAX_IMAGE_BYTES;
use domain_assessment::{ContourMeasurer, DamageClassifier, GeometricMeasurer, IntensityClassifier};
use domain_identity::{InMemoryRevocationStore, RevocationStore};
use infra_db::PgRevocationStore;
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::{ApiConfig, RevocationBackend};
use crate::handlers::{auth, claims, detection, health, insurance, reports};
use crate::middleware::{audit_middleware, auth_middleware};
use crate::storage::ImageStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: ApiConfig,
    pub classifier: Arc<dyn DamageClassifier>,
    pub measurer: Arc<dyn GeometricMeasurer>,
    pub revocations: Arc<dyn RevocationStore>,
    pub images: ImageStore,
}

/// Creates the main API router with the bundled classifier and measurer
///
/// The revocation store follows the configured backend: process-local
/// in-memory, or the shared Postgres-backed store.
pub fn create_router(pool: PgPool, config: ApiConfig) -> Router {
    let classifier: Arc<dyn DamageClassifier> = Arc::new(IntensityClassifier::default());
    let measurer: Arc<dyn GeometricMeasurer> = Arc::new(ContourMeasurer {
        pixels_per_foot: config.pixels_per_foot,
        ..ContourMeasurer::default()
    });
    let revocations: Arc<dyn RevocationStore> = match config.revocation_backend {
        RevocationBackend::Memory => Arc::new(InMemoryRevocationStore::new()),
        RevocationBackend::Postgres => Arc::new(PgRevocationStore::new(pool.clone())),
    };

    create_router_with(pool, config, classifier, measurer, revocations)
}

/// Creates the API router with injected analysis and revocation components
///
/// Any classifier or measurer satisfying the domain traits substitutes
/// without touching the routes; this is also the seam tests use.
pub fn create_router_with(
    pool: PgPool,
    config: ApiConfig,
    classifier: Arc<dyn DamageClassifier>,
    measurer: Arc<dyn GeometricMeasurer>,
    revocations: Arc<dyn RevocationStore>,
) -> Router {
    let images = ImageStore::new(config.upload_dir.clone());
    let state = AppState {
        pool,
        config,
        classifier,
        measurer,
        revocations,
        images,
    };

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login));

    let auth_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/verify", get(auth::verify))
        .route("/user", get(auth::user_profile));

    let insurance_routes = Router::new()
        .route("/policies", post(insurance::create_policy))
        .route("/policies", get(insurance::list_policies))
        .route("/policy-numbers", get(insurance::policy_numbers))
        .route("/claims", post(claims::create_claim))
        .route("/claims", get(claims::claims_for_policy))
        .route("/claims/all", get(claims::list_claims))
        .route("/claims/images", post(claims::submit_image))
        .route("/claims/property", post(claims::submit_property))
        .route("/claims/submit-final", post(claims::submit_final))
        .route("/claims/review", post(claims::review))
        .route(
            "/claims/save-manual-override",
            post(claims::save_manual_override),
        )
        .route("/assessment", get(reports::assessment))
        .route("/reports", get(reports::report_rows))
        .route("/damage-calculation", get(reports::damage_calculation));

    let detection_routes = Router::new()
        .route("/crack", post(detection::detect_crack))
        .route(
            "/crack-with-visualization",
            post(detection::detect_crack_with_visualization),
        )
        .route("/batch-analyze", post(detection::batch_analyze));

    let dashboard_routes = Router::new().route("/stats", get(reports::dashboard_stats));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/insurance", insurance_routes)
        .nest("/detection", detection_routes)
        .nest("/dashboard", dashboard_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            audit_middleware,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api", api_routes)
        .nest_service("/uploads", ServeDir::new(state.images.root()))
        // Multipart batches carry several full-size photographs; the 2 MiB
        // default is far too small. Individual images are still bounded by
        // the decode step.
        .layer(DefaultBodyLimit::max(4 * MAX_IMAGE_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
