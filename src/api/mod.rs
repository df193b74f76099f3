mod handlers;
pub mod middleware;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::store::Store;

pub fn create_router(store: Store) -> Router {
    let session = axum::middleware::from_fn(middleware::require_session);

    // Reads are public; everything mutating, plus config and the upload
    // gallery, sits behind the session cookie.
    let api = Router::new()
        .route(
            "/versions",
            get(handlers::list_versions)
                .merge(post(handlers::create_version).route_layer(session.clone())),
        )
        .route("/versions/latest", get(handlers::latest_version))
        .route(
            "/versions/{id}",
            get(handlers::get_version).merge(
                put(handlers::update_version)
                    .merge(delete(handlers::delete_version))
                    .route_layer(session.clone()),
            ),
        )
        .route(
            "/config",
            get(handlers::get_config)
                .put(handlers::put_config)
                .route_layer(session.clone()),
        )
        .route(
            "/uploads",
            get(handlers::list_uploads)
                .post(handlers::upload_file)
                .route_layer(session),
        )
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/auth/check", get(handlers::auth_check))
        .route("/health", get(handlers::health));

    let uploads_dir = store.uploads_dir();

    Router::new()
        .nest("/api/v1", api)
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        .layer(DefaultBodyLimit::max(handlers::MAX_UPLOAD_BYTES + 64 * 1024))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(store)
}
