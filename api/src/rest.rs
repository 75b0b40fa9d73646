use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    routing::{delete, get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    config::BODY_LIMIT_BYTES,
    handlers::{admin, alumni, announcements, auth, events, feedback, gallery, users},
    AppState,
};

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/profile", get(users::get_profile).put(users::update_profile))
        .route("/all", get(users::list_users))
        .route("/feedback", post(feedback::add_feedback))
        .route("/feedback/all", get(feedback::list_feedback))
        .route("/alumni", get(alumni::search_for_user))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::admin_login))
        .route("/profile", get(admin::get_profile).put(admin::update_profile))
        .route("/alumni", post(alumni::create).get(alumni::list))
        .route(
            "/alumni/:id",
            get(alumni::get).put(alumni::update).delete(alumni::delete),
        )
        .route("/search", get(alumni::search))
        .route("/events", post(events::create).get(events::list))
        .route(
            "/events/:id",
            get(events::get).put(events::update).delete(events::delete),
        )
        .route(
            "/announcement",
            post(announcements::create).get(announcements::list),
        )
        .route("/announcement/:id", delete(announcements::delete))
}

fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(gallery::add_item))
        .route("/all", get(gallery::list_items))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

async fn health() -> &'static str {
    "Backend is working"
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    Router::new()
        .route("/", get(health))
        .nest("/api/user", user_routes())
        .nest("/api/admin", admin_routes())
        .nest("/api/gallery", gallery_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES)),
        )
        .with_state(state)
}
