use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full application router over `state`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root_get))
        .route("/health", get(public::health_get))
        .merge(auth_public_routes())
        // Protected
        .merge(protected_routes(&state))
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(public::signup_post))
        .route("/auth/signin", post(public::signin_post))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        // Current user
        .route("/users/me", get(protected::me_get))
        .route("/users", axum::routing::patch(protected::users_patch))
        // Bookmarks
        .route(
            "/bookmarks",
            get(protected::bookmarks_list).post(protected::bookmarks_post),
        )
        .route(
            "/bookmarks/:id",
            get(protected::bookmark_get)
                .patch(protected::bookmark_patch)
                .delete(protected::bookmark_delete),
        )
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if security.cors_origins.iter().any(|origin| origin == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
