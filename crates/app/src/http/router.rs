use std::any::Any;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::http::routes::{comments, failure, health, likes};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors_allow_origins);
    let mut router = Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/comments",
            get(comments::get_comments).post(comments::post_comment),
        )
        .route("/api/like", post(likes::post_like))
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors {
        router = router.layer(cors);
    }
    router
}

/// CORS for the configured browser origins. `*` anywhere in the list opens
/// the API to every origin; no usable origin means no CORS layer at all.
fn build_cors(allowed: &[String]) -> Option<CorsLayer> {
    let origin = if allowed.iter().any(|origin| origin.trim() == "*") {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = allowed
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin.trim())
                    .inspect_err(|_| warn!(origin = %origin, "invalid CORS origin ignored"))
                    .ok()
            })
            .collect();
        if origins.is_empty() {
            return None;
        }
        AllowOrigin::list(origins)
    };
    Some(
        CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
    )
}

fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "request handler panicked");
    failure(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::http::StatusCode;

    use super::{build_cors, handle_panic};
    use crate::config::AppConfig;

    fn origins_from(raw: &str) -> Vec<String> {
        let vars = HashMap::from([("WISHWALL_CORS_ALLOW_ORIGINS", raw.to_string())]);
        AppConfig::from_lookup(|key| vars.get(key).cloned())
            .unwrap()
            .cors_allow_origins
    }

    #[test]
    fn default_origin_enables_cors() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert!(build_cors(&config.cors_allow_origins).is_some());
    }

    #[test]
    fn wildcard_wins_over_listed_origins() {
        assert!(build_cors(&origins_from("https://wall.example, *")).is_some());
        assert!(build_cors(&origins_from("bad\norigin, *")).is_some());
    }

    #[test]
    fn unusable_origins_disable_cors() {
        assert!(build_cors(&[]).is_none());
        assert!(build_cors(&origins_from(" , ")).is_none());
        assert!(build_cors(&["bad\norigin".to_string()]).is_none());
    }

    #[test]
    fn panic_becomes_generic_failure() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let response = handle_panic(Box::new(String::from("boom")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
