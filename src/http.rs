//! Admin HTTP endpoints
//!
//! Serves the health check and runtime log-level control. The event-log
//! path is exported for routers that mount their own handler.

use crate::broker::CoordinatorBroker;
use crate::common::{Error, Result};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, RwLock};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

/// Health check path.
pub const HEALTHZ_ROUTER_PATH: &str = "/healthz";

/// Get and update the log level at runtime.
pub const LOG_LEVEL_ROUTER_PATH: &str = "/log/level";

/// Event log control.
pub const EVENT_LOG_ROUTER_PATH: &str = "/eventlog";

type ApplyLevel = dyn Fn(&str) -> Result<()> + Send + Sync;

/// Current log filter plus the hook that installs a new one.
#[derive(Clone)]
pub struct LogLevelControl {
    current: Arc<RwLock<String>>,
    apply: Arc<ApplyLevel>,
}

impl LogLevelControl {
    pub fn new(
        initial: impl Into<String>,
        apply: impl Fn(&str) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            current: Arc::new(RwLock::new(initial.into())),
            apply: Arc::new(apply),
        }
    }

    pub fn current(&self) -> String {
        self.current
            .read()
            .map(|level| level.clone())
            .unwrap_or_default()
    }

    /// Install `level`; the stored value only changes if the hook accepts it.
    ///
    /// The write lock is held across the hook so concurrent updates are
    /// recorded in the order they were installed.
    pub fn set(&self, level: &str) -> Result<()> {
        let level = level.trim();
        if level.is_empty() {
            return Err(Error::InvalidConfig("empty log level".into()));
        }
        let mut current = self
            .current
            .write()
            .map_err(|_| Error::Other("log level lock poisoned".into()))?;
        (self.apply)(level)?;
        *current = level.to_string();
        Ok(())
    }
}

/// The filter directive installed at startup: `env` (usually `RUST_LOG`)
/// when it is set and parses, otherwise the configured level.
pub fn initial_log_directive(env: Option<&str>, configured: &str) -> String {
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() && EnvFilter::try_new(directive).is_ok() => {
            directive.to_string()
        }
        _ => configured.to_string(),
    }
}

#[derive(Clone)]
pub struct AdminState {
    pub broker: Arc<CoordinatorBroker>,
    pub log_level: LogLevelControl,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogLevelBody {
    pub level: String,
}

pub fn create_router(state: AdminState) -> Router {
    Router::new()
        .route(HEALTHZ_ROUTER_PATH, axum::routing::get(healthz))
        .route(
            LOG_LEVEL_ROUTER_PATH,
            axum::routing::get(get_log_level).put(update_log_level),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz(State(state): State<AdminState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "root_coord": state.broker.has_root_coord(),
            "data_coord": state.broker.has_data_coord(),
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

async fn get_log_level(State(state): State<AdminState>) -> impl IntoResponse {
    Json(LogLevelBody {
        level: state.log_level.current(),
    })
}

async fn update_log_level(
    State(state): State<AdminState>,
    Json(body): Json<LogLevelBody>,
) -> impl IntoResponse {
    match state.log_level.set(&body.level) {
        Ok(()) => {
            tracing::info!("Log level changed to {}", body.level);
            (
                StatusCode::OK,
                Json(json!({ "level": state.log_level.current() })),
            )
        }
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn state() -> AdminState {
        AdminState {
            broker: Arc::new(CoordinatorBroker::new(None, None)),
            log_level: LogLevelControl::new("info", |level| {
                if level == "bogus" {
                    Err(Error::InvalidConfig(format!("bad filter: {}", level)))
                } else {
                    Ok(())
                }
            }),
        }
    }

    async fn body_json(resp: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthz() {
        let app = create_router(state());
        let resp = app
            .oneshot(
                Request::builder()
                    .uri(HEALTHZ_ROUTER_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["root_coord"], false);
        assert_eq!(json["data_coord"], false);
    }

    #[tokio::test]
    async fn test_log_level_roundtrip() {
        let state = state();
        let app = create_router(state.clone());

        let resp = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(LOG_LEVEL_ROUTER_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"level":"debug"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(state.log_level.current(), "debug");

        let resp = app
            .oneshot(
                Request::builder()
                    .uri(LOG_LEVEL_ROUTER_PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(resp).await;
        assert_eq!(json["level"], "debug");
    }

    #[test]
    fn test_concurrent_sets_keep_last_installed_level() {
        let installed = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorder = installed.clone();
        let control = LogLevelControl::new("info", move |level| {
            recorder.lock().unwrap().push(level.to_string());
            Ok(())
        });

        std::thread::scope(|scope| {
            for level in ["debug", "warn", "error", "trace"] {
                let control = control.clone();
                scope.spawn(move || {
                    for _ in 0..50 {
                        control.set(level).unwrap();
                    }
                });
            }
        });

        let installed = installed.lock().unwrap();
        assert_eq!(installed.len(), 200);
        assert_eq!(installed.last().map(String::as_str), Some(control.current().as_str()));
    }

    #[test]
    fn test_initial_log_directive() {
        assert_eq!(initial_log_directive(None, "info"), "info");
        assert_eq!(initial_log_directive(Some(""), "info"), "info");
        assert_eq!(
            initial_log_directive(Some("warn,metabroker=debug"), "info"),
            "warn,metabroker=debug"
        );
        assert_eq!(initial_log_directive(Some("metabroker=loud"), "info"), "info");
    }

    #[tokio::test]
    async fn test_invalid_log_level_is_rejected() {
        let state = state();
        let app = create_router(state.clone());
        let resp = app
            .oneshot(
                Request::builder()
                    .method("PUT")
                    .uri(LOG_LEVEL_ROUTER_PATH)
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"level":"bogus"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(state.log_level.current(), "info");
    }
}
