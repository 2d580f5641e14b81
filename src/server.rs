//! Network-service variant
//!
//! A single-route HTTP surface over the render pipeline: the exact root path
//! accepts a request body (raw URL text or JSON, see [`crate::request`]),
//! everything else is 404. Requests are not serialized against each other;
//! each in-flight render owns its own engine session.

use std::fmt;
#[cfg(unix)]
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use log::{error, info};

use crate::engine::EngineProcess;
use crate::request::parse_request;
use crate::{orchestrator, RenderConfig};

/// Shared service state: the process-wide engine plus render configuration
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<dyn EngineProcess>,
    pub config: Arc<RenderConfig>,
}

impl AppState {
    pub fn new(engine: Arc<dyn EngineProcess>, config: RenderConfig) -> Self {
        Self {
            engine,
            config: Arc::new(config),
        }
    }
}

/// Where the service listens
#[derive(Debug, Clone)]
pub enum ListenAddr {
    Tcp { host: String, port: u16 },
    #[cfg(unix)]
    Unix(PathBuf),
}

impl fmt::Display for ListenAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenAddr::Tcp { host, port } => write!(f, "{}:{}", host, port),
            #[cfg(unix)]
            ListenAddr::Unix(path) => write!(f, "unix socket {}", path.display()),
        }
    }
}

/// Build the single-route router over `state`
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", any(render_endpoint))
        .fallback(not_found)
        .with_state(state)
}

/// Bind `addr` and serve the render route until the process exits
pub async fn serve(addr: ListenAddr, state: AppState) -> std::io::Result<()> {
    let app = router(state);

    match addr {
        ListenAddr::Tcp { host, port } => {
            let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
            info!("Listening on {}", listener.local_addr()?);
            axum::serve(listener, app).await
        }
        #[cfg(unix)]
        ListenAddr::Unix(path) => {
            // A socket file left over from a previous run blocks bind.
            let _ = std::fs::remove_file(&path);
            let listener = tokio::net::UnixListener::bind(&path)?;
            info!("Listening on unix socket {}", path.display());
            axum::serve(listener, app).await
        }
    }
}

async fn render_endpoint(State(state): State<AppState>, body: Bytes) -> Response {
    let raw = String::from_utf8_lossy(&body);

    let Some(request) = parse_request(&raw) else {
        return (StatusCode::BAD_REQUEST, "Invalid request params").into_response();
    };

    match orchestrator::render(state.engine.as_ref(), &request, &state.config).await {
        Ok(rendered) => {
            ([(header::CONTENT_TYPE, rendered.mime)], rendered.payload).into_response()
        }
        Err(err) => {
            error!("Internal server error: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
