use axum::{
    extract::Query,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chomp::{best_move, check_move, CheckRequest, MoveRequest};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let app = app_router();

    let addr = std::env::var("CHOMP_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn app_router() -> Router {
    let api = Router::new()
        .route("/move", get(handle_move))
        .route("/check", get(handle_check));
    Router::new()
        .nest("/api", api)
        .layer(
            CorsLayer::new()
                .allow_methods([axum::http::Method::GET])
                .allow_origin(axum::http::HeaderValue::from_static("*"))
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, serde::Deserialize)]
struct MoveQuery {
    #[serde(default)]
    history: String,
}

#[derive(Debug, serde::Deserialize)]
struct CheckQuery {
    #[serde(default)]
    history: String,
    cell: String,
}

async fn handle_move(Query(query): Query<MoveQuery>) -> Result<impl IntoResponse, ApiError> {
    let req = MoveRequest {
        history: query.history,
    };
    // The search is CPU-bound; keep it off the async workers.
    let mv = tokio::task::spawn_blocking(move || best_move(req)).await??;
    info!(cell = %mv.cell, source = ?mv.source, "ai move");
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(mv)))
}

async fn handle_check(Query(query): Query<CheckQuery>) -> Result<impl IntoResponse, ApiError> {
    let verdict = check_move(CheckRequest {
        history: query.history,
        cell: query.cell,
    })?;
    let headers = [(header::CACHE_CONTROL, "no-store")];
    Ok((headers, Json(verdict)))
}

#[derive(Debug)]
struct ApiError(anyhow::Error);

impl<E: Into<anyhow::Error>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::BAD_REQUEST;
        let body = format!("{}", self.0);
        (status, body).into_response()
    }
}
