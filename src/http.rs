//! HTTP transport for the collection service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /api/:collection` — all entities, in insertion order.
//! - `POST /api/:collection` — create from a JSON object body; returns the entity.
//! - `GET /api/:collection/:id` — one entity, 404 if absent.
//! - `PUT /api/:collection/:id` — replace fields; returns the entity, 404 if absent.
//! - `DELETE /api/:collection/:id` — returns `{ "success": true }`, even if absent.
//! - `GET /health` — `{ "ok": true }`.
//!
//! Every response allows any origin; `OPTIONS` preflights get an empty 204.

use std::future::Future;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Request, State};
use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{info, warn};
use serde_json::{json, Value};

use crate::document::{CollectionName, Entity};
use crate::error::Error;
use crate::service::CollectionService;

/// Build an axum `Router` serving the collection API.
pub fn router(service: CollectionService) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/:collection", get(list_handler).post(create_handler))
        .route(
            "/api/:collection/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .layer(middleware::from_fn(cors))
        .with_state(service)
}

/// Serve the API at `addr` (e.g. `"0.0.0.0:5000"`) until `shutdown` resolves.
pub async fn serve<F>(service: CollectionService, addr: &str, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            warn!("request failed: {self}");
        }
        let message = match &self {
            Error::NotFound { .. } => "Not found".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

async fn cors(req: Request, next: Next) -> Response {
    let mut res = if req.method() == Method::OPTIONS {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(req).await
    };
    let headers = res.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    res
}

fn parse_id(raw: &str) -> Result<u64, Error> {
    raw.parse()
        .map_err(|_| Error::Invalid(format!("malformed id `{raw}`")))
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, Error> {
    payload
        .map(|Json(v)| v)
        .map_err(|e| Error::Invalid(e.body_text()))
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn list_handler(
    State(service): State<CollectionService>,
    Path(collection): Path<String>,
) -> Result<Json<Vec<Entity>>, Error> {
    let collection: CollectionName = collection.parse()?;
    Ok(Json(service.list(collection)))
}

async fn create_handler(
    State(service): State<CollectionService>,
    Path(collection): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Entity>, Error> {
    let collection: CollectionName = collection.parse()?;
    Ok(Json(service.create(collection, body(payload)?)?))
}

async fn get_handler(
    State(service): State<CollectionService>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Entity>, Error> {
    let collection: CollectionName = collection.parse()?;
    Ok(Json(service.get(collection, parse_id(&id)?)?))
}

async fn update_handler(
    State(service): State<CollectionService>,
    Path((collection, id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Entity>, Error> {
    let collection: CollectionName = collection.parse()?;
    let id = parse_id(&id)?;
    Ok(Json(service.update(collection, id, body(payload)?)?))
}

async fn delete_handler(
    State(service): State<CollectionService>,
    Path((collection, id)): Path<(String, String)>,
) -> Result<Json<Value>, Error> {
    let collection: CollectionName = collection.parse()?;
    service.delete(collection, parse_id(&id)?)?;
    Ok(Json(json!({ "success": true })))
}
