use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use super::error::ApiResult;
use crate::entity::{fields, NoteView};
use crate::service::{ActionResponse, NoteService};
use crate::validate::Fields;

type JsonBody = std::result::Result<Json<Fields>, JsonRejection>;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /setNote
pub async fn set_note(
    State(service): State<NoteService>,
    body: JsonBody,
) -> ApiResult<Json<ActionResponse>> {
    let Json(body) = body?;
    Ok(Json(service.create_or_update(&body).await?))
}

/// POST /getNote
pub async fn get_note(
    State(service): State<NoteService>,
    body: JsonBody,
) -> ApiResult<Json<NoteView>> {
    let Json(body) = body?;
    Ok(Json(service.read(&body).await?))
}

/// POST /deleteNote
pub async fn delete_note(
    State(service): State<NoteService>,
    body: JsonBody,
) -> ApiResult<Json<ActionResponse>> {
    let Json(body) = body?;
    Ok(Json(service.delete(&body).await?))
}

/// GET|POST /listNotes, GET /notes
pub async fn list_notes(State(service): State<NoteService>) -> ApiResult<Json<Vec<NoteView>>> {
    Ok(Json(service.list().await?))
}

/// GET /notes/{addr}
pub async fn get_note_by_path(
    State(service): State<NoteService>,
    Path(addr): Path<String>,
) -> ApiResult<Json<NoteView>> {
    let body = with_path_addr(Fields::new(), addr);
    Ok(Json(service.read(&body).await?))
}

/// PUT /notes/{addr}
pub async fn put_note_by_path(
    State(service): State<NoteService>,
    Path(addr): Path<String>,
    body: JsonBody,
) -> ApiResult<Json<ActionResponse>> {
    let Json(body) = body?;
    let body = with_path_addr(body, addr);
    Ok(Json(service.create_or_update(&body).await?))
}

/// DELETE /notes/{addr}
pub async fn delete_note_by_path(
    State(service): State<NoteService>,
    Path(addr): Path<String>,
) -> ApiResult<Json<ActionResponse>> {
    let body = with_path_addr(Fields::new(), addr);
    Ok(Json(service.delete(&body).await?))
}

/// The path segment wins over any `addr` in the body.
fn with_path_addr(mut body: Fields, addr: String) -> Fields {
    body.insert(fields::ADDR.to_string(), Value::String(addr));
    body
}
