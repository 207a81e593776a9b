//! Record HTTP Routes
//!
//! `/records` list and create, `/records/:id` update. Store calls block on
//! the spreadsheet, so they run on tokio's blocking pool.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::records::{
    ErrorResponse, NewRecord, Record, RecordError, RecordResult, RecordStore, UpdateOutcome,
};
use crate::sheets::SheetBackend;

/// Store shared across handlers
pub type SharedStore<B> = Arc<RecordStore<B>>;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecordRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub assigned_to: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl CreateRecordRequest {
    /// Require name, phone, assignedTo and category to be present and non-empty
    ///
    /// Status is checked by the store against the allowed set.
    pub fn into_new_record(self) -> RecordResult<NewRecord> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("phone", &self.phone),
            ("assignedTo", &self.assigned_to),
            ("category", &self.category),
        ]
        .into_iter()
        .filter(|(_, value)| value.as_deref().map_or(true, str::is_empty))
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(RecordError::MissingFields(missing.join(", ")));
        }

        Ok(NewRecord {
            name: self.name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            assigned_to: self.assigned_to.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            notes: self.notes,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateRecordRequest {
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ==================
// Record Routes
// ==================

/// Create record routes, to be nested under `/api`
pub fn record_routes<B: SheetBackend + 'static>(store: SharedStore<B>) -> Router {
    Router::new()
        .route(
            "/records",
            get(list_handler::<B>)
                .post(create_handler::<B>)
                .fallback(fallback_handler),
        )
        .route(
            "/records/:id",
            put(update_handler::<B>).fallback(fallback_handler),
        )
        .with_state(store)
}

// ==================
// Handlers
// ==================

async fn list_handler<B: SheetBackend + 'static>(
    State(store): State<SharedStore<B>>,
) -> RecordResult<Json<Vec<Record>>> {
    let records = run_blocking(move || store.list()).await?;
    Ok(Json(records))
}

async fn create_handler<B: SheetBackend + 'static>(
    State(store): State<SharedStore<B>>,
    body: Bytes,
) -> RecordResult<(StatusCode, Json<CreatedResponse>)> {
    let request: CreateRecordRequest = parse_body(&body)?;
    let new = request.into_new_record()?;

    let id = run_blocking(move || store.create(new)).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Record added".to_string(),
            id,
        }),
    ))
}

async fn update_handler<B: SheetBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
    body: Bytes,
) -> RecordResult<Json<MessageResponse>> {
    let request: UpdateRecordRequest = parse_body(&body)?;
    let status = request
        .status
        .filter(|s| !s.is_empty())
        .ok_or_else(|| RecordError::MissingFields("status".to_string()))?;
    let notes = request.notes;

    let target = id.clone();
    let outcome =
        run_blocking(move || store.update(&target, &status, notes.as_deref())).await?;

    match outcome {
        UpdateOutcome::Updated(_) => Ok(Json(MessageResponse {
            message: "Record updated".to_string(),
        })),
        UpdateOutcome::NotFound => Err(RecordError::NotFound(id)),
    }
}

/// Unmatched paths and methods
///
/// OPTIONS never reaches this handler: the CORS layer in front of the router
/// answers every OPTIONS request itself.
pub async fn fallback_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not Found".to_string(),
            code: StatusCode::NOT_FOUND.as_u16(),
        }),
    )
        .into_response()
}

// ==================
// Helper Functions
// ==================

fn parse_body<T: DeserializeOwned>(body: &[u8]) -> RecordResult<T> {
    serde_json::from_slice(body).map_err(|e| RecordError::InvalidBody(e.to_string()))
}

async fn run_blocking<T, F>(work: F) -> RecordResult<T>
where
    F: FnOnce() -> RecordResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| RecordError::Internal(format!("blocking task failed: {}", e)))?
}
