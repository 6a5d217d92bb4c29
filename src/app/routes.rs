use crate::core::processor::ReceiptProcessor;
use crate::domain::ports::{IdGenerator, ReceiptStore};
use crate::utils::error::{ErrorCategory, ReceiptError};
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for ReceiptError {
    fn into_response(self) -> Response {
        let status = match self.category() {
            ErrorCategory::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Configuration | ErrorCategory::System => {
                tracing::error!("Unhandled error: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse {
            detail: self.user_friendly_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// 建立路由；處理器以 `Arc` 共享給所有請求
pub fn router<S, G>(processor: Arc<ReceiptProcessor<S, G>>) -> Router
where
    S: ReceiptStore + 'static,
    G: IdGenerator + 'static,
{
    Router::new()
        .route("/receipts/process", post(process_receipt::<S, G>))
        .route("/receipts/{id}/points", get(get_points::<S, G>))
        .with_state(processor)
}

// 直接收原始 body：JSON 格式錯誤也要回 400 而不是 axum 預設的 415/422
async fn process_receipt<S, G>(
    State(processor): State<Arc<ReceiptProcessor<S, G>>>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ReceiptError>
where
    S: ReceiptStore + 'static,
    G: IdGenerator + 'static,
{
    let processed = processor.process_json(&body)?;
    Ok(Json(ProcessResponse { id: processed.id }))
}

async fn get_points<S, G>(
    State(processor): State<Arc<ReceiptProcessor<S, G>>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ReceiptError>
where
    S: ReceiptStore + 'static,
    G: IdGenerator + 'static,
{
    let points = processor.points(&id)?;
    Ok(Json(PointsResponse { points }))
}
