use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use service_core::error::AppError;
use validator::Validate;

use crate::dtos::{PredictRequest, PredictResponse};
use crate::services::{record_prediction, PredictorError};
use crate::startup::AppState;

#[tracing::instrument(skip(state, payload))]
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, AppError> {
    let predictor_name = state.predictor.name();

    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!("Rejected prediction body: {}", rejection.body_text());
        record_prediction(predictor_name, "rejected", 0);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(anyhow::anyhow!(rejection.body_text()))
        } else {
            AppError::BadRequest(anyhow::anyhow!(rejection.body_text()))
        }
    })?;

    request.validate().inspect_err(|_| {
        record_prediction(predictor_name, "rejected", request.rows.len());
    })?;

    let row_count = request.rows.len();
    let preds = state.predictor.predict(&request.rows).await.map_err(|e| {
        match e {
            PredictorError::InvalidInput { .. } => {
                tracing::debug!("Rejected prediction input: {}", e);
                record_prediction(predictor_name, "rejected", row_count);
                AppError::Unprocessable(e.into())
            }
            PredictorError::Unavailable(_) => {
                tracing::error!("Prediction failed: {}", e);
                record_prediction(predictor_name, "error", row_count);
                AppError::ServiceUnavailable
            }
            PredictorError::Failed(_) => {
                tracing::error!("Prediction failed: {}", e);
                record_prediction(predictor_name, "error", row_count);
                AppError::InternalError(e.into())
            }
        }
    })?;

    if preds.len() != row_count {
        record_prediction(predictor_name, "error", row_count);
        return Err(AppError::InternalError(anyhow::anyhow!(
            "Predictor returned {} values for {} rows",
            preds.len(),
            row_count
        )));
    }

    record_prediction(predictor_name, "ok", row_count);
    tracing::debug!(predictor = predictor_name, rows = row_count, "Prediction complete");

    Ok(Json(PredictResponse { preds }))
}
