use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::{BillableCallCount, DailyPrediction, WeeklyPrediction},
    report,
};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    #[validate(range(min = 1, message = "billable calls must be at least 1"))]
    pub calls: i64,
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub request_id: Uuid,
    pub calls: BillableCallCount,
    pub workdays_per_week: f64,
    pub daily: DailyPrediction,
    pub weekly: WeeklyPrediction,
}

/// POST /predict
pub async fn predict(
    State(st): State<AppState>,
    Json(req): Json<PredictRequest>,
) -> Result<ApiResponse<PredictionResponse>, ApiError> {
    let start = Instant::now();
    req.validate()?;
    let calls = BillableCallCount::new(req.calls)?;

    let service = st.prediction_service().await?;
    let (daily, weekly) = service.handle_predict(req.calls)?;

    let response = PredictionResponse {
        request_id: Uuid::new_v4(),
        calls,
        workdays_per_week: service.projector().workdays_per_week(),
        daily,
        weekly,
    };
    Ok(ApiResponse::success(response).with_duration(start.elapsed().as_millis() as u64))
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub calls: Option<i64>,
}

/// GET /predict/report - plain-text figures and bar charts
pub async fn report(
    State(st): State<AppState>,
    Query(q): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let calls = BillableCallCount::new(q.calls.unwrap_or(st.cfg.prediction.default_calls))?;

    let service = st.prediction_service().await?;
    let (daily, weekly) = service.handle_predict(calls.get() as i64)?;
    let text = report::render(
        calls.get(),
        &daily,
        &weekly,
        service.projector().workdays_per_week(),
    );

    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], text))
}
