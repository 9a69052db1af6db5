use axum::{Json, extract::State};
use storage::dto::opportunity::{ClassifyRequest, ClassifyResponse};
use validator::Validate;

use crate::{error::WebResult, state::AppState};

use super::services;

#[utoipa::path(
    post,
    path = "/api/opportunities/classify",
    request_body = ClassifyRequest,
    responses(
        (status = 200, description = "Domain assigned by the keyword classifier", body = ClassifyResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "opportunities"
)]
pub async fn classify(
    State(state): State<AppState>,
    Json(req): Json<ClassifyRequest>,
) -> WebResult<Json<ClassifyResponse>> {
    req.validate()?;

    Ok(Json(services::classify(&state, &req.text)))
}
