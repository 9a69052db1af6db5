use axum::{Router, routing::post};

use super::handlers::classify;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/opportunities/classify", post(classify))
}
