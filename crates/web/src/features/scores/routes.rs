use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use super::handlers::{get_dashboard, get_score, recalculate_score, set_match_quality};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/users/:user_id/score/recalculate", post(recalculate_score))
        .route("/users/:user_id/score/match-quality", put(set_match_quality))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/users/:user_id/score", get(get_score))
        .route("/users/:user_id/dashboard", get(get_dashboard))
        .merge(protected)
}
