use axum::{
    Router, middleware,
    routing::{get, post},
};

use super::handlers::{get_leaderboard, rebuild_leaderboard};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route("/leaderboard/rebuild", post(rebuild_leaderboard))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/leaderboard", get(get_leaderboard))
        .merge(protected)
}
