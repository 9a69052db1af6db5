use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use super::handlers::{list_recommendations, mark_viewed, refresh_recommendations};
use crate::middleware::auth::{ApiKeys, require_auth};
use crate::state::AppState;

pub fn routes(api_keys: ApiKeys) -> Router<AppState> {
    let protected = Router::new()
        .route(
            "/users/:user_id/recommendations/refresh",
            post(refresh_recommendations),
        )
        .route(
            "/users/:user_id/recommendations/:recommendation_id/viewed",
            patch(mark_viewed),
        )
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/users/:user_id/recommendations", get(list_recommendations))
        .merge(protected)
}
