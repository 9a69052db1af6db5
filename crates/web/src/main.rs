use anyhow::Context;
use axum::Router;
use std::time::Duration;
use storage::Database;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod error;
mod features;
mod middleware;
mod state;

use config::Config;
use features::{leaderboard, opportunities, recommendations, scores};
use middleware::auth::ApiKeys;
use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        scores::handlers::recalculate_score,
        scores::handlers::get_score,
        scores::handlers::set_match_quality,
        scores::handlers::get_dashboard,
        recommendations::handlers::refresh_recommendations,
        recommendations::handlers::list_recommendations,
        recommendations::handlers::mark_viewed,
        leaderboard::handlers::get_leaderboard,
        leaderboard::handlers::rebuild_leaderboard,
        opportunities::handlers::classify,
    ),
    components(
        schemas(
            storage::dto::score::RecalculateResponse,
            storage::dto::score::MatchQualityRequest,
            storage::dto::recommendation::RecommendationResponse,
            storage::dto::recommendation::RefreshRecommendationsResponse,
            storage::dto::recommendation::RecommendationSummary,
            storage::dto::leaderboard::LeaderboardEntryResponse,
            storage::dto::opportunity::ClassifyRequest,
            storage::dto::opportunity::ClassifyResponse,
            storage::services::DashboardStats,
            storage::services::ScoreBreakdown,
            storage::services::RebuildSummary,
            storage::models::CompositeScore,
            storage::models::Recommendation,
            storage::models::Domain,
            storage::models::LeaderboardPeriod,
        )
    ),
    tags(
        (name = "scores", description = "Composite score endpoints"),
        (name = "recommendations", description = "Opportunity recommendation endpoints"),
        (name = "leaderboard", description = "Leaderboard endpoints"),
        (name = "opportunities", description = "Opportunity classification"),
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("API Key")
                        .build(),
                ),
            )
        }
    }
}

fn app(state: AppState, api_keys: ApiKeys) -> Router {
    let api = scores::routes::routes(api_keys.clone())
        .merge(recommendations::routes::routes(api_keys.clone()))
        .merge(leaderboard::routes::routes(api_keys))
        .merge(opportunities::routes::routes());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting opportunity scoring API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Connecting to database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let api_keys = ApiKeys::from_comma_separated(&config.api_keys);
    if api_keys.is_empty() {
        tracing::warn!("No API keys configured, mutating endpoints will reject every request");
    } else {
        tracing::info!("{} API key(s) configured", api_keys.len());
    }

    let state = AppState::new(db, &config);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, app(state, api_keys))
        .await
        .context("Server error")?;

    Ok(())
}
