use std::env;
use std::sync::Arc;

use axum::middleware as axum_mw;
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use mindwell_llm::bedrock::BedrockModel;
use mindwell_llm::orchestrator::ChatOrchestrator;
use mindwell_storage::assessments::AssessmentRepository;
use mindwell_storage::conversations::ConversationRepository;
use mindwell_storage::diaries::MoodDiaryRepository;
use mindwell_storage::pool::Database;
use mindwell_storage::users::UserRepository;

mod error;
mod middleware;
mod routes;
mod state;

use state::AppState;

const DEFAULT_MODEL_ID: &str = "us.anthropic.claude-3-5-haiku-20241022-v1:0";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Structured JSON logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let database_path =
        env::var("MINDWELL_DATABASE_URL").unwrap_or_else(|_| "mindwell.db".to_string());
    let jwt_secret = env::var("MINDWELL_JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("MINDWELL_JWT_SECRET not set, using development secret");
        "mindwell-dev-secret".to_string()
    });
    let model_id =
        env::var("MINDWELL_MODEL_ID").unwrap_or_else(|_| DEFAULT_MODEL_ID.to_string());
    let bind_addr =
        env::var("MINDWELL_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let db = Database::connect(&database_path).await?;

    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .load()
        .await;
    let model = BedrockModel::new(&aws_config, model_id);
    let orchestrator = ChatOrchestrator::new(Arc::new(model));

    let state = AppState {
        users: UserRepository::new(db.clone()),
        conversations: ConversationRepository::new(db.clone()),
        diaries: MoodDiaryRepository::new(db.clone()),
        assessments: AssessmentRepository::new(db),
        orchestrator,
        jwt_secret: Arc::new(jwt_secret),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/auth/anonymous", post(routes::auth::anonymous));

    let protected = Router::new()
        .route("/api/users/me", get(routes::users::me))
        .route("/api/users/me", patch(routes::users::update_me))
        .route("/api/users/me", delete(routes::users::delete_me))
        .route("/api/users/stats", get(routes::users::stats))
        .route("/api/chat", post(routes::chat::send_message))
        .route("/api/chat/history", get(routes::chat::history))
        .route("/api/chat/clear", delete(routes::chat::clear))
        .route(
            "/api/assessments/{type}",
            get(routes::assessments::questionnaire),
        )
        .route(
            "/api/assessments/{type}/submit",
            post(routes::assessments::submit),
        )
        .route(
            "/api/assessments/{type}/history",
            get(routes::assessments::history),
        )
        .route(
            "/api/assessments/{type}/{id}",
            get(routes::assessments::get_one),
        )
        .route("/api/diary", post(routes::diary::create))
        .route("/api/diary", get(routes::diary::list))
        .route("/api/diary/stats", get(routes::diary::stats))
        .route("/api/diary/{id}", get(routes::diary::get_one))
        .route("/api/diary/{id}", put(routes::diary::update))
        .route("/api/diary/{id}", delete(routes::diary::delete))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ));

    let app = public
        .merge(protected)
        .layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
        .with_state(state);

    tracing::info!(addr = %bind_addr, "mindwell backend listening");
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
