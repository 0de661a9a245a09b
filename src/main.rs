//! Thread Translator server entry point.
//!
//! Loads configuration, wires adapters into the translate handler and serves
//! the axum router until Ctrl-C.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use thread_translator::adapters::ai::{OpenAIConfig, OpenAIProvider};
use thread_translator::adapters::evals::TracingEvalReporter;
use thread_translator::adapters::http::{app_router, TranslateAppState, THREAD_ID_HEADER};
use thread_translator::adapters::scoring::LlmPolitenessScorer;
use thread_translator::adapters::state::{InMemoryThreadStateStore, RedisThreadStateStore};
use thread_translator::application::evals::{CorrectLanguageEval, EvalHarness, ThresholdEval};
use thread_translator::application::handlers::translate::{
    HistoryManager, TranslateHandler, TranslationEngine,
};
use thread_translator::config::{AppConfig, ValidationError};
use thread_translator::domain::evaluation::Score;
use thread_translator::ports::{AIProvider, ThreadStateStore};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        "Starting thread translator"
    );

    let store = build_state_store(&config).await?;
    let provider: Arc<dyn AIProvider> = Arc::new(build_provider(&config)?);

    let history =
        HistoryManager::new(store).with_max_append_attempts(config.translation.max_append_attempts);
    let mut handler = TranslateHandler::new(TranslationEngine::new(provider.clone()), history);
    if config.evals.enabled {
        handler = handler.with_evals(Arc::new(build_evals(&config, provider)?));
    }

    let state = TranslateAppState::new(Arc::new(handler)).with_defaults(
        config.translation.default_language,
        config.translation.default_model,
    );

    let app = app_router(state)
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Thread translator listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Thread translator stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer().pretty()).init();
    }
}

async fn build_state_store(config: &AppConfig) -> Result<Arc<dyn ThreadStateStore>, BoxError> {
    let Some(url) = config.redis.url() else {
        tracing::warn!("No Redis URL configured; thread state is in-memory and per-process");
        return Ok(Arc::new(InMemoryThreadStateStore::new()));
    };

    let store = tokio::time::timeout(
        config.redis.timeout(),
        RedisThreadStateStore::connect(url, config.redis.state_ttl_secs),
    )
    .await
    .map_err(|_| format!("Timed out connecting to Redis after {:?}", config.redis.timeout()))??;

    tracing::info!("Connected to Redis thread state store");
    Ok(Arc::new(store))
}

fn build_provider(config: &AppConfig) -> Result<OpenAIProvider, BoxError> {
    let api_key = config
        .ai
        .openai_api_key
        .clone()
        .ok_or(ValidationError::MissingRequired("OPENAI_API_KEY"))?;

    let provider_config = OpenAIConfig::new(api_key)
        .with_model(config.translation.default_model.as_str())
        .with_base_url(&config.ai.base_url)
        .with_timeout(config.ai.timeout());

    Ok(OpenAIProvider::new(provider_config)?)
}

fn build_evals(config: &AppConfig, provider: Arc<dyn AIProvider>) -> Result<EvalHarness, BoxError> {
    let judge_model = &config.evals.judge_model;
    let threshold = Score::try_new(config.evals.politeness_threshold)?;
    let scorer = Arc::new(LlmPolitenessScorer::new(provider.clone(), judge_model));

    let harness = EvalHarness::new(Arc::new(TracingEvalReporter::new()))
        .with_eval(Arc::new(ThresholdEval::politeness(scorer, threshold)))
        .with_eval(Arc::new(CorrectLanguageEval::new(provider, judge_model)));

    tracing::info!(evals = ?harness.eval_names(), %judge_model, "Evals enabled");
    Ok(harness)
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    let layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([THREAD_ID_HEADER]);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
