mod config;
mod data;
mod errors;
mod llm_client;
mod ml;
mod models;
mod pathway;
mod recommendation;
mod recruitment;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::data::loader::{load_it_resources, load_nonit_records, load_role_skills};
use crate::llm_client::LlmClient;
use crate::pathway::learning_path::RoleSkills;
use crate::pathway::nonit::NonItModel;
use crate::recommendation::corpus::build_corpus;
use crate::recommendation::suggest::ItModel;
use crate::recruitment::{DisabledRecruitmentSource, GeminiRecruitmentSource, RecruitmentSource};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed numeric env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Pathway API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize recruitment source (independent of the models)
    let recruitment: Arc<dyn RecruitmentSource> = match &config.google_api_key {
        Some(key) => {
            info!("LLM client initialized (model: {})", llm_client::MODEL);
            Arc::new(GeminiRecruitmentSource(LlmClient::new(key.clone())))
        }
        None => {
            warn!("GOOGLE_API_KEY not set; recruitment lookups are disabled");
            Arc::new(DisabledRecruitmentSource)
        }
    };

    // Fit each domain before accepting traffic. A failure disables that domain only.
    let it_model = load_domain("IT", fit_it_model(config.clone())).await;
    let role_skills = load_domain("Learning path", load_learning_paths(config.clone())).await;
    let nonit_model = load_domain("Non-IT", fit_nonit_model(config.clone())).await;

    let state = AppState {
        it_model,
        role_skills,
        nonit_model,
        recruitment,
    };

    // Build router
    let app = build_router(state, &config.frontend_dir)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Runs a CPU-bound loader on the blocking pool and logs the outcome.
async fn load_domain<T, F>(name: &str, loader: F) -> Option<Arc<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(loader).await {
        Ok(Ok(value)) => {
            info!("{name} model loaded successfully");
            Some(Arc::new(value))
        }
        Ok(Err(e)) => {
            error!("Error loading {name} model: {e:#}");
            None
        }
        Err(e) => {
            error!("{name} model loader panicked: {e}");
            None
        }
    }
}

fn fit_it_model(config: Config) -> impl FnOnce() -> Result<ItModel> {
    move || {
        let resources = load_it_resources(&config.data_dir)?;
        let model = ItModel::fit(build_corpus(&resources), &config.kmeans())?;
        info!(
            "IT model: {} documents, {} terms, cluster sizes {:?}, inertia {:.4}",
            model.corpus().len(),
            model.vocabulary_size(),
            model.cluster_sizes(),
            model.inertia()
        );
        Ok(model)
    }
}

fn load_learning_paths(config: Config) -> impl FnOnce() -> Result<RoleSkills> {
    move || {
        let role_skills = RoleSkills::from_records(&load_role_skills(&config.data_dir)?);
        info!("Learning paths: {} roles", role_skills.len());
        Ok(role_skills)
    }
}

fn fit_nonit_model(config: Config) -> impl FnOnce() -> Result<NonItModel> {
    move || {
        let model = NonItModel::fit(load_nonit_records(&config.data_dir)?, &config.kmeans())?;
        info!(
            "Non-IT model: {} rows, cluster sizes {:?}",
            model.len(),
            model.cluster_sizes()
        );
        Ok(model)
    }
}
