use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use email_triage::application::services::{AnalysisService, PromptBuilder};
use email_triage::infrastructure::llm::OpenAiClient;
use email_triage::infrastructure::observability::{TracingConfig, init_tracing};
use email_triage::infrastructure::text_processing::ExtractorFactory;
use email_triage::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    init_tracing(&TracingConfig::new(environment, &settings.logging));
    tracing::debug!(?settings, "Settings loaded");

    let file_loader = Arc::new(ExtractorFactory::create(&settings.extraction));
    let llm_client = Arc::new(OpenAiClient::new(&settings.llm));
    let prompt_builder = PromptBuilder::new(
        settings.prompt.reply_language.clone(),
        settings.prompt.signature.clone(),
    );

    let analysis_service = Arc::new(AnalysisService::new(
        file_loader,
        llm_client,
        prompt_builder,
    ));

    let state = AppState {
        analysis_service,
        max_upload_bytes: settings.server.max_upload_bytes,
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}
