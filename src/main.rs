use std::net::SocketAddr;
use std::sync::Arc;

use config::Environment as EnvironmentSource;
use config::{Config, File};
use tokio::net::TcpListener;

use lijiang::application::services::VoicePlanningService;
use lijiang::infrastructure::audio::WavPcmDecoder;
use lijiang::infrastructure::llm::OpenAiClient;
use lijiang::infrastructure::observability::{TracingConfig, init_tracing};
use lijiang::infrastructure::planner::HttpTripPlanner;
use lijiang::infrastructure::speech::TranscriptionEngineFactory;
use lijiang::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let configuration = Config::builder()
        .add_source(
            File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
        )
        .add_source(EnvironmentSource::with_prefix("APP").separator("__"))
        .build()?;
    let settings: Settings = configuration.try_deserialize()?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            level: settings.logging.level.clone(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let audio_decoder = Arc::new(WavPcmDecoder::new(settings.speech.expected_sample_rate));
    let transcription_engine = TranscriptionEngineFactory::create(
        settings.speech.provider,
        settings.speech.iflytek.clone(),
        settings.speech.bailian.clone(),
    )?;
    let llm_client = Arc::new(OpenAiClient::new(
        settings.llm.api_key.clone(),
        settings.llm.base_url.clone(),
        settings.llm.chat_model.clone(),
    ));
    let trip_planner = Arc::new(HttpTripPlanner::new(settings.planner.base_url.clone()));

    let voice_service = Arc::new(VoicePlanningService::new(
        audio_decoder,
        transcription_engine,
        llm_client,
        trip_planner,
    ));

    let state = AppState {
        voice_service,
        settings: settings.clone(),
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
