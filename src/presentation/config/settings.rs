use serde::Deserialize;

use crate::infrastructure::speech::{BailianSettings, IflytekSettings, TranscriptionProvider};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub speech: SpeechSettings,
    pub llm: LlmSettings,
    pub planner: PlannerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeechSettings {
    pub provider: TranscriptionProvider,
    #[serde(default = "default_sample_rate")]
    pub expected_sample_rate: u32,
    #[serde(default)]
    pub iflytek: IflytekSettings,
    #[serde(default)]
    pub bailian: BailianSettings,
}

fn default_sample_rate() -> u32 {
    16_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    pub api_key: String,
    #[serde(default)]
    pub base_url: Option<String>,
    pub chat_model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlannerSettings {
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}
