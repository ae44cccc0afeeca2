use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::application::ports::{DecodedAudio, TranscriptionEngine, TranscriptionError};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BailianSettings {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub workspace_id: String,
    pub sample_format: SampleFormat,
}

impl Default for BailianSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            model: String::new(),
            workspace_id: String::new(),
            sample_format: SampleFormat::Pcm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleFormat {
    Pcm,
    Wav,
    Mp3,
}

impl SampleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleFormat::Pcm => "pcm",
            SampleFormat::Wav => "wav",
            SampleFormat::Mp3 => "mp3",
        }
    }
}

/// Batched recognition through a multimodal chat-completions endpoint: the
/// whole payload goes out as one base64 data URI and the transcript comes
/// back in the message content.
pub struct BailianEngine {
    client: reqwest::Client,
    settings: BailianSettings,
}

impl BailianEngine {
    pub fn new(settings: BailianSettings) -> Result<Self, TranscriptionError> {
        if settings.api_key.is_empty() || settings.base_url.is_empty() || settings.model.is_empty()
        {
            return Err(TranscriptionError::MissingCredentials(
                "bailian api_key, base_url and model are required".to_string(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            settings,
        })
    }

    pub fn build_request_body(&self, audio: &DecodedAudio) -> TranscriptionRequest {
        let payload = match self.settings.sample_format {
            SampleFormat::Pcm => audio.pcm_bytes(),
            SampleFormat::Wav | SampleFormat::Mp3 => audio.container.clone(),
        };

        TranscriptionRequest {
            model: self.settings.model.clone(),
            messages: vec![RequestMessage {
                role: "user".to_string(),
                content: vec![ContentItem::InputAudio {
                    input_audio: InputAudio {
                        data: format!("data:;base64,{}", BASE64.encode(&payload)),
                        format: self.settings.sample_format.as_str().to_string(),
                    },
                }],
            }],
        }
    }
}

#[async_trait]
impl TranscriptionEngine for BailianEngine {
    async fn transcribe(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        let url = format!(
            "{}/chat/completions",
            self.settings.base_url.trim_end_matches('/')
        );
        let body = self.build_request_body(audio);

        tracing::debug!(model = %self.settings.model, "Sending audio for batched recognition");

        let mut request = self
            .client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&body);
        if !self.settings.workspace_id.is_empty() {
            request = request.header("X-DashScope-WorkSpace", &self.settings.workspace_id);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ServiceError(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("parse response: {}", e)))?;

        let transcript = transcript_from_response(&parsed);
        if transcript.is_empty() {
            return Err(TranscriptionError::NoTranscript);
        }

        tracing::info!(
            chars = transcript.chars().count(),
            "Batched recognition completed"
        );
        Ok(transcript)
    }
}

/// Transcript text out of a chat-completions body: either a plain string
/// content or an array of content items bearing a `text` field.
pub fn transcript_from_response(response: &TranscriptionResponse) -> String {
    let Some(choice) = response.choices.first() else {
        return String::new();
    };
    match &choice.message.content {
        ResponseContent::Text(text) => text.trim().to_string(),
        ResponseContent::Items(items) => items
            .iter()
            .filter_map(|item| item.text.as_deref())
            .collect::<String>()
            .trim()
            .to_string(),
    }
}

#[derive(Debug, Serialize)]
pub struct TranscriptionRequest {
    pub model: String,
    pub messages: Vec<RequestMessage>,
}

#[derive(Debug, Serialize)]
pub struct RequestMessage {
    pub role: String,
    pub content: Vec<ContentItem>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentItem {
    InputAudio { input_audio: InputAudio },
}

#[derive(Debug, Serialize)]
pub struct InputAudio {
    pub data: String,
    pub format: String,
}

#[derive(Debug, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub choices: Vec<ResponseChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseChoice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    #[serde(default)]
    pub content: ResponseContent,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    Text(String),
    Items(Vec<ResponseContentItem>),
}

impl Default for ResponseContent {
    fn default() -> Self {
        ResponseContent::Text(String::new())
    }
}

#[derive(Debug, Deserialize)]
pub struct ResponseContentItem {
    #[serde(default)]
    pub text: Option<String>,
}
