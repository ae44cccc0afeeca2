use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use crate::application::ports::{DecodedAudio, TranscriptionEngine, TranscriptionError};

// The service ingests in real time: fixed-size frames at a fixed pace.
const FRAME_SIZE: usize = 1280;
const FRAME_INTERVAL: Duration = Duration::from_millis(40);

const STATUS_FIRST: i64 = 0;
const STATUS_CONTINUE: i64 = 1;
const STATUS_LAST: i64 = 2;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IflytekSettings {
    pub app_id: String,
    pub api_key: String,
    pub api_secret: String,
    pub host: String,
    pub path: String,
    pub language: String,
    pub domain: String,
    pub accent: String,
}

impl Default for IflytekSettings {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            host: "iat-api.xfyun.cn".to_string(),
            path: "/v2/iat".to_string(),
            language: "zh_cn".to_string(),
            domain: "iat".to_string(),
            accent: "mandarin".to_string(),
        }
    }
}

/// Streaming recognition over the iFlytek IAT websocket protocol.
pub struct IflytekEngine {
    settings: IflytekSettings,
}

impl IflytekEngine {
    pub fn new(settings: IflytekSettings) -> Result<Self, TranscriptionError> {
        if settings.app_id.is_empty()
            || settings.api_key.is_empty()
            || settings.api_secret.is_empty()
        {
            return Err(TranscriptionError::MissingCredentials(
                "iflytek app_id, api_key and api_secret are required".to_string(),
            ));
        }
        Ok(Self { settings })
    }

    /// wss URL carrying the HMAC-SHA256 credential for the given RFC-1123
    /// date. The signature covers host, date and the request line.
    pub fn signed_ws_url(&self, date: &str) -> Result<String, TranscriptionError> {
        let canonical = format!(
            "host: {}\ndate: {}\nGET {} HTTP/1.1",
            self.settings.host, date, self.settings.path
        );
        let mut mac = Hmac::<Sha256>::new_from_slice(self.settings.api_secret.as_bytes())
            .map_err(|e| TranscriptionError::ServiceError(format!("hmac key: {}", e)))?;
        mac.update(canonical.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        let authorization_origin = format!(
            "api_key=\"{}\", algorithm=\"hmac-sha256\", headers=\"host date request-line\", signature=\"{}\"",
            self.settings.api_key, signature
        );
        let authorization = BASE64.encode(authorization_origin.as_bytes());

        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("authorization", &authorization)
            .append_pair("date", date)
            .append_pair("host", &self.settings.host)
            .finish();

        Ok(format!(
            "wss://{}{}?{}",
            self.settings.host, self.settings.path, query
        ))
    }

    /// Audio frames in send order. The first frame carries the session setup
    /// sections, middle frames carry data only, and the trailing frame is the
    /// empty end-of-audio marker.
    pub fn frame_payloads(&self, audio: &DecodedAudio) -> Vec<AudioFrame> {
        let pcm = audio.pcm_bytes();
        let format = format!("audio/L16;rate={}", audio.sample_rate);
        let mut frames = Vec::with_capacity(pcm.len() / FRAME_SIZE + 2);

        for (index, chunk) in pcm.chunks(FRAME_SIZE).enumerate() {
            let first = index == 0;
            frames.push(AudioFrame {
                common: first.then(|| CommonSection {
                    app_id: self.settings.app_id.clone(),
                }),
                business: first.then(|| BusinessSection {
                    language: self.settings.language.clone(),
                    domain: self.settings.domain.clone(),
                    accent: self.settings.accent.clone(),
                    ptt: 1,
                }),
                data: FrameData {
                    status: if first { STATUS_FIRST } else { STATUS_CONTINUE },
                    format: format.clone(),
                    encoding: "raw".to_string(),
                    audio: BASE64.encode(chunk),
                },
            });
        }

        frames.push(AudioFrame {
            common: None,
            business: None,
            data: FrameData {
                status: STATUS_LAST,
                format,
                encoding: "raw".to_string(),
                audio: String::new(),
            },
        });
        frames
    }
}

#[async_trait]
impl TranscriptionEngine for IflytekEngine {
    async fn transcribe(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let url = self.signed_ws_url(&date)?;

        tracing::debug!(host = %self.settings.host, "Opening recognition stream");

        let (stream, _) = connect_async(url.as_str())
            .await
            .map_err(|e| TranscriptionError::ServiceError(format!("connect: {}", e)))?;
        let (mut sink, mut source) = stream.split();

        for frame in self.frame_payloads(audio) {
            let payload = serde_json::to_string(&frame)
                .map_err(|e| TranscriptionError::ServiceError(format!("encode frame: {}", e)))?;
            sink.send(Message::text(payload))
                .await
                .map_err(|e| TranscriptionError::ServiceError(format!("send frame: {}", e)))?;
            tokio::time::sleep(FRAME_INTERVAL).await;
        }

        let mut transcript = String::new();
        while let Some(message) = source.next().await {
            let message = message
                .map_err(|e| TranscriptionError::ServiceError(format!("receive: {}", e)))?;
            let text = match message {
                Message::Text(text) => text,
                Message::Close(_) => break,
                _ => continue,
            };

            let parsed: RecognitionMessage = serde_json::from_str(text.as_str())
                .map_err(|e| TranscriptionError::ServiceError(format!("parse message: {}", e)))?;
            if parsed.code != 0 {
                return Err(TranscriptionError::ServiceError(format!(
                    "{} ({})",
                    parsed.message, parsed.code
                )));
            }

            if let Some(result) = parsed.data.as_ref().and_then(|data| data.result.as_ref()) {
                transcript.push_str(&result.text());
            }
            if parsed.is_last() {
                break;
            }
        }

        let transcript = transcript.trim().to_string();
        if transcript.is_empty() {
            return Err(TranscriptionError::NoTranscript);
        }

        tracing::info!(
            chars = transcript.chars().count(),
            "Streaming recognition completed"
        );
        Ok(transcript)
    }
}

#[derive(Debug, Serialize)]
pub struct AudioFrame {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common: Option<CommonSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business: Option<BusinessSection>,
    pub data: FrameData,
}

#[derive(Debug, Serialize)]
pub struct CommonSection {
    pub app_id: String,
}

#[derive(Debug, Serialize)]
pub struct BusinessSection {
    pub language: String,
    pub domain: String,
    pub accent: String,
    pub ptt: u8,
}

#[derive(Debug, Serialize)]
pub struct FrameData {
    pub status: i64,
    pub format: String,
    pub encoding: String,
    pub audio: String,
}

#[derive(Debug, Deserialize)]
pub struct RecognitionMessage {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<RecognitionData>,
}

impl RecognitionMessage {
    /// The service signals completion through either the per-result last
    /// flag or the top-level terminal status; both end the stream and
    /// neither takes precedence over the other.
    pub fn is_last(&self) -> bool {
        let Some(data) = &self.data else {
            return false;
        };
        data.result.as_ref().is_some_and(|result| result.ls) || data.status == Some(STATUS_LAST)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognitionData {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub result: Option<RecognitionResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecognitionResult {
    #[serde(default)]
    pub ls: bool,
    #[serde(default)]
    pub ws: Vec<WordSegment>,
}

impl RecognitionResult {
    pub fn text(&self) -> String {
        self.ws
            .iter()
            .flat_map(|segment| segment.cw.iter())
            .map(|candidate| candidate.w.as_str())
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct WordSegment {
    #[serde(default)]
    pub cw: Vec<CandidateWord>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CandidateWord {
    #[serde(default)]
    pub w: String,
}
