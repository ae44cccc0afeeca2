use async_trait::async_trait;

use super::DecodedAudio;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &DecodedAudio) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("missing credentials: {0}")]
    MissingCredentials(String),
    #[error("recognition service error: {0}")]
    ServiceError(String),
    #[error("no transcript produced")]
    NoTranscript,
}
