use std::sync::Arc;

use crate::application::ports::{
    AudioDecoder, AudioDecoderError, LlmClient, LlmClientError, TranscriptionEngine,
    TranscriptionError, TripPlanner, TripPlannerError,
};
use crate::application::services::request_assembler::IncompleteForm;
use crate::application::services::{FieldExtractor, form_normalizer, request_assembler};
use crate::domain::{TripPlan, TripRequest, VoiceFormSuggestion};

/// One voice request moves strictly through decode → transcribe → extract →
/// normalize → assemble → plan; no stage is retried and the first failure
/// ends the pipeline for that request.
pub struct VoicePlanningService<L, P>
where
    L: LlmClient,
    P: TripPlanner,
{
    audio_decoder: Arc<dyn AudioDecoder>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    field_extractor: FieldExtractor<L>,
    trip_planner: Arc<P>,
}

impl<L, P> VoicePlanningService<L, P>
where
    L: LlmClient,
    P: TripPlanner,
{
    pub fn new(
        audio_decoder: Arc<dyn AudioDecoder>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        llm_client: Arc<L>,
        trip_planner: Arc<P>,
    ) -> Self {
        Self {
            audio_decoder,
            transcription_engine,
            field_extractor: FieldExtractor::new(llm_client),
            trip_planner,
        }
    }

    pub async fn transcribe_audio(&self, audio_bytes: &[u8]) -> Result<String, VoicePlanningError> {
        let decoded = self.audio_decoder.decode(audio_bytes)?;
        tracing::debug!(
            samples = decoded.samples.len(),
            duration_secs = decoded.duration_secs(),
            "Audio decoded"
        );

        let transcript = self.transcription_engine.transcribe(&decoded).await?;
        tracing::info!(chars = transcript.chars().count(), "Transcription completed");
        Ok(transcript)
    }

    pub async fn parse_form_suggestion(
        &self,
        transcript: &str,
    ) -> Result<VoiceFormSuggestion, VoicePlanningError> {
        let raw = self
            .field_extractor
            .extract(transcript)
            .await
            .map_err(VoicePlanningError::Extraction)?;
        let form = form_normalizer::normalize(&raw);
        tracing::debug!(
            missing = ?form_normalizer::missing_fields(&form, false),
            "Form suggestion normalized"
        );
        Ok(form)
    }

    pub fn missing_fields(
        &self,
        form: &VoiceFormSuggestion,
        require_travel_days: bool,
    ) -> Vec<String> {
        form_normalizer::missing_fields(form, require_travel_days)
    }

    pub async fn plan_trip_from_voice(
        &self,
        audio_bytes: &[u8],
    ) -> Result<VoicePlanOutcome, VoicePlanningError> {
        let transcript = self.transcribe_audio(audio_bytes).await?;
        let suggestion = self.parse_form_suggestion(&transcript).await?;
        let request = request_assembler::assemble(&suggestion)?;

        tracing::info!(city = %request.city, travel_days = request.travel_days, "Trip request assembled");

        let plan = self.trip_planner.plan_trip(&request).await?;
        Ok(VoicePlanOutcome {
            transcript,
            suggestion,
            request,
            plan,
        })
    }
}

#[derive(Debug, Clone)]
pub struct VoicePlanOutcome {
    pub transcript: String,
    pub suggestion: VoiceFormSuggestion,
    pub request: TripRequest,
    pub plan: TripPlan,
}

#[derive(Debug, thiserror::Error)]
pub enum VoicePlanningError {
    #[error("audio: {0}")]
    Audio(#[from] AudioDecoderError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
    #[error("extraction: {0}")]
    Extraction(LlmClientError),
    #[error("{0}")]
    Incomplete(#[from] IncompleteForm),
    #[error("planning: {0}")]
    Planning(#[from] TripPlannerError),
}
