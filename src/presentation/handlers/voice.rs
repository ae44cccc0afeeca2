use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{LlmClient, TranscriptionError, TripPlanner};
use crate::application::services::VoicePlanningError;
use crate::domain::{TripPlan, VoiceFormSuggestion};
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct VoiceTranscriptionResponse {
    pub success: bool,
    pub message: String,
    pub transcript: String,
    pub form: VoiceFormSuggestion,
    pub missing_fields: Vec<String>,
}

#[derive(Serialize)]
pub struct VoicePlanResponse {
    pub success: bool,
    pub message: String,
    pub transcript: String,
    pub form: VoiceFormSuggestion,
    pub missing_fields: Vec<String>,
    pub data: TripPlan,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Transcribe an uploaded voice sample and suggest trip form fields. The
/// lenient completeness check lets the client prompt for what is missing.
#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_voice_handler<L, P>(
    State(state): State<AppState<L, P>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
    P: TripPlanner + 'static,
{
    let audio_bytes = match read_audio_field(multipart).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    tracing::debug!(bytes = audio_bytes.len(), "Voice upload received");

    let transcript = match state.voice_service.transcribe_audio(&audio_bytes).await {
        Ok(transcript) => transcript,
        Err(e) => return error_response(e),
    };
    let form = match state.voice_service.parse_form_suggestion(&transcript).await {
        Ok(form) => form,
        Err(e) => return error_response(e),
    };
    let missing_fields = state.voice_service.missing_fields(&form, false);

    (
        StatusCode::OK,
        Json(VoiceTranscriptionResponse {
            success: true,
            message: "语音解析成功".to_string(),
            transcript,
            form,
            missing_fields,
        }),
    )
        .into_response()
}

/// Run the full pipeline: transcribe, extract, assemble, and plan in one
/// request.
#[tracing::instrument(skip(state, multipart))]
pub async fn plan_by_voice_handler<L, P>(
    State(state): State<AppState<L, P>>,
    multipart: Multipart,
) -> impl IntoResponse
where
    L: LlmClient + 'static,
    P: TripPlanner + 'static,
{
    let audio_bytes = match read_audio_field(multipart).await {
        Ok(bytes) => bytes,
        Err(response) => return response,
    };

    tracing::debug!(bytes = audio_bytes.len(), "Voice upload received");

    match state.voice_service.plan_trip_from_voice(&audio_bytes).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(VoicePlanResponse {
                success: true,
                message: "语音规划成功".to_string(),
                transcript: outcome.transcript,
                form: outcome.suggestion,
                missing_fields: Vec::new(),
                data: outcome.plan,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

async fn read_audio_field(mut multipart: Multipart) -> Result<Vec<u8>, Response> {
    let field = match multipart.next_field().await {
        Ok(Some(field)) => field,
        Ok(None) => {
            tracing::warn!("Voice request with no audio file");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "No audio file uploaded".to_string(),
                }),
            )
                .into_response());
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read multipart");
            return Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read multipart: {}", e),
                }),
            )
                .into_response());
        }
    };

    match field.bytes().await {
        Ok(data) => Ok(data.to_vec()),
        Err(e) => {
            tracing::error!(error = %e, "Failed to read audio bytes");
            Err((
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read audio: {}", e),
                }),
            )
                .into_response())
        }
    }
}

fn error_response(error: VoicePlanningError) -> Response {
    tracing::error!(error = %error, "Voice request failed");
    let status = match &error {
        VoicePlanningError::Audio(_) | VoicePlanningError::Incomplete(_) => {
            StatusCode::BAD_REQUEST
        }
        VoicePlanningError::Transcription(TranscriptionError::MissingCredentials(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        VoicePlanningError::Transcription(TranscriptionError::NoTranscript) => {
            StatusCode::BAD_REQUEST
        }
        VoicePlanningError::Transcription(_)
        | VoicePlanningError::Extraction(_)
        | VoicePlanningError::Planning(_) => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(ErrorResponse {
            error: error.to_string(),
        }),
    )
        .into_response()
}
