use std::sync::Arc;

use async_trait::async_trait;

use lijiang::application::ports::{
    AudioDecoder, AudioDecoderError, ChatMessage, DecodedAudio, LlmClient, LlmClientError,
    TranscriptionEngine, TranscriptionError,
};
use lijiang::application::services::{VoicePlanningError, VoicePlanningService};
use lijiang::infrastructure::llm::MockLlmClient;
use lijiang::infrastructure::planner::MockTripPlanner;

const EXTRACTION_JSON: &str = r#"{
    "city": "北京",
    "start_date": "2024-05-01",
    "end_date": null,
    "travel_days": 3,
    "transportation": null,
    "accommodation": null,
    "preferences": ["美食"],
    "free_text_input": null
}"#;

struct StubAudioDecoder;

impl AudioDecoder for StubAudioDecoder {
    fn decode(&self, data: &[u8]) -> Result<DecodedAudio, AudioDecoderError> {
        Ok(DecodedAudio {
            samples: vec![0; 1600],
            sample_rate: 16_000,
            container: data.to_vec(),
        })
    }
}

struct RejectingAudioDecoder;

impl AudioDecoder for RejectingAudioDecoder {
    fn decode(&self, _data: &[u8]) -> Result<DecodedAudio, AudioDecoderError> {
        Err(AudioDecoderError::EmptyAudio)
    }
}

struct StubTranscriptionEngine {
    transcript: &'static str,
}

#[async_trait]
impl TranscriptionEngine for StubTranscriptionEngine {
    async fn transcribe(&self, _audio: &DecodedAudio) -> Result<String, TranscriptionError> {
        Ok(self.transcript.to_string())
    }
}

struct FailingLlmClient;

#[async_trait]
impl LlmClient for FailingLlmClient {
    async fn invoke(
        &self,
        _messages: &[ChatMessage],
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmClientError> {
        Err(LlmClientError::ApiRequestFailed("timeout".to_string()))
    }
}

fn service_with_llm(
    response: &str,
) -> VoicePlanningService<MockLlmClient, MockTripPlanner> {
    VoicePlanningService::new(
        Arc::new(StubAudioDecoder),
        Arc::new(StubTranscriptionEngine {
            transcript: "我想五一去北京玩三天",
        }),
        Arc::new(MockLlmClient::new(response)),
        Arc::new(MockTripPlanner),
    )
}

#[tokio::test]
async fn given_voice_request_when_planning_then_request_is_finalized_with_defaults() {
    let service = service_with_llm(EXTRACTION_JSON);

    let outcome = service.plan_trip_from_voice(&[0u8; 64]).await.unwrap();

    assert_eq!(outcome.transcript, "我想五一去北京玩三天");
    assert_eq!(outcome.request.city, "北京");
    assert_eq!(outcome.request.start_date, "2024-05-01");
    assert_eq!(outcome.request.end_date, "2024-05-03");
    assert_eq!(outcome.request.travel_days, 3);
    assert_eq!(outcome.request.transportation, "公共交通");
    assert_eq!(outcome.request.accommodation, "舒适型酒店");
    assert_eq!(outcome.plan.0["city"], "北京");
}

#[tokio::test]
async fn given_unparseable_model_output_when_planning_then_incomplete_form_lists_all_core_fields()
{
    let service = service_with_llm("抱歉，我听不清楚。");

    let error = service.plan_trip_from_voice(&[0u8; 64]).await.unwrap_err();

    match error {
        VoicePlanningError::Incomplete(incomplete) => assert_eq!(
            incomplete.missing,
            ["city", "start_date", "end_date", "travel_days"]
        ),
        other => panic!("expected incomplete form, got {:?}", other),
    }
}

#[tokio::test]
async fn given_rejected_audio_when_planning_then_audio_error_surfaces() {
    let service = VoicePlanningService::new(
        Arc::new(RejectingAudioDecoder),
        Arc::new(StubTranscriptionEngine { transcript: "" }),
        Arc::new(MockLlmClient::new("{}")),
        Arc::new(MockTripPlanner),
    );

    let error = service.plan_trip_from_voice(&[]).await.unwrap_err();

    assert!(matches!(
        error,
        VoicePlanningError::Audio(AudioDecoderError::EmptyAudio)
    ));
}

#[tokio::test]
async fn given_failing_model_when_planning_then_extraction_error_surfaces() {
    let service = VoicePlanningService::new(
        Arc::new(StubAudioDecoder),
        Arc::new(StubTranscriptionEngine {
            transcript: "我想去北京",
        }),
        Arc::new(FailingLlmClient),
        Arc::new(MockTripPlanner),
    );

    let error = service.plan_trip_from_voice(&[0u8; 64]).await.unwrap_err();

    assert!(matches!(error, VoicePlanningError::Extraction(_)));
}

#[tokio::test]
async fn given_partial_form_when_checking_modes_then_only_strict_flags_travel_days() {
    let service = service_with_llm(r#"{"city": "北京"}"#);

    let form = service
        .parse_form_suggestion("我想去北京")
        .await
        .unwrap();

    assert_eq!(
        service.missing_fields(&form, false),
        ["start_date", "end_date"]
    );
    assert_eq!(
        service.missing_fields(&form, true),
        ["start_date", "end_date", "travel_days"]
    );
}
