use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use lijiang::application::ports::{DecodedAudio, TranscriptionError};
use lijiang::infrastructure::speech::{IflytekEngine, IflytekSettings, RecognitionMessage};

const FIXED_DATE: &str = "Wed, 01 May 2024 08:00:00 GMT";

fn engine() -> IflytekEngine {
    IflytekEngine::new(IflytekSettings {
        app_id: "app".to_string(),
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        ..Default::default()
    })
    .unwrap()
}

fn audio(sample_count: usize) -> DecodedAudio {
    DecodedAudio {
        samples: vec![0; sample_count],
        sample_rate: 16_000,
        container: Vec::new(),
    }
}

#[test]
fn given_blank_credentials_when_creating_then_missing_credentials() {
    let result = IflytekEngine::new(IflytekSettings::default());

    assert!(matches!(
        result,
        Err(TranscriptionError::MissingCredentials(_))
    ));
}

#[test]
fn given_fixed_date_when_signing_then_url_carries_the_credential() {
    let url = engine().signed_ws_url(FIXED_DATE).unwrap();

    let parsed = url::Url::parse(&url).unwrap();
    assert_eq!(parsed.scheme(), "wss");
    assert_eq!(parsed.host_str(), Some("iat-api.xfyun.cn"));
    assert_eq!(parsed.path(), "/v2/iat");

    let query: HashMap<String, String> = parsed.query_pairs().into_owned().collect();
    assert_eq!(query.get("host").map(String::as_str), Some("iat-api.xfyun.cn"));
    assert_eq!(query.get("date").map(String::as_str), Some(FIXED_DATE));

    let authorization = BASE64.decode(query.get("authorization").unwrap()).unwrap();
    let authorization = String::from_utf8(authorization).unwrap();
    assert!(authorization.contains("api_key=\"key\""));
    assert!(authorization.contains("algorithm=\"hmac-sha256\""));
    assert!(authorization.contains("headers=\"host date request-line\""));
    assert!(authorization.contains("signature=\""));
}

#[test]
fn given_same_date_when_signing_twice_then_urls_match() {
    let engine = engine();

    assert_eq!(
        engine.signed_ws_url(FIXED_DATE).unwrap(),
        engine.signed_ws_url(FIXED_DATE).unwrap()
    );
}

#[test]
fn given_pcm_payload_when_framing_then_statuses_mark_start_and_end() {
    // 1600 samples = 3200 bytes = two full 1280-byte frames plus a 640-byte
    // remainder, then the empty end marker.
    let frames = engine().frame_payloads(&audio(1600));

    assert_eq!(frames.len(), 4);

    let first = serde_json::to_value(&frames[0]).unwrap();
    assert_eq!(first["data"]["status"], 0);
    assert_eq!(first["data"]["format"], "audio/L16;rate=16000");
    assert_eq!(first["data"]["encoding"], "raw");
    assert_eq!(first["common"]["app_id"], "app");
    assert_eq!(first["business"]["language"], "zh_cn");
    assert_eq!(first["business"]["domain"], "iat");
    assert_eq!(first["business"]["accent"], "mandarin");
    assert_eq!(first["business"]["ptt"], 1);

    let middle = serde_json::to_value(&frames[1]).unwrap();
    assert_eq!(middle["data"]["status"], 1);
    assert!(middle.get("common").is_none());
    assert!(middle.get("business").is_none());

    let last = serde_json::to_value(&frames[3]).unwrap();
    assert_eq!(last["data"]["status"], 2);
    assert_eq!(last["data"]["audio"], "");
}

#[test]
fn given_frames_when_decoding_audio_fields_then_payload_round_trips() {
    let audio = DecodedAudio {
        samples: vec![1, -2, 3],
        sample_rate: 16_000,
        container: Vec::new(),
    };

    let frames = engine().frame_payloads(&audio);
    let first = serde_json::to_value(&frames[0]).unwrap();
    let encoded = first["data"]["audio"].as_str().unwrap();

    assert_eq!(BASE64.decode(encoded).unwrap(), audio.pcm_bytes());
}

// The service exposes two independent termination signals; the tests below
// pin each one separately because the upstream contract does not order them.

#[test]
fn given_last_result_flag_when_parsing_then_stream_ends() {
    let message: RecognitionMessage = serde_json::from_str(
        r#"{"code": 0, "data": {"status": 1, "result": {"ls": true, "ws": []}}}"#,
    )
    .unwrap();

    assert!(message.is_last());
}

#[test]
fn given_terminal_status_when_parsing_then_stream_ends() {
    let message: RecognitionMessage = serde_json::from_str(
        r#"{"code": 0, "data": {"status": 2, "result": {"ls": false, "ws": []}}}"#,
    )
    .unwrap();

    assert!(message.is_last());
}

#[test]
fn given_intermediate_message_when_parsing_then_stream_continues() {
    let message: RecognitionMessage = serde_json::from_str(
        r#"{"code": 0, "data": {"status": 1, "result": {"ls": false, "ws": []}}}"#,
    )
    .unwrap();

    assert!(!message.is_last());
}

#[test]
fn given_word_segments_when_parsing_then_fragments_concatenate() {
    let message: RecognitionMessage = serde_json::from_str(
        r#"{
            "code": 0,
            "data": {
                "status": 1,
                "result": {
                    "ls": false,
                    "ws": [
                        {"cw": [{"w": "我想"}]},
                        {"cw": [{"w": "去"}, {"w": ""}]},
                        {"cw": [{"w": "北京"}]}
                    ]
                }
            }
        }"#,
    )
    .unwrap();

    let text = message.data.unwrap().result.unwrap().text();

    assert_eq!(text, "我想去北京");
}

#[test]
fn given_error_code_when_parsing_then_code_and_message_are_available() {
    let message: RecognitionMessage =
        serde_json::from_str(r#"{"code": 10165, "message": "invalid app id"}"#).unwrap();

    assert_eq!(message.code, 10165);
    assert_eq!(message.message, "invalid app id");
    assert!(!message.is_last());
}
