use serde_json::{json, Value};
use siniar_voice::{ElevenLabsConfig, ElevenLabsTts, SpeechSynthesizer, VoiceError};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tts_for(server: &MockServer) -> ElevenLabsTts {
    let mut config = ElevenLabsConfig::new("xi-test", "voice-one", "voice-two");
    config.base_url = format!("{}/v1/text-to-speech", server.uri());
    config.timeout_secs = 5;
    ElevenLabsTts::new(config).unwrap()
}

#[tokio::test]
async fn posts_cleaned_text_with_fixed_voice_settings() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-one/stream"))
        .and(header("xi-api-key", "xi-test"))
        .and(body_partial_json(json!({
            "text": "Halo semuanya, apa kabar?",
            "model_id": "eleven_multilingual_v2"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"ID3fake-mp3".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let audio = tts_for(&server)
        .synthesize("  *Halo*   semuanya, \"apa kabar?\" ", "voice-one")
        .await
        .unwrap();

    assert_eq!(audio, b"ID3fake-mp3");

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let settings = &body["voice_settings"];
    assert!((settings["stability"].as_f64().unwrap() - 0.5).abs() < 1e-6);
    assert!((settings["similarity_boost"].as_f64().unwrap() - 0.3).abs() < 1e-6);
}

#[tokio::test]
async fn error_status_is_synthesis_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-two/stream"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": { "status": "invalid_api_key" } })),
        )
        .mount(&server)
        .await;

    let result = tts_for(&server).synthesize("Hai", "voice-two").await;

    match result {
        Err(VoiceError::Synthesis { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("invalid_api_key"));
        }
        other => panic!("expected synthesis error, got {:?}", other),
    }
}

#[tokio::test]
async fn text_that_cleans_to_nothing_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = tts_for(&server).synthesize(" ** \"\" ", "voice-one").await;
    assert!(matches!(result, Err(VoiceError::EmptyText)));
}

#[tokio::test]
async fn synthesize_to_writes_audio_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/text-to-speech/voice-one/stream"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![7u8; 128]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("turn_0_nadya.mp3");

    let written = tts_for(&server)
        .synthesize_to("Halo!", "voice-one", &dest)
        .await
        .unwrap();

    assert_eq!(written, 128);
    assert_eq!(std::fs::read(&dest).unwrap(), vec![7u8; 128]);
}

#[test]
fn missing_api_key_is_rejected() {
    let result = ElevenLabsTts::new(ElevenLabsConfig::default());
    assert!(matches!(result, Err(VoiceError::Config(_))));
}
