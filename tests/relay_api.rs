use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use medscribe_relay::agent::StatelessLLMInterface;
use medscribe_relay::relay::RelaySettings;
use medscribe_relay::tts::{SynthesisRequest, TTSInterface};
use medscribe_relay::{routes, AppState, Config, ProviderError, RelayService};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Text provider answering every prompt with the same reply
struct StubLLM {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StubLLM {
    fn ok(text: &str) -> Arc<Self> {
        Arc::new(Self { reply: Ok(text.to_string()), prompts: Mutex::new(Vec::new()) })
    }

    fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self { reply: Err(message.to_string()), prompts: Mutex::new(Vec::new()) })
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatelessLLMInterface for StubLLM {
    fn model(&self) -> &str {
        "stub"
    }

    async fn generate(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.reply
            .clone()
            .map_err(|message| ProviderError::Api { status: 500, message })
    }
}

struct StubTTS {
    fail: bool,
    requests: Mutex<Vec<SynthesisRequest>>,
}

impl StubTTS {
    fn new(fail: bool) -> Arc<Self> {
        Arc::new(Self { fail, requests: Mutex::new(Vec::new()) })
    }
}

#[async_trait]
impl TTSInterface for StubTTS {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        if self.fail {
            Err(ProviderError::Authentication("invalid credentials".to_string()))
        } else {
            Ok(vec![0xFF, 0xFB, 0x90, 0x00])
        }
    }
}

fn app(llm: Arc<StubLLM>, tts: Arc<StubTTS>) -> Router {
    let relay = RelayService::new(llm.clone(), llm, tts, RelaySettings::default());
    routes::build_app(AppState::with_relay(Config::default(), relay)).unwrap()
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn translate_end_to_end() {
    let (status, body) = post_json(
        app(StubLLM::ok("Hello"), StubTTS::new(false)),
        "/translate_text",
        r#"{"text": "Hola", "target_language": "en"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "translated_text": "Hello" }));
}

#[tokio::test]
async fn enhance_returns_trimmed_text() {
    let llm = StubLLM::ok("\n  I have a headache.\n\nHow long has it hurt?  \n\n");
    let (status, body) = post_json(
        app(llm.clone(), StubTTS::new(false)),
        "/enhance_transcription",
        r#"{"text": "i have a head ache how long has it hurt", "context": "good morning"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "enhanced_text": "I have a headache.\n\nHow long has it hurt?" }));

    let prompts = llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Previous conversation:\ngood morning\n\n"));
    assert!(prompts[0].contains("Current speech:\ni have a head ache how long has it hurt\n\n"));
}

#[tokio::test]
async fn provider_failure_yields_500_with_error_only() {
    for uri in ["/enhance_transcription", "/translate_text"] {
        let (status, body) =
            post_json(app(StubLLM::failing("quota exhausted"), StubTTS::new(false)), uri, r#"{"text": "x"}"#)
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let fields = body.as_object().unwrap();
        assert_eq!(fields.len(), 1, "unexpected fields for {uri}: {body}");
        assert!(fields["error"].as_str().unwrap().contains("quota exhausted"));
    }
}

#[tokio::test]
async fn translate_defaults_to_spanish() {
    let llm = StubLLM::ok("Hola");
    let app = app(llm.clone(), StubTTS::new(false));

    let (_, defaulted) = post_json(app.clone(), "/translate_text", r#"{"text": "Hello"}"#).await;
    let (_, explicit) =
        post_json(app, "/translate_text", r#"{"text": "Hello", "target_language": "es"}"#).await;

    assert_eq!(defaulted, explicit);
    let prompts = llm.prompts();
    assert_eq!(prompts[0], prompts[1]);
    assert!(prompts[0].starts_with("Translate the following medical conversation to es."));
}

#[tokio::test]
async fn synthesize_returns_base64_audio() {
    let tts = StubTTS::new(false);
    let (status, body) = post_json(
        app(StubLLM::ok(""), tts.clone()),
        "/synthesize_speech",
        r#"{"text": "Hola", "language_code": "es-ES"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body.get("error").is_none());
    let audio = STANDARD.decode(body["audio"].as_str().unwrap()).unwrap();
    assert_eq!(audio, vec![0xFF, 0xFB, 0x90, 0x00]);

    let sent = tts.requests.lock().unwrap().clone();
    assert_eq!(sent, vec![SynthesisRequest::new("Hola", "es-ES")]);
}

#[tokio::test]
async fn synthesize_defaults_to_us_english() {
    let tts = StubTTS::new(false);
    let (status, _) = post_json(app(StubLLM::ok(""), tts.clone()), "/synthesize_speech", r#"{"text": "Hi"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tts.requests.lock().unwrap()[0].language_code, "en-US");
}

#[tokio::test]
async fn synthesize_failure_reports_success_false() {
    let (status, body) =
        post_json(app(StubLLM::ok(""), StubTTS::new(true)), "/synthesize_speech", r#"{"text": "Hi"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].as_str().unwrap().contains("invalid credentials"));
    assert!(body.get("audio").is_none());
}

#[tokio::test]
async fn repeated_requests_keep_the_same_shape() {
    let app = app(StubLLM::ok("Fixed."), StubTTS::new(false));
    let (first_status, first) = post_json(app.clone(), "/enhance_transcription", r#"{"text": "x"}"#).await;
    let (second_status, second) = post_json(app, "/enhance_transcription", r#"{"text": "x"}"#).await;

    assert_eq!(first_status, second_status);
    let keys = |v: &Value| v.as_object().unwrap().keys().cloned().collect::<Vec<_>>();
    assert_eq!(keys(&first), keys(&second));
}

#[tokio::test]
async fn missing_body_and_content_type_are_defaulted() {
    let llm = StubLLM::ok("ok");
    let request = Request::builder()
        .method("POST")
        .uri("/enhance_transcription")
        .body(Body::empty())
        .unwrap();
    let response = app(llm.clone(), StubTTS::new(false)).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(llm.prompts()[0].contains("Current speech:\n\n\n"));
}

#[tokio::test]
async fn invalid_json_is_a_bad_request() {
    let (status, body) =
        post_json(app(StubLLM::ok("ok"), StubTTS::new(false)), "/synthesize_speech", "{oops").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn non_string_fields_are_relayed_as_text() {
    let llm = StubLLM::ok("Cinco");
    let (status, body) = post_json(
        app(llm.clone(), StubTTS::new(false)),
        "/translate_text",
        r#"{"text": 5, "context": null, "target_language": "es"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"translated_text": "Cinco"}));
    assert!(llm.prompts()[0].contains("Text to translate:\n5"));
}

#[tokio::test]
async fn health_check_is_ok() {
    let request = Request::builder().uri("/api/health").body(Body::empty()).unwrap();
    let response = app(StubLLM::ok(""), StubTTS::new(false)).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_allow_list_is_applied() {
    let mut config = Config::default();
    config.system_config.cors_allowed_origins = vec!["http://localhost:3000".to_string()];
    let llm = StubLLM::ok("ok");
    let relay = RelayService::new(llm.clone(), llm, StubTTS::new(false), RelaySettings::default());
    let app = routes::build_app(AppState::with_relay(config, relay)).unwrap();

    let preflight = |origin: &str| {
        Request::builder()
            .method("OPTIONS")
            .uri("/translate_text")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap()
    };

    let allowed = app.clone().oneshot(preflight("http://localhost:3000")).await.unwrap();
    assert_eq!(
        allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );

    let denied = app.oneshot(preflight("http://evil.example")).await.unwrap();
    assert!(denied.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
