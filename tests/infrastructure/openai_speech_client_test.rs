use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use asr_relay::application::ports::{SpeechClient, SpeechClientError};
use asr_relay::domain::{AudioUpload, Task, TranscriptionOptions};
use asr_relay::infrastructure::speech::OpenAiSpeechClient;

#[derive(Debug, Clone, Default)]
struct CapturedRequest {
    path: String,
    authorization: Option<String>,
    fields: HashMap<String, String>,
    file_name: Option<String>,
    file_content_type: Option<String>,
    file_bytes: Vec<u8>,
}

#[derive(Clone)]
struct MockState {
    status: u16,
    body: &'static str,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn capture(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut captured = CapturedRequest {
        path: uri.path().to_string(),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
        ..CapturedRequest::default()
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            captured.file_name = field.file_name().map(String::from);
            captured.file_content_type = field.content_type().map(String::from);
            captured.file_bytes = field.bytes().await.unwrap().to_vec();
        } else {
            captured.fields.insert(name, field.text().await.unwrap());
        }
    }

    state.captured.lock().unwrap().push(captured);

    let status = StatusCode::from_u16(state.status).unwrap();
    (
        status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        state.body,
    )
        .into_response()
}

async fn start_mock_openai_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, Arc<Mutex<Vec<CapturedRequest>>>, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let captured = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/v1/audio/transcriptions", post(capture))
        .route("/v1/audio/translations", post(capture))
        .with_state(MockState {
            status: response_status,
            body: response_body,
            captured: Arc::clone(&captured),
        });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}/v1", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, captured, shutdown_tx)
}

fn openai_client(base_url: &str) -> OpenAiSpeechClient {
    OpenAiSpeechClient::new(Some("test-key".to_string()), base_url, "whisper-1").unwrap()
}

fn upload() -> AudioUpload {
    AudioUpload::from_bytes(b"fake audio bytes".to_vec()).unwrap()
}

const VERBOSE_BODY: &str = r#"{
    "task": "transcribe",
    "language": "english",
    "duration": 2.5,
    "text": "Hello world",
    "segments": [{"id": 0, "seek": 0, "start": 0.0, "end": 2.5, "text": " Hello world", "no_speech_prob": 0.01}]
}"#;

#[tokio::test]
async fn given_transcribe_task_when_recognizing_then_posts_to_transcriptions_with_bearer_key() {
    let (base_url, captured, shutdown_tx) = start_mock_openai_server(200, VERBOSE_BODY).await;
    let client = openai_client(&base_url);

    let transcript = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await
        .unwrap();

    assert_eq!(transcript.text, "Hello world");
    assert_eq!(transcript.segments.as_ref().map(Vec::len), Some(1));

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.path, "/v1/audio/transcriptions");
    assert_eq!(request.authorization.as_deref(), Some("Bearer test-key"));
    assert_eq!(request.fields.get("model").map(String::as_str), Some("whisper-1"));
    assert_eq!(
        request.fields.get("response_format").map(String::as_str),
        Some("verbose_json")
    );
    assert!(!request.fields.contains_key("language"));
    assert_eq!(request.file_name.as_deref(), Some("audio"));
    assert_eq!(request.file_bytes, b"fake audio bytes");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_translate_task_with_language_when_recognizing_then_posts_to_translations() {
    let (base_url, captured, shutdown_tx) = start_mock_openai_server(200, VERBOSE_BODY).await;
    let client = openai_client(&base_url);
    let options = TranscriptionOptions::new(Task::Translate).with_language("ar");

    client.recognize(&upload(), &options).await.unwrap();

    let requests = captured.lock().unwrap();
    assert_eq!(requests[0].path, "/v1/audio/translations");
    assert_eq!(
        requests[0].fields.get("language").map(String::as_str),
        Some("ar")
    );
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_upload_metadata_when_recognizing_then_file_part_carries_it() {
    let (base_url, captured, shutdown_tx) = start_mock_openai_server(200, VERBOSE_BODY).await;
    let client = openai_client(&format!("{}/", base_url));
    let upload = upload()
        .with_file_name(Some("lecture.mp3".to_string()))
        .with_content_type(Some("audio/mpeg".to_string()));

    client
        .recognize(&upload, &TranscriptionOptions::default())
        .await
        .unwrap();

    let requests = captured.lock().unwrap();
    assert_eq!(requests[0].file_name.as_deref(), Some("lecture.mp3"));
    assert_eq!(requests[0].file_content_type.as_deref(), Some("audio/mpeg"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_openai_error_envelope_when_recognizing_then_returns_upstream_error_with_message() {
    let body = r#"{"error": {"message": "Invalid file format.", "type": "invalid_request_error"}}"#;
    let (base_url, _captured, shutdown_tx) = start_mock_openai_server(400, body).await;
    let client = openai_client(&base_url);

    let result = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await;

    match result {
        Err(SpeechClientError::Upstream { status, message }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "Invalid file format.");
        }
        other => panic!("expected upstream error, got {:?}", other),
    }
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_plain_error_body_when_recognizing_then_message_is_raw_body() {
    let (base_url, _captured, shutdown_tx) = start_mock_openai_server(503, " overloaded \n").await;
    let client = openai_client(&base_url);

    let result = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(SpeechClientError::Upstream { status: 503, ref message }) if message == "overloaded"
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_error_body_when_recognizing_then_message_is_reason_phrase() {
    let (base_url, _captured, shutdown_tx) = start_mock_openai_server(503, "").await;
    let client = openai_client(&base_url);

    let result = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await;

    assert!(matches!(
        result,
        Err(SpeechClientError::Upstream { ref message, .. }) if message == "Service Unavailable"
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_non_json_success_body_when_recognizing_then_returns_invalid_response() {
    let (base_url, _captured, shutdown_tx) = start_mock_openai_server(200, "Hello world").await;
    let client = openai_client(&base_url);

    let result = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await;

    assert!(matches!(result, Err(SpeechClientError::InvalidResponse(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unreachable_server_when_recognizing_then_returns_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = openai_client(&format!("http://{}/v1", addr));

    let result = client
        .recognize(&upload(), &TranscriptionOptions::default())
        .await;

    assert!(matches!(result, Err(SpeechClientError::Request(_))));
}

#[test]
fn given_no_api_key_when_creating_client_then_returns_missing_key_error() {
    assert!(matches!(
        OpenAiSpeechClient::new(None, "https://api.openai.com/v1", "whisper-1"),
        Err(SpeechClientError::MissingApiKey)
    ));
}

#[test]
fn given_trailing_slash_base_url_when_building_endpoint_then_no_double_slash() {
    let client = openai_client("https://api.openai.com/v1/");

    assert_eq!(
        client.endpoint(Task::Transcribe),
        "https://api.openai.com/v1/audio/transcriptions"
    );
    assert_eq!(
        client.endpoint(Task::Translate),
        "https://api.openai.com/v1/audio/translations"
    );
}
