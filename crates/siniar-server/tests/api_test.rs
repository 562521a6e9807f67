mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::{Harness, TWO_TURNS};
use serde_json::Value;
use tower::ServiceExt;

const BOUNDARY: &str = "siniar-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn multipart(parts: &[Part<'_>]) -> Request<Body> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File(name, file_name, data) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/pdf\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/generate-podcast")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_check_returns_ok() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn topic_returns_audio_attachment() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(multipart(&[Part::Text("topic_text", "Kucing dan anjing")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "audio/wav");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"podcast_final_"));
    assert!(disposition.ends_with(".wav\""));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..4], b"RIFF");
    assert_eq!(h.tts.calls().len(), 2);
}

#[tokio::test]
async fn document_upload_is_extracted() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(multipart(&[Part::File("file", "materi.pdf", b"%PDF-1.4 fake")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.extractor.calls(), 1);
    assert!(h.model.prompts()[0].contains("isi dokumen"));
}

#[tokio::test]
async fn form_without_known_fields_is_missing_input() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(multipart(&[Part::Text("note", "tanpa topik")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Kirimkan file PDF atau masukkan teks topik");
    assert_eq!(json["kind"], "missing_input");
    assert!(h.model.prompts().is_empty());
}

#[tokio::test]
async fn empty_file_and_blank_topic_is_missing_input() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(multipart(&[
            Part::File("file", "kosong.pdf", b""),
            Part::Text("topic_text", "  "),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.extractor.calls(), 0);
}

#[tokio::test]
async fn empty_file_falls_back_to_topic() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(multipart(&[
            Part::File("file", "kosong.pdf", b""),
            Part::Text("topic_text", "Kopi"),
            Part::Text("extra", "ignored"),
        ]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(h.extractor.calls(), 0);
}

#[tokio::test]
async fn prose_reply_is_unprocessable() {
    let h = Harness::new("Tentu! Ini ide podcast yang menarik.");

    let response = h
        .app()
        .oneshot(multipart(&[Part::Text("topic_text", "Kucing")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = json_body(response).await;
    assert_eq!(json["error"], "Tidak ada dialog yang dihasilkan");
    assert_eq!(json["kind"], "empty_dialogue");
}

#[tokio::test]
async fn broken_json_is_bad_gateway() {
    let h = Harness::new(r#"Hasil: [{"speaker": "Nadya" "line": "Halo"}]"#);

    let response = h
        .app()
        .oneshot(multipart(&[Part::Text("topic_text", "Kucing")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "dialogue_parse");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("Parsing JSON gagal: "));
}

#[tokio::test]
async fn non_multipart_body_is_rejected() {
    let h = Harness::new(TWO_TURNS);

    let response = h
        .app()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/generate-podcast")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"topic_text":"Kucing"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let json = json_body(response).await;
    assert_eq!(json["kind"], "invalid_request");
    assert!(json["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid request: multipart error: "));
    assert!(h.model.prompts().is_empty());
}

#[tokio::test]
async fn oversize_upload_is_payload_too_large() {
    let mut h = Harness::new(TWO_TURNS);
    h.config.server.max_upload_bytes = 1024;
    let document = vec![b'x'; 10 * 1024];

    let response = h
        .app()
        .oneshot(multipart(&[Part::File("file", "besar.pdf", &document)]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json = json_body(response).await;
    assert_eq!(json["kind"], "payload_too_large");
    assert_eq!(h.extractor.calls(), 0);
    assert!(h.model.prompts().is_empty());
}
