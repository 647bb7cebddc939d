// HTTP surface tests: page rendering and the submit cycle over the router
// Author: kelexine (https://github.com/kelexine)

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use common::{red_square_png, FakeClient, RED_SQUARE_PNG_B64};
use http_body_util::BodyExt;
use image_extractor::config::{ApiKey, AppConfig};
use image_extractor::gemini::{GeminiClient, InferenceClient};
use image_extractor::server::create_router;
use image_extractor::session::{MISSING_IMAGE_WARNING, MISSING_PROMPT_WARNING, SUCCESS_BANNER};
use std::sync::Arc;
use tower::ServiceExt;

const BOUNDARY: &str = "----extractor-test-boundary";

enum FormPart<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        file_name: &'a str,
        content_type: &'a str,
        bytes: &'a [u8],
    },
}

fn multipart_body(parts: &[FormPart<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            FormPart::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            FormPart::File {
                name,
                file_name,
                content_type,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, file_name, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn extract_request(parts: &[FormPart<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/extract")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

async fn send(client: Arc<dyn InferenceClient>, request: Request<Body>) -> (StatusCode, String) {
    let app = create_router(AppConfig::default(), client).unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_index_renders_form() {
    let client = Arc::new(FakeClient::answering("unused"));
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();

    let (status, html) = send(client, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("MultiLanguage Image Extractor"));
    assert!(html.contains(r#"enctype="multipart/form-data""#));
}

#[tokio::test]
async fn test_submit_renders_answer_and_retains_inputs() {
    let client = Arc::new(FakeClient::answering("A small red square."));
    let png = red_square_png();
    let request = extract_request(&[
        FormPart::Text("prompt", "Describe this image"),
        FormPart::File {
            name: "image",
            file_name: "square.png",
            content_type: "image/png",
            bytes: &png,
        },
    ]);

    let (status, html) = send(client.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(SUCCESS_BANNER));
    assert!(html.contains("A small red square."));
    assert!(html.contains(">\nDescribe this image</textarea>"));
    assert!(html.contains(&format!("data:image/png;base64,{}", RED_SQUARE_PNG_B64)));

    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].image.data.as_ref(), png.as_slice());
}

#[tokio::test]
async fn test_blank_prompt_warns_without_call() {
    let client = Arc::new(FakeClient::answering("unused"));
    let png = red_square_png();
    let request = extract_request(&[
        FormPart::Text("prompt", "   \n "),
        FormPart::File {
            name: "image",
            file_name: "square.png",
            content_type: "image/png",
            bytes: &png,
        },
    ]);

    let (status, html) = send(client.clone(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains(MISSING_PROMPT_WARNING));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_empty_file_field_counts_as_missing() {
    let client = Arc::new(FakeClient::answering("unused"));
    let request = extract_request(&[
        FormPart::Text("prompt", "Extract the invoice total"),
        FormPart::File {
            name: "image",
            file_name: "",
            content_type: "application/octet-stream",
            bytes: b"",
        },
    ]);

    let (_, html) = send(client.clone(), request).await;

    assert!(html.contains(MISSING_IMAGE_WARNING));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_retained_image_is_reused() {
    let client = Arc::new(FakeClient::answering("Still red."));
    let retained = format!("data:image/png;base64,{}", RED_SQUARE_PNG_B64);
    let request = extract_request(&[
        FormPart::Text("prompt", "What colour is it?"),
        FormPart::Text("retained_image", &retained),
    ]);

    let (_, html) = send(client.clone(), request).await;

    assert!(html.contains("Still red."));
    let calls = client.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].image.data.as_ref(), red_square_png().as_slice());
}

#[tokio::test]
async fn test_failure_is_rendered_with_inputs_kept() {
    let client = Arc::new(FakeClient::failing("upstream timed out"));
    let png = red_square_png();
    let request = extract_request(&[
        FormPart::Text("prompt", "Describe this image"),
        FormPart::File {
            name: "image",
            file_name: "square.png",
            content_type: "image/png",
            bytes: &png,
        },
    ]);

    let (status, html) = send(client, request).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("An error occurred"));
    assert!(html.contains("upstream timed out"));
    assert!(html.contains(">\nDescribe this image</textarea>"));
    assert!(html.contains(r#"name="retained_image""#));
}

#[tokio::test]
async fn test_unsupported_type_is_rejected_without_call() {
    let client = Arc::new(FakeClient::answering("unused"));
    let request = extract_request(&[
        FormPart::Text("prompt", "Describe this image"),
        FormPart::File {
            name: "image",
            file_name: "scan.gif",
            content_type: "image/gif",
            bytes: b"GIF89a\x01\x00\x01\x00",
        },
    ]);

    let (_, html) = send(client.clone(), request).await;

    assert!(html.contains("image/gif"));
    assert!(client.calls().is_empty());
}

#[tokio::test]
async fn test_non_multipart_post_is_bad_request() {
    let client = Arc::new(FakeClient::answering("unused"));
    let request = Request::builder()
        .method("POST")
        .uri("/extract")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("prompt=Describe this image"))
        .unwrap();

    let (status, _) = send(client, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_reports_model() {
    let client = Arc::new(FakeClient::answering("unused"));
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let (status, body) = send(client, request).await;

    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["checks"]["model"]["message"], "Model: fake-model");
}

#[tokio::test]
async fn test_health_degrades_on_blank_key() {
    let mut config = AppConfig::default();
    config.gemini.api_key = Some(ApiKey::new("  "));
    let app = create_router(config, Arc::new(FakeClient::answering("unused"))).unwrap();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["credential"]["status"], "warning");
}

#[tokio::test]
async fn test_health_ok_with_key() {
    let mut config = AppConfig::default();
    config.gemini.api_key = Some(ApiKey::new("AIzaConfigured"));
    let app = create_router(config, Arc::new(FakeClient::answering("unused"))).unwrap();
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

    let response = app.oneshot(request).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["credential"]["status"], "ok");
}

#[tokio::test]
async fn test_describe_red_square_through_gemini_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/models/gemini-1.5-pro:generateContent")
        .match_body(mockito::Matcher::Json(serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [
                    {"text": "Describe this image"},
                    {"inlineData": {"mimeType": "image/png", "data": RED_SQUARE_PNG_B64}},
                    {"text": "Describe this image"}
                ]
            }]
        })))
        .with_status(200)
        .with_body(r#"{"candidates": [{"content": {"parts": [{"text": "A small red square."}]}}]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.gemini.api_base_url = server.url();
    config.gemini.api_key = Some(ApiKey::new("test-key"));
    let client = GeminiClient::new(&config.gemini).unwrap();
    let app = create_router(config, Arc::new(client)).unwrap();

    let png = red_square_png();
    let request = extract_request(&[
        FormPart::Text("prompt", "Describe this image"),
        FormPart::File {
            name: "image",
            file_name: "square.png",
            content_type: "image/png",
            bytes: &png,
        },
    ]);
    let response = app.oneshot(request).await.unwrap();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(html.contains("<div class=\"answer\">A small red square.</div>"));
    mock.assert_async().await;
}
