//! Integration tests for `TeiClassifier` using wiremock HTTP mocks.

use brandmon_sentiment::{SentimentClassifier, SentimentError, TeiClassifier};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_classifier(base_url: &str) -> TeiClassifier {
    TeiClassifier::new(base_url, 30, "brandmon-test")
        .expect("classifier construction should not fail")
}

fn scores(positive: f64) -> serde_json::Value {
    serde_json::json!([
        { "label": "POSITIVE", "score": positive },
        { "label": "NEGATIVE", "score": 1.0 - positive }
    ])
}

#[tokio::test]
async fn classify_posts_inputs_and_picks_top_label() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .and(body_json(serde_json::json!({
            "inputs": [["I like you."], ["I hate you."]],
            "truncate": true
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([scores(0.75), scores(0.125)])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let predictions = classifier
        .classify(&["I like you.", "I hate you."])
        .await
        .expect("should classify");

    assert_eq!(predictions.len(), 2);
    assert_eq!(predictions[0].label, "POSITIVE");
    assert!((predictions[0].score - 0.75).abs() < f64::EPSILON);
    assert_eq!(predictions[1].label, "NEGATIVE");
    assert!((predictions[1].score - 0.875).abs() < f64::EPSILON);
}

#[tokio::test]
async fn large_batches_are_split_into_chunks() {
    let server = MockServer::start().await;

    let texts: Vec<String> = (0..40).map(|i| format!("post number {i}")).collect();
    let refs: Vec<&str> = texts.iter().map(String::as_str).collect();

    for chunk in refs.chunks(32) {
        let inputs: Vec<[&str; 1]> = chunk.iter().map(|t| [*t]).collect();
        let response: Vec<serde_json::Value> = chunk.iter().map(|_| scores(0.9)).collect();
        Mock::given(method("POST"))
            .and(path("/predict"))
            .and(body_json(serde_json::json!({ "inputs": inputs, "truncate": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .expect(1)
            .mount(&server)
            .await;
    }

    let classifier = test_classifier(&server.uri());
    let predictions = classifier.classify(&refs).await.expect("should classify");

    assert_eq!(predictions.len(), 40);
    assert!(predictions.iter().all(|p| p.label == "POSITIVE"));
}

#[tokio::test]
async fn server_error_is_classifier_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let err = classifier.classify(&["hello"]).await.unwrap_err();

    assert!(
        matches!(err, SentimentError::Classifier(ref m) if m.contains("503")),
        "got {err:?}"
    );
}

#[tokio::test]
async fn misaligned_response_is_classifier_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/predict"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([scores(0.9)])))
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let err = classifier.classify(&["one", "two"]).await.unwrap_err();

    assert!(matches!(err, SentimentError::Classifier(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_text_is_rejected_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let classifier = test_classifier(&server.uri());
    let err = classifier.classify(&["fine", ""]).await.unwrap_err();

    assert!(matches!(err, SentimentError::Classifier(_)));
}
