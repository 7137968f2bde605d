//! Mock API tests for the HTTP collaborators
//!
//! Amazon Translate and the Lambda Runtime API are both replaced by wiremock servers.

use lex_translate::runtime::{report_init_error, LambdaRuntime};
use lex_translate::translate::{
    AmazonTranslateClient, Credentials, TranslationRequest, TranslationService,
};
use lex_translate::{DialogResponse, DialogTranslationHandler, LexTranslateError, SlotName};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const TARGET: &str = "AWSShineFrontendService_20170701.TranslateText";

fn credentials(session_token: Option<&str>) -> Credentials {
    Credentials {
        access_key_id: "AKIDEXAMPLE".to_string(),
        secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
        session_token: session_token.map(str::to_string),
    }
}

fn client(server: &MockServer) -> AmazonTranslateClient {
    AmazonTranslateClient::new("eu-west-1".to_string(), credentials(None))
        .with_endpoint(server.uri())
}

fn translation_event(text: &str, language: &str) -> Value {
    json!({
        "sessionState": {
            "intent": {
                "name": "TranslationIntent",
                "slots": {
                    "text": { "value": { "interpretedValue": text } },
                    "language": { "value": { "interpretedValue": language } }
                }
            }
        }
    })
}

// ============================================================================
// Amazon Translate Mock Tests
// ============================================================================

mod amazon_translate_tests {
    use super::*;

    fn signed_for_region(request: &Request) -> bool {
        request
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| {
                v.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/")
                    && v.contains("/eu-west-1/translate/aws4_request")
            })
            .unwrap_or(false)
    }

    #[tokio::test]
    async fn test_translate_text_request() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .and(header("x-amz-target", TARGET))
            .and(header("content-type", "application/x-amz-json-1.1"))
            .and(header_exists("x-amz-date"))
            .and(signed_for_region)
            .and(body_json(json!({
                "Text": "Hello",
                "SourceLanguageCode": "auto",
                "TargetLanguageCode": "fr"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "TranslatedText": "Bonjour",
                "SourceLanguageCode": "en",
                "TargetLanguageCode": "fr"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&server)
            .translate(&TranslationRequest::new("Hello", "auto", "fr"))
            .await
            .unwrap();

        assert_eq!(response.translated_text.as_deref(), Some("Bonjour"));
        assert_eq!(response.source_language_code.as_deref(), Some("en"));
        assert_eq!(response.target_language_code.as_deref(), Some("fr"));
    }

    #[tokio::test]
    async fn test_session_token_header() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-amz-security-token", "session-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "TranslatedText": "Hallo" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = AmazonTranslateClient::new(
            "eu-west-1".to_string(),
            credentials(Some("session-token")),
        )
        .with_endpoint(server.uri());

        let response = client
            .translate(&TranslationRequest::new("Hello", "auto", "de"))
            .await
            .unwrap();
        assert_eq!(response.translated_text.as_deref(), Some("Hallo"));
    }

    #[tokio::test]
    async fn test_response_without_translated_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let response = client(&server)
            .translate(&TranslationRequest::new("Hello", "auto", "ja"))
            .await
            .unwrap();
        assert!(response.translated_text.is_none());
    }

    #[tokio::test]
    async fn test_service_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "__type": "com.amazonaws.translate#TextSizeLimitExceededException",
                "message": "Input text size exceeds limit"
            })))
            .mount(&server)
            .await;

        let result = client(&server)
            .translate(&TranslationRequest::new("Hello", "auto", "es"))
            .await;

        match tokio_test::assert_err!(result) {
            LexTranslateError::TranslationService(message) => {
                assert!(message.contains("TextSizeLimitExceededException"));
                assert!(message.contains("Input text size exceeds limit"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&server)
            .await;

        let result = client(&server)
            .translate(&TranslationRequest::new("Hello", "auto", "zh"))
            .await;

        let message = tokio_test::assert_err!(result).to_string();
        assert!(message.contains("503"));
        assert!(message.contains("Service Unavailable"));
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let result = client(&server)
            .translate(&TranslationRequest::new("Hello", "auto", "no"))
            .await;
        assert!(matches!(result, Err(LexTranslateError::TranslationService(_))));
    }
}

// ============================================================================
// Handler + Amazon Translate Tests
// ============================================================================

mod handler_tests {
    use super::*;

    #[tokio::test]
    async fn test_handler_fulfills_through_amazon_translate() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(body_json(json!({
                "Text": "Hello",
                "SourceLanguageCode": "auto",
                "TargetLanguageCode": "fr"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "TranslatedText": "Bonjour" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let handler = DialogTranslationHandler::new(Box::new(client(&server)));
        let response = handler.handle(&translation_event("Hello", "French")).await;

        assert_eq!(response.content(), Some("Bonjour"));
    }

    #[tokio::test]
    async fn test_handler_reports_service_failure() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "__type": "InternalServerException",
                "message": "Internal error"
            })))
            .mount(&server)
            .await;

        let handler = DialogTranslationHandler::new(Box::new(client(&server)));
        let response = handler.handle(&translation_event("Hello", "German")).await;

        assert_eq!(
            response.content(),
            Some(
                "Lambda execution error: Translation service error: \
                 InternalServerException (500): Internal error"
            )
        );
    }

    #[tokio::test]
    async fn test_handler_reports_unreachable_service() {
        let client = AmazonTranslateClient::new("eu-west-1".to_string(), credentials(None))
            .with_endpoint("http://127.0.0.1:1");
        let handler = DialogTranslationHandler::new(Box::new(client));

        let response = handler.handle(&translation_event("Hello", "Spanish")).await;
        let content = response.content().unwrap();
        assert!(content.starts_with("Lambda execution error: Translation service error:"));
        assert!(content.contains("Translation request failed"));
    }

    #[tokio::test]
    async fn test_unsupported_language_never_reaches_service() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let handler = DialogTranslationHandler::new(Box::new(client(&server)));
        let response = handler.handle(&translation_event("Hello", "Latin")).await;

        assert_eq!(
            response.content(),
            Some("Lambda execution error: Unsupported language: Latin")
        );
    }
}

// ============================================================================
// Lambda Runtime API Tests
// ============================================================================

mod runtime_tests {
    use super::*;

    const NEXT: &str = "/2018-06-01/runtime/invocation/next";

    fn offline_handler() -> DialogTranslationHandler {
        let client = AmazonTranslateClient::new("eu-west-1".to_string(), credentials(None))
            .with_endpoint("http://127.0.0.1:1");
        DialogTranslationHandler::new(Box::new(client))
    }

    fn runtime(server: &MockServer) -> LambdaRuntime {
        LambdaRuntime::new(&server.address().to_string(), offline_handler())
    }

    #[tokio::test]
    async fn test_process_next_posts_response() {
        let server = MockServer::start().await;
        let event = json!({ "sessionState": { "intent": { "slots": {} } } });
        let expected = DialogResponse::elicit_slot(SlotName::Language, json!({}));

        Mock::given(method("GET"))
            .and(path(NEXT))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Lambda-Runtime-Aws-Request-Id", "req-1")
                    .insert_header("Lambda-Runtime-Trace-Id", "Root=1-abc")
                    .set_body_json(event),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/2018-06-01/runtime/invocation/req-1/response"))
            .and(body_json(serde_json::to_value(&expected).unwrap()))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        let request_id = runtime(&server).process_next().await.unwrap();
        assert_eq!(request_id, "req-1");
    }

    #[tokio::test]
    async fn test_next_invocation_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(NEXT))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Lambda-Runtime-Aws-Request-Id", "req-2")
                    .insert_header("Lambda-Runtime-Trace-Id", "Root=1-def")
                    .set_body_json(json!({ "sessionId": "s" })),
            )
            .mount(&server)
            .await;

        let invocation = runtime(&server).next_invocation().await.unwrap();
        assert_eq!(invocation.request_id, "req-2");
        assert_eq!(invocation.trace_id.as_deref(), Some("Root=1-def"));
        assert_eq!(invocation.event, json!({ "sessionId": "s" }));
    }

    #[tokio::test]
    async fn test_non_json_event_gets_failed_response() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(NEXT))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Lambda-Runtime-Aws-Request-Id", "req-3")
                    .set_body_string("not json"),
            )
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/2018-06-01/runtime/invocation/req-3/response"))
            .and(body_json(
                serde_json::to_value(DialogResponse::failed("Invalid event format")).unwrap(),
            ))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        runtime(&server).process_next().await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_request_id() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(NEXT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let result = runtime(&server).next_invocation().await;
        assert!(matches!(result, Err(LexTranslateError::Runtime(_))));
    }

    #[tokio::test]
    async fn test_rejected_response_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2018-06-01/runtime/invocation/req-4/response"))
            .respond_with(ResponseTemplate::new(413).set_body_string("payload too large"))
            .mount(&server)
            .await;

        let response = DialogResponse::failed("Input text is empty.");
        let result = runtime(&server).send_response("req-4", &response).await;

        let message = tokio_test::assert_err!(result).to_string();
        assert!(message.contains("413"));
    }

    #[tokio::test]
    async fn test_run_stops_when_runtime_api_fails() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(NEXT))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(runtime(&server).run().await.is_err());
    }

    #[tokio::test]
    async fn test_report_init_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/2018-06-01/runtime/init/error"))
            .and(header("Lambda-Runtime-Function-Error-Type", "Runtime.InitError"))
            .and(body_json(json!({
                "errorMessage": "missing credentials",
                "errorType": "Runtime.InitError"
            })))
            .respond_with(ResponseTemplate::new(202))
            .expect(1)
            .mount(&server)
            .await;

        report_init_error(&server.address().to_string(), "missing credentials")
            .await
            .unwrap();
    }
}
