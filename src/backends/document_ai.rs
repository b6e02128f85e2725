// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Document AI `processors.process` over REST.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::backends::auth::fetch_access_token;
use crate::config::{HandlerConfig, ServiceAccountKey};
use crate::errors::{HandlerError, HandlerResult};
use crate::observability::messages::backend::RemoteCallRejected;
use crate::observability::messages::StructuredLog;
use crate::pipeline::request::{ExtractionRequest, RawDocument};
use crate::pipeline::types::ExtractionResult;
use crate::traits::DocumentExtractor;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Regional service endpoint for a processor location.
///
/// # Example
/// ```
/// use docai_relay::backends::document_ai::regional_endpoint;
///
/// assert_eq!(regional_endpoint("eu"), "https://eu-documentai.googleapis.com");
/// ```
pub fn regional_endpoint(location: &str) -> String {
    format!("https://{location}-documentai.googleapis.com")
}

/// URL of the `process` method for a processor resource name.
pub fn process_url(endpoint: &str, processor_name: &str) -> String {
    format!(
        "{}/v1/{processor_name}:process",
        endpoint.trim_end_matches('/')
    )
}

// The processor name travels in the URL path, so the body carries only the document.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProcessBody<'a> {
    raw_document: &'a RawDocument,
}

#[derive(Deserialize)]
struct ProcessResponse {
    document: Option<ProcessedDocument>,
}

#[derive(Deserialize)]
struct ProcessedDocument {
    // proto3 JSON omits empty strings
    #[serde(default)]
    text: String,
}

/// Pull `document.text` out of a `process` response body.
///
/// A response without a document, or whose document has no text, is an
/// extraction error.
pub(crate) fn parse_process_response(body: &str) -> HandlerResult<ExtractionResult> {
    let response: ProcessResponse = serde_json::from_str(body).map_err(|e| {
        HandlerError::ExtractionService(format!("Invalid process response: {e}"))
    })?;

    let document = response.document.ok_or_else(|| {
        HandlerError::ExtractionService("Process response has no document".to_string())
    })?;

    if document.text.is_empty() {
        return Err(HandlerError::ExtractionService(
            "Process response has no text".to_string(),
        ));
    }

    Ok(ExtractionResult {
        text: document.text,
    })
}

/// HTTP client for the Document AI REST API.
pub struct DocumentAiClient {
    http: reqwest::Client,
    endpoint: Option<String>,
}

impl DocumentAiClient {
    /// Create a client; `endpoint` overrides the regional endpoint when set.
    pub fn new(endpoint: Option<String>) -> HandlerResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| {
                HandlerError::Configuration(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &HandlerConfig) -> HandlerResult<Self> {
        Self::new(config.endpoint.clone())
    }

    fn endpoint_for(&self, request: &ExtractionRequest) -> HandlerResult<String> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let location = request.location().ok_or_else(|| {
            HandlerError::Configuration(format!(
                "Processor name '{}' has no location segment",
                request.name
            ))
        })?;
        Ok(regional_endpoint(location))
    }
}

#[async_trait]
impl DocumentExtractor for DocumentAiClient {
    async fn process(
        &self,
        credentials: &ServiceAccountKey,
        request: &ExtractionRequest,
    ) -> HandlerResult<ExtractionResult> {
        let endpoint = self.endpoint_for(request)?;
        let token = fetch_access_token(&self.http, credentials).await?;

        let response = self
            .http
            .post(process_url(&endpoint, &request.name))
            .bearer_auth(token.as_str())
            .json(&ProcessBody {
                raw_document: &request.raw_document,
            })
            .send()
            .await
            .map_err(|e| {
                HandlerError::ExtractionService(format!(
                    "Request to '{}' failed: {e}",
                    request.name
                ))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            HandlerError::ExtractionService(format!(
                "Failed to read response from '{}': {e}",
                request.name
            ))
        })?;

        if !status.is_success() {
            RemoteCallRejected {
                endpoint: &endpoint,
                status: status.as_u16(),
                body: &body,
            }
            .log();
            return Err(HandlerError::ExtractionService(format!(
                "'{}' returned HTTP {status}",
                request.name
            )));
        }

        parse_process_response(&body)
    }

    fn name(&self) -> &'static str {
        "document_ai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProcessorIdentity;
    use crate::pipeline::types::DocumentPayload;
    use bytes::Bytes;

    fn request(location: &str) -> ExtractionRequest {
        ExtractionRequest::build(
            &ProcessorIdentity::new("p", location, "proc"),
            &DocumentPayload::new(Bytes::from_static(b"%PDF"), "application/pdf"),
        )
        .unwrap()
    }

    #[test]
    fn url_targets_the_process_method() {
        assert_eq!(
            process_url(&regional_endpoint("us"), "projects/p/locations/us/processors/proc"),
            "https://us-documentai.googleapis.com/v1/projects/p/locations/us/processors/proc:process"
        );
        assert_eq!(
            process_url("http://localhost:8085/", "projects/p/locations/us/processors/proc"),
            "http://localhost:8085/v1/projects/p/locations/us/processors/proc:process"
        );
    }

    #[test]
    fn endpoint_follows_processor_location() {
        let client = DocumentAiClient::new(None).unwrap();
        assert_eq!(
            client.endpoint_for(&request("eu")).unwrap(),
            "https://eu-documentai.googleapis.com"
        );
    }

    #[test]
    fn endpoint_override_wins() {
        let client = DocumentAiClient::new(Some("http://localhost:8085".to_string())).unwrap();
        assert_eq!(
            client.endpoint_for(&request("eu")).unwrap(),
            "http://localhost:8085"
        );
    }

    #[test]
    fn body_carries_only_the_raw_document() {
        let request = request("us");
        let body = serde_json::to_value(ProcessBody {
            raw_document: &request.raw_document,
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({ "rawDocument": { "content": "JVBERg==", "mimeType": "application/pdf" } })
        );
    }

    #[test]
    fn parses_document_text() {
        let body = r#"{"document": {"text": "Hello", "mimeType": "application/pdf", "pages": []}, "humanReviewStatus": {"state": "SKIPPED"}}"#;
        let result = parse_process_response(body).unwrap();
        assert_eq!(result.text, "Hello");
    }

    #[test]
    fn document_without_text_is_an_extraction_error() {
        for body in [r#"{"document": {"pages": []}}"#, r#"{"document": {"text": ""}}"#] {
            let err = parse_process_response(body).unwrap_err();
            assert!(matches!(err, HandlerError::ExtractionService(_)), "{body}");
            assert!(err.to_string().contains("no text"));
        }
    }

    #[test]
    fn missing_document_is_an_extraction_error() {
        let err = parse_process_response(r#"{"humanReviewStatus": {}}"#).unwrap_err();
        assert!(matches!(err, HandlerError::ExtractionService(_)));
        assert!(err.to_string().contains("no document"));
    }

    #[test]
    fn garbage_body_is_an_extraction_error() {
        let err = parse_process_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, HandlerError::ExtractionService(_)));
    }

    mod against_local_server {
        use super::*;
        use crate::backends::stub::{
            test_service_account, unreachable_base_url, CannedHttpServer, CannedResponse,
        };
        use serde_json::json;

        const PROCESS_PATH: &str = "/v1/projects/p/locations/us/processors/proc:process";

        fn token_granted() -> CannedResponse {
            CannedResponse::json(
                200,
                json!({ "access_token": "ya29.test", "expires_in": 3599, "token_type": "Bearer" }),
            )
        }

        async fn start_google(token: CannedResponse, process: CannedResponse) -> CannedHttpServer {
            CannedHttpServer::start(move |request| {
                if request.path == "/token" {
                    token.clone()
                } else {
                    process.clone()
                }
            })
            .await
        }

        async fn process_against(server: &CannedHttpServer) -> HandlerResult<ExtractionResult> {
            let client = DocumentAiClient::new(Some(server.base_url().to_string())).unwrap();
            let credentials = test_service_account(&format!("{}/token", server.base_url()));
            client.process(&credentials, &request("us")).await
        }

        #[tokio::test]
        async fn returns_text_from_the_process_call() {
            let server = start_google(
                token_granted(),
                CannedResponse::json(200, json!({ "document": { "text": "Hello", "pages": [] } })),
            )
            .await;

            let result = process_against(&server).await.unwrap();
            assert_eq!(result.text, "Hello");

            let requests = server.requests();
            assert_eq!(requests.len(), 2);

            let token_request = &requests[0];
            assert_eq!(token_request.method, "POST");
            assert_eq!(token_request.path, "/token");
            assert!(token_request.body_contains(
                b"grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"
            ));
            assert!(token_request.body_contains(b"assertion=ey"));

            let process_request = &requests[1];
            assert_eq!(process_request.method, "POST");
            assert_eq!(process_request.path, PROCESS_PATH);
            assert_eq!(process_request.header("authorization"), Some("Bearer ya29.test"));
            let body: serde_json::Value = serde_json::from_slice(&process_request.body).unwrap();
            assert_eq!(
                body,
                json!({ "rawDocument": { "content": "JVBERg==", "mimeType": "application/pdf" } })
            );
        }

        #[tokio::test]
        async fn rejected_process_call_is_an_extraction_error() {
            let server = start_google(
                token_granted(),
                CannedResponse::json(
                    403,
                    json!({ "error": { "code": 403, "status": "PERMISSION_DENIED" } }),
                ),
            )
            .await;

            let err = process_against(&server).await.unwrap_err();
            assert!(matches!(err, HandlerError::ExtractionService(_)));
            assert!(err.to_string().contains("403"));
        }

        #[tokio::test]
        async fn rejected_token_exchange_is_an_extraction_error() {
            let server = start_google(
                CannedResponse::json(400, json!({ "error": "invalid_grant" })),
                CannedResponse::json(200, json!({ "document": { "text": "Hello" } })),
            )
            .await;

            let err = process_against(&server).await.unwrap_err();
            assert!(matches!(err, HandlerError::ExtractionService(_)));
            assert!(err.to_string().contains("Token endpoint"));

            // the process method is never reached without a token
            let requests = server.requests();
            assert_eq!(requests.len(), 1);
            assert_eq!(requests[0].path, "/token");
        }

        #[tokio::test]
        async fn undecodable_process_response_is_an_extraction_error() {
            let server = start_google(
                token_granted(),
                CannedResponse::new(200, "text/html", "<html>maintenance</html>"),
            )
            .await;

            let err = process_against(&server).await.unwrap_err();
            assert!(matches!(err, HandlerError::ExtractionService(_)));
            assert!(err.to_string().contains("Invalid process response"));
        }

        #[tokio::test]
        async fn response_without_text_is_an_extraction_error() {
            let server = start_google(
                token_granted(),
                CannedResponse::json(200, json!({ "document": { "pages": [] } })),
            )
            .await;

            let err = process_against(&server).await.unwrap_err();
            assert!(matches!(err, HandlerError::ExtractionService(_)));
        }

        #[tokio::test]
        async fn unreachable_service_is_an_extraction_error() {
            let server = start_google(
                token_granted(),
                CannedResponse::json(200, json!({ "document": { "text": "Hello" } })),
            )
            .await;
            let client = DocumentAiClient::new(Some(unreachable_base_url().await)).unwrap();
            let credentials = test_service_account(&format!("{}/token", server.base_url()));

            let err = client
                .process(&credentials, &request("us"))
                .await
                .unwrap_err();

            assert!(matches!(err, HandlerError::ExtractionService(_)));
            assert!(err.to_string().contains("failed"));
        }

        #[tokio::test]
        async fn unreachable_token_endpoint_is_an_extraction_error() {
            let client = DocumentAiClient::new(Some(unreachable_base_url().await)).unwrap();
            let credentials =
                test_service_account(&format!("{}/token", unreachable_base_url().await));

            let err = client
                .process(&credentials, &request("us"))
                .await
                .unwrap_err();

            assert!(matches!(err, HandlerError::ExtractionService(_)));
            assert!(err.to_string().contains("Token request"));
        }
    }
}
