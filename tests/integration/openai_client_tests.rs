//! OpenAI-compatible client tests against a local mock server

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{fast_batch, provider_for};
    use cds_bias_lab::core::completion::{CompletionService, OpenAiCompatibleClient, ServiceError};
    use cds_bias_lab::{BatchCoordinator, BatchJob, JobStatus, PromptTemplate, WorkItem};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn completion_body(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-123",
            "object": "chat.completion",
            "created": 1_700_000_000,
            "model": "gpt-4o-mini",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": content },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15 }
        })
    }

    #[tokio::test]
    async fn test_successful_completion_sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({
                "model": "gpt-4o-mini",
                "temperature": 0.0,
                "max_tokens": 64,
                "messages": [
                    { "role": "system", "content": "You are a physician." },
                    { "role": "user", "content": "Which drug?" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("B")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        let answer = client
            .complete("You are a physician.", "Which drug?")
            .await
            .unwrap();
        assert_eq!(answer, "B");
    }

    #[tokio::test]
    async fn test_status_codes_map_to_service_errors() {
        let cases = [
            (401, "authentication"),
            (400, "invalid_request"),
            (429, "rate_limit"),
            (503, "server"),
        ];

        for (status, kind) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
            let err = client.complete("sys", "user").await.unwrap_err();
            assert_eq!(err.kind(), kind, "status {}", status);
        }
    }

    #[tokio::test]
    async fn test_retry_after_header_is_parsed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "7")
                    .set_body_string("slow down"),
            )
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        match client.complete("sys", "user").await {
            Err(ServiceError::RateLimit { retry_after, .. }) => assert_eq!(retry_after, Some(7)),
            other => panic!("expected rate limit, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_content_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, ServiceError::MalformedResponse(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_non_json_body_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        let err = client.complete("sys", "user").await.unwrap_err();
        assert_eq!(err.kind(), "malformed_response");
    }

    #[tokio::test]
    async fn test_slow_server_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion_body("late"))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let mut provider = provider_for(&server.uri());
        provider.timeout_secs = 1;
        let client = OpenAiCompatibleClient::new(&provider).unwrap();

        let err = client.complete("sys", "user").await.unwrap_err();
        assert!(matches!(err, ServiceError::Timeout(_)));
        assert!(err.is_unreachable());
    }

    #[tokio::test]
    async fn test_coordinator_retries_transient_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("C")))
            .expect(1)
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        let coordinator = BatchCoordinator::new(Arc::new(client), fast_batch(1, 3));
        let job = BatchJob::new(
            vec![WorkItem::new("q-1", "Which test?")],
            PromptTemplate::passthrough("sys"),
        );

        let handle = coordinator.submit(job).unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();
        assert_eq!(snapshot.status, JobStatus::Completed);

        let results = coordinator.results(&handle).unwrap();
        assert_eq!(results[0].response(), Some("C"));
        assert_eq!(results[0].attempts(), 3);
    }

    #[tokio::test]
    async fn test_coordinator_does_not_retry_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .expect(2)
            .mount(&server)
            .await;

        let client = OpenAiCompatibleClient::new(&provider_for(&server.uri())).unwrap();
        let coordinator = BatchCoordinator::new(Arc::new(client), fast_batch(1, 3));
        let job = BatchJob::new(
            vec![WorkItem::new("1", "Q1"), WorkItem::new("2", "Q2")],
            PromptTemplate::passthrough("sys"),
        );

        let handle = coordinator.submit(job).unwrap();
        let snapshot = coordinator.wait(&handle).await.unwrap();

        // authentication failures are per-item failures, not an unreachable service
        assert_eq!(snapshot.status, JobStatus::Completed);
        assert_eq!(snapshot.failed, 2);
    }
}
