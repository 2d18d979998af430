//! Behavioral tests for the retrying analysis call, driven by a scripted
//! in-memory backend and tokio's paused clock so backoff timing is asserted
//! without real waiting.

#[cfg(test)]
mod analyzer_tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use atscore::{AnalysisRequest, Analyzer, AtsError, LlmBackend, Result, Schema};
    use tokio::time::Instant;

    struct Inner {
        replies: Mutex<VecDeque<Result<String>>>,
        calls: AtomicUsize,
    }

    /// Backend fake that plays back a fixed sequence of replies and counts
    /// how many times it was called.
    #[derive(Clone)]
    struct ScriptedBackend {
        inner: Arc<Inner>,
    }

    impl ScriptedBackend {
        fn new(replies: Vec<Result<String>>) -> Self {
            Self {
                inner: Arc::new(Inner {
                    replies: Mutex::new(replies.into()),
                    calls: AtomicUsize::new(0),
                }),
            }
        }

        fn calls(&self) -> usize {
            self.inner.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmBackend for ScriptedBackend {
        async fn submit(&self, _system: &str, _user: &str, _schema: &Schema) -> Result<String> {
            self.inner.calls.fetch_add(1, Ordering::SeqCst);
            self.inner
                .replies
                .lock()
                .unwrap()
                .pop_front()
                .expect("backend called more times than scripted")
        }
    }

    fn request() -> AnalysisRequest {
        AnalysisRequest {
            resume_text: "resume".to_string(),
            jd_text: "job description".to_string(),
        }
    }

    fn good_json() -> String {
        r#"{
            "score": 87,
            "summary": "S",
            "feedback": {
                "keywordMatch": "a",
                "contentImpact": "b",
                "formattingAndStructure": "c"
            }
        }"#
        .to_string()
    }

    fn transient(status: u16) -> AtsError {
        AtsError::Api {
            status,
            message: "try again later".to_string(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn conforming_reply_round_trips_on_first_attempt() {
        let backend = ScriptedBackend::new(vec![Ok(good_json())]);
        let analyzer = Analyzer::new(backend.clone());

        let start = Instant::now();
        let report = analyzer.analyze(&request()).await.unwrap();

        assert_eq!(report.score, 87);
        assert_eq!(report.summary, "S");
        assert_eq!(report.feedback.keyword_match, "a");
        assert_eq!(report.feedback.content_impact, "b");
        assert_eq!(report.feedback.formatting_and_structure, "c");

        assert_eq!(backend.calls(), 1);
        // No retries means no backoff sleeps
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried_with_exponential_backoff() {
        let backend = ScriptedBackend::new(vec![
            Err(transient(429)),
            Err(transient(503)),
            Ok(good_json()),
        ]);
        let analyzer = Analyzer::new(backend.clone());

        let start = Instant::now();
        let report = analyzer.analyze(&request()).await.unwrap();

        assert_eq!(report.score, 87);
        assert_eq!(backend.calls(), 3);

        // 1s after the first failure, 2s after the second
        let elapsed = start.elapsed();
        assert!(
            elapsed >= Duration::from_secs(3) && elapsed < Duration::from_millis(3100),
            "expected ~3s of backoff, got {elapsed:?}"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_counts_as_transient() {
        let backend = ScriptedBackend::new(vec![Err(AtsError::Timeout), Ok(good_json())]);
        let analyzer = Analyzer::new(backend.clone());

        let report = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(report.score, 87);
        assert_eq!(backend.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_after_three_transient_failures() {
        let backend = ScriptedBackend::new(vec![
            Err(transient(503)),
            Err(transient(503)),
            Err(transient(429)),
        ]);
        let analyzer = Analyzer::new(backend.clone());

        let err = analyzer.analyze(&request()).await.unwrap_err();

        match err {
            AtsError::ApiExhausted {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("429"), "last error was: {last_error}");
            }
            other => panic!("expected ApiExhausted, got {other:?}"),
        }
        // No 4th attempt
        assert_eq!(backend.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_json_is_a_schema_violation_and_not_retried() {
        let backend = ScriptedBackend::new(vec![Ok("this is not json".to_string())]);
        let analyzer = Analyzer::new(backend.clone());

        let start = Instant::now();
        let err = analyzer.analyze(&request()).await.unwrap_err();

        assert!(matches!(err, AtsError::SchemaViolation(_)));
        assert_eq!(backend.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn missing_field_is_a_schema_violation() {
        let backend = ScriptedBackend::new(vec![Ok(
            r#"{"score": 87, "summary": "S"}"#.to_string()
        )]);
        let analyzer = Analyzer::new(backend.clone());

        let err = analyzer.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, AtsError::SchemaViolation(_)));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn out_of_range_score_is_a_schema_violation() {
        let reply = r#"{
            "score": 150,
            "summary": "S",
            "feedback": {
                "keywordMatch": "a",
                "contentImpact": "b",
                "formattingAndStructure": "c"
            }
        }"#;
        let backend = ScriptedBackend::new(vec![Ok(reply.to_string())]);
        let analyzer = Analyzer::new(backend.clone());

        let err = analyzer.analyze(&request()).await.unwrap_err();
        assert!(matches!(err, AtsError::SchemaViolation(_)));
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn fenced_json_reply_is_unwrapped_before_parsing() {
        let fenced = format!("```json\n{}\n```", good_json());
        let backend = ScriptedBackend::new(vec![Ok(fenced)]);
        let analyzer = Analyzer::new(backend.clone());

        let report = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(report.score, 87);
    }

    #[tokio::test(start_paused = true)]
    async fn non_transient_api_error_is_returned_immediately() {
        let backend = ScriptedBackend::new(vec![Err(AtsError::Api {
            status: 400,
            message: "bad request".to_string(),
        })]);
        let analyzer = Analyzer::new(backend.clone());

        let start = Instant::now();
        let err = analyzer.analyze(&request()).await.unwrap_err();

        assert_eq!(
            err,
            AtsError::Api {
                status: 400,
                message: "bad request".to_string(),
            }
        );
        assert_eq!(backend.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn configured_retry_budget_is_honored() {
        let backend = ScriptedBackend::new(vec![
            Err(transient(503)),
            Err(transient(503)),
            Err(transient(503)),
            Err(transient(503)),
            Ok(good_json()),
        ]);
        let analyzer = Analyzer::new(backend.clone()).max_retries(5);

        let report = analyzer.analyze(&request()).await.unwrap();
        assert_eq!(report.score, 87);
        assert_eq!(backend.calls(), 5);
    }
}
