#[cfg(test)]
mod gemini_tests {
    use atscore::{AtsError, GeminiClient, GeminiModel};
    use std::str::FromStr;

    #[test]
    fn empty_api_key_is_rejected() {
        let err = GeminiClient::new("").unwrap_err();
        assert!(matches!(err, AtsError::Unexpected(_)));
    }

    #[test]
    fn from_env_reports_the_missing_credential_by_name() {
        // Deterministic either way: with the key set construction succeeds,
        // without it the error names the variable rather than a network fault.
        match std::env::var("GEMINI_API_KEY") {
            Ok(_) => assert!(GeminiClient::from_env().is_ok()),
            Err(_) => {
                let err = GeminiClient::from_env().unwrap_err();
                assert_eq!(err, AtsError::MissingCredential("GEMINI_API_KEY"));
                assert_eq!(
                    format!("{}", err),
                    "Missing credential: GEMINI_API_KEY is not set"
                );
            }
        }
    }

    #[test]
    fn known_model_names_map_to_variants() {
        assert_eq!(
            GeminiModel::from_string("gemini-2.5-flash-preview-09-2025"),
            GeminiModel::Gemini25FlashPreview0925
        );
        assert_eq!(
            GeminiModel::from_string("gemini-2.5-pro"),
            GeminiModel::Gemini25Pro
        );
        assert_eq!(
            GeminiModel::from_string("gemini-flash-latest"),
            GeminiModel::GeminiFlashLatest
        );
    }

    #[test]
    fn unknown_model_names_become_custom() {
        let model = GeminiModel::from_string("gemini-experimental-123");
        assert_eq!(
            model,
            GeminiModel::Custom("gemini-experimental-123".to_string())
        );
        assert_eq!(model.as_str(), "gemini-experimental-123");
    }

    #[test]
    fn from_str_never_fails() {
        let model = GeminiModel::from_str("anything-at-all").unwrap();
        assert_eq!(model.as_str(), "anything-at-all");
    }

    #[test]
    fn round_trips_variant_names() {
        for name in [
            "gemini-2.5-flash-preview-09-2025",
            "gemini-2.5-pro",
            "gemini-2.5-flash",
            "gemini-2.5-flash-lite",
            "gemini-pro-latest",
            "gemini-flash-latest",
        ] {
            assert_eq!(GeminiModel::from_string(name).as_str(), name);
        }
    }
}
