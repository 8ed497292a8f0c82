//! Unit tests for configuration module
//!
//! These tests validate configuration parsing, defaults, and validation.

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::config::*;

    // ====== Default Value Tests ======

    #[test]
    fn test_default_gaps() {
        assert_eq!(default_short_gap_secs(), 30);
        assert_eq!(default_long_gap_secs(), 1800);
        assert_eq!(AppConfig::default().session_gaps(), [30, 1800]);
    }

    #[test]
    fn test_default_threshold_and_terms() {
        assert!((default_link_threshold() - 1.0).abs() < f64::EPSILON);
        assert_eq!(default_top_terms(), 10);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(config.analysis.interactive_bots.is_empty());
        assert!(!config.analysis.strict_timestamps);
    }

    // ====== Parsing Tests ======

    #[test]
    fn test_parse_partial_toml() {
        let toml_str = r#"
            [analysis]
            interactive_bots = ["10001"]
            short_gap_secs = 60

            [output]
            format = "json"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.analysis.interactive_bots, vec!["10001"]);
        assert_eq!(config.analysis.short_gap_secs, 60);
        assert_eq!(config.analysis.long_gap_secs, 1800);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.output.pretty);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_empty_toml() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.top_terms(), 10);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[logging]\nlevel = \"debug\"\n\n[analysis]\nnon_interactive_bots = [\"feed@example.com\"]\ntop_terms = 5"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.analysis.non_interactive_bots, vec!["feed@example.com"]);
        assert_eq!(config.top_terms(), 5);
    }

    #[test]
    fn test_from_file_missing() {
        let result = AppConfig::from_file("/nonexistent/chatlens.toml");
        assert!(matches!(result, Err(crate::ChatLensError::Io(_))));
    }

    #[test]
    fn test_from_file_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis\ntop_terms = ").unwrap();
        let result = AppConfig::from_file(file.path());
        assert!(matches!(result, Err(crate::ChatLensError::TomlParsing(_))));
    }

    // ====== Validation Tests ======

    #[test]
    fn test_validate_rejects_non_positive_gap() {
        let mut config = AppConfig::default();
        config.analysis.short_gap_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_gaps() {
        let mut config = AppConfig::default();
        config.analysis.short_gap_secs = 3600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let mut config = AppConfig::default();
        config.analysis.link_threshold = -0.5;
        assert!(config.validate().is_err());
        config.analysis.link_threshold = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_top_terms() {
        let mut config = AppConfig::default();
        config.analysis.top_terms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.session_gaps(), config.session_gaps());
    }
}
