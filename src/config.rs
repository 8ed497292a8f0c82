use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::interaction::DEFAULT_LINK_THRESHOLD;
use crate::interaction::LONG_GAP_SECS;
use crate::interaction::SHORT_GAP_SECS;
use crate::tfidf::DEFAULT_TOP_TERMS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Also write a daily rolling log under `logs/`
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            log_to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Bots that answer commands; each reply also drops the command before it
    #[serde(default)]
    pub interactive_bots: Vec<String>,
    /// Bots that post on their own
    #[serde(default)]
    pub non_interactive_bots: Vec<String>,
    /// Extra salted digests to drop, on top of the built-in table
    #[serde(default)]
    pub extra_blacklist: Vec<String>,
    #[serde(default = "default_short_gap_secs")]
    pub short_gap_secs: i64,
    #[serde(default = "default_long_gap_secs")]
    pub long_gap_secs: i64,
    #[serde(default = "default_link_threshold")]
    pub link_threshold: f64,
    #[serde(default = "default_top_terms")]
    pub top_terms: usize,
    /// Fail on an impossible header timestamp instead of skipping the message
    #[serde(default)]
    pub strict_timestamps: bool,
}

pub(crate) fn default_short_gap_secs() -> i64 {
    SHORT_GAP_SECS
}

pub(crate) fn default_long_gap_secs() -> i64 {
    LONG_GAP_SECS
}

pub(crate) fn default_link_threshold() -> f64 {
    DEFAULT_LINK_THRESHOLD
}

pub(crate) fn default_top_terms() -> usize {
    DEFAULT_TOP_TERMS
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            interactive_bots: Vec::new(),
            non_interactive_bots: Vec::new(),
            extra_blacklist: Vec::new(),
            short_gap_secs: default_short_gap_secs(),
            long_gap_secs: default_long_gap_secs(),
            link_threshold: default_link_threshold(),
            top_terms: default_top_terms(),
            strict_timestamps: false,
        }
    }
}

/// Report format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default paths.
    ///
    /// Tries `chatlens.toml`, then `config.example.toml`, and falls back to
    /// built-in defaults when neither exists.
    pub fn load() -> crate::Result<Self> {
        if Path::new("chatlens.toml").exists() {
            Self::from_file("chatlens.toml")
        } else if Path::new("config.example.toml").exists() {
            tracing::warn!("Using config.example.toml. Create chatlens.toml to customize.");
            Self::from_file("config.example.toml")
        } else {
            Ok(Self::default())
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> crate::Result<()> {
        let analysis = &self.analysis;
        if analysis.short_gap_secs <= 0 || analysis.long_gap_secs <= 0 {
            return Err(crate::ChatLensError::ConfigError(
                "session gaps must be positive".to_string(),
            ));
        }
        if analysis.short_gap_secs > analysis.long_gap_secs {
            return Err(crate::ChatLensError::ConfigError(format!(
                "short_gap_secs ({}) exceeds long_gap_secs ({})",
                analysis.short_gap_secs, analysis.long_gap_secs
            )));
        }
        if analysis.link_threshold.is_nan() || analysis.link_threshold < 0.0 {
            return Err(crate::ChatLensError::ConfigError(
                "link_threshold must be a non-negative number".to_string(),
            ));
        }
        if analysis.top_terms == 0 {
            return Err(crate::ChatLensError::ConfigError(
                "top_terms must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Get log level
    pub fn log_level(&self) -> &str {
        &self.logging.level
    }

    /// Get the short and long session gaps
    pub fn session_gaps(&self) -> [i64; 2] {
        [self.analysis.short_gap_secs, self.analysis.long_gap_secs]
    }

    /// Get number of words shown per identity
    pub fn top_terms(&self) -> usize {
        self.analysis.top_terms
    }
}
