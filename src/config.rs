//! Client configuration
//!
//! Settings come from environment variables; command line flags may
//! override individual values afterwards.

use std::env;
use std::time::Duration;

use url::Url;

use crate::api::SyncError;

// Environment variable names
pub const ENV_API_URL: &str = "NOTES_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "NOTES_TIMEOUT_SECS";
pub const ENV_DICTATION_COMMAND: &str = "NOTES_DICTATION_COMMAND";
pub const ENV_REJECT_EMPTY: &str = "NOTES_REJECT_EMPTY";

const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What to do with a draft whose title and content are both blank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDraftPolicy {
    /// Send it; the server accepts empty notes
    #[default]
    Allow,
    /// Refuse locally without contacting the server
    Reject,
}

impl EmptyDraftPolicy {
    fn from_flag(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Self::Reject,
            _ => Self::Allow,
        }
    }
}

/// Configuration for the notes client
#[derive(Debug, Clone, Default)]
pub struct ClientConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub dictation_command: Option<String>,
    pub empty_drafts: EmptyDraftPolicy,
}

impl ClientConfig {
    /// Load configuration from the process environment
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let timeout_secs = non_empty(ENV_TIMEOUT_SECS).and_then(|v| match v.trim().parse::<u64>() {
            Ok(secs) => Some(secs),
            Err(_) => {
                log::warn!("ignoring {}={:?}: not a number of seconds", ENV_TIMEOUT_SECS, v);
                None
            }
        });

        Self {
            api_url: non_empty(ENV_API_URL),
            timeout_secs,
            dictation_command: non_empty(ENV_DICTATION_COMMAND),
            empty_drafts: non_empty(ENV_REJECT_EMPTY)
                .map(|v| EmptyDraftPolicy::from_flag(&v))
                .unwrap_or_default(),
        }
    }

    /// Get the effective API URL (with default)
    pub fn effective_api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    /// Request timeout; `None` when disabled with a value of 0
    pub fn effective_timeout(&self) -> Option<Duration> {
        match self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS) {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Parse the API URL, rejecting anything that cannot carry a path
    pub fn base_url(&self) -> Result<Url, SyncError> {
        let raw = self.effective_api_url();
        let url = Url::parse(raw).map_err(|_| SyncError::InvalidBaseUrl(raw.to_string()))?;
        if url.cannot_be_a_base() || !matches!(url.scheme(), "http" | "https") {
            return Err(SyncError::InvalidBaseUrl(raw.to_string()));
        }
        Ok(url)
    }

    /// Dictation is only offered when a recognizer command is configured
    pub fn dictation_enabled(&self) -> bool {
        self.dictation_command.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.effective_api_url(), "http://127.0.0.1:8000");
        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.empty_drafts, EmptyDraftPolicy::Allow);
        assert!(!config.dictation_enabled());
    }

    #[test]
    fn test_values_from_environment() {
        let config = config_from(&[
            (ENV_API_URL, "https://notes.example.com/base"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_DICTATION_COMMAND, "whisper-stream --stdout"),
            (ENV_REJECT_EMPTY, "yes"),
        ]);
        assert_eq!(config.effective_api_url(), "https://notes.example.com/base");
        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(5)));
        assert!(config.dictation_enabled());
        assert_eq!(config.empty_drafts, EmptyDraftPolicy::Reject);
    }

    #[test]
    fn test_zero_timeout_disables() {
        let config = config_from(&[(ENV_TIMEOUT_SECS, "0")]);
        assert_eq!(config.effective_timeout(), None);
    }

    #[test]
    fn test_bad_timeout_falls_back_to_default() {
        let config = config_from(&[(ENV_TIMEOUT_SECS, "soon")]);
        assert!(config.timeout_secs.is_none());
        assert_eq!(config.effective_timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = config_from(&[(ENV_API_URL, "  "), (ENV_DICTATION_COMMAND, "")]);
        assert!(config.api_url.is_none());
        assert!(!config.dictation_enabled());
    }

    #[test]
    fn test_reject_flag_values() {
        for value in ["1", "true", "TRUE", "on"] {
            assert_eq!(EmptyDraftPolicy::from_flag(value), EmptyDraftPolicy::Reject);
        }
        for value in ["0", "false", "no", "whatever"] {
            assert_eq!(EmptyDraftPolicy::from_flag(value), EmptyDraftPolicy::Allow);
        }
    }

    #[test]
    fn test_base_url_validation() {
        assert!(config_from(&[]).base_url().is_ok());
        assert!(config_from(&[(ENV_API_URL, "not a url")]).base_url().is_err());
        assert!(config_from(&[(ENV_API_URL, "mailto:me@example.com")])
            .base_url()
            .is_err());
        assert!(config_from(&[(ENV_API_URL, "ftp://example.com")])
            .base_url()
            .is_err());
    }
}
