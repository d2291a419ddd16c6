use anyhow::{Context, Result};
use url::Url;

use crate::logging::{log, obj, v_str, Domain, Level};

#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the evaluation service; `/evaluate` is resolved against it.
    pub base_url: String,
    pub scenarios_file: Option<String>,
    /// Inline catalog payload, used when no file is configured.
    pub scenarios_json: Option<String>,
    /// Drop responses superseded by a newer request from the same card.
    /// Off by default: the last response to arrive is rendered.
    pub discard_stale: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            scenarios_file: None,
            scenarios_json: None,
            discard_stale: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("GUARD_BASE_URL").unwrap_or(defaults.base_url),
            scenarios_file: std::env::var("SCENARIOS_FILE").ok(),
            scenarios_json: std::env::var("SCENARIOS_JSON").ok(),
            discard_stale: discard_stale_from(
                std::env::var("DISCARD_STALE").ok().as_deref(),
                defaults.discard_stale,
            ),
        }
    }

    /// Raw catalog payload for the page. A configured file must be readable;
    /// its contents are still parsed leniently by the catalog loader.
    pub fn scenario_payload(&self) -> Result<Option<String>> {
        match (&self.scenarios_file, &self.scenarios_json) {
            (Some(path), _) => std::fs::read_to_string(path)
                .map(Some)
                .with_context(|| format!("reading SCENARIOS_FILE {}", path)),
            (None, inline) => Ok(inline.clone()),
        }
    }

    pub fn evaluate_url(&self) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("invalid GUARD_BASE_URL {:?}", self.base_url))?;
        base.join("/evaluate")
            .with_context(|| format!("cannot resolve /evaluate against {}", base))
    }
}

fn discard_stale_from(raw: Option<&str>, default: bool) -> bool {
    let Some(raw) = raw else {
        return default;
    };
    match parse_bool(raw) {
        Some(flag) => flag,
        None => {
            log(
                Level::Warn,
                Domain::System,
                "config_invalid",
                obj(&[
                    ("key", v_str("DISCARD_STALE")),
                    ("value", v_str(raw)),
                    ("fallback", serde_json::json!(default)),
                ]),
            );
            default
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_url_replaces_path() {
        let cfg = Config {
            base_url: "http://guard.local:9000/ui/index.html".to_string(),
            ..Config::default()
        };
        assert_eq!(cfg.evaluate_url().unwrap().as_str(), "http://guard.local:9000/evaluate");
    }

    #[test]
    fn test_evaluate_url_rejects_garbage() {
        let cfg = Config {
            base_url: "not a url".to_string(),
            ..Config::default()
        };
        assert!(cfg.evaluate_url().is_err());
    }

    #[test]
    fn test_scenario_payload_prefers_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[]").unwrap();
        let cfg = Config {
            scenarios_file: Some(file.path().to_string_lossy().into_owned()),
            scenarios_json: Some("ignored".to_string()),
            ..Config::default()
        };
        assert_eq!(cfg.scenario_payload().unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_scenario_payload_inline_or_missing() {
        let inline = Config {
            scenarios_json: Some("[{}]".to_string()),
            ..Config::default()
        };
        assert_eq!(inline.scenario_payload().unwrap().as_deref(), Some("[{}]"));
        assert_eq!(Config::default().scenario_payload().unwrap(), None);

        let missing = Config {
            scenarios_file: Some("/nonexistent/catalog.json".to_string()),
            ..Config::default()
        };
        assert!(missing.scenario_payload().is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_discard_stale_defaults_off() {
        assert!(!Config::default().discard_stale);
        assert!(!discard_stale_from(None, false));
        assert!(discard_stale_from(Some("yes"), false));
    }

    #[test]
    fn test_unparseable_discard_stale_falls_back() {
        assert!(!discard_stale_from(Some("maybe"), false));
        assert!(discard_stale_from(Some(""), true));
    }
}
