//! Scenario catalog materialization.
//!
//! The host page hands over the catalog as an opaque JSON string. Anything
//! that is not a well-formed array of scenarios degrades to an empty catalog;
//! loading never fails.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::logging::{log, obj, v_str, Domain, Level};
use crate::model::Scenario;

pub fn load(raw: Option<&str>) -> Vec<Scenario> {
    let raw = match raw.map(str::trim) {
        Some(s) if !s.is_empty() => s,
        _ => {
            log(
                Level::Debug,
                Domain::Catalog,
                "payload_absent",
                obj(&[("msg", v_str("no scenario payload supplied"))]),
            );
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<Scenario>>(raw) {
        Ok(scenarios) => {
            log(
                Level::Info,
                Domain::Catalog,
                "loaded",
                obj(&[
                    ("count", json!(scenarios.len())),
                    ("sha256", v_str(&payload_digest(raw))),
                ]),
            );
            scenarios
        }
        Err(err) => {
            log(
                Level::Warn,
                Domain::Catalog,
                "payload_malformed",
                obj(&[
                    ("msg", v_str(&err.to_string())),
                    ("bytes", json!(raw.len())),
                ]),
            );
            Vec::new()
        }
    }
}

fn payload_digest(raw: &str) -> String {
    hex::encode(Sha256::digest(raw.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"[
        {"id": "ssrf", "title": "Outbound fetch", "summary": "Agent calls a URL",
         "variants": [
            {"key": "safe", "label": "Public host", "description": "Allowed domain", "expected_blocked": false},
            {"key": "internal", "label": "Internal IP", "description": "Private range", "expected_blocked": true}
         ]},
        {"id": "leak", "title": "Secret leak", "summary": "Agent echoes a key",
         "variants": [{"key": "raw", "label": "Raw key", "description": "Prints the key", "expected_blocked": null}]}
    ]"#;

    #[test]
    fn test_load_well_formed_payload() {
        let scenarios = load(Some(PAYLOAD));
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].id, "ssrf");
        assert_eq!(scenarios[0].variants.len(), 2);
        assert_eq!(scenarios[0].variants[1].expected_blocked, Some(true));
        assert_eq!(scenarios[1].variants[0].expected_blocked, None);
    }

    #[test]
    fn test_absent_or_empty_payload_is_empty() {
        assert!(load(None).is_empty());
        assert!(load(Some("")).is_empty());
        assert!(load(Some("   \n")).is_empty());
    }

    #[test]
    fn test_malformed_payload_is_empty() {
        assert!(load(Some("[{\"id\": ")).is_empty());
        assert!(load(Some("{\"id\": \"ssrf\"}")).is_empty());
        assert!(load(Some("[{\"id\": \"ssrf\"}]")).is_empty());
        assert!(load(Some("null")).is_empty());
    }

    #[test]
    fn test_digest_is_stable() {
        assert_eq!(payload_digest("[]"), payload_digest("[]"));
        assert_eq!(payload_digest("[]").len(), 64);
    }
}
