//! Structured logging for the guard demo front end.
//!
//! Every record is one JSON line on stderr (stdout carries the rendered page).
//! Records share a `run_id` and a monotonically increasing `seq` so a session
//! can be replayed in order. Setting `LOG_DIR` additionally appends records to
//! `<LOG_DIR>/<run_id>/events.jsonl`.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

// =============================================================================
// Log Levels
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_LEVEL").as_deref().unwrap_or("info"))
    }

    pub fn parse(raw: &str) -> Self {
        match raw {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "fatal" => Level::Fatal,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Fatal => "fatal",
        }
    }
}

// =============================================================================
// Log Domains (categories for filtering)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Catalog, // Scenario payload parsing
    Request, // Evaluation round trips
    Render,  // Result panel updates
    Ui,      // Button state, card activation
    System,  // Startup, mount, shutdown
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Catalog => "catalog",
            Domain::Request => "request",
            Domain::Render => "render",
            Domain::Ui => "ui",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS is a comma-separated list or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

// =============================================================================
// Run context
// =============================================================================

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static RUN_CONTEXT: OnceLock<RunContext> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

#[derive(Debug)]
struct RunContext {
    run_id: String,
    events: Option<Mutex<BufWriter<File>>>,
}

fn ensure_run_context() -> &'static RunContext {
    RUN_CONTEXT.get_or_init(|| {
        let run_id = std::env::var("RUN_ID")
            .unwrap_or_else(|_| format!("r-{}-{}", ts_epoch_ms(), process::id()));
        let events = std::env::var("LOG_DIR").ok().and_then(|base| {
            let mut run_dir = PathBuf::from(base);
            run_dir.push(&run_id);
            if let Err(err) = create_dir_all(&run_dir) {
                eprintln!("[log] failed to create run dir: {}", err);
                return None;
            }
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(run_dir.join("events.jsonl"))
            {
                Ok(file) => Some(Mutex::new(BufWriter::new(file))),
                Err(err) => {
                    eprintln!("[log] failed to open events log: {}", err);
                    None
                }
            }
        });
        RunContext { run_id, events }
    })
}

fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    let redacted = Value::String("[REDACTED]".to_string());
    for key in ["authorization", "Authorization", "cookie", "api_key", "token"] {
        if fields.contains_key(key) {
            fields.insert(key.to_string(), redacted.clone());
        }
    }
    fields
}

fn split_fields(mut fields: Map<String, Value>) -> (Map<String, Value>, Map<String, Value>) {
    let mut top = Map::new();
    for key in ["scenario_id", "variant_key", "ticket", "msg"] {
        if let Some(value) = fields.remove(key) {
            top.insert(key.to_string(), value);
        }
    }
    (top, fields)
}

// =============================================================================
// Core logging functions
// =============================================================================

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

pub fn ts_epoch_ms() -> u64 {
    Utc::now().timestamp_millis() as u64
}

/// Emit a structured log entry
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }
    let ctx = ensure_run_context();
    let line = format_record(&ctx.run_id, level, domain, event, fields);
    if let Some(writer) = &ctx.events {
        if let Ok(mut w) = writer.lock() {
            let _ = writeln!(w, "{}", line);
            let _ = w.flush();
        }
    }
    eprintln!("{}", line);
}

fn format_record(
    run_id: &str,
    level: Level,
    domain: Domain,
    event: &str,
    fields: Map<String, Value>,
) -> String {
    let (mut top, data) = split_fields(sanitize_fields(fields));

    let msg = top.remove("msg").unwrap_or(Value::String(String::new()));
    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("run_id".to_string(), json!(run_id));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("component".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("msg".to_string(), msg);
    for (k, v) in top {
        entry.insert(k, v);
    }
    entry.insert("data".to_string(), Value::Object(data));
    Value::Object(entry).to_string()
}

// =============================================================================
// Domain helpers
// =============================================================================

pub fn log_request_failed(scenario_id: &str, variant_key: &str, error: &str) {
    log(
        Level::Error,
        Domain::Request,
        "evaluate_failed",
        obj(&[
            ("scenario_id", v_str(scenario_id)),
            ("variant_key", v_str(variant_key)),
            ("msg", v_str(error)),
        ]),
    );
}

pub fn log_verdict(scenario_id: &str, variant_key: &str, blocked: bool, score: f64, findings: usize) {
    log(
        Level::Info,
        Domain::Render,
        "verdict",
        obj(&[
            ("scenario_id", v_str(scenario_id)),
            ("variant_key", v_str(variant_key)),
            ("blocked", Value::Bool(blocked)),
            ("score", v_num(score)),
            ("findings", json!(findings)),
        ]),
    );
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

// =============================================================================
// Request Scope
// =============================================================================

/// Timing scope that emits a structured record on drop.
///
/// Outcome fields are attached with [`RequestScope::record`] before the scope
/// ends; a scope dropped without any outcome is logged as `abandoned`.
pub struct RequestScope {
    label: &'static str,
    context: Map<String, Value>,
    started: Instant,
    outcome: Option<&'static str>,
}

impl RequestScope {
    pub fn new(label: &'static str, fields: &[(&str, Value)]) -> Self {
        Self {
            label,
            context: obj(fields),
            started: Instant::now(),
            outcome: None,
        }
    }

    pub fn record(&mut self, outcome: &'static str, fields: &[(&str, Value)]) {
        self.outcome = Some(outcome);
        for (k, v) in fields {
            self.context.insert((*k).to_string(), v.clone());
        }
    }
}

impl Drop for RequestScope {
    fn drop(&mut self) {
        let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let mut fields = std::mem::take(&mut self.context);
        fields.insert("label".to_string(), v_str(self.label));
        fields.insert("outcome".to_string(), v_str(self.outcome.unwrap_or("abandoned")));
        fields.insert("elapsed_ms".to_string(), v_num(elapsed_ms));
        log(Level::Debug, Domain::Request, "request_timing", fields);
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
    }

    #[test]
    fn test_level_parse_defaults_to_info() {
        assert_eq!(Level::parse("warn"), Level::Warn);
        assert_eq!(Level::parse("verbose"), Level::Info);
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_record_layout() {
        let line = format_record(
            "r-test",
            Level::Warn,
            Domain::Catalog,
            "payload_malformed",
            obj(&[
                ("msg", v_str("bad json")),
                ("scenario_id", v_str("ssrf")),
                ("token", v_str("secret")),
                ("bytes", v_num(12.0)),
            ]),
        );
        let rec: Value = serde_json::from_str(&line).unwrap();
        assert_eq!(rec["run_id"], "r-test");
        assert_eq!(rec["lvl"], "WARN");
        assert_eq!(rec["component"], "catalog");
        assert_eq!(rec["event"], "payload_malformed");
        assert_eq!(rec["msg"], "bad json");
        assert_eq!(rec["scenario_id"], "ssrf");
        assert_eq!(rec["data"]["token"], "[REDACTED]");
        assert_eq!(rec["data"]["bytes"], 12.0);
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
