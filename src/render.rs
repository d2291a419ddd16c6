//! Result panel rendering.
//!
//! The panel owns no data: every render fully overwrites the injected
//! elements, so whatever was shown before (result or error) is gone.

use std::cell::Cell;

use crate::dom::{self, append, make_element, Node};
use crate::logging::{log, obj, v_str, Domain, Level};
use crate::model::{EvaluationResult, Finding};
use crate::page::PanelElements;

const BADGE_FAIL: &str = "sk-badge sk-badge--fail";
const BADGE_PASS: &str = "sk-badge sk-badge--pass";
pub const NO_FINDINGS: &str = "No findings: guard passed";
pub const REPORT_LINK_TEXT: &str = "View full report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shown {
    Error,
    Result,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Placeholder,
    Shown(Shown),
}

pub struct ResultPanel {
    els: PanelElements,
    state: Cell<PanelState>,
}

impl ResultPanel {
    pub fn new(els: PanelElements) -> Self {
        Self {
            els,
            state: Cell::new(PanelState::Placeholder),
        }
    }

    pub fn state(&self) -> PanelState {
        self.state.get()
    }

    pub fn elements(&self) -> &PanelElements {
        &self.els
    }

    pub fn render_error(&self, message: &str) {
        self.reveal(Shown::Error);
        dom::set_text(&self.els.title, "Error");
        dom::set_attr(&self.els.status, "class", BADGE_FAIL);
        dom::set_text(&self.els.status, "Error");
        dom::set_text(&self.els.reason, message);
        dom::set_text(&self.els.score, "");
        dom::remove_attr(&self.els.score, "data-risk");
        self.clear_expectation();
        dom::clear(&self.els.findings);
        dom::clear(&self.els.report);
        log(
            Level::Debug,
            Domain::Render,
            "error_shown",
            obj(&[("msg", v_str(message))]),
        );
    }

    pub fn render_results(&self, data: &EvaluationResult) {
        self.reveal(Shown::Result);
        dom::set_text(
            &self.els.title,
            &format!("{} · {}", data.scenario.title, data.scenario.variant),
        );

        let (class, label) = if data.blocked {
            (BADGE_FAIL, "Blocked")
        } else {
            (BADGE_PASS, "Allowed")
        };
        dom::set_attr(&self.els.status, "class", class);
        dom::set_text(&self.els.status, label);

        dom::set_text(&self.els.reason, &data.reason);
        dom::set_text(&self.els.score, &format_score(data.score));
        dom::set_attr(&self.els.score, "data-risk", data.risk_band().as_str());

        match data.expected_blocked {
            Some(expected) if expected == data.blocked => {
                dom::set_attr(&self.els.expectation, "class", "sk-expect sk-expect--match");
                dom::set_text(&self.els.expectation, "Matches expected verdict");
            }
            Some(expected) => {
                let want = if expected { "Blocked" } else { "Allowed" };
                dom::set_attr(&self.els.expectation, "class", "sk-expect sk-expect--mismatch");
                dom::set_text(&self.els.expectation, &format!("Expected {}", want));
            }
            None => self.clear_expectation(),
        }

        render_findings(&self.els.findings, &data.findings);

        dom::clear(&self.els.report);
        if let Some(url) = &data.report_url {
            let link = make_element("a", Some("sk-report-link"), Some(REPORT_LINK_TEXT));
            dom::set_attr(&link, "href", url);
            dom::set_attr(&link, "target", "_blank");
            dom::set_attr(&link, "rel", "noopener noreferrer");
            append(&self.els.report, link);
        }
    }

    fn reveal(&self, shown: Shown) {
        dom::add_class(&self.els.placeholder, "hidden");
        dom::remove_class(&self.els.card, "hidden");
        self.state.set(PanelState::Shown(shown));
    }

    fn clear_expectation(&self) {
        dom::set_attr(&self.els.expectation, "class", "sk-expect");
        dom::set_text(&self.els.expectation, "");
    }
}

pub fn format_score(score: f64) -> String {
    format!("Risk score: {:.2}", score)
}

fn render_findings(container: &Node, findings: &[Finding]) {
    dom::clear(container);

    if findings.is_empty() {
        append(container, make_element("p", Some("sk-finding-empty"), Some(NO_FINDINGS)));
        return;
    }

    for finding in findings {
        let card = make_element("div", Some("sk-finding"), None);
        let header = format!("{} · {}", finding.kind, finding.severity.as_str().to_uppercase());
        append(&card, make_element("h3", None, Some(&header)));
        append(&card, make_element("p", Some("sk-finding-details"), Some(&finding.details)));

        if !finding.evidence.is_empty() {
            let meta = make_element("div", Some("sk-finding-meta"), None);
            for (key, value) in &finding.evidence {
                let rendered = serde_json::to_string(value).unwrap_or_default();
                append(&meta, make_element("div", None, Some(&format!("{}: {}", key, rendered))));
            }
            append(&card, meta);
        }
        append(container, card);
    }
}
