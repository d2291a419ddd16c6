//! Host page skeleton and element lookup.

use anyhow::{anyhow, Result};

use crate::dom::{self, append, make_element, set_attr, Node};

pub const APP_ROOT_ID: &str = "sk-app";
pub const SCENARIO_GRID_ID: &str = "scenario-grid";
pub const SCENARIOS_ATTR: &str = "data-scenarios";

/// Element handles the result panel writes into.
#[derive(Debug, Clone)]
pub struct PanelElements {
    pub placeholder: Node,
    pub card: Node,
    pub title: Node,
    pub status: Node,
    pub reason: Node,
    pub score: Node,
    pub expectation: Node,
    pub findings: Node,
    pub report: Node,
}

impl PanelElements {
    pub fn lookup(root: &Node) -> Result<Self> {
        Ok(Self {
            placeholder: require(root, "results-placeholder")?,
            card: require(root, "results-card")?,
            title: require(root, "result-title")?,
            status: require(root, "result-status")?,
            reason: require(root, "result-reason")?,
            score: require(root, "result-score")?,
            expectation: require(root, "result-expectation")?,
            findings: require(root, "result-findings")?,
            report: require(root, "result-report")?,
        })
    }
}

pub fn require(root: &Node, id: &str) -> Result<Node> {
    dom::find_by_id(root, id).ok_or_else(|| anyhow!("page is missing element #{}", id))
}

/// Builds the page the front end mounts into. `scenarios` is the raw catalog
/// payload placed on the root element; `None` leaves the attribute off.
pub fn skeleton(scenarios: Option<&str>) -> Node {
    let root = with_id(make_element("main", Some("sk-app"), None), APP_ROOT_ID);
    if let Some(payload) = scenarios {
        set_attr(&root, SCENARIOS_ATTR, payload);
    }

    append(&root, with_id(make_element("section", Some("sk-grid"), None), SCENARIO_GRID_ID));

    let results = make_element("section", Some("sk-results"), None);
    append(
        &results,
        with_id(
            make_element("p", Some("sk-placeholder"), Some("Pick a scenario variant to run the guard.")),
            "results-placeholder",
        ),
    );
    let card = with_id(make_element("div", Some("sk-result-card hidden"), None), "results-card");
    for (tag, class, id) in [
        ("h2", "sk-result-title", "result-title"),
        ("span", "sk-badge", "result-status"),
        ("p", "sk-result-reason", "result-reason"),
        ("p", "sk-result-score", "result-score"),
        ("p", "sk-expect", "result-expectation"),
        ("div", "sk-findings", "result-findings"),
        ("div", "sk-report", "result-report"),
    ] {
        append(&card, with_id(make_element(tag, Some(class), None), id));
    }
    append(&results, card);
    append(&root, results);
    root
}

fn with_id(node: Node, id: &str) -> Node {
    set_attr(&node, "id", id);
    node
}
