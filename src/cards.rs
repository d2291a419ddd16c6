//! Scenario cards and variant controls.

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use crate::button::ButtonController;
use crate::client::EvaluationClient;
use crate::dom::{append, make_element, set_attr, Node};
use crate::logging::{log, log_request_failed, log_verdict, obj, v_str, Domain, Level};
use crate::model::{Scenario, Variant};
use crate::render::ResultPanel;

/// What an activation did to the result panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    RenderedResult,
    RenderedError,
    /// A newer request from the same card was issued while this one was in
    /// flight; the response was dropped.
    Superseded,
    /// The control was already busy; no request was issued.
    Ignored,
}

pub struct ScenarioCardBuilder {
    client: Rc<dyn EvaluationClient>,
    panel: Rc<ResultPanel>,
    discard_stale: bool,
}

impl ScenarioCardBuilder {
    pub fn new(client: Rc<dyn EvaluationClient>, panel: Rc<ResultPanel>) -> Self {
        Self {
            client,
            panel,
            discard_stale: false,
        }
    }

    /// With `true`, a response is dropped when a newer request from the same
    /// card was issued meanwhile. Off by default: the last to resolve wins.
    pub fn discard_stale(mut self, discard: bool) -> Self {
        self.discard_stale = discard;
        self
    }

    pub fn panel(&self) -> &Rc<ResultPanel> {
        &self.panel
    }

    pub fn build(&self, scenario: &Scenario) -> ScenarioCard {
        let element = make_element("article", Some("sk-card"), None);
        set_attr(&element, "data-scenario", &scenario.id);
        append(&element, make_element("h3", None, Some(&scenario.title)));
        append(&element, make_element("p", None, Some(&scenario.summary)));

        let sequence = Rc::new(Cell::new(0u64));
        let variants = make_element("div", Some("sk-variants"), None);
        let controls = scenario
            .variants
            .iter()
            .map(|variant| {
                let button = variant_button(variant);
                append(&variants, button.clone());
                VariantControl {
                    scenario_id: scenario.id.clone(),
                    variant_key: variant.key.clone(),
                    button: ButtonController::new(button),
                    client: Rc::clone(&self.client),
                    panel: Rc::clone(&self.panel),
                    sequence: Rc::clone(&sequence),
                    discard_stale: self.discard_stale,
                }
            })
            .collect();
        append(&element, variants);

        ScenarioCard {
            scenario_id: scenario.id.clone(),
            element,
            controls,
        }
    }
}

fn variant_button(variant: &Variant) -> Node {
    let button = make_element("button", Some("sk-variant-button"), None);
    set_attr(&button, "data-variant", &variant.key);
    append(&button, make_element("span", None, Some(&variant.label)));
    append(&button, make_element("span", Some("sk-variant-desc"), Some(&variant.description)));
    button
}

pub struct ScenarioCard {
    pub scenario_id: String,
    pub element: Node,
    pub controls: Vec<VariantControl>,
}

impl ScenarioCard {
    pub fn control(&self, variant_key: &str) -> Option<&VariantControl> {
        self.controls.iter().find(|c| c.variant_key == variant_key)
    }
}

pub struct VariantControl {
    scenario_id: String,
    variant_key: String,
    button: ButtonController,
    client: Rc<dyn EvaluationClient>,
    panel: Rc<ResultPanel>,
    sequence: Rc<Cell<u64>>,
    discard_stale: bool,
}

impl VariantControl {
    pub fn scenario_id(&self) -> &str {
        &self.scenario_id
    }

    pub fn variant_key(&self) -> &str {
        &self.variant_key
    }

    pub fn button(&self) -> &ButtonController {
        &self.button
    }

    /// Click handler: busy, evaluate, render, idle.
    pub async fn activate(&self) -> Activation {
        let Some(_busy) = self.button.engage() else {
            log(
                Level::Debug,
                Domain::Ui,
                "activate_ignored",
                obj(&[
                    ("scenario_id", v_str(&self.scenario_id)),
                    ("variant_key", v_str(&self.variant_key)),
                ]),
            );
            return Activation::Ignored;
        };
        let ticket = self.sequence.get() + 1;
        self.sequence.set(ticket);
        log(
            Level::Info,
            Domain::Ui,
            "activate",
            obj(&[
                ("scenario_id", v_str(&self.scenario_id)),
                ("variant_key", v_str(&self.variant_key)),
                ("ticket", json!(ticket)),
            ]),
        );

        let outcome = self.client.evaluate(&self.scenario_id, &self.variant_key).await;

        if self.discard_stale && self.sequence.get() != ticket {
            log(
                Level::Info,
                Domain::Ui,
                "response_superseded",
                obj(&[
                    ("scenario_id", v_str(&self.scenario_id)),
                    ("variant_key", v_str(&self.variant_key)),
                    ("ticket", json!(ticket)),
                    ("latest", json!(self.sequence.get())),
                ]),
            );
            return Activation::Superseded;
        }

        match outcome {
            Ok(data) => {
                log_verdict(
                    &self.scenario_id,
                    &self.variant_key,
                    data.blocked,
                    data.score,
                    data.findings.len(),
                );
                self.panel.render_results(&data);
                Activation::RenderedResult
            }
            Err(err) => {
                let message = err.to_string();
                log_request_failed(&self.scenario_id, &self.variant_key, &message);
                self.panel.render_error(&message);
                Activation::RenderedError
            }
        }
    }
}
