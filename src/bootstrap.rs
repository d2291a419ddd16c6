//! One-shot entry point: catalog -> cards -> container.

use std::rc::Rc;

use anyhow::{Context, Result};
use serde_json::json;

use crate::cards::{ScenarioCard, ScenarioCardBuilder, VariantControl};
use crate::catalog;
use crate::client::EvaluationClient;
use crate::config::Config;
use crate::dom::{self, append, Child, Node};
use crate::logging::{log, obj, Domain, Level};
use crate::model::Scenario;
use crate::page::{self, PanelElements};
use crate::render::ResultPanel;

/// Cards appended by [`mount`]. Dropping the handle (or calling
/// [`MountHandle::unmount`]) removes them from the container again.
pub struct MountHandle {
    container: Node,
    cards: Vec<ScenarioCard>,
    panel: Rc<ResultPanel>,
    mounted: bool,
}

impl MountHandle {
    pub fn cards(&self) -> &[ScenarioCard] {
        &self.cards
    }

    pub fn panel(&self) -> &Rc<ResultPanel> {
        &self.panel
    }

    pub fn control(&self, scenario_id: &str, variant_key: &str) -> Option<&VariantControl> {
        self.cards
            .iter()
            .find(|c| c.scenario_id == scenario_id)
            .and_then(|c| c.control(variant_key))
    }

    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        let cards = &self.cards;
        self.container.borrow_mut().children.retain(|child| match child {
            Child::Element(el) => !cards.iter().any(|c| Rc::ptr_eq(&c.element, el)),
            Child::Text(_) => true,
        });
        self.mounted = false;
        log(
            Level::Debug,
            Domain::System,
            "unmounted",
            obj(&[("cards", json!(self.cards.len()))]),
        );
    }
}

impl Drop for MountHandle {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Builds one card per scenario and appends it to `container`, in catalog order.
pub fn mount(container: &Node, catalog: &[Scenario], builder: &ScenarioCardBuilder) -> MountHandle {
    let cards: Vec<ScenarioCard> = catalog.iter().map(|s| builder.build(s)).collect();
    for card in &cards {
        append(container, card.element.clone());
    }
    log(
        Level::Info,
        Domain::System,
        "mounted",
        obj(&[
            ("cards", json!(cards.len())),
            (
                "controls",
                json!(cards.iter().map(|c| c.controls.len()).sum::<usize>()),
            ),
        ]),
    );
    MountHandle {
        container: container.clone(),
        cards,
        panel: Rc::clone(builder.panel()),
        mounted: true,
    }
}

/// Wires a page built by [`page::skeleton`]: reads the catalog from the root
/// element, binds the result panel and mounts the cards into the grid.
pub fn start(root: &Node, client: Rc<dyn EvaluationClient>, cfg: &Config) -> Result<MountHandle> {
    let scenarios = catalog::load(dom::attr(root, page::SCENARIOS_ATTR).as_deref());
    let grid = page::require(root, page::SCENARIO_GRID_ID).context("binding scenario grid")?;
    let panel = PanelElements::lookup(root).context("binding result panel")?;
    let builder = ScenarioCardBuilder::new(client, Rc::new(ResultPanel::new(panel)))
        .discard_stale(cfg.discard_stale);
    Ok(mount(&grid, &scenarios, &builder))
}
