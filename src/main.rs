use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use guarddemo::bootstrap;
use guarddemo::cards::Activation;
use guarddemo::client::HttpEvaluationClient;
use guarddemo::config::Config;
use guarddemo::dom;
use guarddemo::logging::{log, obj, v_str, Domain, Level};
use guarddemo::page;
use serde_json::json;

const USAGE: &str = "usage: guarddemo [<scenario_id> <variant_key>]";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = Config::from_env();

    let root = page::skeleton(cfg.scenario_payload()?.as_deref());
    let client = HttpEvaluationClient::from_config(&cfg)?;
    log(
        Level::Info,
        Domain::System,
        "startup",
        obj(&[
            ("endpoint", v_str(client.endpoint().as_str())),
            ("discard_stale", json!(cfg.discard_stale)),
        ]),
    );
    let handle = bootstrap::start(&root, Rc::new(client), &cfg)?;

    match args.as_slice() {
        [] => {}
        [scenario_id, variant_key] => {
            let control = handle.control(scenario_id, variant_key).ok_or_else(|| {
                anyhow!("no variant {:?} in scenario {:?}", variant_key, scenario_id)
            })?;
            let outcome = control.activate().await;
            if outcome == Activation::RenderedError {
                log(
                    Level::Warn,
                    Domain::System,
                    "evaluation_failed",
                    obj(&[("msg", v_str("result panel shows an error"))]),
                );
            }
        }
        _ => bail!(USAGE),
    }

    println!("{}", dom::to_html(&root));
    Ok(())
}
