use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use url::Url;

use crate::client::{EvaluationClient, RequestError};
use crate::config::Config;
use crate::logging::{v_str, RequestScope};
use crate::model::{EvaluateRequest, EvaluationResult};

pub struct HttpEvaluationClient {
    client: Client,
    endpoint: Url,
}

impl HttpEvaluationClient {
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(cfg.evaluate_url()?))
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl EvaluationClient for HttpEvaluationClient {
    async fn evaluate(
        &self,
        scenario_id: &str,
        variant_key: &str,
    ) -> Result<EvaluationResult, RequestError> {
        let mut scope = RequestScope::new(
            "evaluate",
            &[
                ("scenario_id", v_str(scenario_id)),
                ("variant_key", v_str(variant_key)),
            ],
        );

        // `.json()` sets Content-Type: application/json
        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&EvaluateRequest {
                scenario_id,
                variant_key,
            })
            .send()
            .await
            .map_err(|e| {
                scope.record("transport", &[]);
                RequestError::Transport(e.to_string())
            })?;

        let status = resp.status();
        scope.record("response", &[("status", json!(status.as_u16()))]);
        if !status.is_success() {
            return Err(RequestError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let data: EvaluationResult =
            serde_json::from_slice(&body).map_err(|e| RequestError::Parse(e.to_string()))?;
        data.validate().map_err(RequestError::Parse)?;
        Ok(data)
    }
}
