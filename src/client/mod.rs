use async_trait::async_trait;
use thiserror::Error;

use crate::model::EvaluationResult;

mod http;

pub use http::HttpEvaluationClient;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Request failed: could not reach the evaluation service ({0})")]
    Transport(String),
    #[error("Request failed: {status}")]
    Status { status: u16 },
    #[error("Request failed: malformed response ({0})")]
    Parse(String),
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Submits a (scenario, variant) pair to the guard and returns its verdict.
///
/// Implementations are single-threaded; futures need not be `Send`.
#[async_trait(?Send)]
pub trait EvaluationClient {
    async fn evaluate(
        &self,
        scenario_id: &str,
        variant_key: &str,
    ) -> Result<EvaluationResult, RequestError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code() {
        let err = RequestError::Status { status: 500 };
        assert_eq!(err.to_string(), "Request failed: 500");
        assert_eq!(err.status(), Some(500));
    }

    #[test]
    fn test_other_kinds_have_no_status() {
        assert_eq!(RequestError::Parse("eof".into()).status(), None);
        assert!(RequestError::Transport("refused".into())
            .to_string()
            .contains("could not reach"));
    }
}
