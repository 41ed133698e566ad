//! # Gateway Client Errors

use shared_types::LedgerError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayClientError {
    /// The request could not be sent or the response not read.
    #[error("Gateway request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx answer.
    #[error("Gateway returned {status}: {body}")]
    Status { status: u16, body: String },

    /// 2xx answer with an unexpected body.
    #[error("Could not decode gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<GatewayClientError> for LedgerError {
    fn from(e: GatewayClientError) -> Self {
        match e {
            GatewayClientError::Transport(e) => LedgerError::Unavailable(e.to_string()),
            GatewayClientError::Status { status, body } => LedgerError::Status { status, body },
            GatewayClientError::Decode(e) => LedgerError::MalformedResponse(e.to_string()),
        }
    }
}
