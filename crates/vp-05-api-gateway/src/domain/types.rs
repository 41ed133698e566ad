//! Request and response bodies.

use serde::{Deserialize, Serialize};
use vp_02_rola::SignedChallenge;
use vp_03_polls::VoteChoice;

/// `GET /status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn up() -> Self {
        Self {
            status: "up".to_string(),
        }
    }
}

/// `GET /create-challenge`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeResponse {
    pub challenge: String,
}

/// `POST /vote`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRequest {
    pub poll_id: String,
    pub vote: VoteChoice,
    pub signed_challenge: SignedChallenge,
}
