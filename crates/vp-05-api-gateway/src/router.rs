//! HTTP routes and handlers.

use crate::domain::config::CorsConfig;
use crate::domain::error::{ApiResponse, INVALID_CHALLENGE, INVALID_REQUEST};
use crate::domain::types::{ChallengeResponse, StatusResponse, VoteRequest};
use crate::middleware::create_cors_layer;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use shared_types::Address;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};
use vp_01_challenge_store::ChallengeApi;
use vp_02_rola::{AuthenticationApi, RolaError, SignedChallenge};
use vp_03_polls::{NewPoll, PollApi};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub challenges: Arc<dyn ChallengeApi>,
    pub rola: Arc<dyn AuthenticationApi>,
    pub polls: Arc<dyn PollApi>,
}

impl AppState {
    pub fn new(
        challenges: Arc<dyn ChallengeApi>,
        rola: Arc<dyn AuthenticationApi>,
        polls: Arc<dyn PollApi>,
    ) -> Self {
        Self {
            challenges,
            rola,
            polls,
        }
    }

    /// Consume the challenge, then run ROLA on the proof.
    ///
    /// The challenge is consumed first so a proof can never be replayed,
    /// whatever the verification outcome.
    async fn authenticate(&self, signed: &SignedChallenge) -> Result<Address, RolaError> {
        if !self.challenges.verify(&signed.challenge).await {
            return Err(RolaError::InvalidChallenge);
        }
        self.rola.authenticate(signed).await
    }
}

/// Build the HTTP router with CORS and request tracing.
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/create-challenge", get(create_challenge))
        .route("/verify-challenge", post(verify_challenge))
        .route("/create-poll", post(create_poll))
        .route("/polls", get(list_polls))
        .route("/close-poll/:id", get(close_poll))
        .route("/vote", post(vote))
        .layer(
            ServiceBuilder::new()
                .layer(create_cors_layer(cors))
                .map_response(|res: Response<_>| res.map(axum::body::Body::new))
                .layer(TraceLayer::new_for_http()),
        )
        .with_state(state)
}

fn invalid_request(rejection: JsonRejection) -> Response {
    debug!(error = %rejection, "Rejected request body");
    ApiResponse::failure(INVALID_REQUEST).with_status(StatusCode::BAD_REQUEST)
}

async fn status() -> Json<StatusResponse> {
    Json(StatusResponse::up())
}

async fn create_challenge(State(state): State<AppState>) -> Json<ChallengeResponse> {
    let challenge = state.challenges.create().await;
    Json(ChallengeResponse {
        challenge: challenge.value,
    })
}

async fn verify_challenge(
    State(state): State<AppState>,
    payload: Result<Json<SignedChallenge>, JsonRejection>,
) -> Response {
    let Json(signed) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_request(rejection),
    };

    match state.authenticate(&signed).await {
        Ok(address) => {
            info!(address = %address, "Challenge verified");
            ApiResponse::ok().into_response()
        }
        Err(e) => {
            debug!(reason = e.reason(), error = %e, "Challenge verification failed");
            ApiResponse::failure(e.reason()).into_response()
        }
    }
}

async fn create_poll(
    State(state): State<AppState>,
    payload: Result<Json<NewPoll>, JsonRejection>,
) -> Response {
    let Json(input) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_request(rejection),
    };

    match state.polls.create(input).await {
        Ok(poll) => Json(poll).into_response(),
        Err(e) => ApiResponse::failure(e.reason()).with_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn list_polls(State(state): State<AppState>) -> Response {
    match state.polls.list().await {
        Ok(polls) => Json(polls).into_response(),
        Err(e) => ApiResponse::failure(e.reason()).with_status(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

async fn close_poll(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    match state.polls.close(&id).await {
        Ok(_) => ApiResponse::ok(),
        Err(e) => {
            debug!(poll_id = %id, reason = e.reason(), "Close rejected");
            ApiResponse::failure(e.reason())
        }
    }
}

async fn vote(
    State(state): State<AppState>,
    payload: Result<Json<VoteRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(body) => body,
        Err(rejection) => return invalid_request(rejection),
    };

    let voter = match state.authenticate(&request.signed_challenge).await {
        Ok(address) => address,
        Err(e) => {
            debug!(reason = e.reason(), error = %e, "Vote authentication failed");
            return ApiResponse::failure(e.reason()).into_response();
        }
    };

    match state
        .polls
        .record_vote(
            &request.poll_id,
            &voter,
            request.vote,
            &request.signed_challenge.challenge,
        )
        .await
    {
        Ok(()) => ApiResponse::ok().into_response(),
        Err(e) => {
            debug!(poll_id = %request.poll_id, reason = e.reason(), "Vote rejected");
            ApiResponse::failure(e.reason()).into_response()
        }
    }
}
