//! HTTP client for the remote game authority.

use async_trait::async_trait;
use log::debug;
use serde::{Serialize, de::DeserializeOwned};

use super::{
    errors::{FailureReason, Operation, RemoteRequestFailed},
    messages::{ErrorBody, GuessOutcome, GuessRequest, HealthStatus, NewSession},
};
use crate::config::AuthorityConfig;

/// The two remote operations a game session depends on.
///
/// Implementations must fold every kind of failure into
/// [`RemoteRequestFailed`]; callers never see transport-specific errors.
#[async_trait]
pub trait Authority: Send + Sync {
    /// Ask the authority to pick a word and open a session.
    async fn create_session(&self) -> Result<NewSession, RemoteRequestFailed>;

    /// Submit one letter for an open session.
    async fn submit_guess(&self, request: &GuessRequest) -> Result<GuessOutcome, RemoteRequestFailed>;
}

/// [`Authority`] backed by the game server's JSON-over-HTTP API
#[derive(Debug, Clone)]
pub struct HttpAuthority {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAuthority {
    /// Create a new authority client
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &AuthorityConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.clone(),
            client: builder.build()?,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Probe `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, RemoteRequestFailed> {
        let request = self.client.get(format!("{}/health", self.base_url));
        self.exchange(Operation::Health, request).await
    }

    /// Send a request and decode a JSON response, mapping every failure
    /// onto [`RemoteRequestFailed`].
    async fn exchange<T: DeserializeOwned>(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<T, RemoteRequestFailed> {
        let fail = |reason| RemoteRequestFailed::new(operation, reason);

        let response = request
            .send()
            .await
            .map_err(|e| fail(FailureReason::Transport(e.to_string())))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| fail(FailureReason::Transport(e.to_string())))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|body| body.error);
            return Err(fail(FailureReason::Status {
                code: status.as_u16(),
                message,
            }));
        }

        debug!("{operation} <- {body}");

        serde_json::from_str(&body).map_err(|e| fail(FailureReason::Malformed(e.to_string())))
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        operation: Operation,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, RemoteRequestFailed> {
        let mut request = self.client.post(format!("{}{path}", self.base_url));
        if let Some(body) = body {
            request = request.json(body);
        }
        self.exchange(operation, request).await
    }
}

#[async_trait]
impl Authority for HttpAuthority {
    async fn create_session(&self) -> Result<NewSession, RemoteRequestFailed> {
        self.post::<(), _>(Operation::CreateSession, "/new", None)
            .await
    }

    async fn submit_guess(&self, request: &GuessRequest) -> Result<GuessOutcome, RemoteRequestFailed> {
        self.post(Operation::SubmitGuess, "/guess", Some(request))
            .await
    }
}
