//! Network seam between the controller and the remote solver.

use async_trait::async_trait;
use reqwest::Client;
use shared::{
    domain::CubeState,
    protocol::{SolveQuery, SolveResponse},
};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait SolverTransport: Send + Sync {
    /// Sends one solve request. Application errors reported by the solver
    /// come back as `Ok` with `error` set; `Err` means no usable body.
    async fn solve(&self, cube: &CubeState) -> Result<SolveResponse, TransportError>;
}

#[async_trait]
impl<T: SolverTransport + ?Sized> SolverTransport for std::sync::Arc<T> {
    async fn solve(&self, cube: &CubeState) -> Result<SolveResponse, TransportError> {
        (**self).solve(cube).await
    }
}

/// `GET <endpoint>?cube=<54 symbols>` returning a JSON [`SolveResponse`].
pub struct HttpSolverTransport {
    http: Client,
    endpoint: Url,
}

impl HttpSolverTransport {
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        Ok(Self::with_client(Client::new(), Url::parse(endpoint)?))
    }

    pub fn with_client(http: Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl SolverTransport for HttpSolverTransport {
    async fn solve(&self, cube: &CubeState) -> Result<SolveResponse, TransportError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&SolveQuery {
                cube: cube.to_string(),
            })
            .send()
            .await?;

        // The solver reports its own failures in the body, so the status is
        // informational only.
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "solver responded");

        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
