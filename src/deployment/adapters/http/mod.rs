//! HTTP client for the external provisioning service.

mod payload;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::config::ProvisioningSettings;
use crate::deployment::{
    domain::{DeploymentId, DeploymentRequest, ProvisioningAcceptance},
    ports::{ProvisioningService, ProvisioningServiceError, ProvisioningServiceResult},
};

use payload::{AcceptedResponse, RejectedResponse, SubmitPayload};

/// Provisioning service reached over HTTP.
///
/// Requests are `POST {base_url}/deployments` with a JSON body. `202
/// Accepted` (or any other success status) yields an acceptance; `4xx`
/// responses are rejections and everything else is a transport failure.
#[derive(Debug, Clone)]
pub struct HttpProvisioningService {
    client: Client,
    base_url: String,
}

impl HttpProvisioningService {
    /// Creates a client for `base_url` whose requests give up after
    /// `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningServiceError::Transport`] when the HTTP client
    /// cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ProvisioningServiceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ProvisioningServiceError::transport)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    /// Creates a client from the `[provisioning]` settings section.
    ///
    /// The client timeout matches the dispatch timeout so a slow service
    /// surfaces as a failed submission rather than a hung connection.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningServiceError::Transport`] when the HTTP client
    /// cannot be built.
    pub fn from_settings(settings: &ProvisioningSettings) -> ProvisioningServiceResult<Self> {
        Self::new(settings.base_url.as_str(), settings.dispatch_timeout())
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ProvisioningService for HttpProvisioningService {
    async fn submit(
        &self,
        request: &DeploymentRequest,
    ) -> ProvisioningServiceResult<ProvisioningAcceptance> {
        let url = format!("{}/deployments", self.base_url);
        let body = SubmitPayload::from(request);
        debug!(%url, name = body.name, "submitting deployment request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ProvisioningServiceError::transport)?;

        let status = response.status();
        if status.is_success() {
            let accepted: AcceptedResponse = response
                .json()
                .await
                .map_err(ProvisioningServiceError::transport)?;
            return Ok(ProvisioningAcceptance::new(
                DeploymentId::from_uuid(accepted.deployment_id),
                accepted.initial_log_line,
            ));
        }

        if status.is_client_error() {
            let reason = response
                .json::<RejectedResponse>()
                .await
                .map_or_else(|_| default_reason(status), |rejected| rejected.reason);
            return Err(ProvisioningServiceError::rejected(reason));
        }

        Err(ProvisioningServiceError::transport(std::io::Error::other(
            format!("provisioning service answered {status}"),
        )))
    }
}

fn default_reason(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map_or_else(|| status.to_string(), str::to_owned)
}
