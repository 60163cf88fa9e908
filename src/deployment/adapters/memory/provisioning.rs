//! Scriptable in-memory provisioning service.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::deployment::{
    domain::{DeploymentId, DeploymentRequest, ProvisioningAcceptance},
    ports::{ProvisioningService, ProvisioningServiceError, ProvisioningServiceResult},
};

/// Response the in-memory service gives to one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptedResponse {
    /// Accept with a fresh deployment identifier.
    Accept {
        /// First provider log line, if any.
        initial_log_line: Option<String>,
    },
    /// Refuse the request.
    Reject {
        /// Reason reported to the caller.
        reason: String,
    },
    /// Fail as if the service were unreachable.
    TransportFailure {
        /// Transport error message.
        message: String,
    },
}

impl ScriptedResponse {
    /// Accepts with the given initial log line.
    #[must_use]
    pub fn accept(initial_log_line: impl Into<String>) -> Self {
        Self::Accept {
            initial_log_line: Some(initial_log_line.into()),
        }
    }

    /// Rejects with the given reason.
    #[must_use]
    pub fn reject(reason: impl Into<String>) -> Self {
        Self::Reject {
            reason: reason.into(),
        }
    }

    /// Fails with the given transport message.
    #[must_use]
    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self::TransportFailure {
            message: message.into(),
        }
    }
}

#[derive(Debug)]
struct ServiceState {
    script: VecDeque<ScriptedResponse>,
    fallback: ScriptedResponse,
    submissions: Vec<DeploymentRequest>,
    accepted: Vec<DeploymentId>,
}

/// In-memory provisioning service that answers from a script and records
/// every request it receives.
///
/// Scripted responses are consumed in order; once the script is exhausted
/// the fallback response answers every further submission.
#[derive(Debug, Clone)]
pub struct InMemoryProvisioningService {
    state: Arc<Mutex<ServiceState>>,
    delay: Option<Duration>,
}

impl Default for InMemoryProvisioningService {
    fn default() -> Self {
        Self::with_fallback(ScriptedResponse::Accept {
            initial_log_line: None,
        })
    }
}

impl InMemoryProvisioningService {
    /// Creates a service that accepts every request.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Creates a service that rejects every request with `reason`.
    #[must_use]
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self::with_fallback(ScriptedResponse::reject(reason))
    }

    /// Creates a service that fails every request with a transport error.
    #[must_use]
    pub fn unreachable(message: impl Into<String>) -> Self {
        Self::with_fallback(ScriptedResponse::transport_failure(message))
    }

    /// Creates a service that answers with `fallback` once its script is
    /// empty.
    #[must_use]
    pub fn with_fallback(fallback: ScriptedResponse) -> Self {
        Self {
            state: Arc::new(Mutex::new(ServiceState {
                script: VecDeque::new(),
                fallback,
                submissions: Vec::new(),
                accepted: Vec::new(),
            })),
            delay: None,
        }
    }

    /// Delays every answer by `delay`.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queues a response for the next unanswered submission.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningServiceError::Transport`] when the state lock is
    /// poisoned.
    pub fn push_response(&self, response: ScriptedResponse) -> ProvisioningServiceResult<()> {
        let mut state = self.lock()?;
        state.script.push_back(response);
        Ok(())
    }

    /// Returns every request submitted so far, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningServiceError::Transport`] when the state lock is
    /// poisoned.
    pub fn submissions(&self) -> ProvisioningServiceResult<Vec<DeploymentRequest>> {
        Ok(self.lock()?.submissions.clone())
    }

    /// Returns the identifiers issued for accepted submissions.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisioningServiceError::Transport`] when the state lock is
    /// poisoned.
    pub fn accepted_ids(&self) -> ProvisioningServiceResult<Vec<DeploymentId>> {
        Ok(self.lock()?.accepted.clone())
    }

    fn lock(&self) -> ProvisioningServiceResult<std::sync::MutexGuard<'_, ServiceState>> {
        self.state.lock().map_err(|err| {
            ProvisioningServiceError::transport(std::io::Error::other(err.to_string()))
        })
    }

    fn answer(
        &self,
        request: &DeploymentRequest,
    ) -> ProvisioningServiceResult<ProvisioningAcceptance> {
        let mut state = self.lock()?;
        state.submissions.push(request.clone());
        let response = state
            .script
            .pop_front()
            .unwrap_or_else(|| state.fallback.clone());

        match response {
            ScriptedResponse::Accept { initial_log_line } => {
                let deployment_id = DeploymentId::new();
                state.accepted.push(deployment_id);
                Ok(ProvisioningAcceptance::new(deployment_id, initial_log_line))
            }
            ScriptedResponse::Reject { reason } => Err(ProvisioningServiceError::rejected(reason)),
            ScriptedResponse::TransportFailure { message } => Err(
                ProvisioningServiceError::transport(std::io::Error::other(message)),
            ),
        }
    }
}

#[async_trait]
impl ProvisioningService for InMemoryProvisioningService {
    async fn submit(
        &self,
        request: &DeploymentRequest,
    ) -> ProvisioningServiceResult<ProvisioningAcceptance> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.answer(request)
    }
}
