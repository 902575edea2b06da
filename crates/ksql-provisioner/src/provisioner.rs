//! Idempotent check-then-execute provisioning.

use crate::client::response;
use crate::engine::{ExistenceChecker, StatementExecutor};
use crate::error::{ProvisionError, ProvisionResult};
use crate::statement::ProvisioningRequest;

/// Outcome of an attempted statement execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The engine answered 2xx.
    Success,
    /// The engine answered with another status.
    Failure { status: u16, body: String },
}

/// What a provisioning pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisioningResult {
    /// The artifact already existed; nothing was sent.
    Skipped,
    /// The statement was sent.
    Executed(ExecutionOutcome),
}

/// Declares the tables unless the artifact is already present.
pub struct Provisioner<C, E> {
    checker: C,
    executor: E,
    artifact: String,
    request: ProvisioningRequest,
}

impl<C, E> Provisioner<C, E>
where
    C: ExistenceChecker,
    E: StatementExecutor,
{
    /// Create a new provisioner.
    pub fn new(
        checker: C,
        executor: E,
        artifact: impl Into<String>,
        request: ProvisioningRequest,
    ) -> Self {
        Self {
            checker,
            executor,
            artifact: artifact.into(),
            request,
        }
    }

    /// Check for the artifact and send the statement at most once.
    ///
    /// A non-2xx answer is logged and reported as
    /// [`ExecutionOutcome::Failure`]; use [`Provisioner::run`] to turn it into
    /// an error.
    pub async fn provision(&self) -> ProvisionResult<ProvisioningResult> {
        if self.checker.exists(&self.artifact).await? {
            tracing::info!(
                artifact = %self.artifact,
                "Artifact already exists, KSQL execution skipped"
            );
            return Ok(ProvisioningResult::Skipped);
        }

        tracing::info!(artifact = %self.artifact, "Executing KSQL statement");
        let response = self.executor.execute(&self.request).await?;

        if !response.is_success() {
            match response::error_message(&response.body) {
                Some(ksql_message) => tracing::error!(
                    status = response.status,
                    body = %response.body,
                    ksql_message = %ksql_message,
                    "Failed to run KSQL queries"
                ),
                None => tracing::error!(
                    status = response.status,
                    body = %response.body,
                    "Failed to run KSQL queries"
                ),
            }
            tracing::debug!(
                "KSQL error response:\n{}",
                response::pretty_body(&response.body)
            );
            return Ok(ProvisioningResult::Executed(ExecutionOutcome::Failure {
                status: response.status,
                body: response.body,
            }));
        }

        for message in response::command_messages(&response.body) {
            tracing::info!(ksql_message = %message, "KSQL command status");
        }
        tracing::info!(status = response.status, "KSQL queries executed successfully");

        Ok(ProvisioningResult::Executed(ExecutionOutcome::Success))
    }

    /// Provision, failing with [`ProvisionError::ProvisioningFailed`] on a
    /// non-2xx answer. No retry.
    pub async fn run(&self) -> ProvisionResult<ProvisioningResult> {
        match self.provision().await? {
            ProvisioningResult::Executed(ExecutionOutcome::Failure { status, body }) => {
                Err(ProvisionError::ProvisioningFailed { status, body })
            }
            result => Ok(result),
        }
    }
}
