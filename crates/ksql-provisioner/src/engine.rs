//! Seams between the provisioner and the ksqlDB server.

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::ProvisionResult;
use crate::statement::ProvisioningRequest;

/// Raw answer to a statement submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementResponse {
    /// HTTP status code.
    pub status: u16,

    /// Response body as text.
    pub body: String,
}

impl StatementResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Looks up whether a derived table already exists.
#[async_trait]
pub trait ExistenceChecker: Send + Sync {
    async fn exists(&self, artifact: &str) -> ProvisionResult<bool>;
}

/// Submits a statement to the engine.
///
/// Non-2xx answers are returned as a [`StatementResponse`]; only transport
/// failures surface as errors.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, request: &ProvisioningRequest) -> ProvisionResult<StatementResponse>;
}

#[async_trait]
impl<T: ExistenceChecker + ?Sized> ExistenceChecker for Arc<T> {
    async fn exists(&self, artifact: &str) -> ProvisionResult<bool> {
        (**self).exists(artifact).await
    }
}

#[async_trait]
impl<T: StatementExecutor + ?Sized> StatementExecutor for Arc<T> {
    async fn execute(&self, request: &ProvisioningRequest) -> ProvisionResult<StatementResponse> {
        (**self).execute(request).await
    }
}
