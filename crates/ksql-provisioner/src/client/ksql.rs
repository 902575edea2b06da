use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use std::time::Duration;

use super::response;
use crate::engine::{ExistenceChecker, StatementExecutor, StatementResponse};
use crate::error::{ProvisionError, ProvisionResult};
use crate::statement::ProvisioningRequest;

/// Media type of the ksqlDB v1 REST API.
pub const KSQL_CONTENT_TYPE: &str = "application/vnd.ksql.v1+json";

/// HTTP client for the ksqlDB `/ksql` endpoint.
#[derive(Clone)]
pub struct KsqlClient {
    client: reqwest::Client,
    server_url: String,
}

impl KsqlClient {
    /// Create a new client. `timeout` of `None` keeps the transport default.
    pub fn new(server_url: &str, timeout: Option<Duration>) -> ProvisionResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            server_url: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// POST a statement body to `/ksql` and return the raw answer.
    pub async fn post_statement<T>(&self, body: &T) -> ProvisionResult<StatementResponse>
    where
        T: Serialize + Sync + ?Sized,
    {
        let payload = serde_json::to_vec(body)?;

        let response = self
            .client
            .post(format!("{}/ksql", self.server_url))
            .header(CONTENT_TYPE, KSQL_CONTENT_TYPE)
            .header(ACCEPT, KSQL_CONTENT_TYPE)
            .body(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(StatementResponse::new(status, body))
    }

    /// Names of all tables known to the server.
    pub async fn list_tables(&self) -> ProvisionResult<Vec<String>> {
        let request = ProvisioningRequest::new("SHOW TABLES;");
        let response = self.post_statement(&request).await?;

        if !response.is_success() {
            return Err(ProvisionError::ExistenceCheck {
                status: response.status,
                body: response.body,
            });
        }

        response::table_names(&response.body)
    }
}

#[async_trait]
impl ExistenceChecker for KsqlClient {
    async fn exists(&self, artifact: &str) -> ProvisionResult<bool> {
        let tables = self.list_tables().await?;
        tracing::debug!(artifact = %artifact, tables = ?tables, "Listed KSQL tables");

        // Unquoted identifiers are stored upper-cased.
        Ok(tables.iter().any(|name| name.eq_ignore_ascii_case(artifact)))
    }
}

#[async_trait]
impl StatementExecutor for KsqlClient {
    async fn execute(&self, request: &ProvisioningRequest) -> ProvisionResult<StatementResponse> {
        self.post_statement(request).await
    }
}
