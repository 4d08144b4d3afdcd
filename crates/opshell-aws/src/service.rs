//! `AwsService`: the [`OperationInvoker`] that talks to real endpoints.

use crate::client::AwsClient;
use crate::config::SdkConfig;
use crate::error::{into_invoke_error, AwsError, AwsResult};
use crate::protocol;
use async_trait::async_trait;
use opshell_core::{InvokeError, OperationInvoker, OperationSpec};
use serde_json::Value;

/// Serializes, signs and sends catalog operations.
#[derive(Debug, Clone)]
pub struct AwsService {
    client: AwsClient,
}

impl AwsService {
    pub fn new(config: SdkConfig) -> AwsResult<Self> {
        Ok(Self {
            client: AwsClient::new(config)?,
        })
    }

    pub fn client(&self) -> &AwsClient {
        &self.client
    }

    pub fn endpoint_for(&self, op: &OperationSpec) -> String {
        self.client.endpoint(op.service.endpoint_prefix)
    }

    async fn call(&self, op: &'static OperationSpec, endpoint: &str, request: &Value) -> AwsResult<Value> {
        let wire = protocol::build_request(op, request)?;
        let response = self
            .client
            .send(op.service.signing_name, endpoint, &wire)
            .await?;
        log::debug!(
            "{} {} -> HTTP {} ({} bytes){}",
            op.service.signing_name,
            op.operation,
            response.status,
            response.body.len(),
            response
                .request_id
                .as_deref()
                .map(|id| format!(" [RequestId: {}]", id))
                .unwrap_or_default()
        );
        protocol::parse_response(op, &response)
    }
}

#[async_trait]
impl OperationInvoker for AwsService {
    async fn invoke(
        &self,
        operation: &'static OperationSpec,
        request: Value,
    ) -> Result<Value, InvokeError> {
        let endpoint = self.endpoint_for(operation);
        let region = self.client.region().name.clone();
        log::info!(
            "Invoking {} operation '{}' in region '{}' via {}",
            operation.service.display_name,
            operation.operation,
            region,
            endpoint
        );

        self.call(operation, &endpoint, &request)
            .await
            .map_err(|e: AwsError| into_invoke_error(e.with_action(operation.operation), &endpoint, &region))
    }
}
