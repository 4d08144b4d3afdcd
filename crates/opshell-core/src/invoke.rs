//! The seam between the adapter and a service client.

use crate::error::InvokeError;
use crate::schema::OperationSpec;
use async_trait::async_trait;
use serde_json::Value;

/// Sends one request and returns the decoded response.
///
/// Requests and responses are JSON objects keyed by API member names
/// (`ProfileId`, `NextToken`); wire spelling is the implementor's concern.
#[async_trait]
pub trait OperationInvoker: Send + Sync {
    async fn invoke(
        &self,
        operation: &'static OperationSpec,
        request: Value,
    ) -> Result<Value, InvokeError>;
}

#[async_trait]
impl<T: OperationInvoker + ?Sized> OperationInvoker for std::sync::Arc<T> {
    async fn invoke(
        &self,
        operation: &'static OperationSpec,
        request: Value,
    ) -> Result<Value, InvokeError> {
        (**self).invoke(operation, request).await
    }
}
