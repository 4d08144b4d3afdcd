//! In-memory invoker for exercising the adapter without a network.

use crate::error::InvokeError;
use crate::invoke::OperationInvoker;
use crate::schema::OperationSpec;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays scripted responses in order and records every request.
#[derive(Debug, Default)]
pub struct ScriptedInvoker {
    responses: Mutex<VecDeque<Result<Value, InvokeError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedInvoker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.push(Ok(response));
        self
    }

    pub fn fail(self, error: InvokeError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, item: Result<Value, InvokeError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(item);
        }
    }

    /// `(operation, request)` pairs in call order.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl OperationInvoker for ScriptedInvoker {
    async fn invoke(
        &self,
        operation: &'static OperationSpec,
        request: Value,
    ) -> Result<Value, InvokeError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push((operation.operation.to_string(), request));
        }
        let next = self.responses.lock().ok().and_then(|mut q| q.pop_front());
        next.unwrap_or_else(|| {
            Err(InvokeError::Service(
                format!("no scripted response left for {}", operation.operation).into(),
            ))
        })
    }
}
