//! Output records and where they go.

use crate::error::AdapterError;
use serde_json::Value;

/// Result of one call.
#[derive(Debug, Default)]
pub struct CmdletOutput {
    /// The projected value handed to the pipeline.
    pub pipeline_output: Option<Value>,
    /// The raw response, kept for verbose logging.
    pub service_response: Option<Value>,
    pub error: Option<AdapterError>,
}

impl CmdletOutput {
    pub fn success(projected: Value, response: Value) -> Self {
        Self {
            pipeline_output: Some(projected),
            service_response: Some(response),
            error: None,
        }
    }

    pub fn failure(error: AdapterError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }
}

/// Receives everything an invocation produces.
pub trait OutputSink: Send {
    fn emit(&mut self, item: Value);
    fn warning(&mut self, message: &str);
    fn error(&mut self, error: &AdapterError);
}

/// Hand `output` to `sink`, enumerating collections item by item.
///
/// Returns `false` when the output carried an error.
pub fn process_output(output: CmdletOutput, sink: &mut dyn OutputSink) -> bool {
    if let Some(err) = output.error {
        sink.error(&err);
        return false;
    }
    match output.pipeline_output {
        Some(Value::Array(items)) => items.into_iter().for_each(|i| sink.emit(i)),
        Some(Value::Null) | None => {}
        Some(item) => sink.emit(item),
    }
    true
}

/// Buffers everything in memory.
#[derive(Debug, Default)]
pub struct CollectingSink {
    pub items: Vec<Value>,
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl OutputSink for CollectingSink {
    fn emit(&mut self, item: Value) {
        self.items.push(item);
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }

    fn error(&mut self, error: &AdapterError) {
        self.errors.push(error.to_string());
    }
}
