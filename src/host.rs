//! The process around the adapter: output, prompts, pipeline input and logging.

use crate::cli::LogFormat;
use anyhow::{Context, Result};
use opshell_core::{
    Adapter, AdapterError, ConfirmPrompt, Confirmer, Invocation, OperationInvoker, OperationSpec,
    Outcome, OutputSink,
};
use serde_json::Value;
use std::io::{BufRead, IsTerminal, Write};

// ── Exit status ─────────────────────────────────────────────────────────

pub const EXIT_OK: u8 = 0;
/// At least one invocation reported an error.
pub const EXIT_FAILURE: u8 = 1;
/// The arguments were rejected before anything was sent.
pub const EXIT_USAGE: u8 = 2;

// ── Output ──────────────────────────────────────────────────────────────

/// Writes pipeline items as JSON to `out`, warnings and errors to `err`.
pub struct JsonSink<O, E> {
    out: O,
    err: E,
    compact: bool,
    pub emitted: usize,
}

impl<O: Write + Send, E: Write + Send> JsonSink<O, E> {
    pub fn new(out: O, err: E, compact: bool) -> Self {
        Self {
            out,
            err,
            compact,
            emitted: 0,
        }
    }

    pub fn into_inner(self) -> (O, E) {
        (self.out, self.err)
    }
}

impl JsonSink<std::io::Stdout, std::io::Stderr> {
    pub fn stdio(compact: bool) -> Self {
        Self::new(std::io::stdout(), std::io::stderr(), compact)
    }
}

impl<O: Write + Send, E: Write + Send> OutputSink for JsonSink<O, E> {
    fn emit(&mut self, item: Value) {
        let text = if self.compact {
            serde_json::to_string(&item)
        } else {
            serde_json::to_string_pretty(&item)
        };
        match text {
            Ok(text) => {
                if let Err(e) = writeln!(self.out, "{}", text) {
                    log::error!("Failed to write output: {}", e);
                }
                self.emitted += 1;
            }
            Err(e) => log::error!("Failed to serialize output item: {}", e),
        }
    }

    fn warning(&mut self, message: &str) {
        let _ = writeln!(self.err, "WARNING: {}", message);
    }

    fn error(&mut self, error: &AdapterError) {
        let _ = writeln!(self.err, "ERROR: {}", error);
    }
}

// ── Confirmation ────────────────────────────────────────────────────────

/// Asks on the terminal; a failed prompt counts as "no".
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(format!("{}. Continue?", prompt))
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                log::warn!("Confirmation prompt failed: {}", e);
                false
            })
    }
}

/// Prompts are only possible when both stdin and stderr are terminals.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

// ── Pipeline input ──────────────────────────────────────────────────────

/// Newline-delimited records. Lines that are not JSON are taken as strings.
pub fn read_pipeline(reader: impl BufRead) -> Result<Vec<Value>> {
    let mut records = Vec::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read pipeline line {}", n + 1))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let record =
            serde_json::from_str(line).unwrap_or_else(|_| Value::String(line.to_string()));
        records.push(record);
    }
    Ok(records)
}

// ── Running ─────────────────────────────────────────────────────────────

/// Run `operation` once, or once per pipeline record, and fold the results
/// into an exit status.
pub async fn execute<I: OperationInvoker>(
    adapter: &Adapter<I>,
    operation: &'static OperationSpec,
    invocation: &Invocation,
    records: Option<Vec<Value>>,
    sink: &mut dyn OutputSink,
) -> u8 {
    let runs = match records {
        Some(records) => records
            .iter()
            .map(|record| invocation.with_pipeline_record(operation, record))
            .collect(),
        None => vec![invocation.clone()],
    };

    let mut status = EXIT_OK;
    for run in &runs {
        match adapter.run(operation, run, sink).await {
            Ok(Outcome::Declined) => {}
            Ok(outcome) => {
                if outcome.had_errors() {
                    status = status.max(EXIT_FAILURE);
                }
            }
            Err(err) => {
                sink.error(&err);
                status = status.max(if err.is_argument_error() {
                    EXIT_USAGE
                } else {
                    EXIT_FAILURE
                });
            }
        }
    }
    status
}

// ── Logging ─────────────────────────────────────────────────────────────

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: Option<&str>, format: LogFormat) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level.unwrap_or("warn")))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Ignore the error if a subscriber is already set.
    let _ = match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use opshell_catalog::iam_roles_anywhere::ENABLE_PROFILE;
    use opshell_core::testing::ScriptedInvoker;
    use opshell_core::AutoAccept;
    use serde_json::json;

    fn sink(compact: bool) -> JsonSink<Vec<u8>, Vec<u8>> {
        JsonSink::new(Vec::new(), Vec::new(), compact)
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn compact_sink_writes_one_line_per_item() {
        let mut s = sink(true);
        s.emit(json!({"a": 1}));
        s.emit(json!("x"));
        s.warning("careful");
        assert_eq!(s.emitted, 2);
        let (out, err) = s.into_inner();
        assert_eq!(text(out), "{\"a\":1}\n\"x\"\n");
        assert_eq!(text(err), "WARNING: careful\n");
    }

    #[test]
    fn pretty_sink_indents() {
        let mut s = sink(false);
        s.emit(json!({"a": 1}));
        let (out, _) = s.into_inner();
        assert_eq!(text(out), "{\n  \"a\": 1\n}\n");
    }

    #[test]
    fn pipeline_lines_are_json_or_strings() {
        let input = "{\"ProfileId\":\"p-1\"}\n\n  p-2  \n42\n";
        let records = read_pipeline(input.as_bytes()).unwrap();
        assert_eq!(records, vec![json!({"ProfileId": "p-1"}), json!("p-2"), json!(42)]);
    }

    #[tokio::test]
    async fn one_run_per_pipeline_record() {
        let invoker = ScriptedInvoker::new()
            .respond(json!({"Profile": {"ProfileId": "p-1"}}))
            .respond(json!({"Profile": {"ProfileId": "p-2"}}));
        let adapter = Adapter::new(invoker).with_confirmer(AutoAccept);
        let mut s = sink(true);

        let records = vec![json!("p-1"), json!({"ProfileId": "p-2"})];
        let status = execute(&adapter, &ENABLE_PROFILE, &Invocation::new(), Some(records), &mut s).await;

        assert_eq!(status, EXIT_OK);
        let requests = adapter.invoker().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].1, json!({"ProfileId": "p-1"}));
        assert_eq!(requests[1].1, json!({"ProfileId": "p-2"}));
        let (out, _) = s.into_inner();
        assert_eq!(text(out).lines().count(), 2);
    }

    #[tokio::test]
    async fn argument_errors_exit_with_usage_status() {
        let adapter = Adapter::new(ScriptedInvoker::new());
        let mut s = sink(true);
        let inv = Invocation::new().arg("ProfileId", "p-1").select("NoSuchField");

        let status = execute(&adapter, &ENABLE_PROFILE, &inv, None, &mut s).await;

        assert_eq!(status, EXIT_USAGE);
        assert_eq!(adapter.invoker().call_count(), 0);
        let (_, err) = s.into_inner();
        assert!(text(err).starts_with("ERROR: "));
    }

    #[tokio::test]
    async fn service_errors_exit_with_failure_status() {
        let invoker = ScriptedInvoker::new()
            .fail(opshell_core::InvokeError::Service("AccessDenied".into()));
        let adapter = Adapter::new(invoker);
        let mut s = sink(true);
        let inv = Invocation::new().arg("ProfileId", "p-1").force();

        let status = execute(&adapter, &ENABLE_PROFILE, &inv, None, &mut s).await;

        assert_eq!(status, EXIT_FAILURE);
        let (out, err) = s.into_inner();
        assert!(out.is_empty());
        assert!(text(err).contains("AccessDenied"));
    }

    #[tokio::test]
    async fn declined_run_is_not_a_failure() {
        let adapter = Adapter::new(ScriptedInvoker::new());
        let mut s = sink(true);
        let inv = Invocation::new().arg("ProfileId", "p-1");

        let status = execute(&adapter, &ENABLE_PROFILE, &inv, None, &mut s).await;

        assert_eq!(status, EXIT_OK);
        assert_eq!(adapter.invoker().call_count(), 0);
    }
}
