//! Wiring: configuration, the AWS invoker and the adapter for one process run.

use crate::cli::{CliRequest, ParsedCli};
use crate::config::{build_sdk_config, ConnectionOverrides, OpshellConfig};
use crate::host::{self, JsonSink, TerminalConfirmer, EXIT_OK};
use anyhow::{Context, Result};
use opshell_aws::AwsService;
use opshell_catalog::{all_operations, operations_for_service};
use opshell_core::{Adapter, ConfirmImpact, ConfirmPolicy, OutputSink};
use serde_json::{json, Value};
use tracing::Instrument;

pub async fn run(parsed: ParsedCli) -> Result<u8> {
    let globals = parsed.globals;
    let file = match &globals.config {
        Some(path) => OpshellConfig::load_from_path(path)?,
        None => OpshellConfig::load_or_default()?,
    };
    let mut sink = JsonSink::stdio(globals.compact || file.output.compact);

    let (operation, invocation) = match parsed.request {
        CliRequest::ListCommands { service } => {
            for entry in command_listing(service.as_deref()) {
                sink.emit(entry);
            }
            return Ok(EXIT_OK);
        }
        CliRequest::Invoke {
            operation,
            invocation,
        } => (operation, invocation),
    };

    let records = if globals.pipeline {
        Some(host::read_pipeline(std::io::stdin().lock())?)
    } else {
        None
    };

    let overrides = ConnectionOverrides {
        region: globals.region.clone(),
        profile: globals.profile.clone(),
        endpoint_url: globals.endpoint_url.clone(),
    };
    let sdk_config = build_sdk_config(&overrides, &file).await?;
    let service = AwsService::new(sdk_config).context("Failed to create the AWS client")?;

    let policy = ConfirmPolicy {
        threshold: globals
            .confirm_threshold
            .or(file.confirm_threshold)
            .unwrap_or(ConfirmImpact::Medium),
    };
    let mut adapter = Adapter::new(service).with_policy(policy);
    if !globals.pipeline && host::is_interactive() {
        adapter = adapter.with_confirmer(TerminalConfirmer);
    }

    let span = tracing::info_span!(
        "invoke",
        command = %operation.command_name(),
        region = %adapter.invoker().client().region().name,
        records = records.as_ref().map_or(0, Vec::len),
    );
    let status = host::execute(&adapter, operation, &invocation, records, &mut sink)
        .instrument(span)
        .await;
    tracing::debug!(status, emitted = sink.emitted, "finished");
    Ok(status)
}

/// One record per command, optionally limited to one service.
pub fn command_listing(service: Option<&str>) -> Vec<Value> {
    let operations = match service {
        Some(name) => operations_for_service(name),
        None => all_operations().to_vec(),
    };
    operations
        .into_iter()
        .map(|op| {
            json!({
                "Command": op.command_name(),
                "Service": op.service.name,
                "Operation": op.operation,
                "ConfirmImpact": op.confirm.map(|c| c.to_string()),
                "AutoPaged": op.paging.is_some(),
                "Synopsis": op.synopsis,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_covers_the_catalog() {
        let all = command_listing(None);
        assert_eq!(all.len(), all_operations().len());
        assert!(all.iter().any(|e| e["Command"] == "Enable-IAMRAProfile"));
    }

    #[test]
    fn listing_filters_by_service() {
        let ec2 = command_listing(Some("ec2"));
        assert_eq!(ec2.len(), 2);
        assert!(ec2.iter().all(|e| e["Service"] == "EC2"));
        let paged: Vec<_> = ec2.iter().filter(|e| e["AutoPaged"] == true).collect();
        assert_eq!(paged.len(), 1);
        assert_eq!(paged[0]["Command"], "Get-EC2IpamDiscoveredAccount");
        assert!(command_listing(Some("nope")).is_empty());
    }

    #[test]
    fn listing_shows_confirm_impact() {
        let r53r = command_listing(Some("R53R"));
        assert_eq!(r53r[0]["ConfirmImpact"], "high");
        let sm = command_listing(Some("SM"));
        let get = sm.iter().find(|e| e["Command"] == "Get-SMAutoMLJobV2").unwrap();
        assert!(get["ConfirmImpact"].is_null());
    }
}
