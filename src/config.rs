//! Settings file and the layering that turns it into an [`SdkConfig`].
//!
//! Precedence, highest first: command-line flags, environment, the named
//! AWS profile, `config.json`, built-in defaults.

use anyhow::{Context, Result};
use opshell_aws::config::DEFAULT_REGION;
use opshell_aws::{AwsCredentials, AwsProfile, AwsRegion, RetryConfig, SdkConfig};
use opshell_core::ConfirmImpact;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// One JSON document per line instead of pretty-printed output.
    pub compact: bool,
}

/// Contents of `<config_dir>/opshell/config.json`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OpshellConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
    pub confirm_threshold: Option<ConfirmImpact>,
    pub retry: Option<RetryConfig>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub output: OutputConfig,
}

impl OpshellConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("opshell").join("config.json"))
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// The default file when it exists, otherwise defaults.
    pub fn load_or_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load_from_path(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Where environment variables come from.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
}

pub struct StdEnv;

impl EnvSource for StdEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned().filter(|v| !v.is_empty())
    }
}

/// Connection settings given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOverrides {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Everything needed to reach a service, before credentials are checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedSettings {
    pub profile: String,
    pub region: String,
    pub endpoint_url: Option<String>,
}

/// `--profile`, `AWS_PROFILE`, the settings file, then `default`.
pub fn profile_name(cli: &ConnectionOverrides, env: &dyn EnvSource, file: &OpshellConfig) -> String {
    cli.profile
        .clone()
        .or_else(|| env.get("AWS_PROFILE"))
        .or_else(|| file.profile.clone())
        .unwrap_or_else(|| "default".to_string())
}

pub fn resolve_settings(
    cli: &ConnectionOverrides,
    env: &dyn EnvSource,
    file: &OpshellConfig,
    profile: String,
    profile_region: Option<String>,
) -> ResolvedSettings {
    let region = cli
        .region
        .clone()
        .or_else(|| env.get("AWS_REGION"))
        .or_else(|| env.get("AWS_DEFAULT_REGION"))
        .or(profile_region)
        .or_else(|| file.region.clone())
        .unwrap_or_else(|| DEFAULT_REGION.to_string());

    let endpoint_url = cli
        .endpoint_url
        .clone()
        .or_else(|| env.get("AWS_ENDPOINT_URL"))
        .or_else(|| file.endpoint_url.clone());

    ResolvedSettings {
        profile,
        region,
        endpoint_url,
    }
}

/// Build the client configuration, failing when no credentials are found.
pub async fn build_sdk_config(cli: &ConnectionOverrides, file: &OpshellConfig) -> Result<SdkConfig> {
    let profile = AwsProfile::new(&profile_name(cli, &StdEnv, file));
    let settings = resolve_settings(cli, &StdEnv, file, profile.name.clone(), profile.region().await);
    let region = AwsRegion::new(&settings.region);
    if !region.is_valid() {
        log::warn!("'{}' is not a known AWS region", settings.region);
    }

    let credentials = AwsCredentials::resolve(&profile).await.with_context(|| {
        format!(
            "No AWS credentials found: set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or add profile '{}' to the shared credentials file",
            settings.profile
        )
    })?;
    log::debug!(
        "Using credentials from {} in region {}",
        credentials.source,
        settings.region
    );

    let mut config = SdkConfig::new(region, credentials);
    config.endpoint_url = settings.endpoint_url;
    if let Some(retry) = &file.retry {
        config.retry_config = retry.clone();
    }
    if let Some(secs) = file.request_timeout_secs {
        config.request_timeout_secs = secs;
    }
    if let Some(secs) = file.connect_timeout_secs {
        config.connect_timeout_secs = secs;
    }
    Ok(config)
}
