//! Region, credential and transport configuration.
//!
//! Credentials come from the environment first, then from the named
//! profile. Profiles are read by `aws-config`, which follows the shared
//! file format (sub-properties, `AWS_CONFIG_FILE`,
//! `AWS_SHARED_CREDENTIALS_FILE`, `credential_process` and so on).

use aws_config::meta::region::ProvideRegion;
use aws_config::profile::profile_file::ProfileFiles;
use aws_config::profile::{ProfileFileCredentialsProvider, ProfileFileRegionProvider};
use aws_credential_types::provider::ProvideCredentials;
use serde::{Deserialize, Serialize};

// ── Regions ─────────────────────────────────────────────────────────────

pub const DEFAULT_REGION: &str = "us-east-1";

/// Regions a name is checked against before any request is made. An
/// unknown name is still used; it only earns a warning.
const KNOWN_REGIONS: &[&str] = &[
    "us-east-1", "us-east-2", "us-west-1", "us-west-2",
    "us-gov-east-1", "us-gov-west-1",
    "ca-central-1", "ca-west-1", "sa-east-1", "mx-central-1",
    "eu-central-1", "eu-central-2", "eu-west-1", "eu-west-2", "eu-west-3",
    "eu-south-1", "eu-south-2", "eu-north-1",
    "af-south-1", "il-central-1", "me-south-1", "me-central-1",
    "ap-east-1", "ap-south-1", "ap-south-2",
    "ap-southeast-1", "ap-southeast-2", "ap-southeast-3", "ap-southeast-4", "ap-southeast-5",
    "ap-northeast-1", "ap-northeast-2", "ap-northeast-3",
    "cn-north-1", "cn-northwest-1",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AwsRegion {
    pub name: String,
}

impl AwsRegion {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// `https://{prefix}.{region}.{dns suffix}`.
    pub fn endpoint(&self, endpoint_prefix: &str) -> String {
        let suffix = if self.name.starts_with("cn-") {
            "amazonaws.com.cn"
        } else {
            "amazonaws.com"
        };
        format!("https://{}.{}.{}", endpoint_prefix, self.name, suffix)
    }

    pub fn is_valid(&self) -> bool {
        KNOWN_REGIONS.contains(&self.name.as_str())
    }
}

impl Default for AwsRegion {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

// ── Credentials ─────────────────────────────────────────────────────────

/// Where a set of keys was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CredentialSource {
    Static,
    Environment,
    Profile(String),
}

impl std::fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => f.write_str("static keys"),
            Self::Environment => f.write_str("environment"),
            Self::Profile(name) => write!(f, "profile '{}'", name),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AwsCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
    pub source: CredentialSource,
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("source", &self.source)
            .finish()
    }
}

impl AwsCredentials {
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
            source: CredentialSource::Static,
        }
    }

    /// `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
    /// `AWS_SESSION_TOKEN`, read through `var`.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Option<Self> {
        let get = |key: &str| var(key).filter(|v| !v.is_empty());
        Some(Self {
            access_key_id: get("AWS_ACCESS_KEY_ID")?,
            secret_access_key: get("AWS_SECRET_ACCESS_KEY")?,
            session_token: get("AWS_SESSION_TOKEN"),
            source: CredentialSource::Environment,
        })
    }

    /// Process environment first, then the profile.
    pub async fn resolve(profile: &AwsProfile) -> Option<Self> {
        match Self::from_env(|k| std::env::var(k).ok()) {
            Some(credentials) => Some(credentials),
            None => profile.credentials().await,
        }
    }
}

// ── Named profiles ──────────────────────────────────────────────────────

/// A named profile of the shared config and credentials files.
#[derive(Debug, Clone)]
pub struct AwsProfile {
    pub name: String,
    files: ProfileFiles,
}

impl AwsProfile {
    /// The profile in the default shared files.
    pub fn new(name: &str) -> Self {
        Self::with_files(name, ProfileFiles::default())
    }

    pub fn with_files(name: &str, files: ProfileFiles) -> Self {
        Self {
            name: name.to_string(),
            files,
        }
    }

    /// `region` of the profile, if it sets one.
    pub async fn region(&self) -> Option<String> {
        let provider = ProfileFileRegionProvider::builder()
            .profile_name(&self.name)
            .profile_files(self.files.clone())
            .build();
        ProvideRegion::region(&provider).await.map(|r| r.to_string())
    }

    /// Keys of the profile; `None` when it has none or does not exist.
    pub async fn credentials(&self) -> Option<AwsCredentials> {
        let provider = ProfileFileCredentialsProvider::builder()
            .profile_name(&self.name)
            .profile_files(self.files.clone())
            .build();
        match provider.provide_credentials().await {
            Ok(c) => Some(AwsCredentials {
                access_key_id: c.access_key_id().to_string(),
                secret_access_key: c.secret_access_key().to_string(),
                session_token: c.session_token().map(str::to_string),
                source: CredentialSource::Profile(self.name.clone()),
            }),
            Err(e) => {
                log::debug!("No credentials in profile '{}': {}", self.name, e);
                None
            }
        }
    }
}

// ── Retry ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub mode: RetryMode,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            mode: RetryMode::Standard,
            initial_backoff_ms: 500,
            max_backoff_ms: 20_000,
        }
    }
}

impl RetryConfig {
    /// Attempts actually made; `legacy` mode never retries.
    pub fn effective_attempts(&self) -> u32 {
        match self.mode {
            RetryMode::Legacy => 1,
            RetryMode::Standard | RetryMode::Adaptive => self.max_attempts.max(1),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RetryMode {
    /// Exponential backoff with jitter.
    Standard,
    /// Standard backoff, doubled after throttling responses.
    Adaptive,
    /// No retries.
    Legacy,
}

// ── SDK config ──────────────────────────────────────────────────────────

/// Everything a client needs to send signed requests.
#[derive(Debug, Clone)]
pub struct SdkConfig {
    pub region: AwsRegion,
    pub credentials: AwsCredentials,
    pub retry_config: RetryConfig,
    /// Replaces the regional endpoint for every service.
    pub endpoint_url: Option<String>,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Appended to the User-Agent header.
    pub app_name: Option<String>,
}

impl SdkConfig {
    pub fn new(region: AwsRegion, credentials: AwsCredentials) -> Self {
        Self {
            region,
            credentials,
            retry_config: RetryConfig::default(),
            endpoint_url: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
            app_name: Some("opshell".to_string()),
        }
    }

    /// Endpoint for a service honouring the override.
    pub fn endpoint_for(&self, endpoint_prefix: &str) -> String {
        match &self.endpoint_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => self.region.endpoint(endpoint_prefix),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_endpoint_standard() {
        let r = AwsRegion::new("us-east-1");
        assert_eq!(r.endpoint("ec2"), "https://ec2.us-east-1.amazonaws.com");
        assert_eq!(
            r.endpoint("controlplane.payment-cryptography"),
            "https://controlplane.payment-cryptography.us-east-1.amazonaws.com"
        );
    }

    #[test]
    fn region_endpoint_china() {
        let r = AwsRegion::new("cn-north-1");
        assert_eq!(r.endpoint("ec2"), "https://ec2.cn-north-1.amazonaws.com.cn");
    }

    #[test]
    fn region_validity() {
        assert!(AwsRegion::new("eu-west-1").is_valid());
        assert!(!AwsRegion::new("mars-central-1").is_valid());
        assert!(AwsRegion::new("us-gov-west-1").is_valid());
    }

    #[test]
    fn credentials_debug_redacts_secret() {
        let mut c = AwsCredentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI");
        c.session_token = Some("tok".into());
        let dbg = format!("{:?}", c);
        assert!(dbg.contains("AKIDEXAMPLE"));
        assert!(!dbg.contains("wJalrXUtnFEMI"));
        assert!(!dbg.contains("tok\""));
    }

    #[test]
    fn environment_keys_need_both_halves() {
        let env = |pairs: &'static [(&'static str, &'static str)]| {
            move |k: &str| pairs.iter().find(|(n, _)| *n == k).map(|(_, v)| v.to_string())
        };
        let c = AwsCredentials::from_env(env(&[
            ("AWS_ACCESS_KEY_ID", "AKIDENV"),
            ("AWS_SECRET_ACCESS_KEY", "s"),
            ("AWS_SESSION_TOKEN", ""),
        ]))
        .unwrap();
        assert_eq!(c.access_key_id, "AKIDENV");
        assert!(c.session_token.is_none());
        assert_eq!(c.source, CredentialSource::Environment);

        assert!(AwsCredentials::from_env(env(&[("AWS_ACCESS_KEY_ID", "AKIDENV")])).is_none());
    }

    const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIDDEFAULT
aws_secret_access_key = secret-default

# comment
[ops]
aws_access_key_id=AKIDOPS
aws_secret_access_key=secret-ops
aws_session_token=token-ops
";

    const CONFIG: &str = "\
[default]
region = eu-west-1

[profile ops]
region = ap-southeast-2
s3 =
  region = us-west-1
  endpoint_url = http://minio.local:9000

[profile regiononly]
region = ca-central-1
";

    fn profile(name: &str) -> AwsProfile {
        use aws_config::profile::profile_file::ProfileFileKind;
        let files = ProfileFiles::builder()
            .with_contents(ProfileFileKind::Credentials, CREDENTIALS)
            .with_contents(ProfileFileKind::Config, CONFIG)
            .build();
        AwsProfile::with_files(name, files)
    }

    #[tokio::test]
    async fn profile_combines_both_files() {
        let p = profile("ops");
        assert_eq!(p.region().await.as_deref(), Some("ap-southeast-2"));
        let c = p.credentials().await.unwrap();
        assert_eq!(c.access_key_id, "AKIDOPS");
        assert_eq!(c.secret_access_key, "secret-ops");
        assert_eq!(c.session_token.as_deref(), Some("token-ops"));
        assert_eq!(c.source, CredentialSource::Profile("ops".into()));
        assert_eq!(c.source.to_string(), "profile 'ops'");
    }

    #[tokio::test]
    async fn indented_sub_properties_stay_with_their_parent() {
        let p = profile("ops");
        assert_eq!(p.region().await.as_deref(), Some("ap-southeast-2"));
        assert_eq!(profile("default").region().await.as_deref(), Some("eu-west-1"));
    }

    #[tokio::test]
    async fn profile_without_keys_has_no_credentials() {
        let p = profile("regiononly");
        assert_eq!(p.region().await.as_deref(), Some("ca-central-1"));
        assert!(p.credentials().await.is_none());
    }

    #[tokio::test]
    async fn unknown_profile_has_nothing() {
        let p = profile("nope");
        assert!(p.region().await.is_none());
        assert!(p.credentials().await.is_none());
    }

    #[test]
    fn retry_config_from_json_with_defaults() {
        let cfg: RetryConfig = serde_json::from_str(r#"{"max_attempts": 5, "mode": "adaptive"}"#).unwrap();
        assert_eq!(cfg.max_attempts, 5);
        assert_eq!(cfg.mode, RetryMode::Adaptive);
        assert_eq!(cfg.initial_backoff_ms, 500);

        let legacy = RetryConfig {
            mode: RetryMode::Legacy,
            ..RetryConfig::default()
        };
        assert_eq!(legacy.effective_attempts(), 1);
    }

    #[test]
    fn endpoint_override_applies_to_every_service() {
        let mut sdk = SdkConfig::new(AwsRegion::new("us-west-2"), AwsCredentials::new("a", "b"));
        assert_eq!(sdk.endpoint_for("mgn"), "https://mgn.us-west-2.amazonaws.com");
        sdk.endpoint_url = Some("http://localhost:4566/".into());
        assert_eq!(sdk.endpoint_for("mgn"), "http://localhost:4566");
    }
}
