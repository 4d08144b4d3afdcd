//! Signed HTTP transport.
//!
//! `AwsClient` knows nothing about operations. It takes a [`WireRequest`]
//! laid out by `protocol`, signs a fresh copy for every attempt and retries
//! retryable failures with full-jitter exponential backoff.

use crate::config::{AwsRegion, RetryConfig, RetryMode, SdkConfig};
use crate::error::{AwsError, AwsResult, ErrorKind};
use crate::signing::{build_query_string, sign, SigningScope};
use chrono::Utc;
use rand::Rng;
use reqwest::Client;
use std::collections::BTreeMap;
use std::time::Duration;

/// An HTTP request before signing.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    pub method: &'static str,
    /// Percent-encoded path starting with `/`.
    pub path: String,
    /// Unencoded query parameters.
    pub query: BTreeMap<String, String>,
    /// Lower-case header names.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl WireRequest {
    pub fn post(path: impl Into<String>) -> Self {
        Self {
            method: "POST",
            path: path.into(),
            query: BTreeMap::new(),
            headers: BTreeMap::new(),
            body: String::new(),
        }
    }

    pub fn url(&self, endpoint: &str) -> String {
        let mut url = endpoint.trim_end_matches('/').to_string();
        if !self.path.starts_with('/') {
            url.push('/');
        }
        url.push_str(&self.path);
        if !self.query.is_empty() {
            url.push('?');
            url.push_str(&build_query_string(&self.query));
        }
        url
    }
}

#[derive(Debug, Clone)]
pub struct AwsResponse {
    pub status: u16,
    /// Lower-case header names.
    pub headers: BTreeMap<String, String>,
    pub body: String,
    pub request_id: Option<String>,
}

impl AwsResponse {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn into_error(self, service: &str) -> AwsError {
        let mut err = if self.body.trim_start().starts_with('<') {
            AwsError::from_xml_body(service, self.status, &self.body)
        } else {
            let header_code = self.headers.get("x-amzn-errortype").map(String::as_str);
            AwsError::from_json_body(service, self.status, &self.body, header_code)
        };
        if err.request_id.is_none() {
            err.request_id = self.request_id;
        }
        err
    }
}

#[derive(Debug, Clone)]
pub struct AwsClient {
    http: Client,
    config: SdkConfig,
    user_agent: String,
}

impl AwsClient {
    pub fn new(config: SdkConfig) -> AwsResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| AwsError::transport("http", &e))?;

        let mut user_agent = format!("opshell/{}", env!("CARGO_PKG_VERSION"));
        if let Some(app) = &config.app_name {
            user_agent.push(' ');
            user_agent.push_str(app);
        }

        Ok(Self {
            http,
            config,
            user_agent,
        })
    }

    /// Base URL for a service, honouring the endpoint override.
    pub fn endpoint(&self, endpoint_prefix: &str) -> String {
        self.config.endpoint_for(endpoint_prefix)
    }

    pub fn region(&self) -> &AwsRegion {
        &self.config.region
    }

    /// Sign and send `request` to `endpoint`, retrying transient failures.
    pub async fn send(
        &self,
        signing_name: &str,
        endpoint: &str,
        request: &WireRequest,
    ) -> AwsResult<AwsResponse> {
        let (host, url, request) = route(endpoint, request);
        let request = &request;
        let retry = &self.config.retry_config;
        let attempts = retry.effective_attempts();

        let mut attempt = 0;
        loop {
            attempt += 1;
            let error = match self.send_once(signing_name, &host, &url, request).await {
                Ok(response) if response.is_success() => return Ok(response),
                Ok(response) => response.into_error(signing_name),
                Err(err) => err,
            };
            if !error.is_retryable() || attempt >= attempts {
                return Err(error);
            }

            let ceiling = backoff_ceiling(retry, attempt - 1, error.kind == ErrorKind::Throttling);
            let delay = rand::thread_rng().gen_range(0..=ceiling);
            log::warn!(
                "{} {} attempt {}/{} failed with {}, retrying in {}ms",
                signing_name,
                request.method,
                attempt,
                attempts,
                error.code,
                delay
            );
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
    }

    async fn send_once(
        &self,
        signing_name: &str,
        host: &str,
        url: &str,
        request: &WireRequest,
    ) -> AwsResult<AwsResponse> {
        let mut signed = request.clone();
        let scope = SigningScope {
            credentials: &self.config.credentials,
            region: &self.config.region.name,
            service: signing_name,
            time: Utc::now(),
        };
        sign(&mut signed, host, &scope);

        let method = reqwest::Method::from_bytes(signed.method.as_bytes()).map_err(|_| {
            AwsError::serialization(signing_name, &format!("invalid HTTP method {}", signed.method))
        })?;
        let mut builder = self
            .http
            .request(method, url)
            .header("user-agent", &self.user_agent);
        for (name, value) in &signed.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !signed.body.is_empty() {
            builder = builder.body(signed.body);
        }

        let transport = |e: reqwest::Error| AwsError::transport(signing_name, &e);
        let resp = builder.send().await.map_err(transport)?;
        let status = resp.status().as_u16();
        let headers: BTreeMap<String, String> = resp
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_ascii_lowercase(), v.to_str().ok()?.to_string())))
            .collect();
        let request_id = headers
            .get("x-amzn-requestid")
            .or_else(|| headers.get("x-amz-request-id"))
            .cloned();
        let body = resp.text().await.map_err(transport)?;

        Ok(AwsResponse {
            status,
            headers,
            body,
            request_id,
        })
    }
}

/// Upper bound of the jittered delay before retry `attempt` (0-based).
fn backoff_ceiling(retry: &RetryConfig, attempt: u32, throttled: bool) -> u64 {
    let mut ceiling = retry
        .initial_backoff_ms
        .saturating_mul(1u64.checked_shl(attempt).unwrap_or(u64::MAX));
    if throttled && retry.mode == RetryMode::Adaptive {
        ceiling = ceiling.saturating_mul(2);
    }
    ceiling.min(retry.max_backoff_ms)
}

/// Host header, full URL and the request with any path prefix of
/// `endpoint` (`http://localhost:4566/gateway`) moved onto its path, so the
/// signed path and the sent path agree.
fn route(endpoint: &str, request: &WireRequest) -> (String, String, WireRequest) {
    let mut routed = request.clone();
    let Ok(u) = url::Url::parse(endpoint) else {
        return (endpoint.to_string(), request.url(endpoint), routed);
    };
    let Some(host) = u.host_str() else {
        return (endpoint.to_string(), request.url(endpoint), routed);
    };
    let host = match u.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let prefix = u.path().trim_end_matches('/');
    if !prefix.is_empty() {
        let path = request.path.trim_start_matches('/');
        routed.path = format!("{}/{}", prefix, path);
    }
    let origin = format!("{}://{}", u.scheme(), host);
    let url = routed.url(&origin);
    (host, url, routed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AwsCredentials;
    use crate::test_server::TestServer;

    fn sdk(endpoint: Option<&str>, attempts: u32) -> SdkConfig {
        let mut cfg = SdkConfig::new(
            AwsRegion::new("us-east-1"),
            AwsCredentials::new("AKIDEXAMPLE", "secret"),
        );
        cfg.endpoint_url = endpoint.map(str::to_string);
        cfg.retry_config.max_attempts = attempts;
        cfg.retry_config.initial_backoff_ms = 1;
        cfg.retry_config.max_backoff_ms = 5;
        cfg.connect_timeout_secs = 2;
        cfg
    }

    #[test]
    fn route_keeps_non_default_ports() {
        let req = WireRequest::post("/");
        let (host, url, _) = route("https://ec2.us-east-1.amazonaws.com", &req);
        assert_eq!(host, "ec2.us-east-1.amazonaws.com");
        assert_eq!(url, "https://ec2.us-east-1.amazonaws.com/");
        assert_eq!(route("http://localhost:4566", &req).0, "localhost:4566");
    }

    #[test]
    fn endpoint_path_prefix_is_part_of_the_signed_path() {
        let mut req = WireRequest::post("/ListImportErrors");
        req.query.insert("maxResults".into(), "10".into());
        let (host, url, routed) = route("http://localhost:4566/gateway/", &req);
        assert_eq!(host, "localhost:4566");
        assert_eq!(routed.path, "/gateway/ListImportErrors");
        assert_eq!(url, "http://localhost:4566/gateway/ListImportErrors?maxResults=10");

        let (_, url, routed) = route("http://localhost:4566/gateway", &WireRequest::post("/"));
        assert_eq!(routed.path, "/gateway/");
        assert_eq!(url, "http://localhost:4566/gateway/");
    }

    #[test]
    fn url_joins_endpoint_path_and_encoded_query() {
        let mut req = WireRequest::post("/ListImportErrors");
        assert_eq!(
            req.url("https://mgn.us-east-1.amazonaws.com/"),
            "https://mgn.us-east-1.amazonaws.com/ListImportErrors"
        );
        req.query.insert("maxResults".into(), "10".into());
        req.query.insert("nextToken".into(), "a/b=".into());
        assert_eq!(
            req.url("https://mgn.us-east-1.amazonaws.com"),
            "https://mgn.us-east-1.amazonaws.com/ListImportErrors?maxResults=10&nextToken=a%2Fb%3D"
        );
    }

    #[test]
    fn backoff_grows_then_caps() {
        let retry = RetryConfig {
            initial_backoff_ms: 100,
            max_backoff_ms: 1_000,
            ..RetryConfig::default()
        };
        assert_eq!(backoff_ceiling(&retry, 0, false), 100);
        assert_eq!(backoff_ceiling(&retry, 2, false), 400);
        assert_eq!(backoff_ceiling(&retry, 10, false), 1_000);
        assert_eq!(backoff_ceiling(&retry, 70, false), 1_000);

        let adaptive = RetryConfig {
            mode: RetryMode::Adaptive,
            ..retry
        };
        assert_eq!(backoff_ceiling(&adaptive, 1, true), 400);
        assert_eq!(backoff_ceiling(&adaptive, 1, false), 200);
    }

    #[test]
    fn error_responses_pick_the_right_decoder() {
        let mut headers = BTreeMap::new();
        headers.insert("x-amzn-errortype".to_string(), "ConflictException".to_string());
        let json = AwsResponse {
            status: 409,
            headers,
            body: r#"{"message":"already exists"}"#.into(),
            request_id: Some("rid-1".into()),
        };
        let err = json.into_error("internetmonitor");
        assert_eq!(err.code, "ConflictException");
        assert_eq!(err.request_id.as_deref(), Some("rid-1"));

        let xml = AwsResponse {
            status: 400,
            headers: BTreeMap::new(),
            body: "<Response><Errors><Error><Code>InvalidIpamResourceDiscoveryId.NotFound</Code><Message>x</Message></Error></Errors></Response>".into(),
            request_id: None,
        };
        assert_eq!(xml.into_error("ec2").code, "InvalidIpamResourceDiscoveryId.NotFound");
    }

    #[tokio::test]
    async fn refused_connection_is_a_connectivity_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let endpoint = format!("http://{}", addr);
        let client = AwsClient::new(sdk(Some(&endpoint), 2)).unwrap();
        let err = client
            .send("rolesanywhere", &endpoint, &WireRequest::post("/"))
            .await
            .unwrap_err();
        assert!(err.is_connectivity(), "{:?}", err);
        assert_eq!(err.service, "rolesanywhere");
    }

    #[tokio::test]
    async fn transient_and_throttled_answers_are_retried() {
        let server = TestServer::start(vec![
            (503, r#"{"__type":"ServiceUnavailable","message":"busy"}"#),
            (400, r#"{"__type":"ThrottlingException","message":"Rate exceeded"}"#),
            (200, r#"{"ok":true}"#),
        ])
        .await;
        let client = AwsClient::new(sdk(Some(&server.endpoint), 3)).unwrap();

        let response = client
            .send("route53resolver", &server.endpoint, &WireRequest::post("/"))
            .await
            .unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"ok":true}"#);
        assert_eq!(server.requests().len(), 3);
    }

    #[tokio::test]
    async fn client_errors_are_sent_once() {
        let server = TestServer::start(vec![
            (400, r#"{"__type":"ValidationException","message":"bad id"}"#),
            (200, "{}"),
        ])
        .await;
        let client = AwsClient::new(sdk(Some(&server.endpoint), 3)).unwrap();

        let err = client
            .send("mgn", &server.endpoint, &WireRequest::post("/ListImportErrors"))
            .await
            .unwrap_err();
        assert_eq!(err.code, "ValidationException");
        assert_eq!(err.kind, ErrorKind::Service);
        assert_eq!(server.requests().len(), 1);
    }

    #[tokio::test]
    async fn retries_stop_at_max_attempts() {
        let server = TestServer::start(vec![
            (500, r#"{"__type":"InternalServerException","message":"a"}"#),
            (500, r#"{"__type":"InternalServerException","message":"b"}"#),
            (200, "{}"),
        ])
        .await;
        let client = AwsClient::new(sdk(Some(&server.endpoint), 2)).unwrap();

        let err = client
            .send("sagemaker", &server.endpoint, &WireRequest::post("/"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transient);
        assert_eq!(err.message, "b");
        assert_eq!(server.requests().len(), 2);
    }

    #[tokio::test]
    async fn prefixed_endpoint_receives_the_prefixed_path() {
        let server = TestServer::start(vec![(200, "{}")]).await;
        let endpoint = format!("{}/gateway", server.endpoint);
        let client = AwsClient::new(sdk(Some(&endpoint), 1)).unwrap();

        client
            .send("mgn", &endpoint, &WireRequest::post("/ListImportErrors"))
            .await
            .unwrap();
        assert!(server.requests()[0].starts_with("POST /gateway/ListImportErrors HTTP/1.1"));
    }
}
