//! Signature Version 4 over a [`WireRequest`].
//!
//! The path of a `WireRequest` is already percent-encoded by `protocol`;
//! the canonical URI encodes every segment once more, as SigV4 requires
//! for every service except S3. Query parameters live in a sorted map, so
//! the canonical query string is just the encoded map.

use crate::client::WireRequest;
use crate::config::AwsCredentials;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Only `A-Z a-z 0-9 - _ . ~` pass through; `/` is encoded too.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Who signs, for which service and region, at what time.
#[derive(Debug, Clone, Copy)]
pub struct SigningScope<'a> {
    pub credentials: &'a AwsCredentials,
    pub region: &'a str,
    pub service: &'a str,
    pub time: DateTime<Utc>,
}

impl SigningScope<'_> {
    fn date(&self) -> String {
        self.time.format("%Y%m%d").to_string()
    }

    fn timestamp(&self) -> String {
        self.time.format("%Y%m%dT%H%M%SZ").to_string()
    }

    fn credential_scope(&self) -> String {
        format!("{}/{}/{}/aws4_request", self.date(), self.region, self.service)
    }

    fn signing_key(&self) -> Vec<u8> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        [self.date().as_str(), self.region, self.service, "aws4_request"]
            .iter()
            .fold(secret.into_bytes(), |key, part| hmac_sha256(&key, part.as_bytes()))
    }
}

/// Add `host`, `x-amz-date`, the session token and `authorization` to
/// `request.headers`.
pub fn sign(request: &mut WireRequest, host: &str, scope: &SigningScope<'_>) {
    let headers = &mut request.headers;
    headers.insert("host".to_string(), host.to_string());
    headers.insert("x-amz-date".to_string(), scope.timestamp());
    if let Some(token) = &scope.credentials.session_token {
        headers.insert("x-amz-security-token".to_string(), token.clone());
    }

    let (canonical, signed_headers) = canonical_request(request);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        scope.timestamp(),
        scope.credential_scope(),
        sha256_hex(canonical.as_bytes())
    );
    let signature = hex::encode(hmac_sha256(&scope.signing_key(), string_to_sign.as_bytes()));

    request.headers.insert(
        "authorization".to_string(),
        format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM,
            scope.credentials.access_key_id,
            scope.credential_scope(),
            signed_headers,
            signature
        ),
    );
}

/// The canonical request text and the `;`-joined signed header names.
fn canonical_request(request: &WireRequest) -> (String, String) {
    let headers: BTreeMap<String, String> = request
        .headers
        .iter()
        .map(|(k, v)| (k.to_ascii_lowercase(), collapse_spaces(v)))
        .collect();
    let canonical_headers: String = headers.iter().map(|(k, v)| format!("{}:{}\n", k, v)).collect();
    let signed_headers = headers.keys().cloned().collect::<Vec<_>>().join(";");

    let canonical = [
        request.method.to_string(),
        canonical_uri(&request.path),
        build_query_string(&request.query),
        canonical_headers,
        signed_headers.clone(),
        sha256_hex(request.body.as_bytes()),
    ]
    .join("\n");
    (canonical, signed_headers)
}

fn canonical_uri(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }
    path.split('/').map(uri_encode).collect::<Vec<_>>().join("/")
}

fn collapse_spaces(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    // Any key length is accepted.
    let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(key) else {
        return Vec::new();
    };
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

pub fn uri_encode(input: &str) -> String {
    utf8_percent_encode(input, UNRESERVED).to_string()
}

/// `k=v&...` in key order, both sides encoded.
pub fn build_query_string(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", uri_encode(k), uri_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}
