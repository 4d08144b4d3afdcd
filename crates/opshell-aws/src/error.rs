//! Failures of the wire layer.
//!
//! Services answer with JSON (`__type` / `message`, or the
//! `x-amzn-ErrorType` header) or, for EC2, with an XML
//! `<Response><Errors><Error>` document. Both are decoded into [`AwsError`]
//! together with a [`ErrorKind`] that drives retries and tells the adapter
//! whether the service was reached at all.

use crate::xml::xml_to_json;
use opshell_core::InvokeError;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The service rejected the request.
    Service,
    /// The service asked us to slow down.
    Throttling,
    /// A 5xx answer or a timeout; worth another try.
    Transient,
    /// DNS lookup or TCP connect failed.
    Connectivity,
    /// The request never made it onto the wire.
    Serialization,
    /// The response could not be decoded.
    Response,
}

#[derive(Debug, Clone)]
pub struct AwsError {
    pub kind: ErrorKind,
    /// Service error code, e.g. `ValidationException`.
    pub code: String,
    pub message: String,
    /// 0 when no response was received.
    pub status_code: u16,
    pub request_id: Option<String>,
    /// Signing name of the service.
    pub service: String,
    pub action: Option<String>,
}

pub type AwsResult<T> = Result<T, AwsError>;

impl fmt::Display for AwsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.service)?;
        if let Some(action) = &self.action {
            write!(f, ".{}", action)?;
        }
        write!(f, ": {}: {}", self.code, self.message)?;
        if self.status_code != 0 {
            write!(f, " (HTTP {}", self.status_code)?;
            match &self.request_id {
                Some(id) => write!(f, ", request {})", id)?,
                None => write!(f, ")")?,
            }
        }
        Ok(())
    }
}

impl std::error::Error for AwsError {}

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "RequestLimitExceeded",
    "EC2ThrottledException",
    "SlowDown",
];

const TRANSIENT_CODES: &[&str] = &[
    "InternalError",
    "InternalFailure",
    "InternalServerException",
    "ServiceUnavailable",
    "RequestTimeout",
    "RequestTimeoutException",
];

impl AwsError {
    fn bare(kind: ErrorKind, service: &str, code: &str, message: &str) -> Self {
        Self {
            kind,
            code: code.to_string(),
            message: message.to_string(),
            status_code: 0,
            request_id: None,
            service: service.to_string(),
            action: None,
        }
    }

    /// An error answer from the service, classified by code and status.
    pub fn from_service(service: &str, code: &str, message: &str, status_code: u16) -> Self {
        let kind = if status_code == 429 || THROTTLING_CODES.contains(&code) {
            ErrorKind::Throttling
        } else if status_code >= 500 || TRANSIENT_CODES.contains(&code) {
            ErrorKind::Transient
        } else {
            ErrorKind::Service
        };
        Self {
            status_code,
            ..Self::bare(kind, service, code, message)
        }
    }

    pub fn serialization(service: &str, message: &str) -> Self {
        Self::bare(ErrorKind::Serialization, service, "SerializationError", message)
    }

    pub fn bad_response(service: &str, status_code: u16, message: &str) -> Self {
        Self {
            status_code,
            ..Self::bare(ErrorKind::Response, service, "ResponseParseError", message)
        }
    }

    /// Transport failure from reqwest.
    pub fn transport(service: &str, err: &reqwest::Error) -> Self {
        let (kind, code) = if err.is_connect() {
            (ErrorKind::Connectivity, "ConnectionError")
        } else if err.is_timeout() {
            (ErrorKind::Transient, "RequestTimeout")
        } else {
            (ErrorKind::Service, "HttpError")
        };
        Self::bare(kind, service, code, &error_chain(err))
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn is_retryable(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Throttling | ErrorKind::Transient | ErrorKind::Connectivity
        )
    }

    pub fn is_connectivity(&self) -> bool {
        self.kind == ErrorKind::Connectivity
    }

    pub fn is_serialization(&self) -> bool {
        self.kind == ErrorKind::Serialization
    }

    /// Decode an EC2 `<Response><Errors><Error>` body.
    pub fn from_xml_body(service: &str, status_code: u16, body: &str) -> Self {
        let doc = xml_to_json(body).unwrap_or(Value::Null);
        let error = &doc["Errors"]["Error"];
        let text = |v: &Value| v.as_str().map(str::to_string);

        let code = text(&error["Code"]).unwrap_or_else(|| "UnknownError".to_string());
        let message =
            text(&error["Message"]).unwrap_or_else(|| format!("HTTP {} from {}", status_code, service));
        let mut err = Self::from_service(service, &code, &message, status_code);
        err.request_id = text(&doc["RequestID"]).or_else(|| text(&doc["RequestId"]));
        err
    }

    /// Decode a JSON error body. REST services may send the code only in
    /// the `x-amzn-ErrorType` header, passed as `header_code`.
    pub fn from_json_body(
        service: &str,
        status_code: u16,
        body: &str,
        header_code: Option<&str>,
    ) -> Self {
        let doc: Value = serde_json::from_str(body).unwrap_or(Value::Null);
        let field = |names: &[&str]| {
            names
                .iter()
                .find_map(|n| doc.get(*n).and_then(Value::as_str))
                .map(str::to_string)
        };

        let code = header_code
            .map(str::to_string)
            .or_else(|| field(&["__type", "code", "Code"]))
            .map(|c| short_error_code(&c))
            .unwrap_or_else(|| "UnknownError".to_string());
        let message = field(&["message", "Message"]).unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {} with empty body", status_code)
            } else {
                body.chars().take(200).collect()
            }
        });
        Self::from_service(service, &code, &message, status_code)
    }
}

/// `com.amazonaws.sagemaker#ResourceNotFound` and
/// `ResourceNotFound:http://...` both shorten to `ResourceNotFound`.
fn short_error_code(raw: &str) -> String {
    let head = raw.split(':').next().unwrap_or(raw);
    head.rsplit('#').next().unwrap_or(head).to_string()
}

/// The resolver detail hides in reqwest's source chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

/// Hand a failed call to the adapter.
pub fn into_invoke_error(err: AwsError, endpoint: &str, region: &str) -> InvokeError {
    match err.kind {
        ErrorKind::Connectivity => InvokeError::Connectivity {
            endpoint: endpoint.to_string(),
            region: region.to_string(),
            source: Box::new(err),
        },
        ErrorKind::Serialization => InvokeError::Encoding(err.message),
        _ => InvokeError::Service(Box::new(err)),
    }
}
