//! Static operation metadata.
//!
//! Every command is one [`OperationSpec`] row: the request parameters it
//! accepts, the response fields it can project, and how it is paged,
//! confirmed and put on the wire. The tables themselves live in
//! `opshell-catalog`; this module only defines their shape.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Service metadata ────────────────────────────────────────────────────

/// Wire protocol of a service, as declared by its API model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// JSON body, `X-Amz-Target` header, `application/x-amz-json-1.0`.
    AwsJson1_0,
    /// JSON body, `X-Amz-Target` header, `application/x-amz-json-1.1`.
    AwsJson1_1,
    /// REST style: method + URI template, JSON body.
    RestJson1,
    /// EC2 flavoured Query protocol: form-encoded body, XML response.
    Ec2Query,
}

/// How member names are spelled on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberCasing {
    /// `MonitorName` stays `MonitorName`.
    Pascal,
    /// `ProfileId` becomes `profileId`.
    Camel,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceSpec {
    /// Short identifier used by `list-commands --service`.
    pub name: &'static str,
    /// Human-readable name used in log and error messages.
    pub display_name: &'static str,
    /// SigV4 signing name.
    pub signing_name: &'static str,
    /// Host prefix: `https://{endpoint_prefix}.{region}.amazonaws.com`.
    pub endpoint_prefix: &'static str,
    pub protocol: Protocol,
    /// Prefix of the `X-Amz-Target` header for the JSON protocols.
    pub target_prefix: Option<&'static str>,
    pub api_version: &'static str,
    pub casing: MemberCasing,
}

// ── Confirmation ────────────────────────────────────────────────────────

/// Severity of a mutating operation; decides whether a prompt is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmImpact {
    Low,
    Medium,
    High,
}

impl fmt::Display for ConfirmImpact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for ConfirmImpact {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!(
                "unknown confirm impact '{}', expected low, medium or high",
                other
            )),
        }
    }
}

// ── Parameters ──────────────────────────────────────────────────────────

/// Value type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamKind {
    String,
    Int32,
    Int64,
    Float,
    Bool,
    StringList,
    /// String-to-string map (`Tags`), keys are never re-cased on the wire.
    StringMap,
    /// String member whose known values come from a constant class.
    Enum(&'static [&'static str]),
    /// A nested structure supplied as JSON.
    Structure,
    /// A list of nested structures supplied as JSON.
    StructureList,
}

impl ParamKind {
    /// Short type label used in help output.
    pub fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::StringList => "string[]",
            Self::StringMap => "map",
            Self::Enum(_) => "enum",
            Self::Structure => "json",
            Self::StructureList => "json[]",
        }
    }

    pub fn is_switch_like(&self) -> bool {
        matches!(self, Self::Bool)
    }
}

/// Where a request member travels in a REST request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Body,
    /// Substituted into the URI template label of this name.
    Path(&'static str),
    /// Sent as a query-string parameter of this name.
    Query(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: ParamKind,
    pub required: bool,
    pub position: Option<usize>,
    /// Binds a bare pipeline value.
    pub from_pipeline: bool,
    /// Binds the same-named property of a pipeline record.
    pub from_pipeline_by_name: bool,
    /// Member path inside the request object.
    pub target: &'static [&'static str],
    pub location: Location,
    /// Filled with a fresh UUID when the caller leaves it unset.
    pub idempotency_token: bool,
    pub help: &'static str,
}

impl ParamSpec {
    pub const fn new(name: &'static str, kind: ParamKind, target: &'static [&'static str]) -> Self {
        Self {
            name,
            aliases: &[],
            kind,
            required: false,
            position: None,
            from_pipeline: false,
            from_pipeline_by_name: true,
            target,
            location: Location::Body,
            idempotency_token: false,
            help: "",
        }
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    /// Positional slot 0 parameters also bind bare pipeline values.
    pub const fn primary(self) -> Self {
        Self {
            position: Some(0),
            from_pipeline: true,
            ..self
        }
    }

    pub const fn path(self, label: &'static str) -> Self {
        Self {
            location: Location::Path(label),
            ..self
        }
    }

    pub const fn query(self, name: &'static str) -> Self {
        Self {
            location: Location::Query(name),
            ..self
        }
    }

    pub const fn idempotency_token(self) -> Self {
        Self {
            idempotency_token: true,
            ..self
        }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self { help, ..self }
    }

    /// Case-insensitive match on the name or any alias.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }
}

// ── Paging / HTTP ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct PagingSpec {
    /// Parameter the caller binds to take over paging.
    pub token_param: &'static str,
    /// Request member that carries the token.
    pub input_token: &'static str,
    /// Response member that carries the next token.
    pub output_token: &'static str,
}

impl PagingSpec {
    pub const fn next_token() -> Self {
        Self {
            token_param: "NextToken",
            input_token: "NextToken",
            output_token: "NextToken",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HttpBinding {
    pub method: &'static str,
    /// URI template with `{label}` placeholders.
    pub uri: &'static str,
}

// ── Operations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct OperationSpec {
    pub verb: &'static str,
    pub noun: &'static str,
    /// API operation name, e.g. `EnableProfile`.
    pub operation: &'static str,
    pub service: &'static ServiceSpec,
    pub synopsis: &'static str,
    pub params: &'static [ParamSpec],
    /// Top-level members of the response shape, selectable by name.
    pub response_fields: &'static [&'static str],
    /// `*` or one of `response_fields`.
    pub default_select: &'static str,
    /// Parameter echoed by the deprecated `-PassThru` switch.
    pub pass_thru: Option<&'static str>,
    /// `None` for read-only operations.
    pub confirm: Option<ConfirmImpact>,
    /// Parameter whose value names the target in the confirmation prompt.
    pub confirm_target: Option<&'static str>,
    pub paging: Option<PagingSpec>,
    pub http: Option<HttpBinding>,
    /// `(member, wire)` spellings that differ from the service casing rule.
    pub wire_renames: &'static [(&'static str, &'static str)],
    /// Members holding free-form maps whose keys are passed through as-is.
    pub opaque_members: &'static [&'static str],
}

impl OperationSpec {
    /// `Verb-Noun`, the command name.
    pub fn command_name(&self) -> String {
        format!("{}-{}", self.verb, self.noun)
    }

    /// `Verb-Noun (Operation)`, used in prompts and log lines.
    pub fn action_label(&self) -> String {
        format!("{} ({})", self.command_name(), self.operation)
    }

    pub fn find_param(&self, name: &str) -> Option<&'static ParamSpec> {
        let params: &'static [ParamSpec] = self.params;
        params
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .or_else(|| params.iter().find(|p| p.answers_to(name)))
    }

    /// Canonical spelling of a response field, matched case-insensitively.
    pub fn response_field(&self, name: &str) -> Option<&'static str> {
        self.response_fields
            .iter()
            .copied()
            .find(|f| f.eq_ignore_ascii_case(name))
    }

    pub fn positional_param(&self) -> Option<&'static ParamSpec> {
        let params: &'static [ParamSpec] = self.params;
        params.iter().find(|p| p.position == Some(0))
    }

    pub fn is_mutating(&self) -> bool {
        self.confirm.is_some()
    }

    pub fn is_opaque(&self, member: &str) -> bool {
        self.opaque_members.contains(&member)
    }
}
