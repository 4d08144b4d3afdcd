//! Request serializers and response decoders per wire protocol.
//!
//! The adapter hands over a JSON object keyed by API member names
//! (`ProfileId`, `Filters`). This module renames members for the wire,
//! lays them out as an HTTP request and turns the reply back into member
//! names.

use crate::client::{AwsResponse, WireRequest};
use crate::error::{AwsError, AwsResult};
use crate::signing::uri_encode;
use crate::xml::xml_to_json;
use opshell_core::schema::{Location, MemberCasing, OperationSpec, Protocol};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

// ── Member names ────────────────────────────────────────────────────────

/// Wire spelling of a request member.
pub fn to_wire_name(op: &OperationSpec, member: &str) -> String {
    if let Some((_, wire)) = op.wire_renames.iter().find(|(m, _)| *m == member) {
        return wire.to_string();
    }
    match op.service.casing {
        MemberCasing::Pascal => member.to_string(),
        MemberCasing::Camel => lower_first(member),
    }
}

/// EC2 list members whose query-protocol element name is not the member name.
const EC2_LIST_MEMBERS: &[(&str, &str)] = &[
    ("Tags", "tagSet"),
    ("Groups", "groupSet"),
    ("SecurityGroupIds", "securityGroupIdSet"),
    ("SubnetIds", "subnetIdSet"),
];

/// Member name of a response key; responses always come back Pascal-cased.
pub fn to_member_name(op: &OperationSpec, wire: &str) -> String {
    if let Some((member, _)) = op.wire_renames.iter().find(|(_, w)| *w == wire) {
        return member.to_string();
    }
    if op.service.protocol == Protocol::Ec2Query {
        if let Some((member, _)) = EC2_LIST_MEMBERS.iter().find(|(_, w)| *w == wire) {
            return member.to_string();
        }
    }
    upper_first(wire)
}

fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Rename every object key in `value` for the wire, leaving opaque maps as-is.
pub fn rename_to_wire(op: &OperationSpec, value: &Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.iter()
                .map(|(k, v)| {
                    let v = if op.is_opaque(k) {
                        v.clone()
                    } else {
                        rename_to_wire(op, v)
                    };
                    (to_wire_name(op, k), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|i| rename_to_wire(op, i)).collect()),
        other => other.clone(),
    }
}

/// Rename every object key in `value` back to member names.
pub fn rename_from_wire(op: &OperationSpec, value: Value) -> Value {
    match value {
        Value::Object(obj) => Value::Object(
            obj.into_iter()
                .map(|(k, v)| {
                    let member = to_member_name(op, &k);
                    let v = if op.is_opaque(&member) {
                        v
                    } else {
                        rename_from_wire(op, v)
                    };
                    (member, v)
                })
                .collect(),
        ),
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|i| rename_from_wire(op, i)).collect())
        }
        other => other,
    }
}

// ── Requests ────────────────────────────────────────────────────────────

/// Lay out `request` as an HTTP request for `op`.
pub fn build_request(op: &OperationSpec, request: &Value) -> AwsResult<WireRequest> {
    let service = op.service;
    let mut members = match request {
        Value::Object(obj) => obj.clone(),
        Value::Null => Map::new(),
        other => {
            return Err(AwsError::serialization(
                service.signing_name,
                &format!("request must be an object, got {}", other),
            ))
        }
    };

    fill_idempotency_tokens(op, &mut members);

    match service.protocol {
        Protocol::AwsJson1_0 => aws_json_request(op, members, "1.0"),
        Protocol::AwsJson1_1 => aws_json_request(op, members, "1.1"),
        Protocol::RestJson1 => rest_json_request(op, members),
        Protocol::Ec2Query => Ok(ec2_query_request(op, &members)),
    }
}

/// Unset idempotency tokens get a fresh UUID, once per request, so every
/// retry of the request carries the same token.
fn fill_idempotency_tokens(op: &OperationSpec, members: &mut Map<String, Value>) {
    for param in op.params.iter().filter(|p| p.idempotency_token) {
        let Some(member) = param.target.first() else {
            continue;
        };
        let unset = members.get(*member).map_or(true, Value::is_null);
        if unset {
            members.insert(member.to_string(), Value::String(Uuid::new_v4().to_string()));
        }
    }
}

fn aws_json_request(op: &OperationSpec, members: Map<String, Value>, version: &str) -> AwsResult<WireRequest> {
    let prefix = op.service.target_prefix.ok_or_else(|| {
        AwsError::serialization(op.service.signing_name, "JSON protocol requires a target prefix")
    })?;
    let body = rename_to_wire(op, &Value::Object(members));

    let mut req = WireRequest::post("/");
    req.headers.insert(
        "content-type".to_string(),
        format!("application/x-amz-json-{}", version),
    );
    req.headers.insert(
        "x-amz-target".to_string(),
        format!("{}.{}", prefix, op.operation),
    );
    req.body = body.to_string();
    Ok(req)
}

fn rest_json_request(op: &OperationSpec, mut members: Map<String, Value>) -> AwsResult<WireRequest> {
    let signing_name = op.service.signing_name;
    let http = op.http.ok_or_else(|| {
        AwsError::serialization(signing_name, &format!("{} has no HTTP binding", op.operation))
    })?;

    let mut path = http.uri.to_string();
    let mut query = BTreeMap::new();

    for param in op.params {
        let Some(member) = param.target.first() else {
            continue;
        };
        match param.location {
            Location::Body => {}
            Location::Path(label) => {
                let placeholder = format!("{{{}}}", label);
                let value = members
                    .remove(*member)
                    .filter(|v| !v.is_null())
                    .map(|v| scalar_text(&v))
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        AwsError::serialization(
                            signing_name,
                            &format!("{} is required to build the request URI", param.name),
                        )
                    })?;
                path = path.replace(&placeholder, &uri_encode(&value));
            }
            Location::Query(name) => {
                if let Some(v) = members.remove(*member).filter(|v| !v.is_null()) {
                    query.insert(name.to_string(), scalar_text(&v));
                }
            }
        }
    }

    let mut req = WireRequest {
        method: http.method,
        path,
        query,
        headers: BTreeMap::new(),
        body: String::new(),
    };

    let sends_body = !matches!(http.method, "GET" | "DELETE" | "HEAD");
    if sends_body || !members.is_empty() {
        req.headers
            .insert("content-type".to_string(), "application/json".to_string());
        req.body = rename_to_wire(op, &Value::Object(members)).to_string();
    }
    Ok(req)
}

fn ec2_query_request(op: &OperationSpec, members: &Map<String, Value>) -> WireRequest {
    let mut params = BTreeMap::new();
    params.insert("Action".to_string(), op.operation.to_string());
    params.insert("Version".to_string(), op.service.api_version.to_string());
    for (member, value) in members {
        flatten_query(op, &to_wire_name(op, member), value, &mut params);
    }

    let mut req = WireRequest::post("/");
    req.headers.insert(
        "content-type".to_string(),
        "application/x-www-form-urlencoded; charset=utf-8".to_string(),
    );
    req.body = crate::signing::build_query_string(&params);
    req
}

/// `Filter.1.Name`, `Filter.1.Value.1`, ... for EC2 query.
fn flatten_query(op: &OperationSpec, prefix: &str, value: &Value, out: &mut BTreeMap<String, String>) {
    match value {
        Value::Null => {}
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_query(op, &format!("{}.{}", prefix, i + 1), item, out);
            }
        }
        Value::Object(obj) => {
            for (k, v) in obj {
                flatten_query(op, &format!("{}.{}", prefix, to_wire_name(op, k)), v, out);
            }
        }
        scalar => {
            out.insert(prefix.to_string(), scalar_text(scalar));
        }
    }
}

fn scalar_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ── Responses ───────────────────────────────────────────────────────────

/// Decode a successful response into member names.
pub fn parse_response(op: &OperationSpec, response: &AwsResponse) -> AwsResult<Value> {
    let signing_name = op.service.signing_name;
    let raw = match op.service.protocol {
        Protocol::Ec2Query => {
            let mut v = xml_to_json(&response.body)
                .map_err(|e| AwsError::bad_response(signing_name, response.status, &e))?;
            if let Value::Object(obj) = &mut v {
                obj.remove("requestId");
            }
            v
        }
        _ if response.body.trim().is_empty() => Value::Object(Map::new()),
        _ => serde_json::from_str::<Value>(&response.body).map_err(|e| {
            AwsError::bad_response(
                signing_name,
                response.status,
                &format!("invalid JSON in response: {}", e),
            )
        })?,
    };
    Ok(rename_from_wire(op, raw))
}
