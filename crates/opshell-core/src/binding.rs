//! Parameter surface: turns caller-supplied arguments into typed values.
//!
//! Arguments arrive either as text from the command line (possibly repeated)
//! or as JSON from a pipeline record. Names and aliases resolve
//! case-insensitively; the literal `$null` binds an explicit null.

use crate::error::AdapterError;
use crate::schema::{OperationSpec, ParamKind, ParamSpec};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Literal that binds an explicit null.
pub const NULL_LITERAL: &str = "$null";

// ── Invocation ──────────────────────────────────────────────────────────

/// Raw value of one argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Null,
    /// One entry per occurrence on the command line.
    Text(Vec<String>),
    Json(Value),
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::Text(vec![s.to_string()])
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::Text(vec![s])
    }
}

impl From<Value> for ArgValue {
    fn from(v: Value) -> Self {
        ArgValue::Json(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub value: ArgValue,
}

/// Everything the caller supplied for one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Invocation {
    pub arguments: Vec<Argument>,
    pub select: Option<String>,
    pub pass_thru: bool,
    pub force: bool,
    pub no_auto_iteration: bool,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(mut self, name: &str, value: impl Into<ArgValue>) -> Self {
        self.arguments.push(Argument {
            name: name.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn null(self, name: &str) -> Self {
        self.arg(name, ArgValue::Null)
    }

    pub fn select(mut self, expr: &str) -> Self {
        self.select = Some(expr.to_string());
        self
    }

    pub fn pass_thru(mut self) -> Self {
        self.pass_thru = true;
        self
    }

    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    pub fn no_auto_iteration(mut self) -> Self {
        self.no_auto_iteration = true;
        self
    }

    /// Merge one pipeline record into a copy of this invocation.
    ///
    /// A scalar record binds to the parameter that accepts bare pipeline
    /// values; an object binds its properties by name or alias. Arguments
    /// already present on the command line win.
    pub fn with_pipeline_record(&self, op: &OperationSpec, record: &Value) -> Invocation {
        let mut merged = self.clone();
        let already_bound = |merged: &Invocation, param: &ParamSpec| {
            merged.arguments.iter().any(|a| param.answers_to(&a.name))
        };

        match record {
            Value::Object(props) => {
                for param in op.params.iter().filter(|p| p.from_pipeline_by_name) {
                    if already_bound(&merged, param) {
                        continue;
                    }
                    if let Some((_, v)) = props.iter().find(|(k, _)| param.answers_to(k)) {
                        merged.arguments.push(Argument {
                            name: param.name.to_string(),
                            value: ArgValue::Json(v.clone()),
                        });
                    }
                }
            }
            Value::Null => {}
            scalar => {
                if let Some(param) = op.params.iter().find(|p| p.from_pipeline) {
                    if !already_bound(&merged, param) {
                        merged.arguments.push(Argument {
                            name: param.name.to_string(),
                            value: ArgValue::Json(scalar.clone()),
                        });
                    }
                }
            }
        }
        merged
    }
}

// ── Bound parameters ────────────────────────────────────────────────────

/// Parameters after name resolution and coercion. `None` is an explicit null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundParameters {
    values: BTreeMap<&'static str, Option<Value>>,
}

impl BoundParameters {
    pub fn was_bound(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// The bound value, `None` when unbound or bound to null.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).and_then(|v| v.as_ref())
    }

    pub fn is_explicit_null(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(None))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&Value>)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Resolve and coerce every argument of `invocation` against `op`.
pub fn bind(op: &OperationSpec, invocation: &Invocation) -> Result<BoundParameters, AdapterError> {
    let mut values = BTreeMap::new();
    for arg in &invocation.arguments {
        let param = op.find_param(&arg.name).ok_or_else(|| {
            AdapterError::invalid_argument(
                &arg.name,
                format!("{} has no parameter named '{}'", op.command_name(), arg.name),
            )
        })?;
        if values.contains_key(param.name) {
            return Err(AdapterError::invalid_argument(
                param.name,
                "the parameter was bound more than once",
            ));
        }
        let coerced = coerce(param, &arg.value)?;
        values.insert(param.name, coerced);
    }
    Ok(BoundParameters { values })
}

// ── Coercion ────────────────────────────────────────────────────────────

/// Convert a raw argument to the JSON value of the parameter's kind.
pub fn coerce(param: &ParamSpec, raw: &ArgValue) -> Result<Option<Value>, AdapterError> {
    match raw {
        ArgValue::Null => Ok(None),
        ArgValue::Json(Value::Null) => Ok(None),
        ArgValue::Text(items) if items.len() == 1 && items[0] == NULL_LITERAL => Ok(None),
        ArgValue::Text(items) => coerce_text(param, items).map(Some),
        ArgValue::Json(v) => coerce_json(param, v).map(Some),
    }
}

fn coerce_text(param: &ParamSpec, items: &[String]) -> Result<Value, AdapterError> {
    match param.kind {
        ParamKind::String => Ok(Value::String(single(param, items)?.to_string())),
        ParamKind::Int32 => parse_int(param, single(param, items)?, i32::MIN as i64, i32::MAX as i64),
        ParamKind::Int64 => parse_int(param, single(param, items)?, i64::MIN, i64::MAX),
        ParamKind::Float => {
            let text = single(param, items)?;
            let f: f64 = text.trim().parse().map_err(|_| {
                AdapterError::invalid_argument(param.name, format!("'{}' is not a number", text))
            })?;
            serde_json::Number::from_f64(f)
                .map(Value::Number)
                .ok_or_else(|| AdapterError::invalid_argument(param.name, "number is not finite"))
        }
        ParamKind::Bool => parse_bool(param, single(param, items)?).map(Value::Bool),
        ParamKind::Enum(values) => Ok(Value::String(canonical_enum(param, values, single(param, items)?))),
        ParamKind::StringList => Ok(Value::Array(
            items
                .iter()
                .flat_map(|i| i.split(','))
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        )),
        ParamKind::StringMap => {
            let mut map = Map::new();
            for item in items {
                let trimmed = item.trim();
                if trimmed.starts_with('{') {
                    let parsed = parse_json(param, trimmed)?;
                    merge_string_map(param, &mut map, &parsed)?;
                    continue;
                }
                for pair in trimmed.split(',').filter(|p| !p.trim().is_empty()) {
                    let (k, v) = pair.split_once('=').ok_or_else(|| {
                        AdapterError::invalid_argument(
                            param.name,
                            format!("'{}' is not a key=value pair", pair),
                        )
                    })?;
                    map.insert(k.trim().to_string(), Value::String(v.trim().to_string()));
                }
            }
            Ok(Value::Object(map))
        }
        ParamKind::Structure => {
            let v = parse_json(param, single(param, items)?)?;
            coerce_json(param, &v)
        }
        ParamKind::StructureList => {
            let mut out = Vec::new();
            for item in items {
                match parse_json(param, item)? {
                    Value::Array(list) => out.extend(list),
                    other => out.push(other),
                }
            }
            coerce_json(param, &Value::Array(out))
        }
    }
}

fn single<'a>(param: &ParamSpec, items: &'a [String]) -> Result<&'a str, AdapterError> {
    match items {
        [one] => Ok(one.as_str()),
        _ => Err(AdapterError::invalid_argument(
            param.name,
            "expected a single value",
        )),
    }
}

fn coerce_json(param: &ParamSpec, v: &Value) -> Result<Value, AdapterError> {
    let mismatch = |expected: &str| {
        AdapterError::invalid_argument(param.name, format!("expected {}, got {}", expected, v))
    };

    match (param.kind, v) {
        // Pipeline records often carry everything as strings.
        (
            ParamKind::Int32
            | ParamKind::Int64
            | ParamKind::Float
            | ParamKind::Bool
            | ParamKind::Enum(_)
            | ParamKind::StringMap
            | ParamKind::StringList
            | ParamKind::Structure
            | ParamKind::StructureList,
            Value::String(s),
        ) => coerce_text(param, std::slice::from_ref(s)),
        (ParamKind::String, Value::String(_)) => Ok(v.clone()),
        (ParamKind::String, Value::Number(n)) => Ok(Value::String(n.to_string())),
        (ParamKind::String, Value::Bool(b)) => Ok(Value::String(b.to_string())),
        (ParamKind::Int32, Value::Number(n)) => match n.as_i64() {
            Some(i) if i32::try_from(i).is_ok() => Ok(v.clone()),
            _ => Err(mismatch("a 32-bit integer")),
        },
        (ParamKind::Int64, Value::Number(n)) if n.is_i64() => Ok(v.clone()),
        (ParamKind::Float, Value::Number(_)) => Ok(v.clone()),
        (ParamKind::Bool, Value::Bool(_)) => Ok(v.clone()),
        (ParamKind::StringList, Value::Array(items)) => items
            .iter()
            .map(|i| match i {
                Value::String(_) => Ok(i.clone()),
                Value::Number(n) => Ok(Value::String(n.to_string())),
                _ => Err(mismatch("a list of strings")),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        (ParamKind::StringMap, Value::Object(_)) => {
            let mut map = Map::new();
            merge_string_map(param, &mut map, v)?;
            Ok(Value::Object(map))
        }
        (ParamKind::Structure, Value::Object(_)) => Ok(v.clone()),
        (ParamKind::StructureList, Value::Array(items)) => {
            if items.iter().all(Value::is_object) {
                Ok(v.clone())
            } else {
                Err(mismatch("a list of objects"))
            }
        }
        (ParamKind::StructureList, Value::Object(_)) => Ok(Value::Array(vec![v.clone()])),
        (ParamKind::String, _) => Err(mismatch("a string")),
        (ParamKind::Int32 | ParamKind::Int64, _) => Err(mismatch("an integer")),
        (ParamKind::Float, _) => Err(mismatch("a number")),
        (ParamKind::Bool, _) => Err(mismatch("a boolean")),
        (ParamKind::Enum(_), _) => Err(mismatch("a string")),
        (ParamKind::StringList, _) => Err(mismatch("a list of strings")),
        (ParamKind::StringMap, _) => Err(mismatch("an object of strings")),
        (ParamKind::Structure, _) => Err(mismatch("an object")),
        (ParamKind::StructureList, _) => Err(mismatch("a list of objects")),
    }
}

fn parse_int(param: &ParamSpec, text: &str, min: i64, max: i64) -> Result<Value, AdapterError> {
    let n: i64 = text.trim().parse().map_err(|_| {
        AdapterError::invalid_argument(param.name, format!("'{}' is not an integer", text))
    })?;
    if n < min || n > max {
        return Err(AdapterError::invalid_argument(
            param.name,
            format!("{} is out of range", n),
        ));
    }
    Ok(Value::from(n))
}

fn parse_bool(param: &ParamSpec, text: &str) -> Result<bool, AdapterError> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "$true" | "1" | "yes" => Ok(true),
        "false" | "$false" | "0" | "no" => Ok(false),
        other => Err(AdapterError::invalid_argument(
            param.name,
            format!("'{}' is not a boolean", other),
        )),
    }
}

fn parse_json(param: &ParamSpec, text: &str) -> Result<Value, AdapterError> {
    serde_json::from_str(text.trim()).map_err(|e| {
        AdapterError::invalid_argument(param.name, format!("invalid JSON: {}", e))
    })
}

fn merge_string_map(
    param: &ParamSpec,
    map: &mut Map<String, Value>,
    source: &Value,
) -> Result<(), AdapterError> {
    let Value::Object(obj) = source else {
        return Err(AdapterError::invalid_argument(param.name, "expected a JSON object"));
    };
    for (k, v) in obj {
        let s = match v {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(AdapterError::invalid_argument(
                    param.name,
                    format!("value of '{}' must be a string, got {}", k, other),
                ))
            }
        };
        map.insert(k.clone(), Value::String(s));
    }
    Ok(())
}

/// Known values are normalized to their canonical spelling; unknown values
/// pass through so newer service values keep working.
fn canonical_enum(param: &ParamSpec, known: &[&str], text: &str) -> String {
    let text = text.trim();
    match known.iter().find(|k| k.eq_ignore_ascii_case(text)) {
        Some(k) => k.to_string(),
        None => {
            log::info!(
                "value '{}' for -{} is not one of the known values ({}); passing it through",
                text,
                param.name,
                known.join(", ")
            );
            text.to_string()
        }
    }
}
