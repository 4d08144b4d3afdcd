//! `-Select` expressions and output projection.

use crate::binding::BoundParameters;
use crate::error::AdapterError;
use crate::schema::OperationSpec;
use serde_json::Value;

/// What an invocation emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `*`: the whole response object.
    Response,
    /// A top-level response field.
    Field(&'static str),
    /// `^Param`: the value the caller bound to a parameter.
    Parameter(&'static str),
}

impl Selector {
    /// Parse a `-Select` expression against the operation's shapes.
    pub fn parse(op: &OperationSpec, expr: &str) -> Result<Self, AdapterError> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(AdapterError::InvalidSelect("expression is empty".into()));
        }
        if expr == "*" {
            return Ok(Self::Response);
        }
        if let Some(name) = expr.strip_prefix('^') {
            return op
                .find_param(name)
                .map(|p| Self::Parameter(p.name))
                .ok_or_else(|| {
                    AdapterError::InvalidSelect(format!(
                        "{} has no parameter named '{}'",
                        op.command_name(),
                        name
                    ))
                });
        }
        op.response_field(expr).map(Self::Field).ok_or_else(|| {
            AdapterError::InvalidSelect(format!(
                "'{}' is not a field of the {} response; valid fields are: *, {}",
                expr,
                op.operation,
                op.response_fields.join(", ")
            ))
        })
    }

    pub fn selects_parameter(&self) -> bool {
        matches!(self, Self::Parameter(_))
    }

    /// Project a response (or the bound parameters for `^Param`).
    pub fn project(&self, response: &Value, bound: &BoundParameters) -> Value {
        match self {
            Self::Response => response.clone(),
            Self::Field(name) => response.get(*name).cloned().unwrap_or(Value::Null),
            Self::Parameter(name) => bound.value(name).cloned().unwrap_or(Value::Null),
        }
    }
}
