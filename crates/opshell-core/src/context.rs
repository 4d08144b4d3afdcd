//! Per-invocation execution context.

use crate::binding::{bind, BoundParameters, Invocation};
use crate::error::AdapterError;
use crate::schema::OperationSpec;
use crate::select::Selector;
use serde_json::Value;

/// Typed copy of everything one invocation needs after binding.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    pub operation: &'static OperationSpec,
    pub bound: BoundParameters,
    pub selector: Selector,
    pub force: bool,
    pub no_auto_iteration: bool,
    /// Non-fatal problems found while building the context.
    pub warnings: Vec<String>,
}

impl ExecutionContext {
    /// Bind the invocation and resolve `-Select` / `-PassThru`.
    pub fn build(
        operation: &'static OperationSpec,
        invocation: &Invocation,
    ) -> Result<Self, AdapterError> {
        let bound = bind(operation, invocation)?;
        let selector = resolve_selector(operation, invocation)?;

        let mut warnings = Vec::new();
        for param in operation.params.iter().filter(|p| p.required) {
            if bound.is_explicit_null(param.name) {
                warnings.push(format!(
                    "You are passing $null as a value for parameter {} which is marked as \
                     required. The request will be sent without it.",
                    param.name
                ));
            } else if !bound.was_bound(param.name) {
                warnings.push(format!(
                    "Parameter {} is marked as required but was not supplied. The request \
                     will be sent without it.",
                    param.name
                ));
            }
        }

        Ok(Self {
            operation,
            bound,
            selector,
            force: invocation.force,
            no_auto_iteration: invocation.no_auto_iteration,
            warnings,
        })
    }

    pub fn parameter_value(&self, name: &str) -> Option<&Value> {
        self.bound.value(name)
    }

    /// True when the caller pages by hand: `-NoAutoIteration` or a bound
    /// continuation-token parameter.
    pub fn user_controls_paging(&self) -> bool {
        match self.operation.paging {
            Some(paging) => self.no_auto_iteration || self.bound.was_bound(paging.token_param),
            None => true,
        }
    }

    /// Display form of the confirmation target, empty when unset.
    pub fn confirm_target(&self) -> String {
        self.operation
            .confirm_target
            .and_then(|name| self.parameter_value(name))
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default()
    }
}

fn resolve_selector(
    op: &'static OperationSpec,
    invocation: &Invocation,
) -> Result<Selector, AdapterError> {
    match (&invocation.select, invocation.pass_thru) {
        (Some(_), true) => Err(AdapterError::invalid_argument(
            "PassThru",
            "-PassThru cannot be used when -Select is specified.",
        )),
        (Some(expr), false) => Selector::parse(op, expr),
        (None, true) => {
            let name = op.pass_thru.ok_or_else(|| {
                AdapterError::invalid_argument(
                    "PassThru",
                    format!("{} does not support -PassThru", op.command_name()),
                )
            })?;
            log::warn!(
                "-PassThru is deprecated and will be removed; use -Select '^{}' instead",
                name
            );
            Ok(Selector::Parameter(name))
        }
        (None, false) => Selector::parse(op, op.default_select),
    }
}
