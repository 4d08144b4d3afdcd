//! Confirmation gate for mutating operations.

use crate::context::ExecutionContext;
use crate::schema::ConfirmImpact;
use std::fmt;

/// What the user is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    /// `Verb-Noun (Operation)`.
    pub action: String,
    /// Value of the operation's confirmation target parameter.
    pub target: String,
    pub impact: ConfirmImpact,
}

impl fmt::Display for ConfirmPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.target.is_empty() {
            write!(f, "Performing the operation \"{}\"", self.action)
        } else {
            write!(
                f,
                "Performing the operation \"{}\" on target \"{}\"",
                self.action, self.target
            )
        }
    }
}

/// Asks the user whether to proceed.
pub trait Confirmer: Send + Sync {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Always proceeds.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoAccept;

impl Confirmer for AutoAccept {
    fn confirm(&self, _prompt: &ConfirmPrompt) -> bool {
        true
    }
}

/// Always declines; used when no terminal is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoDecline;

impl Confirmer for AutoDecline {
    fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        log::warn!("{}: declined, no interactive terminal (use -Force)", prompt);
        false
    }
}

/// Prompt when the operation's impact reaches the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmPolicy {
    pub threshold: ConfirmImpact,
}

impl Default for ConfirmPolicy {
    fn default() -> Self {
        Self {
            threshold: ConfirmImpact::Medium,
        }
    }
}

impl ConfirmPolicy {
    /// The prompt to show for `ctx`, or `None` when no prompt is due.
    pub fn prompt_for(&self, ctx: &ExecutionContext) -> Option<ConfirmPrompt> {
        let impact = ctx.operation.confirm?;
        if ctx.force || impact < self.threshold {
            return None;
        }
        Some(ConfirmPrompt {
            action: ctx.operation.action_label(),
            target: ctx.confirm_target(),
            impact,
        })
    }

    /// Runs the gate; `true` means the call may proceed.
    pub fn approve(&self, ctx: &ExecutionContext, confirmer: &dyn Confirmer) -> bool {
        match self.prompt_for(ctx) {
            Some(prompt) => confirmer.confirm(&prompt),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Invocation;
    use crate::schema::{MemberCasing, OperationSpec, ParamKind, ParamSpec, Protocol, ServiceSpec};

    static SVC: ServiceSpec = ServiceSpec {
        name: "Test",
        display_name: "Test Service",
        signing_name: "test",
        endpoint_prefix: "test",
        protocol: Protocol::AwsJson1_1,
        target_prefix: Some("Test"),
        api_version: "2020-01-01",
        casing: MemberCasing::Pascal,
    };

    static DELETE: OperationSpec = OperationSpec {
        verb: "Remove",
        noun: "TestRule",
        operation: "DeleteRule",
        service: &SVC,
        synopsis: "",
        params: &[ParamSpec::new("RuleId", ParamKind::String, &["RuleId"]).required()],
        response_fields: &["Rule"],
        default_select: "Rule",
        pass_thru: None,
        confirm: Some(ConfirmImpact::High),
        confirm_target: Some("RuleId"),
        paging: None,
        http: None,
        wire_renames: &[],
        opaque_members: &[],
    };

    static READ: OperationSpec = OperationSpec {
        verb: "Get",
        noun: "TestRule",
        operation: "GetRule",
        service: &SVC,
        synopsis: "",
        params: &[ParamSpec::new("RuleId", ParamKind::String, &["RuleId"]).required()],
        response_fields: &["Rule"],
        default_select: "Rule",
        pass_thru: None,
        confirm: None,
        confirm_target: None,
        paging: None,
        http: None,
        wire_renames: &[],
        opaque_members: &[],
    };

    fn ctx(op: &'static OperationSpec, inv: Invocation) -> ExecutionContext {
        ExecutionContext::build(op, &inv).unwrap()
    }

    #[test]
    fn prompt_names_action_and_target() {
        let prompt = ConfirmPolicy::default()
            .prompt_for(&ctx(&DELETE, Invocation::new().arg("RuleId", "r-9")))
            .unwrap();
        assert_eq!(prompt.action, "Remove-TestRule (DeleteRule)");
        assert_eq!(prompt.target, "r-9");
        assert_eq!(
            prompt.to_string(),
            "Performing the operation \"Remove-TestRule (DeleteRule)\" on target \"r-9\""
        );
    }

    #[test]
    fn force_and_read_only_skip_the_prompt() {
        let policy = ConfirmPolicy::default();
        assert!(policy.prompt_for(&ctx(&DELETE, Invocation::new().force())).is_none());
        assert!(policy.prompt_for(&ctx(&READ, Invocation::new())).is_none());
    }

    #[test]
    fn threshold_above_impact_skips_the_prompt() {
        let low_op = OperationSpec {
            confirm: Some(ConfirmImpact::Medium),
            ..DELETE
        };
        let low_op: &'static OperationSpec = Box::leak(Box::new(low_op));
        let policy = ConfirmPolicy {
            threshold: ConfirmImpact::High,
        };
        assert!(policy.prompt_for(&ctx(low_op, Invocation::new())).is_none());
        assert!(policy.prompt_for(&ctx(&DELETE, Invocation::new())).is_some());
    }

    #[test]
    fn decliner_blocks() {
        let c = ctx(&DELETE, Invocation::new());
        assert!(!ConfirmPolicy::default().approve(&c, &AutoDecline));
        assert!(ConfirmPolicy::default().approve(&c, &AutoAccept));
    }
}
