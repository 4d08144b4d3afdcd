//! Drives one invocation through bind → context → confirm → request →
//! invoke → project, including automatic pagination.

use crate::binding::Invocation;
use crate::confirm::{AutoDecline, ConfirmPolicy, Confirmer};
use crate::context::ExecutionContext;
use crate::error::AdapterError;
use crate::invoke::OperationInvoker;
use crate::output::{process_output, CmdletOutput, OutputSink};
use crate::request::{insert_at_path, populate_request};
use crate::schema::{OperationSpec, PagingSpec};
use serde_json::Value;

/// How an invocation ended when its arguments were valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The confirmation gate said no; nothing was sent.
    Declined,
    Completed { calls: usize, errors: usize },
}

impl Outcome {
    pub fn had_errors(&self) -> bool {
        matches!(self, Self::Completed { errors, .. } if *errors > 0)
    }
}

pub struct Adapter<I> {
    invoker: I,
    policy: ConfirmPolicy,
    confirmer: Box<dyn Confirmer>,
}

impl<I: OperationInvoker> Adapter<I> {
    /// An adapter that declines every prompt until a confirmer is set.
    pub fn new(invoker: I) -> Self {
        Self {
            invoker,
            policy: ConfirmPolicy::default(),
            confirmer: Box::new(AutoDecline),
        }
    }

    pub fn with_policy(mut self, policy: ConfirmPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'static) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    pub fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Run one invocation.
    ///
    /// `Err` is returned only for argument errors, before anything is sent.
    /// Call failures go to `sink` and are counted in the outcome.
    pub async fn run(
        &self,
        operation: &'static OperationSpec,
        invocation: &Invocation,
        sink: &mut dyn OutputSink,
    ) -> Result<Outcome, AdapterError> {
        let ctx = ExecutionContext::build(operation, invocation)?;
        for warning in &ctx.warnings {
            sink.warning(warning);
        }

        if !self.policy.approve(&ctx, self.confirmer.as_ref()) {
            log::debug!("{} not confirmed, skipping", operation.action_label());
            return Ok(Outcome::Declined);
        }

        let request = populate_request(&ctx);
        let outcome = match operation.paging {
            Some(paging) => self.run_paged(&ctx, paging, request, sink).await,
            None => self.run_single(&ctx, request, sink).await,
        };
        Ok(outcome)
    }

    async fn call(&self, ctx: &ExecutionContext, request: Value) -> Result<Value, AdapterError> {
        let op = ctx.operation;
        log::debug!(
            "Invoking {} operation '{}' ({})",
            op.service.display_name,
            op.operation,
            op.command_name()
        );
        self.invoker
            .invoke(op, request)
            .await
            .map_err(AdapterError::from)
    }

    async fn run_single(
        &self,
        ctx: &ExecutionContext,
        request: Value,
        sink: &mut dyn OutputSink,
    ) -> Outcome {
        let output = match self.call(ctx, request).await {
            Ok(response) => {
                let projected = ctx.selector.project(&response, &ctx.bound);
                CmdletOutput::success(projected, response)
            }
            Err(err) => CmdletOutput::failure(err),
        };
        let ok = process_output(output, sink);
        Outcome::Completed {
            calls: 1,
            errors: usize::from(!ok),
        }
    }

    async fn run_paged(
        &self,
        ctx: &ExecutionContext,
        paging: PagingSpec,
        request: Value,
        sink: &mut dyn OutputSink,
    ) -> Outcome {
        // `^Param` output does not depend on the pages, so it is emitted once.
        let parameter_select = ctx.selector.selects_parameter();
        let user_controls_paging = ctx.user_controls_paging();
        let mut next_token = ctx
            .parameter_value(paging.token_param)
            .and_then(Value::as_str)
            .map(str::to_string);
        let mut calls = 0;
        let mut errors = 0;

        loop {
            let mut page_request = request.clone();
            set_token(&mut page_request, paging.input_token, next_token.as_deref());
            calls += 1;

            match self.call(ctx, page_request).await {
                Ok(response) => {
                    next_token = response
                        .get(paging.output_token)
                        .and_then(Value::as_str)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string);
                    if !parameter_select {
                        let projected = ctx.selector.project(&response, &ctx.bound);
                        process_output(CmdletOutput::success(projected, response), sink);
                    }
                }
                Err(err) => {
                    process_output(CmdletOutput::failure(err), sink);
                    errors += 1;
                    break;
                }
            }

            if user_controls_paging || next_token.is_none() {
                break;
            }
            log::trace!("{}: fetching next page", ctx.operation.command_name());
        }

        if parameter_select {
            let value = ctx.selector.project(&Value::Null, &ctx.bound);
            process_output(CmdletOutput::success(value, Value::Null), sink);
        }

        Outcome::Completed { calls, errors }
    }
}

fn set_token(request: &mut Value, member: &'static str, token: Option<&str>) {
    let Value::Object(map) = request else {
        return;
    };
    match token {
        Some(t) => insert_at_path(map, &[member], Value::String(t.to_string())),
        None => {
            map.remove(member);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::confirm::AutoAccept;
    use crate::error::InvokeError;
    use crate::output::CollectingSink;
    use crate::schema::{
        ConfirmImpact, MemberCasing, ParamKind, ParamSpec, Protocol, ServiceSpec,
    };
    use crate::testing::ScriptedInvoker;
    use serde_json::json;

    static SVC: ServiceSpec = ServiceSpec {
        name: "Test",
        display_name: "Test Service",
        signing_name: "test",
        endpoint_prefix: "test",
        protocol: Protocol::Ec2Query,
        target_prefix: None,
        api_version: "2016-11-15",
        casing: MemberCasing::Pascal,
    };

    static LIST: OperationSpec = OperationSpec {
        verb: "Get",
        noun: "TestAccount",
        operation: "GetAccounts",
        service: &SVC,
        synopsis: "",
        params: &[
            ParamSpec::new("DiscoveryId", ParamKind::String, &["DiscoveryId"]).required().primary(),
            ParamSpec::new("NextToken", ParamKind::String, &["NextToken"]),
        ],
        response_fields: &["Accounts", "NextToken"],
        default_select: "Accounts",
        pass_thru: Some("DiscoveryId"),
        confirm: None,
        confirm_target: None,
        paging: Some(PagingSpec::next_token()),
        http: None,
        wire_renames: &[],
        opaque_members: &[],
    };

    static ENABLE: OperationSpec = OperationSpec {
        verb: "Enable",
        noun: "TestProfile",
        operation: "EnableProfile",
        service: &SVC,
        synopsis: "",
        params: &[ParamSpec::new("ProfileId", ParamKind::String, &["ProfileId"]).required().primary()],
        response_fields: &["Profile"],
        default_select: "Profile",
        pass_thru: Some("ProfileId"),
        confirm: Some(ConfirmImpact::Medium),
        confirm_target: Some("ProfileId"),
        paging: None,
        http: None,
        wire_renames: &[],
        opaque_members: &[],
    };

    fn three_pages() -> ScriptedInvoker {
        ScriptedInvoker::new()
            .respond(json!({"Accounts": [{"Id": "a"}], "NextToken": "t1"}))
            .respond(json!({"Accounts": [{"Id": "b"}, {"Id": "c"}], "NextToken": "t2"}))
            .respond(json!({"Accounts": [{"Id": "d"}]}))
    }

    #[tokio::test]
    async fn auto_iterates_until_token_runs_out() {
        let adapter = Adapter::new(three_pages());
        let mut sink = CollectingSink::default();
        let outcome = adapter
            .run(&LIST, &Invocation::new().arg("DiscoveryId", "d-1"), &mut sink)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed { calls: 3, errors: 0 });
        let ids: Vec<_> = sink.items.iter().map(|i| i["Id"].clone()).collect();
        assert_eq!(ids, vec![json!("a"), json!("b"), json!("c"), json!("d")]);

        let requests = adapter.invoker().requests();
        assert!(requests[0].1.get("NextToken").is_none());
        assert_eq!(requests[1].1["NextToken"], json!("t1"));
        assert_eq!(requests[2].1["NextToken"], json!("t2"));
    }

    #[tokio::test]
    async fn no_auto_iteration_fetches_one_page() {
        let adapter = Adapter::new(three_pages());
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("DiscoveryId", "d-1").no_auto_iteration();
        let outcome = adapter.run(&LIST, &inv, &mut sink).await.unwrap();
        assert_eq!(outcome, Outcome::Completed { calls: 1, errors: 0 });
        assert_eq!(sink.items, vec![json!({"Id": "a"})]);
    }

    #[tokio::test]
    async fn bound_next_token_fetches_one_page_from_there() {
        let adapter = Adapter::new(three_pages());
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("DiscoveryId", "d-1").arg("NextToken", "t5");
        adapter.run(&LIST, &inv, &mut sink).await.unwrap();
        assert_eq!(adapter.invoker().call_count(), 1);
        assert_eq!(adapter.invoker().requests()[0].1["NextToken"], json!("t5"));
    }

    #[tokio::test]
    async fn empty_token_ends_the_loop() {
        let invoker = ScriptedInvoker::new()
            .respond(json!({"Accounts": [], "NextToken": ""}))
            .respond(json!({"Accounts": [{"Id": "never"}]}));
        let adapter = Adapter::new(invoker);
        let mut sink = CollectingSink::default();
        adapter.run(&LIST, &Invocation::new(), &mut sink).await.unwrap();
        assert_eq!(adapter.invoker().call_count(), 1);
        assert!(sink.items.is_empty());
    }

    #[tokio::test]
    async fn failed_page_is_reported_and_stops() {
        let invoker = ScriptedInvoker::new()
            .respond(json!({"Accounts": [{"Id": "a"}], "NextToken": "t1"}))
            .fail(InvokeError::Service("Throttling: slow down".into()))
            .respond(json!({"Accounts": [{"Id": "never"}]}));
        let adapter = Adapter::new(invoker);
        let mut sink = CollectingSink::default();
        let outcome = adapter.run(&LIST, &Invocation::new(), &mut sink).await.unwrap();
        assert_eq!(outcome, Outcome::Completed { calls: 2, errors: 1 });
        assert!(outcome.had_errors());
        assert_eq!(sink.items, vec![json!({"Id": "a"})]);
        assert_eq!(sink.errors, vec!["Throttling: slow down".to_string()]);
    }

    #[tokio::test]
    async fn parameter_select_on_paged_emits_once() {
        let adapter = Adapter::new(three_pages());
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("DiscoveryId", "d-1").select("^DiscoveryId");
        adapter.run(&LIST, &inv, &mut sink).await.unwrap();
        assert_eq!(adapter.invoker().call_count(), 3);
        assert_eq!(sink.items, vec![json!("d-1")]);
    }

    #[tokio::test]
    async fn declined_confirmation_never_invokes() {
        let adapter = Adapter::new(ScriptedInvoker::new().respond(json!({"Profile": {}})));
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("ProfileId", "p-1234");
        let outcome = adapter.run(&ENABLE, &inv, &mut sink).await.unwrap();
        assert_eq!(outcome, Outcome::Declined);
        assert_eq!(adapter.invoker().call_count(), 0);
        assert!(sink.items.is_empty());
    }

    #[tokio::test]
    async fn force_skips_the_prompt() {
        let adapter = Adapter::new(
            ScriptedInvoker::new().respond(json!({"Profile": {"ProfileId": "p-1234", "Enabled": true}})),
        );
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("ProfileId", "p-1234").force();
        adapter.run(&ENABLE, &inv, &mut sink).await.unwrap();

        let requests = adapter.invoker().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], ("EnableProfile".to_string(), json!({"ProfileId": "p-1234"})));
        assert_eq!(sink.items, vec![json!({"ProfileId": "p-1234", "Enabled": true})]);
    }

    #[tokio::test]
    async fn invalid_select_fails_before_any_call() {
        let adapter = Adapter::new(ScriptedInvoker::new()).with_confirmer(AutoAccept);
        let mut sink = CollectingSink::default();
        let inv = Invocation::new().arg("ProfileId", "p-1").select("Bogus");
        let err = adapter.run(&ENABLE, &inv, &mut sink).await.unwrap_err();
        assert!(err.is_argument_error());
        assert_eq!(adapter.invoker().call_count(), 0);
    }

    #[tokio::test]
    async fn connectivity_failure_is_rewrapped() {
        let invoker = ScriptedInvoker::new().fail(InvokeError::Connectivity {
            endpoint: "https://test.nowhere-1.amazonaws.com".into(),
            region: "nowhere-1".into(),
            source: "failed to lookup address".into(),
        });
        let adapter = Adapter::new(invoker).with_confirmer(AutoAccept);
        let mut sink = CollectingSink::default();
        let outcome = adapter
            .run(&ENABLE, &Invocation::new().arg("ProfileId", "p-1"), &mut sink)
            .await
            .unwrap();
        assert!(outcome.had_errors());
        assert!(sink.errors[0].starts_with("Name resolution failure"));
        assert!(sink.errors[0].contains("nowhere-1"));
    }

    #[tokio::test]
    async fn missing_required_warns_and_still_calls() {
        let adapter = Adapter::new(ScriptedInvoker::new().respond(json!({"Profile": null})))
            .with_confirmer(AutoAccept);
        let mut sink = CollectingSink::default();
        adapter.run(&ENABLE, &Invocation::new(), &mut sink).await.unwrap();
        assert_eq!(sink.warnings.len(), 1);
        assert_eq!(adapter.invoker().requests()[0].1, json!({}));
    }
}
