//! Requests built by the adapter, laid out on the wire for each protocol.

use opshell_aws::protocol::{build_request, parse_response};
use opshell_aws::{AwsResponse, WireRequest};
use opshell_catalog::{connect, ec2, emr_serverless, internet_monitor};
use opshell_core::testing::ScriptedInvoker;
use opshell_core::{Adapter, AutoAccept, CollectingSink, Invocation, OperationSpec};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Run `inv` through the adapter and lay out the captured request.
async fn wire(op: &'static OperationSpec, inv: Invocation) -> WireRequest {
    let adapter = Adapter::new(ScriptedInvoker::new().respond(json!({}))).with_confirmer(AutoAccept);
    let mut sink = CollectingSink::default();
    adapter.run(op, &inv, &mut sink).await.unwrap();
    let requests = adapter.invoker().requests();
    assert_eq!(requests.len(), 1);
    build_request(op, &requests[0].1).unwrap()
}

fn is_generated_token(value: &Value) -> bool {
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .map_or(false, |u| u.get_version_num() == 4)
}

#[tokio::test]
async fn connect_rule_goes_to_the_instance_path() {
    let inv = Invocation::new()
        .arg("InstanceId", "inst-1")
        .arg("Name", "escalate")
        .arg("Function", "$.Sentiment == 'NEGATIVE'")
        .arg("PublishStatus", "published")
        .arg("TriggerEventSource_EventSourceName", "OnPostCallAnalysisAvailable")
        .arg("Actions", r#"[{"ActionType":"CREATE_TASK"}]"#);
    let req = wire(&connect::NEW_RULE, inv).await;

    assert_eq!(req.method, "PUT");
    assert_eq!(req.path, "/rules/inst-1");
    assert_eq!(req.headers["content-type"], "application/json");
    let mut body: Value = serde_json::from_str(&req.body).unwrap();
    let token = body.as_object_mut().unwrap().remove("ClientToken").unwrap();
    assert!(is_generated_token(&token), "{}", token);
    assert_eq!(
        body,
        json!({
            "Name": "escalate",
            "Function": "$.Sentiment == 'NEGATIVE'",
            "PublishStatus": "PUBLISHED",
            "TriggerEventSource": {"EventSourceName": "OnPostCallAnalysisAvailable"},
            "Actions": [{"ActionType": "CREATE_TASK"}]
        })
    );
}

#[tokio::test]
async fn trust_provider_tags_are_flattened_for_the_query_protocol() {
    let inv = Invocation::new()
        .arg("TrustProviderType", "user")
        .arg("PolicyReferenceName", "idp")
        .arg(
            "TagSpecification",
            r#"[{"ResourceType":"verified-access-trust-provider","Tags":[{"Key":"Name","Value":"tp"}]}]"#,
        );
    let req = wire(&ec2::NEW_VERIFIED_ACCESS_TRUST_PROVIDER, inv).await;

    assert_eq!(req.method, "POST");
    let pairs: Vec<&str> = req.body.split('&').collect();
    assert!(pairs.contains(&"Action=CreateVerifiedAccessTrustProvider"));
    assert!(pairs.contains(&"TrustProviderType=user"));
    assert!(pairs.contains(&"PolicyReferenceName=idp"));
    assert!(pairs.contains(&"TagSpecification.1.ResourceType=verified-access-trust-provider"));
    assert!(pairs.contains(&"TagSpecification.1.Tag.1.Key=Name"));
    assert!(pairs.contains(&"TagSpecification.1.Tag.1.Value=tp"));
    let token = pairs
        .iter()
        .find_map(|p| p.strip_prefix("ClientToken="))
        .unwrap();
    assert!(is_generated_token(&json!(token)));
}

#[test]
fn created_trust_provider_lists_its_tags() {
    let response = AwsResponse {
        status: 200,
        headers: BTreeMap::new(),
        body: r#"<CreateVerifiedAccessTrustProviderResponse xmlns="http://ec2.amazonaws.com/doc/2016-11-15/">
    <requestId>4b1b4f0e-example</requestId>
    <verifiedAccessTrustProvider>
        <verifiedAccessTrustProviderId>vatp-0bb32de759a3e19e7</verifiedAccessTrustProviderId>
        <trustProviderType>user</trustProviderType>
        <policyReferenceName>idp</policyReferenceName>
        <tagSet>
            <item><key>Name</key><value>tp</value></item>
            <item><key>env</key><value>prod</value></item>
        </tagSet>
    </verifiedAccessTrustProvider>
</CreateVerifiedAccessTrustProviderResponse>"#
            .into(),
        request_id: None,
    };
    let v = parse_response(&ec2::NEW_VERIFIED_ACCESS_TRUST_PROVIDER, &response).unwrap();
    let provider = &v["VerifiedAccessTrustProvider"];
    assert_eq!(provider["PolicyReferenceName"], "idp");
    assert_eq!(
        provider["Tags"],
        json!([{"Key": "Name", "Value": "tp"}, {"Key": "env", "Value": "prod"}])
    );
    assert!(provider.get("TagSet").is_none());
}

#[tokio::test]
async fn job_run_keeps_property_and_tag_keys_verbatim() {
    let inv = Invocation::new()
        .arg("ApplicationId", "app-1")
        .arg("ExecutionRoleArn", "arn:aws:iam::1:role/emr")
        .arg(
            "ConfigurationOverrides_ApplicationConfiguration",
            r#"[{"Classification":"spark-defaults","Properties":{"spark.driver.cores":"2"}}]"#,
        )
        .arg("Tag", "CostCenter=42");
    let req = wire(&emr_serverless::START_JOB_RUN, inv).await;

    assert_eq!(req.method, "POST");
    assert_eq!(req.path, "/applications/app-1/jobruns");
    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body["executionRoleArn"], "arn:aws:iam::1:role/emr");
    assert_eq!(
        body["configurationOverrides"]["applicationConfiguration"][0],
        json!({"classification": "spark-defaults", "properties": {"spark.driver.cores": "2"}})
    );
    assert_eq!(body["tags"], json!({"CostCenter": "42"}));
    assert!(body.get("applicationId").is_none());
    assert!(is_generated_token(&body["clientToken"]));
}

#[tokio::test]
async fn monitor_keeps_a_caller_supplied_token() {
    let inv = Invocation::new()
        .arg("MonitorName", "edge")
        .arg("ClientToken", "create-edge-1");
    let req = wire(&internet_monitor::NEW_MONITOR, inv).await;
    let body: Value = serde_json::from_str(&req.body).unwrap();
    assert_eq!(body, json!({"MonitorName": "edge", "ClientToken": "create-edge-1"}));
}
