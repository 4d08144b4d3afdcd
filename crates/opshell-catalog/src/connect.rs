use crate::constants::{EVENT_SOURCE_NAME, RULE_PUBLISH_STATUS};
use crate::services::CONNECT;
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static NEW_RULE: OperationSpec = OperationSpec {
    verb: "New",
    noun: "CONNRule",
    operation: "CreateRule",
    service: &CONNECT,
    synopsis: "Creates a rule for the specified Amazon Connect instance.",
    params: &[
        ParamSpec::new("Action", ParamKind::StructureList, &["Actions"])
            .required()
            .aliases(&["Actions"])
            .help("A list of actions to be run when the rule is triggered."),
        ParamSpec::new(
            "TriggerEventSource_EventSourceName",
            ParamKind::Enum(EVENT_SOURCE_NAME),
            &["TriggerEventSource", "EventSourceName"],
        )
        .required()
        .help("The name of the event source."),
        ParamSpec::new(
            "TriggerEventSource_IntegrationAssociationId",
            ParamKind::String,
            &["TriggerEventSource", "IntegrationAssociationId"],
        )
        .help("The identifier for the integration association."),
        ParamSpec::new("Function", ParamKind::String, &["Function"])
            .required()
            .help("The conditions of the rule, in the Connect rules function language."),
        ParamSpec::new("InstanceId", ParamKind::String, &["InstanceId"])
            .required()
            .path("InstanceId")
            .help("The identifier of the Amazon Connect instance."),
        ParamSpec::new("Name", ParamKind::String, &["Name"])
            .required()
            .primary()
            .help("A unique name for the rule."),
        ParamSpec::new("PublishStatus", ParamKind::Enum(RULE_PUBLISH_STATUS), &["PublishStatus"])
            .required()
            .help("The publish status of the rule."),
        ParamSpec::new("ClientToken", ParamKind::String, &["ClientToken"])
            .idempotency_token()
            .help("A unique, case-sensitive identifier for idempotent requests."),
    ],
    response_fields: &["RuleArn", "RuleId"],
    default_select: "*",
    pass_thru: Some("Name"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("Name"),
    paging: None,
    http: Some(HttpBinding {
        method: "PUT",
        uri: "/rules/{InstanceId}",
    }),
    wire_renames: &[],
    opaque_members: &[],
};
