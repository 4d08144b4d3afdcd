//! Route 53 Recovery Readiness and Route 53 Resolver.

use crate::services::{RECOVERY_READINESS, ROUTE53_RESOLVER};
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static UPDATE_RESOURCE_SET: OperationSpec = OperationSpec {
    verb: "Update",
    noun: "PDResourceSet",
    operation: "UpdateResourceSet",
    service: &RECOVERY_READINESS,
    synopsis: "Updates an existing Resource Set.",
    params: &[
        ParamSpec::new("Resource", ParamKind::StructureList, &["Resources"])
            .required()
            .aliases(&["Resources"])
            .help("A list of resource objects, e.g. [{\"ResourceArn\":\"arn:...\"}]."),
        ParamSpec::new("ResourceSetName", ParamKind::String, &["ResourceSetName"])
            .required()
            .path("resourceSetName")
            .help("Name of a resource set."),
        ParamSpec::new("ResourceSetType", ParamKind::String, &["ResourceSetType"])
            .required()
            .help("The resource type of the resources in the set, e.g. AWS::EC2::Instance."),
    ],
    response_fields: &["ResourceSetArn", "ResourceSetName", "ResourceSetType", "Resources", "Tags"],
    default_select: "*",
    pass_thru: None,
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("ResourceSetName"),
    paging: None,
    http: Some(HttpBinding {
        method: "PUT",
        uri: "/resourcesets/{resourceSetName}",
    }),
    wire_renames: &[],
    opaque_members: &["Tags"],
};

pub static REMOVE_FIREWALL_RULE: OperationSpec = OperationSpec {
    verb: "Remove",
    noun: "R53RFirewallRule",
    operation: "DeleteFirewallRule",
    service: &ROUTE53_RESOLVER,
    synopsis: "Deletes the specified firewall rule.",
    params: &[
        ParamSpec::new("FirewallDomainListId", ParamKind::String, &["FirewallDomainListId"])
            .required()
            .help("The ID of the domain list that is used in the rule."),
        ParamSpec::new("FirewallRuleGroupId", ParamKind::String, &["FirewallRuleGroupId"])
            .required()
            .help("The unique identifier of the firewall rule group that you want to delete the rule from."),
    ],
    response_fields: &["FirewallRule"],
    default_select: "FirewallRule",
    pass_thru: None,
    confirm: Some(ConfirmImpact::High),
    confirm_target: Some("FirewallRuleGroupId"),
    paging: None,
    http: None,
    wire_renames: &[],
    opaque_members: &[],
};
