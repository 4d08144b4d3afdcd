use crate::services::APPSYNC;
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static STOP_SOURCE_GRAPHQL_API: OperationSpec = OperationSpec {
    verb: "Stop",
    noun: "ASYNSourceGraphqlApi",
    operation: "DisassociateSourceGraphqlApi",
    service: &APPSYNC,
    synopsis: "Deletes an association between a Merged API and source API using the Merged API's identifier and the association ID.",
    params: &[
        ParamSpec::new("AssociationId", ParamKind::String, &["AssociationId"])
            .required()
            .path("associationId")
            .help("The ID generated by the AppSync service for the source API association."),
        ParamSpec::new("MergedApiIdentifier", ParamKind::String, &["MergedApiIdentifier"])
            .required()
            .primary()
            .path("mergedApiIdentifier")
            .help("The identifier of the AppSync Merged API, either the API ID or its ARN."),
    ],
    response_fields: &["SourceApiAssociationStatus"],
    default_select: "SourceApiAssociationStatus",
    pass_thru: Some("MergedApiIdentifier"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("MergedApiIdentifier"),
    paging: None,
    http: Some(HttpBinding {
        method: "DELETE",
        uri: "/mergedApis/{mergedApiIdentifier}/sourceApiAssociations/{associationId}",
    }),
    wire_renames: &[],
    opaque_members: &[],
};
