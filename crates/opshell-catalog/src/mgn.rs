use crate::services::MGN;
use opshell_core::schema::{HttpBinding, OperationSpec, ParamKind, ParamSpec};

/// Single page per call; the caller passes `-NextToken` to continue.
pub static GET_IMPORT_ERROR_LIST: OperationSpec = OperationSpec {
    verb: "Get",
    noun: "MGNImportErrorList",
    operation: "ListImportErrors",
    service: &MGN,
    synopsis: "List import errors.",
    params: &[
        ParamSpec::new("ImportID", ParamKind::String, &["ImportID"])
            .required()
            .primary()
            .help("The ID of the import."),
        ParamSpec::new("MaxResult", ParamKind::Int32, &["MaxResults"])
            .aliases(&["MaxResults"])
            .help("The maximum number of results to return."),
        ParamSpec::new("NextToken", ParamKind::String, &["NextToken"])
            .help("The token of the page to return."),
    ],
    response_fields: &["Items", "NextToken"],
    default_select: "Items",
    pass_thru: Some("ImportID"),
    confirm: None,
    confirm_target: None,
    paging: None,
    http: Some(HttpBinding {
        method: "POST",
        uri: "/ListImportErrors",
    }),
    wire_renames: &[],
    opaque_members: &[],
};
