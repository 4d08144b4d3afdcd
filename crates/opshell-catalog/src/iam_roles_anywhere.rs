use crate::services::IAM_ROLES_ANYWHERE;
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static ENABLE_PROFILE: OperationSpec = OperationSpec {
    verb: "Enable",
    noun: "IAMRAProfile",
    operation: "EnableProfile",
    service: &IAM_ROLES_ANYWHERE,
    synopsis: "Enables the roles in a profile to receive session credentials in CreateSession.",
    params: &[ParamSpec::new("ProfileId", ParamKind::String, &["ProfileId"])
        .required()
        .primary()
        .path("profileId")
        .help("The unique identifier of the profile.")],
    response_fields: &["Profile"],
    default_select: "Profile",
    pass_thru: Some("ProfileId"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("ProfileId"),
    paging: None,
    http: Some(HttpBinding {
        method: "POST",
        uri: "/profile/{profileId}/enable",
    }),
    wire_renames: &[],
    opaque_members: &[],
};
