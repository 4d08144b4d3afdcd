use crate::constants::{KEY_ALGORITHM, KEY_MATERIAL_TYPE};
use crate::services::PAYMENT_CRYPTOGRAPHY;
use opshell_core::schema::{OperationSpec, ParamKind, ParamSpec};

pub static GET_PARAMETERS_FOR_IMPORT: OperationSpec = OperationSpec {
    verb: "Get",
    noun: "PAYCCParametersForImport",
    operation: "GetParametersForImport",
    service: &PAYMENT_CRYPTOGRAPHY,
    synopsis: "Gets the import token and the wrapping key certificate to initiate a TR-34 key import.",
    params: &[
        ParamSpec::new("KeyMaterialType", ParamKind::Enum(KEY_MATERIAL_TYPE), &["KeyMaterialType"])
            .required()
            .primary()
            .help("The key block format type, e.g. TR34_KEY_BLOCK."),
        ParamSpec::new("WrappingKeyAlgorithm", ParamKind::Enum(KEY_ALGORITHM), &["WrappingKeyAlgorithm"])
            .required()
            .help("The wrapping key algorithm to generate a wrapping key certificate."),
    ],
    response_fields: &[
        "ImportToken",
        "ParametersValidUntilTimestamp",
        "WrappingKeyAlgorithm",
        "WrappingKeyCertificate",
        "WrappingKeyCertificateChain",
    ],
    default_select: "*",
    pass_thru: Some("KeyMaterialType"),
    confirm: None,
    confirm_target: None,
    paging: None,
    http: None,
    wire_renames: &[],
    opaque_members: &[],
};
