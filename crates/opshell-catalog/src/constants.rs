//! Known values of enum-like members.
//!
//! Binding normalizes the case of a known value and passes anything else
//! through, so services that add values keep working.

pub const EVENT_SOURCE_NAME: &[&str] = &[
    "OnPostCallAnalysisAvailable",
    "OnRealTimeCallAnalysisAvailable",
    "OnRealTimeChatAnalysisAvailable",
    "OnPostChatAnalysisAvailable",
    "OnZendeskTicketCreate",
    "OnZendeskTicketStatusUpdate",
    "OnSalesforceCaseCreate",
    "OnContactEvaluationSubmit",
    "OnMetricDataUpdate",
    "OnCaseCreate",
    "OnCaseUpdate",
];

pub const RULE_PUBLISH_STATUS: &[&str] = &["DRAFT", "PUBLISHED"];

pub const TRUST_PROVIDER_TYPE: &[&str] = &["user", "device"];

pub const USER_TRUST_PROVIDER_TYPE: &[&str] = &["iam-identity-center", "oidc"];

pub const DEVICE_TRUST_PROVIDER_TYPE: &[&str] = &["jamf", "crowdstrike", "jumpcloud"];

pub const LOG_DELIVERY_STATUS: &[&str] = &["ENABLED", "DISABLED"];

pub const KEY_MATERIAL_TYPE: &[&str] = &[
    "TR34_KEY_BLOCK",
    "TR31_KEY_BLOCK",
    "ROOT_PUBLIC_KEY_CERTIFICATE",
    "TRUSTED_PUBLIC_KEY_CERTIFICATE",
    "KEY_CRYPTOGRAM",
];

pub const KEY_ALGORITHM: &[&str] = &[
    "TDES_2KEY",
    "TDES_3KEY",
    "AES_128",
    "AES_192",
    "AES_256",
    "RSA_2048",
    "RSA_3072",
    "RSA_4096",
    "ECC_NIST_P256",
    "ECC_NIST_P384",
];

pub const AUTOML_METRIC: &[&str] = &[
    "Accuracy",
    "MSE",
    "F1",
    "F1macro",
    "AUC",
    "RMSE",
    "BalancedAccuracy",
    "R2",
    "Recall",
    "RecallMacro",
    "Precision",
    "PrecisionMacro",
    "MAE",
    "MAPE",
    "MASE",
    "WAPE",
    "AverageWeightedQuantileLoss",
];
