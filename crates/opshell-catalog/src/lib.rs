//! # opshell-catalog
//!
//! The command tables. Each module holds the [`OperationSpec`] rows of one
//! service; [`all_operations`] is the registry the CLI builds its
//! subcommands from.

pub mod appsync;
pub mod connect;
pub mod constants;
pub mod ec2;
pub mod emr_serverless;
pub mod iam_roles_anywhere;
pub mod internet_monitor;
pub mod mgn;
pub mod payment_cryptography;
pub mod route53;
pub mod sagemaker;
pub mod services;

use opshell_core::schema::{OperationSpec, ServiceSpec};

static OPERATIONS: &[&OperationSpec] = &[
    &appsync::STOP_SOURCE_GRAPHQL_API,
    &connect::NEW_RULE,
    &ec2::GET_IPAM_DISCOVERED_ACCOUNT,
    &ec2::NEW_VERIFIED_ACCESS_TRUST_PROVIDER,
    &emr_serverless::START_JOB_RUN,
    &iam_roles_anywhere::ENABLE_PROFILE,
    &internet_monitor::NEW_MONITOR,
    &mgn::GET_IMPORT_ERROR_LIST,
    &payment_cryptography::GET_PARAMETERS_FOR_IMPORT,
    &route53::UPDATE_RESOURCE_SET,
    &route53::REMOVE_FIREWALL_RULE,
    &sagemaker::GET_AUTOML_JOB_V2,
    &sagemaker::NEW_AUTOML_JOB_V2,
];

pub fn all_operations() -> &'static [&'static OperationSpec] {
    OPERATIONS
}

/// Look up a command by its `Verb-Noun` name, ignoring case.
pub fn find_command(name: &str) -> Option<&'static OperationSpec> {
    OPERATIONS
        .iter()
        .copied()
        .find(|op| op.command_name().eq_ignore_ascii_case(name))
}

pub fn services() -> &'static [&'static ServiceSpec] {
    services::ALL
}

/// Operations of the service whose short name is `service` (e.g. `EC2`).
pub fn operations_for_service(service: &str) -> Vec<&'static OperationSpec> {
    OPERATIONS
        .iter()
        .copied()
        .filter(|op| op.service.name.eq_ignore_ascii_case(service))
        .collect()
}
