use crate::services::EMR_SERVERLESS;
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static START_JOB_RUN: OperationSpec = OperationSpec {
    verb: "Start",
    noun: "EMRSJobRun",
    operation: "StartJobRun",
    service: &EMR_SERVERLESS,
    synopsis: "Starts a job run.",
    params: &[
        ParamSpec::new(
            "ConfigurationOverrides_ApplicationConfiguration",
            ParamKind::StructureList,
            &["ConfigurationOverrides", "ApplicationConfiguration"],
        )
        .help("Application configuration overrides, e.g. [{\"Classification\":\"spark-defaults\",\"Properties\":{...}}]."),
        ParamSpec::new("ApplicationId", ParamKind::String, &["ApplicationId"])
            .required()
            .primary()
            .path("applicationId")
            .help("The ID of the application on which to run the job."),
        ParamSpec::new(
            "ManagedPersistenceMonitoringConfiguration_Enabled",
            ParamKind::Bool,
            &[
                "ConfigurationOverrides",
                "MonitoringConfiguration",
                "ManagedPersistenceMonitoringConfiguration",
                "Enabled",
            ],
        )
        .aliases(&["ConfigurationOverrides_MonitoringConfiguration_ManagedPersistenceMonitoringConfiguration_Enabled"]),
        ParamSpec::new(
            "ManagedPersistenceMonitoringConfiguration_EncryptionKeyArn",
            ParamKind::String,
            &[
                "ConfigurationOverrides",
                "MonitoringConfiguration",
                "ManagedPersistenceMonitoringConfiguration",
                "EncryptionKeyArn",
            ],
        )
        .aliases(&["ConfigurationOverrides_MonitoringConfiguration_ManagedPersistenceMonitoringConfiguration_EncryptionKeyArn"]),
        ParamSpec::new(
            "S3MonitoringConfiguration_EncryptionKeyArn",
            ParamKind::String,
            &[
                "ConfigurationOverrides",
                "MonitoringConfiguration",
                "S3MonitoringConfiguration",
                "EncryptionKeyArn",
            ],
        )
        .aliases(&["ConfigurationOverrides_MonitoringConfiguration_S3MonitoringConfiguration_EncryptionKeyArn"]),
        ParamSpec::new(
            "SparkSubmit_EntryPoint",
            ParamKind::String,
            &["JobDriver", "SparkSubmit", "EntryPoint"],
        )
        .aliases(&["JobDriver_SparkSubmit_EntryPoint"])
        .help("The entry point of the Spark job."),
        ParamSpec::new(
            "SparkSubmit_EntryPointArgument",
            ParamKind::StringList,
            &["JobDriver", "SparkSubmit", "EntryPointArguments"],
        )
        .aliases(&["JobDriver_SparkSubmit_EntryPointArguments"]),
        ParamSpec::new("ExecutionRoleArn", ParamKind::String, &["ExecutionRoleArn"])
            .required()
            .help("The execution role ARN for the job run."),
        ParamSpec::new("ExecutionTimeoutMinute", ParamKind::Int64, &["ExecutionTimeoutMinutes"])
            .aliases(&["ExecutionTimeoutMinutes"])
            .help("Minutes after which the job is cancelled if still running."),
        ParamSpec::new("Hive_InitQueryFile", ParamKind::String, &["JobDriver", "Hive", "InitQueryFile"])
            .aliases(&["JobDriver_Hive_InitQueryFile"]),
        ParamSpec::new(
            "S3MonitoringConfiguration_LogUri",
            ParamKind::String,
            &[
                "ConfigurationOverrides",
                "MonitoringConfiguration",
                "S3MonitoringConfiguration",
                "LogUri",
            ],
        )
        .aliases(&["ConfigurationOverrides_MonitoringConfiguration_S3MonitoringConfiguration_LogUri"]),
        ParamSpec::new("Name", ParamKind::String, &["Name"]).help("The optional job run name."),
        ParamSpec::new("Hive_Parameter", ParamKind::String, &["JobDriver", "Hive", "Parameters"])
            .aliases(&["JobDriver_Hive_Parameters"]),
        ParamSpec::new("Hive_Query", ParamKind::String, &["JobDriver", "Hive", "Query"])
            .aliases(&["JobDriver_Hive_Query"])
            .help("The query for the Hive job run."),
        ParamSpec::new(
            "SparkSubmit_SparkSubmitParameter",
            ParamKind::String,
            &["JobDriver", "SparkSubmit", "SparkSubmitParameters"],
        )
        .aliases(&["JobDriver_SparkSubmit_SparkSubmitParameters"]),
        ParamSpec::new("Tag", ParamKind::StringMap, &["Tags"])
            .aliases(&["Tags"])
            .help("Tags as key=value pairs or a JSON object."),
        ParamSpec::new("ClientToken", ParamKind::String, &["ClientToken"])
            .idempotency_token(),
    ],
    response_fields: &["ApplicationId", "Arn", "JobRunId"],
    default_select: "*",
    pass_thru: Some("ApplicationId"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("ApplicationId"),
    paging: None,
    http: Some(HttpBinding {
        method: "POST",
        uri: "/applications/{applicationId}/jobruns",
    }),
    wire_renames: &[],
    opaque_members: &["Properties", "Tags"],
};
