use crate::constants::AUTOML_METRIC;
use crate::services::SAGEMAKER;
use opshell_core::schema::{ConfirmImpact, OperationSpec, ParamKind, ParamSpec};

pub static GET_AUTOML_JOB_V2: OperationSpec = OperationSpec {
    verb: "Get",
    noun: "SMAutoMLJobV2",
    operation: "DescribeAutoMLJobV2",
    service: &SAGEMAKER,
    synopsis: "Returns information about an Amazon SageMaker AutoML V2 job.",
    params: &[ParamSpec::new("AutoMLJobName", ParamKind::String, &["AutoMLJobName"])
        .required()
        .primary()
        .help("Requests information about an AutoML job V2 using its unique name.")],
    response_fields: &[
        "AutoMLComputeConfig",
        "AutoMLJobArn",
        "AutoMLJobArtifacts",
        "AutoMLJobInputDataConfig",
        "AutoMLJobName",
        "AutoMLJobObjective",
        "AutoMLJobSecondaryStatus",
        "AutoMLJobStatus",
        "AutoMLProblemTypeConfig",
        "AutoMLProblemTypeConfigName",
        "BestCandidate",
        "CreationTime",
        "DataSplitConfig",
        "EndTime",
        "FailureReason",
        "LastModifiedTime",
        "ModelDeployConfig",
        "ModelDeployResult",
        "OutputDataConfig",
        "PartialFailureReasons",
        "ResolvedAttributes",
        "RoleArn",
        "SecurityConfig",
    ],
    default_select: "*",
    pass_thru: Some("AutoMLJobName"),
    confirm: None,
    confirm_target: None,
    paging: None,
    http: None,
    wire_renames: &[],
    opaque_members: &[],
};

pub static NEW_AUTOML_JOB_V2: OperationSpec = OperationSpec {
    verb: "New",
    noun: "SMAutoMLJobV2",
    operation: "CreateAutoMLJobV2",
    service: &SAGEMAKER,
    synopsis: "Creates an AutoML job that uses non-tabular data such as images or text.",
    params: &[
        ParamSpec::new(
            "ModelDeployConfig_AutoGenerateEndpointName",
            ParamKind::Bool,
            &["ModelDeployConfig", "AutoGenerateEndpointName"],
        ),
        ParamSpec::new(
            "AutoMLJobInputDataConfig",
            ParamKind::StructureList,
            &["AutoMLJobInputDataConfig"],
        )
        .required()
        .help("An array of channel objects describing the input data and its location."),
        ParamSpec::new("AutoMLJobName", ParamKind::String, &["AutoMLJobName"])
            .required()
            .primary()
            .help("Identifies an AutoML job. The name must be unique to your account."),
        ParamSpec::new(
            "TextClassificationJobConfig_ContentColumn",
            ParamKind::String,
            &["AutoMLProblemTypeConfig", "TextClassificationJobConfig", "ContentColumn"],
        )
        .aliases(&["AutoMLProblemTypeConfig_TextClassificationJobConfig_ContentColumn"]),
        ParamSpec::new(
            "SecurityConfig_EnableInterContainerTrafficEncryption",
            ParamKind::Bool,
            &["SecurityConfig", "EnableInterContainerTrafficEncryption"],
        ),
        ParamSpec::new(
            "ModelDeployConfig_EndpointName",
            ParamKind::String,
            &["ModelDeployConfig", "EndpointName"],
        ),
        ParamSpec::new("OutputDataConfig_KmsKeyId", ParamKind::String, &["OutputDataConfig", "KmsKeyId"]),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_ImageClassificationJobConfig_CompletionCriteria_MaxAutoMLJobRuntimeInSeconds",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "ImageClassificationJobConfig",
                "CompletionCriteria",
                "MaxAutoMLJobRuntimeInSeconds",
            ],
        ),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_TextClassificationJobConfig_CompletionCriteria_MaxAutoMLJobRuntimeInSeconds",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "TextClassificationJobConfig",
                "CompletionCriteria",
                "MaxAutoMLJobRuntimeInSeconds",
            ],
        ),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_ImageClassificationJobConfig_CompletionCriteria_MaxCandidates",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "ImageClassificationJobConfig",
                "CompletionCriteria",
                "MaxCandidates",
            ],
        ),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_TextClassificationJobConfig_CompletionCriteria_MaxCandidates",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "TextClassificationJobConfig",
                "CompletionCriteria",
                "MaxCandidates",
            ],
        ),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_ImageClassificationJobConfig_CompletionCriteria_MaxRuntimePerTrainingJobInSeconds",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "ImageClassificationJobConfig",
                "CompletionCriteria",
                "MaxRuntimePerTrainingJobInSeconds",
            ],
        ),
        ParamSpec::new(
            "AutoMLProblemTypeConfig_TextClassificationJobConfig_CompletionCriteria_MaxRuntimePerTrainingJobInSeconds",
            ParamKind::Int32,
            &[
                "AutoMLProblemTypeConfig",
                "TextClassificationJobConfig",
                "CompletionCriteria",
                "MaxRuntimePerTrainingJobInSeconds",
            ],
        ),
        ParamSpec::new(
            "AutoMLJobObjective_MetricName",
            ParamKind::Enum(AUTOML_METRIC),
            &["AutoMLJobObjective", "MetricName"],
        ),
        ParamSpec::new("RoleArn", ParamKind::String, &["RoleArn"])
            .required()
            .help("The ARN of the role used to access the data."),
        ParamSpec::new(
            "OutputDataConfig_S3OutputPath",
            ParamKind::String,
            &["OutputDataConfig", "S3OutputPath"],
        )
        .required()
        .help("The Amazon S3 output path. Must be 512 characters or less."),
        ParamSpec::new(
            "VpcConfig_SecurityGroupId",
            ParamKind::StringList,
            &["SecurityConfig", "VpcConfig", "SecurityGroupIds"],
        )
        .aliases(&["SecurityConfig_VpcConfig_SecurityGroupIds"]),
        ParamSpec::new(
            "VpcConfig_Subnet",
            ParamKind::StringList,
            &["SecurityConfig", "VpcConfig", "Subnets"],
        )
        .aliases(&["SecurityConfig_VpcConfig_Subnets"]),
        ParamSpec::new("Tag", ParamKind::StructureList, &["Tags"])
            .aliases(&["Tags"])
            .help("Tags as [{\"Key\":\"k\",\"Value\":\"v\"}]."),
        ParamSpec::new(
            "TextClassificationJobConfig_TargetLabelColumn",
            ParamKind::String,
            &["AutoMLProblemTypeConfig", "TextClassificationJobConfig", "TargetLabelColumn"],
        )
        .aliases(&["AutoMLProblemTypeConfig_TextClassificationJobConfig_TargetLabelColumn"]),
        ParamSpec::new(
            "DataSplitConfig_ValidationFraction",
            ParamKind::Float,
            &["DataSplitConfig", "ValidationFraction"],
        ),
        ParamSpec::new(
            "SecurityConfig_VolumeKmsKeyId",
            ParamKind::String,
            &["SecurityConfig", "VolumeKmsKeyId"],
        ),
    ],
    response_fields: &["AutoMLJobArn"],
    default_select: "AutoMLJobArn",
    pass_thru: Some("AutoMLJobName"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("AutoMLJobName"),
    paging: None,
    http: None,
    wire_renames: &[],
    opaque_members: &[],
};
