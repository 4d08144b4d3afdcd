use crate::constants::LOG_DELIVERY_STATUS;
use crate::services::INTERNET_MONITOR;
use opshell_core::schema::{ConfirmImpact, HttpBinding, OperationSpec, ParamKind, ParamSpec};

pub static NEW_MONITOR: OperationSpec = OperationSpec {
    verb: "New",
    noun: "CWIMMonitor",
    operation: "CreateMonitor",
    service: &INTERNET_MONITOR,
    synopsis: "Creates a monitor in Amazon CloudWatch Internet Monitor for VPCs, CloudFront distributions and WorkSpaces directories.",
    params: &[
        ParamSpec::new(
            "S3Config_BucketName",
            ParamKind::String,
            &["InternetMeasurementsLogDelivery", "S3Config", "BucketName"],
        )
        .aliases(&["InternetMeasurementsLogDelivery_S3Config_BucketName"])
        .help("The Amazon S3 bucket name for internet measurements publishing."),
        ParamSpec::new(
            "S3Config_BucketPrefix",
            ParamKind::String,
            &["InternetMeasurementsLogDelivery", "S3Config", "BucketPrefix"],
        )
        .aliases(&["InternetMeasurementsLogDelivery_S3Config_BucketPrefix"]),
        ParamSpec::new(
            "S3Config_LogDeliveryStatus",
            ParamKind::Enum(LOG_DELIVERY_STATUS),
            &["InternetMeasurementsLogDelivery", "S3Config", "LogDeliveryStatus"],
        )
        .aliases(&["InternetMeasurementsLogDelivery_S3Config_LogDeliveryStatus"]),
        ParamSpec::new("MaxCityNetworksToMonitor", ParamKind::Int32, &["MaxCityNetworksToMonitor"])
            .help("The maximum number of city-networks to monitor."),
        ParamSpec::new("MonitorName", ParamKind::String, &["MonitorName"])
            .required()
            .primary()
            .help("The name of the monitor."),
        ParamSpec::new("Resource", ParamKind::StringList, &["Resources"])
            .aliases(&["Resources"])
            .help("ARNs of the VPCs, distributions or directories to monitor."),
        ParamSpec::new("Tag", ParamKind::StringMap, &["Tags"]).aliases(&["Tags"]),
        ParamSpec::new("TrafficPercentageToMonitor", ParamKind::Int32, &["TrafficPercentageToMonitor"])
            .help("The percentage of application traffic to monitor."),
        ParamSpec::new("ClientToken", ParamKind::String, &["ClientToken"])
            .idempotency_token(),
    ],
    response_fields: &["Arn", "Status"],
    default_select: "*",
    pass_thru: Some("MonitorName"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("MonitorName"),
    paging: None,
    http: Some(HttpBinding {
        method: "POST",
        uri: "/v20210603/Monitors",
    }),
    wire_renames: &[],
    opaque_members: &["Tags"],
};
