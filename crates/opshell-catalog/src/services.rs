//! Service endpoints and wire protocols.

use opshell_core::schema::{MemberCasing, Protocol, ServiceSpec};

pub static APPSYNC: ServiceSpec = ServiceSpec {
    name: "ASYN",
    display_name: "AWS AppSync",
    signing_name: "appsync",
    endpoint_prefix: "appsync",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2017-07-25",
    casing: MemberCasing::Camel,
};

pub static CONNECT: ServiceSpec = ServiceSpec {
    name: "CONN",
    display_name: "Amazon Connect Service",
    signing_name: "connect",
    endpoint_prefix: "connect",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2017-08-08",
    casing: MemberCasing::Pascal,
};

pub static EC2: ServiceSpec = ServiceSpec {
    name: "EC2",
    display_name: "Amazon Elastic Compute Cloud",
    signing_name: "ec2",
    endpoint_prefix: "ec2",
    protocol: Protocol::Ec2Query,
    target_prefix: None,
    api_version: "2016-11-15",
    casing: MemberCasing::Pascal,
};

pub static EMR_SERVERLESS: ServiceSpec = ServiceSpec {
    name: "EMRS",
    display_name: "EMR Serverless",
    signing_name: "emr-serverless",
    endpoint_prefix: "emr-serverless",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2021-07-13",
    casing: MemberCasing::Camel,
};

pub static IAM_ROLES_ANYWHERE: ServiceSpec = ServiceSpec {
    name: "IAMRA",
    display_name: "IAM Roles Anywhere",
    signing_name: "rolesanywhere",
    endpoint_prefix: "rolesanywhere",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2018-05-10",
    casing: MemberCasing::Camel,
};

pub static INTERNET_MONITOR: ServiceSpec = ServiceSpec {
    name: "CWIM",
    display_name: "Amazon CloudWatch Internet Monitor",
    signing_name: "internetmonitor",
    endpoint_prefix: "internetmonitor",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2021-06-03",
    casing: MemberCasing::Pascal,
};

pub static MGN: ServiceSpec = ServiceSpec {
    name: "MGN",
    display_name: "Application Migration Service",
    signing_name: "mgn",
    endpoint_prefix: "mgn",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2020-02-26",
    casing: MemberCasing::Camel,
};

pub static PAYMENT_CRYPTOGRAPHY: ServiceSpec = ServiceSpec {
    name: "PAYCC",
    display_name: "Payment Cryptography Control Plane",
    signing_name: "payment-cryptography",
    endpoint_prefix: "controlplane.payment-cryptography",
    protocol: Protocol::AwsJson1_0,
    target_prefix: Some("PaymentCryptographyControlPlane"),
    api_version: "2021-09-14",
    casing: MemberCasing::Pascal,
};

pub static RECOVERY_READINESS: ServiceSpec = ServiceSpec {
    name: "PD",
    display_name: "Route53 Recovery Readiness",
    signing_name: "route53-recovery-readiness",
    endpoint_prefix: "route53-recovery-readiness",
    protocol: Protocol::RestJson1,
    target_prefix: None,
    api_version: "2019-12-02",
    casing: MemberCasing::Camel,
};

pub static ROUTE53_RESOLVER: ServiceSpec = ServiceSpec {
    name: "R53R",
    display_name: "Amazon Route 53 Resolver",
    signing_name: "route53resolver",
    endpoint_prefix: "route53resolver",
    protocol: Protocol::AwsJson1_1,
    target_prefix: Some("Route53Resolver"),
    api_version: "2018-04-01",
    casing: MemberCasing::Pascal,
};

pub static SAGEMAKER: ServiceSpec = ServiceSpec {
    name: "SM",
    display_name: "Amazon SageMaker Service",
    signing_name: "sagemaker",
    endpoint_prefix: "api.sagemaker",
    protocol: Protocol::AwsJson1_1,
    target_prefix: Some("SageMaker"),
    api_version: "2017-07-24",
    casing: MemberCasing::Pascal,
};

/// Every service the catalog covers, in command-prefix order.
pub static ALL: &[&ServiceSpec] = &[
    &APPSYNC,
    &CONNECT,
    &INTERNET_MONITOR,
    &EC2,
    &EMR_SERVERLESS,
    &IAM_ROLES_ANYWHERE,
    &MGN,
    &PAYMENT_CRYPTOGRAPHY,
    &RECOVERY_READINESS,
    &ROUTE53_RESOLVER,
    &SAGEMAKER,
];
