use crate::constants::{DEVICE_TRUST_PROVIDER_TYPE, TRUST_PROVIDER_TYPE, USER_TRUST_PROVIDER_TYPE};
use crate::services::EC2;
use opshell_core::schema::{ConfirmImpact, OperationSpec, PagingSpec, ParamKind, ParamSpec};

pub static GET_IPAM_DISCOVERED_ACCOUNT: OperationSpec = OperationSpec {
    verb: "Get",
    noun: "EC2IpamDiscoveredAccount",
    operation: "GetIpamDiscoveredAccounts",
    service: &EC2,
    synopsis: "Gets IPAM discovered accounts, the accounts monitored under a resource discovery. Pages through all results unless -NoAutoIteration is given.",
    params: &[
        ParamSpec::new("DiscoveryRegion", ParamKind::String, &["DiscoveryRegion"])
            .required()
            .help("The Amazon Web Services Region that the account information is returned from."),
        ParamSpec::new("Filter", ParamKind::StructureList, &["Filters"])
            .aliases(&["Filters"])
            .help("Discovered account filters, e.g. [{\"Name\":\"account-id\",\"Values\":[\"1\"]}]."),
        ParamSpec::new("IpamResourceDiscoveryId", ParamKind::String, &["IpamResourceDiscoveryId"])
            .required()
            .primary()
            .help("A resource discovery ID."),
        ParamSpec::new("MaxResult", ParamKind::Int32, &["MaxResults"])
            .aliases(&["MaxResults"])
            .help("The maximum number of discovered accounts to return in one page of results."),
        ParamSpec::new("NextToken", ParamKind::String, &["NextToken"])
            .help("The token for the next page of results. Binding it turns off automatic paging."),
    ],
    response_fields: &["IpamDiscoveredAccounts", "NextToken"],
    default_select: "IpamDiscoveredAccounts",
    pass_thru: Some("IpamResourceDiscoveryId"),
    confirm: None,
    confirm_target: None,
    paging: Some(PagingSpec::next_token()),
    http: None,
    wire_renames: &[
        ("Filters", "Filter"),
        ("Values", "Value"),
        ("IpamDiscoveredAccounts", "ipamDiscoveredAccountSet"),
    ],
    opaque_members: &[],
};

pub static NEW_VERIFIED_ACCESS_TRUST_PROVIDER: OperationSpec = OperationSpec {
    verb: "New",
    noun: "EC2VerifiedAccessTrustProvider",
    operation: "CreateVerifiedAccessTrustProvider",
    service: &EC2,
    synopsis: "Creates a Verified Access trust provider, the identity source that Verified Access evaluates before allowing or denying an application request.",
    params: &[
        ParamSpec::new(
            "OidcOptions_AuthorizationEndpoint",
            ParamKind::String,
            &["OidcOptions", "AuthorizationEndpoint"],
        ),
        ParamSpec::new("OidcOptions_ClientId", ParamKind::String, &["OidcOptions", "ClientId"]),
        ParamSpec::new("OidcOptions_ClientSecret", ParamKind::String, &["OidcOptions", "ClientSecret"]),
        ParamSpec::new("Description", ParamKind::String, &["Description"]),
        ParamSpec::new(
            "DeviceTrustProviderType",
            ParamKind::Enum(DEVICE_TRUST_PROVIDER_TYPE),
            &["DeviceTrustProviderType"],
        )
        .help("The type of device-based trust provider. Required when TrustProviderType is device."),
        ParamSpec::new("OidcOptions_Issuer", ParamKind::String, &["OidcOptions", "Issuer"]),
        ParamSpec::new("PolicyReferenceName", ParamKind::String, &["PolicyReferenceName"])
            .required()
            .help("The identifier used in policies to reference this trust provider."),
        ParamSpec::new("OidcOptions_Scope", ParamKind::String, &["OidcOptions", "Scope"]),
        ParamSpec::new("TagSpecification", ParamKind::StructureList, &["TagSpecifications"])
            .aliases(&["TagSpecifications"])
            .help("Tags to apply on creation, e.g. [{\"ResourceType\":\"verified-access-trust-provider\",\"Tags\":[...]}]."),
        ParamSpec::new("DeviceOptions_TenantId", ParamKind::String, &["DeviceOptions", "TenantId"]),
        ParamSpec::new("OidcOptions_TokenEndpoint", ParamKind::String, &["OidcOptions", "TokenEndpoint"]),
        ParamSpec::new(
            "TrustProviderType",
            ParamKind::Enum(TRUST_PROVIDER_TYPE),
            &["TrustProviderType"],
        )
        .required()
        .primary()
        .help("The type of trust provider."),
        ParamSpec::new(
            "OidcOptions_UserInfoEndpoint",
            ParamKind::String,
            &["OidcOptions", "UserInfoEndpoint"],
        ),
        ParamSpec::new(
            "UserTrustProviderType",
            ParamKind::Enum(USER_TRUST_PROVIDER_TYPE),
            &["UserTrustProviderType"],
        )
        .help("The type of user-based trust provider. Required when TrustProviderType is user."),
        ParamSpec::new("ClientToken", ParamKind::String, &["ClientToken"])
            .idempotency_token(),
    ],
    response_fields: &["VerifiedAccessTrustProvider"],
    default_select: "VerifiedAccessTrustProvider",
    pass_thru: Some("TrustProviderType"),
    confirm: Some(ConfirmImpact::Medium),
    confirm_target: Some("PolicyReferenceName"),
    paging: None,
    http: None,
    wire_renames: &[("TagSpecifications", "TagSpecification"), ("Tags", "Tag")],
    opaque_members: &[],
};
