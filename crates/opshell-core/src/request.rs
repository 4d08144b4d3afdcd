//! Request populator.
//!
//! Each bound parameter lands at its target path inside a member-name keyed
//! object. Intermediate objects are created on demand, so a nested group with
//! no bound leaf never appears in the request.

use crate::context::ExecutionContext;
use serde_json::{Map, Value};

/// Build the request object for `ctx`.
pub fn populate_request(ctx: &ExecutionContext) -> Value {
    let mut root = Map::new();
    for param in ctx.operation.params {
        if let Some(value) = ctx.parameter_value(param.name) {
            insert_at_path(&mut root, param.target, value.clone());
        }
    }
    Value::Object(root)
}

/// Set `value` at `path`, creating intermediate objects.
pub fn insert_at_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((leaf, parents)) = path.split_last() else {
        return;
    };
    let mut node = root;
    for segment in parents {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        node = next;
    }
    node.insert(leaf.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Invocation;
    use crate::schema::{MemberCasing, OperationSpec, ParamKind, ParamSpec, Protocol, ServiceSpec};
    use serde_json::json;

    static SVC: ServiceSpec = ServiceSpec {
        name: "Test",
        display_name: "Test Service",
        signing_name: "test",
        endpoint_prefix: "test",
        protocol: Protocol::RestJson1,
        target_prefix: None,
        api_version: "2020-01-01",
        casing: MemberCasing::Pascal,
    };

    static OP: OperationSpec = OperationSpec {
        verb: "New",
        noun: "TestMonitor",
        operation: "CreateMonitor",
        service: &SVC,
        synopsis: "",
        params: &[
            ParamSpec::new("MonitorName", ParamKind::String, &["MonitorName"]).required(),
            ParamSpec::new(
                "S3Config_BucketName",
                ParamKind::String,
                &["InternetMeasurementsLogDelivery", "S3Config", "BucketName"],
            ),
            ParamSpec::new(
                "S3Config_BucketPrefix",
                ParamKind::String,
                &["InternetMeasurementsLogDelivery", "S3Config", "BucketPrefix"],
            ),
            ParamSpec::new("Resource", ParamKind::StringList, &["Resources"]),
        ],
        response_fields: &["Arn"],
        default_select: "*",
        pass_thru: None,
        confirm: None,
        confirm_target: None,
        paging: None,
        http: None,
        wire_renames: &[],
        opaque_members: &[],
    };

    fn request_for(inv: Invocation) -> Value {
        populate_request(&ExecutionContext::build(&OP, &inv).unwrap())
    }

    #[test]
    fn unset_nested_group_is_omitted() {
        let req = request_for(Invocation::new().arg("MonitorName", "m1"));
        assert_eq!(req, json!({"MonitorName": "m1"}));
    }

    #[test]
    fn one_leaf_creates_the_chain() {
        let req = request_for(
            Invocation::new()
                .arg("MonitorName", "m1")
                .arg("S3Config_BucketName", "logs"),
        );
        assert_eq!(
            req,
            json!({
                "MonitorName": "m1",
                "InternetMeasurementsLogDelivery": {"S3Config": {"BucketName": "logs"}}
            })
        );
    }

    #[test]
    fn siblings_share_the_parent() {
        let req = request_for(
            Invocation::new()
                .arg("S3Config_BucketName", "logs")
                .arg("S3Config_BucketPrefix", "im/"),
        );
        assert_eq!(
            req["InternetMeasurementsLogDelivery"]["S3Config"],
            json!({"BucketName": "logs", "BucketPrefix": "im/"})
        );
    }

    #[test]
    fn explicit_null_leaves_member_unset() {
        let req = request_for(Invocation::new().null("MonitorName").null("S3Config_BucketName"));
        assert_eq!(req, json!({}));
    }

    #[test]
    fn explicit_empty_list_is_kept() {
        let req = request_for(Invocation::new().arg("Resource", json!([])));
        assert_eq!(req, json!({"Resources": []}));
    }
}
