use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// CiliumNode from the Cilium operator - Represents the Cilium agent state
/// of a single cluster node. Cluster scoped, one object per node.
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "cilium.io",
    version = "v2",
    kind = "CiliumNode",
    plural = "ciliumnodes",
    shortname = "cn",
    derive = "Default",
    derive = "PartialEq",
    printcolumn = r#"{"name":"InstanceID","type":"string","jsonPath":".spec.instance-id"}"#,
)]
pub struct CiliumNodeSpec {
    /// Identifier of the node source (cloud instance ID, or the node name)
    #[serde(rename = "instance-id", default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,

    /// Addresses of the node, as seen by Cilium
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<NodeAddress>,
}

/// Address of a CiliumNode
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NodeAddress {
    /// Address type, e.g. "InternalIP" or "CiliumInternalIP"
    #[serde(rename = "type")]
    pub address_type: String,

    /// IP address
    pub ip: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::Resource;

    #[test]
    fn test_cilium_node_type_meta() {
        assert_eq!(CiliumNode::api_version(&()), "cilium.io/v2");
        assert_eq!(CiliumNode::kind(&()), "CiliumNode");
        assert_eq!(CiliumNode::plural(&()), "ciliumnodes");
    }

    #[test]
    fn test_cilium_node_from_api_json() {
        let json = serde_json::json!({
            "apiVersion": "cilium.io/v2",
            "kind": "CiliumNode",
            "metadata": {
                "name": "kind-worker",
                "labels": {"kubernetes.io/os": "linux"},
                "resourceVersion": "1234"
            },
            "spec": {
                "instance-id": "i-0abc",
                "addresses": [
                    {"type": "InternalIP", "ip": "172.18.0.2"},
                    {"type": "CiliumInternalIP", "ip": "10.244.1.10"}
                ],
                "encryption": {},
                "health": {"ipv4": "10.244.1.20"},
                "ipam": {"podCIDRs": ["10.244.1.0/24"]}
            }
        });

        let node: CiliumNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.metadata.name.as_deref(), Some("kind-worker"));
        assert_eq!(node.spec.instance_id.as_deref(), Some("i-0abc"));
        assert_eq!(node.spec.addresses.len(), 2);
        assert_eq!(node.spec.addresses[1].address_type, "CiliumInternalIP");
    }

    #[test]
    fn test_cilium_node_empty_spec() {
        let json = serde_json::json!({
            "apiVersion": "cilium.io/v2",
            "kind": "CiliumNode",
            "metadata": {"name": "bare"},
            "spec": {}
        });

        let node: CiliumNode = serde_json::from_value(json).unwrap();
        assert_eq!(node.spec, CiliumNodeSpec::default());
    }
}
