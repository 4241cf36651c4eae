//! Terraform state models shared by the data sources
//!
//! Each model mirrors a Kubernetes object at read time. Fields the object
//! does not carry are reported as null.

use std::collections::BTreeMap;

use cilium_api::v2::NodeAddress;
use cilium_api::{CiliumClusterwideNetworkPolicy, CiliumNetworkPolicy, CiliumNode};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::Resource;
use serde::{Deserialize, Serialize};
use tf_provider::map;
use tf_provider::schema::AttributeType;
use tf_provider::value::Value;

/// Value of a known string attribute, `None` when null or unknown
pub fn known(value: &Value<String>) -> Option<&str> {
    match value {
        Value::Value(value) => Some(value.as_str()),
        _ => None,
    }
}

fn string_value(value: Option<&String>) -> Value<String> {
    value.cloned().map_or(Value::Null, Value::Value)
}

fn map_value(value: Option<&BTreeMap<String, String>>) -> Value<BTreeMap<String, String>> {
    value.cloned().map_or(Value::Null, Value::Value)
}

/// Object metadata
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataModel {
    pub name: Value<String>,
    pub namespace: Value<String>,
    pub uid: Value<String>,
    pub resource_version: Value<String>,
    pub labels: Value<BTreeMap<String, String>>,
    pub annotations: Value<BTreeMap<String, String>>,
}

impl MetadataModel {
    pub fn attribute_type() -> AttributeType {
        AttributeType::Object(map! {
            "name" => AttributeType::String,
            "namespace" => AttributeType::String,
            "uid" => AttributeType::String,
            "resource_version" => AttributeType::String,
            "labels" => AttributeType::Map(Box::new(AttributeType::String)),
            "annotations" => AttributeType::Map(Box::new(AttributeType::String)),
        })
    }
}

impl From<&ObjectMeta> for MetadataModel {
    fn from(meta: &ObjectMeta) -> Self {
        Self {
            name: string_value(meta.name.as_ref()),
            namespace: string_value(meta.namespace.as_ref()),
            uid: string_value(meta.uid.as_ref()),
            resource_version: string_value(meta.resource_version.as_ref()),
            labels: map_value(meta.labels.as_ref()),
            annotations: map_value(meta.annotations.as_ref()),
        }
    }
}

/// One entry of the `ciliumnodes` list
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiliumNodeModel {
    pub apiversion: Value<String>,
    pub kind: Value<String>,
    pub metadata: Value<MetadataModel>,
    pub spec: Value<CiliumNodeSpecModel>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiliumNodeSpecModel {
    pub instance_id: Value<String>,
    pub addresses: Value<Vec<NodeAddressModel>>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAddressModel {
    #[serde(rename = "type")]
    pub address_type: Value<String>,
    pub ip: Value<String>,
}

impl CiliumNodeModel {
    pub fn attribute_type() -> AttributeType {
        let address = AttributeType::Object(map! {
            "type" => AttributeType::String,
            "ip" => AttributeType::String,
        });
        AttributeType::Object(map! {
            "apiversion" => AttributeType::String,
            "kind" => AttributeType::String,
            "metadata" => MetadataModel::attribute_type(),
            "spec" => AttributeType::Object(map! {
                "instance_id" => AttributeType::String,
                "addresses" => AttributeType::List(Box::new(address)),
            }),
        })
    }
}

impl From<&NodeAddress> for NodeAddressModel {
    fn from(address: &NodeAddress) -> Self {
        Self {
            address_type: Value::Value(address.address_type.clone()),
            ip: Value::Value(address.ip.clone()),
        }
    }
}

impl From<&CiliumNode> for CiliumNodeModel {
    fn from(node: &CiliumNode) -> Self {
        Self {
            apiversion: Value::Value(CiliumNode::api_version(&()).into_owned()),
            kind: Value::Value(CiliumNode::kind(&()).into_owned()),
            metadata: Value::Value(MetadataModel::from(&node.metadata)),
            spec: Value::Value(CiliumNodeSpecModel {
                instance_id: string_value(node.spec.instance_id.as_ref()),
                addresses: Value::Value(node.spec.addresses.iter().map(NodeAddressModel::from).collect()),
            }),
        }
    }
}

/// One entry of a policy list, namespaced or clusterwide
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyModel {
    pub apiversion: Value<String>,
    pub kind: Value<String>,
    pub metadata: Value<MetadataModel>,
    pub rule_count: Value<i64>,
}

impl PolicyModel {
    pub fn attribute_type() -> AttributeType {
        AttributeType::Object(map! {
            "apiversion" => AttributeType::String,
            "kind" => AttributeType::String,
            "metadata" => MetadataModel::attribute_type(),
            "rule_count" => AttributeType::Number,
        })
    }

    fn new<K: Resource<DynamicType = ()>>(meta: &ObjectMeta, rule_count: usize) -> Self {
        Self {
            apiversion: Value::Value(K::api_version(&()).into_owned()),
            kind: Value::Value(K::kind(&()).into_owned()),
            metadata: Value::Value(MetadataModel::from(meta)),
            rule_count: Value::Value(rule_count as i64),
        }
    }
}

impl From<&CiliumNetworkPolicy> for PolicyModel {
    fn from(policy: &CiliumNetworkPolicy) -> Self {
        Self::new::<CiliumNetworkPolicy>(&policy.metadata, policy.rule_count())
    }
}

impl From<&CiliumClusterwideNetworkPolicy> for PolicyModel {
    fn from(policy: &CiliumClusterwideNetworkPolicy) -> Self {
        Self::new::<CiliumClusterwideNetworkPolicy>(&policy.metadata, policy.rule_count())
    }
}

/// Keys of an object attribute type, for schema assertions in tests
#[cfg(test)]
pub fn object_keys(attr_type: &AttributeType) -> Vec<String> {
    match attr_type {
        AttributeType::Object(fields) => {
            let mut keys: Vec<String> = fields.keys().cloned().collect();
            keys.sort();
            keys
        }
        _ => Vec::new(),
    }
}
