//! CiliumNetworkPolicy and CiliumClusterwideNetworkPolicy bindings
//!
//! Policy objects may carry a single rule in `spec`, a list of rules in
//! `specs`, or both, so these types are written out by hand instead of
//! going through the `CustomResource` derive (which requires `spec`).
//! Rules are kept as opaque JSON; the provider only reads type and object
//! metadata.

use std::borrow::Cow;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::{ClusterResourceScope, NamespaceResourceScope};
use kube::Resource;
use serde::{Deserialize, Serialize};

use super::{API_GROUP, API_VERSION};

/// Namespaced Cilium network policy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiliumNetworkPolicy {
    #[serde(default = "CiliumNetworkPolicy::default_api_version")]
    pub api_version: String,
    #[serde(default = "CiliumNetworkPolicy::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Single policy rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<serde_json::Value>,
    /// Additional policy rules
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

impl CiliumNetworkPolicy {
    const KIND: &'static str = "CiliumNetworkPolicy";
    const PLURAL: &'static str = "ciliumnetworkpolicies";

    fn default_api_version() -> String {
        format!("{}/{}", API_GROUP, API_VERSION)
    }

    fn default_kind() -> String {
        Self::KIND.to_string()
    }

    /// Number of rules carried in `spec` and `specs` together
    pub fn rule_count(&self) -> usize {
        self.specs.len() + usize::from(self.spec.is_some())
    }
}

impl Resource for CiliumNetworkPolicy {
    type DynamicType = ();
    type Scope = NamespaceResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(Self::KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(API_GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(API_VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(Self::PLURAL)
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}

/// Cluster scoped Cilium network policy
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CiliumClusterwideNetworkPolicy {
    #[serde(default = "CiliumClusterwideNetworkPolicy::default_api_version")]
    pub api_version: String,
    #[serde(default = "CiliumClusterwideNetworkPolicy::default_kind")]
    pub kind: String,
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specs: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

impl CiliumClusterwideNetworkPolicy {
    const KIND: &'static str = "CiliumClusterwideNetworkPolicy";
    const PLURAL: &'static str = "ciliumclusterwidenetworkpolicies";

    fn default_api_version() -> String {
        format!("{}/{}", API_GROUP, API_VERSION)
    }

    fn default_kind() -> String {
        Self::KIND.to_string()
    }

    /// Number of rules carried in `spec` and `specs` together
    pub fn rule_count(&self) -> usize {
        self.specs.len() + usize::from(self.spec.is_some())
    }
}

impl Resource for CiliumClusterwideNetworkPolicy {
    type DynamicType = ();
    type Scope = ClusterResourceScope;

    fn kind(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(Self::KIND)
    }

    fn group(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(API_GROUP)
    }

    fn version(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(API_VERSION)
    }

    fn plural(_: &()) -> Cow<'_, str> {
        Cow::Borrowed(Self::PLURAL)
    }

    fn meta(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn meta_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
