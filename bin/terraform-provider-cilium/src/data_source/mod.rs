//! Read-only data sources over Cilium custom resources
//!
//! Every Read issues exactly one list call against the API server and
//! copies the result into state. Errors become diagnostics; nothing is
//! cached between reads.

mod cilium_nodes;
mod clusterwide_network_policies;
mod network_policies;

pub use cilium_nodes::CiliumNodeDataSource;
pub use clusterwide_network_policies::CiliumClusterwideNetworkPolicyDataSource;
pub use network_policies::CiliumNetworkPolicyDataSource;

use cilium_client::CiliumClient;
use kube::api::ListParams;
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Description};
use tf_provider::value::Value;
use tf_provider::Diagnostics;

use crate::model::known;
use crate::provider::SharedClient;

/// Client set at Configure, or a diagnostic if the provider was never
/// configured.
pub(crate) async fn configured_client(
    client: &SharedClient,
    diags: &mut Diagnostics,
) -> Option<CiliumClient> {
    let client = client.read().await.clone();
    if client.is_none() {
        diags.root_error(
            "Provider not configured",
            "The Kubernetes API client has not been created. Make sure the cilium provider block is configured.",
        );
    }
    client
}

/// List options built from the optional selector attributes
pub(crate) fn list_params(label_selector: &Value<String>, field_selector: &Value<String>) -> ListParams {
    let mut params = ListParams::default();
    if let Some(labels) = known(label_selector) {
        params = params.labels(labels);
    }
    if let Some(fields) = known(field_selector) {
        params = params.fields(fields);
    }
    params
}

pub(crate) fn optional_string(description: &str) -> Attribute {
    Attribute {
        attr_type: AttributeType::String,
        description: Description::plain(description),
        constraint: AttributeConstraint::Optional,
        ..Default::default()
    }
}

pub(crate) fn computed_list(item: AttributeType, description: &str) -> Attribute {
    Attribute {
        attr_type: AttributeType::List(Box::new(item)),
        description: Description::plain(description),
        constraint: AttributeConstraint::Computed,
        ..Default::default()
    }
}
