/// API version v2 of the Cilium CRDs

pub mod cilium_node;
pub mod network_policy;

pub use cilium_node::{CiliumNode, CiliumNodeSpec, NodeAddress};
pub use network_policy::{CiliumClusterwideNetworkPolicy, CiliumNetworkPolicy};

/// API group for Cilium resources
pub const API_GROUP: &str = "cilium.io";
/// API version for Cilium resources
pub const API_VERSION: &str = "v2";
