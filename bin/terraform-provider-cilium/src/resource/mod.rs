//! Managed resources

mod cilium_node;

pub use cilium_node::CiliumNodeResource;
