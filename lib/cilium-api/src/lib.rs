//! Cilium CRD bindings for the Terraform provider
//!
//! This library defines the subset of the `cilium.io` custom resources the
//! provider reads from a cluster:
//! - CiliumNode: per-node Cilium agent state
//! - CiliumNetworkPolicy: namespaced network policy
//! - CiliumClusterwideNetworkPolicy: cluster scoped network policy

pub mod v2;

pub use v2::{CiliumClusterwideNetworkPolicy, CiliumNetworkPolicy, CiliumNode};
