//! Kubernetes access for the Cilium Terraform provider
//!
//! This library provides:
//! - Kubeconfig resolution (provider attribute, `KUBECONFIG`, `~/.kube/config`)
//! - A thin client wrapper with one list call per Cilium resource kind
//! - The shared error type

pub mod client;
pub mod error;
pub mod kubeconfig;

pub use client::CiliumClient;
pub use error::{ClientError, Result};
pub use kubeconfig::KubeconfigSource;
