//! Kubernetes client for Cilium resources

use cilium_api::{CiliumClusterwideNetworkPolicy, CiliumNetworkPolicy, CiliumNode};
use kube::api::{ListParams, ObjectList};
use kube::{Api, Client, Config};
use tracing::debug;

use crate::{ClientError, KubeconfigSource, Result};

/// CiliumClient wraps the Kubernetes client for Cilium list operations.
///
/// Each list call is a single request passed straight through to the API
/// server: no retries, no pagination loop, no caching.
#[derive(Clone)]
pub struct CiliumClient {
    client: Client,
    context: String,
}

impl CiliumClient {
    /// Wrap an existing client
    pub fn new(client: Client, context: impl Into<String>) -> Self {
        Self {
            client,
            context: context.into(),
        }
    }

    /// Create a client from a resolved kubeconfig, using `context` or the
    /// kubeconfig's current context.
    pub async fn from_kubeconfig(source: &KubeconfigSource, context: Option<&str>) -> Result<Self> {
        let (config, context) = source.client_config(context).await?;
        debug!(%context, cluster_url = %config.cluster_url, "Building Kubernetes client");
        Self::from_config(config, context)
    }

    /// Create a client from an already resolved configuration.
    pub fn from_config(config: Config, context: impl Into<String>) -> Result<Self> {
        // Process-wide; fails harmlessly once already installed.
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = Client::try_from(config).map_err(ClientError::ClientBuild)?;
        Ok(Self::new(client, context))
    }

    /// Name of the kubeconfig context this client talks to
    pub fn context(&self) -> &str {
        &self.context
    }

    /// List CiliumNodes in the cluster
    pub async fn list_cilium_nodes(&self, params: &ListParams) -> Result<ObjectList<CiliumNode>> {
        let nodes: Api<CiliumNode> = Api::all(self.client.clone());
        let list = nodes.list(params).await?;

        debug!("Listed {} CiliumNodes", list.items.len());
        Ok(list)
    }

    /// List CiliumNetworkPolicies in `namespace`, or in all namespaces
    pub async fn list_cilium_network_policies(
        &self,
        namespace: Option<&str>,
        params: &ListParams,
    ) -> Result<ObjectList<CiliumNetworkPolicy>> {
        let policies: Api<CiliumNetworkPolicy> = match namespace {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let list = policies.list(params).await?;

        debug!(
            "Listed {} CiliumNetworkPolicies in {}",
            list.items.len(),
            namespace.unwrap_or("all namespaces")
        );
        Ok(list)
    }

    /// List CiliumClusterwideNetworkPolicies
    pub async fn list_cilium_clusterwide_network_policies(
        &self,
        params: &ListParams,
    ) -> Result<ObjectList<CiliumClusterwideNetworkPolicy>> {
        let policies: Api<CiliumClusterwideNetworkPolicy> = Api::all(self.client.clone());
        let list = policies.list(params).await?;

        debug!("Listed {} CiliumClusterwideNetworkPolicies", list.items.len());
        Ok(list)
    }
}
