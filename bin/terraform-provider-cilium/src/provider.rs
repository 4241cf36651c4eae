//! Provider configuration and registration

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use cilium_client::{CiliumClient, KubeconfigSource};
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{map, AttributePath, Diagnostics, DynamicDataSource, DynamicResource, Provider};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::data_source::{
    CiliumClusterwideNetworkPolicyDataSource, CiliumNetworkPolicyDataSource, CiliumNodeDataSource,
};
use crate::model::known;
use crate::resource::CiliumNodeResource;

/// Client handle built once at Configure and read by every data source and
/// resource afterwards. `None` until the provider is configured.
pub type SharedClient = Arc<RwLock<Option<CiliumClient>>>;

/// Provider block of the Terraform configuration
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kube_config: Value<String>,
    pub kube_context: Value<String>,
}

#[derive(Clone, Default)]
pub struct CiliumProvider {
    client: SharedClient,
}

impl CiliumProvider {
    #[cfg(test)]
    pub fn shared_client(&self) -> SharedClient {
        self.client.clone()
    }
}

#[async_trait]
impl Provider for CiliumProvider {
    type Config<'a> = ProviderConfig;
    type MetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("Read-only access to Cilium custom resources"),
                attributes: map! {
                    "kube_config" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(
                            "Path to the kubeconfig file. Defaults to KUBECONFIG, then ~/.kube/config",
                        ),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "kube_context" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain(
                            "Kubeconfig context to use. Defaults to the current context",
                        ),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::Config<'a>) -> Option<()> {
        for (name, value) in [
            ("kube_config", &config.kube_config),
            ("kube_context", &config.kube_context),
        ] {
            if matches!(known(value), Some(v) if v.trim().is_empty()) {
                diags.error(
                    format!("Empty {}", name),
                    format!("{} must not be empty when set. Remove it to use the default.", name),
                    AttributePath::new(name),
                );
            }
        }

        if diags.errors.is_empty() {
            Some(())
        } else {
            None
        }
    }

    async fn configure<'a>(
        &self,
        diags: &mut Diagnostics,
        terraform_version: String,
        config: Self::Config<'a>,
    ) -> Option<()> {
        info!(%terraform_version, "Configuring cilium client");

        for (name, value) in [
            ("kube_config", &config.kube_config),
            ("kube_context", &config.kube_context),
        ] {
            if matches!(value, Value::Unknown) {
                diags.error(
                    format!("Unknown {}", name),
                    format!(
                        "The provider cannot create the Kubernetes API client as there is an unknown configuration value for {}. \
                         Either target apply the source of the value first or set the value statically in the configuration.",
                        name
                    ),
                    AttributePath::new(name),
                );
            }
        }
        if !diags.errors.is_empty() {
            return None;
        }

        let source = match KubeconfigSource::resolve(known(&config.kube_config)) {
            Ok(source) => source,
            Err(err) => {
                diags.error(
                    "Missing Kubernetes kubeconfig",
                    err.to_string(),
                    AttributePath::new("kube_config"),
                );
                return None;
            }
        };
        debug!(%source, "Resolved kubeconfig");

        let client = match CiliumClient::from_kubeconfig(&source, known(&config.kube_context)).await {
            Ok(client) => client,
            Err(err) => {
                diags.root_error(
                    "Unable to create Kubernetes API client",
                    format!(
                        "An unexpected error occurred when creating the Kubernetes API client from {}.\n\nClient error: {}",
                        source, err
                    ),
                );
                return None;
            }
        };

        let context = client.context().to_string();
        *self.client.write().await = Some(client);

        info!(%context, "Configured Kubernetes client");
        Some(())
    }

    fn get_resources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicResource>>> {
        Some(map! {
            "ciliumnode" => CiliumNodeResource,
        })
    }

    fn get_data_sources(
        &self,
        _diags: &mut Diagnostics,
    ) -> Option<HashMap<String, Box<dyn DynamicDataSource>>> {
        Some(map! {
            "ciliumnodes" => CiliumNodeDataSource::new(self.client.clone()),
            "ciliumNetworkPolicies" => CiliumNetworkPolicyDataSource::new(self.client.clone()),
            "ciliumClusterwideNetworkPolicies" => CiliumClusterwideNetworkPolicyDataSource::new(self.client.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const KUBECONFIG_YAML: &str = r#"
apiVersion: v1
kind: Config
clusters:
- name: kind-cilium
  cluster:
    server: https://127.0.0.1:6443
    insecure-skip-tls-verify: true
contexts:
- name: kind-cilium
  context:
    cluster: kind-cilium
    user: admin
current-context: kind-cilium
users:
- name: admin
  user:
    token: not-a-real-token
"#;

    fn config(kube_config: Value<String>, kube_context: Value<String>) -> ProviderConfig {
        ProviderConfig {
            kube_config,
            kube_context,
        }
    }

    #[test]
    fn test_schema_attributes() {
        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();
        let schema = provider.schema(&mut diags).unwrap();

        let mut names: Vec<&String> = schema.block.attributes.keys().collect();
        names.sort();
        assert_eq!(names, vec!["kube_config", "kube_context"]);
    }

    #[test]
    fn test_registered_types() {
        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();

        let data_sources = provider.get_data_sources(&mut diags).unwrap();
        assert!(data_sources.contains_key("ciliumnodes"));
        assert!(data_sources.contains_key("ciliumNetworkPolicies"));
        assert!(data_sources.contains_key("ciliumClusterwideNetworkPolicies"));

        let resources = provider.get_resources(&mut diags).unwrap();
        assert_eq!(resources.len(), 1);
        assert!(resources.contains_key("ciliumnode"));
    }

    #[tokio::test]
    async fn test_validate_rejects_empty_values() {
        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();

        let result = provider
            .validate(&mut diags, config(Value::Value(" ".to_string()), Value::Null))
            .await;
        assert!(result.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_configure_unknown_kube_config() {
        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();

        let result = provider
            .configure(&mut diags, "1.9.0".to_string(), config(Value::Unknown, Value::Null))
            .await;
        assert!(result.is_none());
        assert_eq!(diags.errors.len(), 1);
        assert!(provider.shared_client().read().await.is_none());
    }

    #[tokio::test]
    async fn test_configure_unreadable_kubeconfig() {
        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();

        let result = provider
            .configure(
                &mut diags,
                "1.9.0".to_string(),
                config(Value::Value("/nonexistent/kubeconfig".to_string()), Value::Null),
            )
            .await;
        assert!(result.is_none());
        assert_eq!(diags.errors.len(), 1);
        assert!(provider.shared_client().read().await.is_none());
    }

    #[tokio::test]
    async fn test_configure_from_explicit_kubeconfig() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, KUBECONFIG_YAML).unwrap();

        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();
        let result = provider
            .configure(
                &mut diags,
                "1.9.0".to_string(),
                config(Value::Value(path.display().to_string()), Value::Null),
            )
            .await;

        assert!(result.is_some());
        assert!(diags.errors.is_empty());
        let shared = provider.shared_client();
        let client = shared.read().await;
        assert_eq!(client.as_ref().map(|c| c.context()), Some("kind-cilium"));
    }

    #[tokio::test]
    async fn test_configure_unknown_context() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config");
        fs::write(&path, KUBECONFIG_YAML).unwrap();

        let provider = CiliumProvider::default();
        let mut diags = Diagnostics::default();
        let result = provider
            .configure(
                &mut diags,
                "1.9.0".to_string(),
                config(
                    Value::Value(path.display().to_string()),
                    Value::Value("does-not-exist".to_string()),
                ),
            )
            .await;

        assert!(result.is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
