use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{map, AttributePath, DataSource, Diagnostics};
use tracing::debug;

use super::{computed_list, configured_client, list_params, optional_string};
use crate::model::{known, PolicyModel};
use crate::provider::SharedClient;

/// `cilium_ciliumNetworkPolicies`: CiliumNetworkPolicies in one namespace,
/// or in every namespace when `namespace` is not set
pub struct CiliumNetworkPolicyDataSource {
    client: SharedClient,
}

impl CiliumNetworkPolicyDataSource {
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiliumNetworkPoliciesState {
    pub namespace: Value<String>,
    pub label_selector: Value<String>,
    pub field_selector: Value<String>,
    pub ciliumnetworkpolicies: Value<Vec<PolicyModel>>,
}

#[async_trait]
impl DataSource for CiliumNetworkPolicyDataSource {
    type State<'a> = CiliumNetworkPoliciesState;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("List CiliumNetworkPolicies"),
                attributes: map! {
                    "namespace" => optional_string("Namespace to list from. All namespaces when unset"),
                    "label_selector" => optional_string("Only return policies matching this label selector"),
                    "field_selector" => optional_string("Only return policies matching this field selector"),
                    "ciliumnetworkpolicies" => computed_list(PolicyModel::attribute_type(), "CiliumNetworkPolicies found"),
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if matches!(known(&config.namespace), Some(namespace) if namespace.is_empty()) {
            diags.error(
                "Empty namespace",
                "namespace must not be empty when set. Remove it to list across all namespaces.",
                AttributePath::new("namespace"),
            );
            return None;
        }
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = configured_client(&self.client, diags).await?;
        let namespace = known(&config.namespace).filter(|ns| !ns.is_empty());
        let params = list_params(&config.label_selector, &config.field_selector);

        let list = match client.list_cilium_network_policies(namespace, &params).await {
            Ok(list) => list,
            Err(err) => {
                diags.root_error("Unable to list CiliumNetworkPolicies", err.to_string());
                return None;
            }
        };

        debug!(
            context = client.context(),
            namespace = namespace.unwrap_or("*"),
            "Read {} CiliumNetworkPolicies",
            list.items.len()
        );
        Some(CiliumNetworkPoliciesState {
            ciliumnetworkpolicies: Value::Value(list.items.iter().map(PolicyModel::from).collect()),
            ..config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mock_shared_client, policy};

    #[tokio::test]
    async fn test_read_in_namespace() {
        let (client, mut server) = mock_shared_client();
        let data_source = CiliumNetworkPolicyDataSource::new(client);
        let mut diags = Diagnostics::default();
        let config = CiliumNetworkPoliciesState {
            namespace: Value::Value("kube-system".to_string()),
            ..Default::default()
        };

        let (state, (path, _)) = tokio::join!(
            data_source.read(&mut diags, config, ValueEmpty::default()),
            server.respond_list(
                "CiliumNetworkPolicy",
                vec![
                    policy("CiliumNetworkPolicy", "allow-dns", Some("kube-system")),
                    policy("CiliumNetworkPolicy", "allow-hubble", Some("kube-system")),
                ],
            ),
        );

        assert_eq!(
            path,
            "/apis/cilium.io/v2/namespaces/kube-system/ciliumnetworkpolicies"
        );
        let state = state.unwrap();
        let Value::Value(policies) = &state.ciliumnetworkpolicies else {
            panic!("ciliumnetworkpolicies not set");
        };
        assert_eq!(policies.len(), 2);
        assert_eq!(policies[0].apiversion, Value::Value("cilium.io/v2".to_string()));
        assert_eq!(policies[0].kind, Value::Value("CiliumNetworkPolicy".to_string()));
        assert_eq!(policies[1].rule_count, Value::Value(1));
        assert_eq!(state.namespace, Value::Value("kube-system".to_string()));
    }

    #[tokio::test]
    async fn test_read_all_namespaces() {
        let (client, mut server) = mock_shared_client();
        let data_source = CiliumNetworkPolicyDataSource::new(client);
        let mut diags = Diagnostics::default();

        let (state, (path, _)) = tokio::join!(
            data_source.read(&mut diags, CiliumNetworkPoliciesState::default(), ValueEmpty::default()),
            server.respond_list(
                "CiliumNetworkPolicy",
                vec![policy("CiliumNetworkPolicy", "web", Some("frontend"))],
            ),
        );

        assert_eq!(path, "/apis/cilium.io/v2/ciliumnetworkpolicies");
        assert!(state.is_some());
    }

    #[tokio::test]
    async fn test_read_api_error_is_diagnostic() {
        let (client, mut server) = mock_shared_client();
        let data_source = CiliumNetworkPolicyDataSource::new(client);
        let mut diags = Diagnostics::default();

        let (state, _) = tokio::join!(
            data_source.read(&mut diags, CiliumNetworkPoliciesState::default(), ValueEmpty::default()),
            server.respond_error(
                403,
                "Forbidden",
                "ciliumnetworkpolicies.cilium.io is forbidden: User \"ci\" cannot list resource",
            ),
        );

        assert!(state.is_none());
        assert_eq!(diags.errors.len(), 1);
    }

    #[tokio::test]
    async fn test_validate_empty_namespace() {
        let data_source = CiliumNetworkPolicyDataSource::new(SharedClient::default());
        let mut diags = Diagnostics::default();
        let config = CiliumNetworkPoliciesState {
            namespace: Value::Value(String::new()),
            ..Default::default()
        };

        assert!(data_source.validate(&mut diags, config).await.is_none());
        assert_eq!(diags.errors.len(), 1);
    }
}
