use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{map, DataSource, Diagnostics};
use tracing::debug;

use super::{computed_list, configured_client, list_params, optional_string};
use crate::model::PolicyModel;
use crate::provider::SharedClient;

/// `cilium_ciliumClusterwideNetworkPolicies`
pub struct CiliumClusterwideNetworkPolicyDataSource {
    client: SharedClient,
}

impl CiliumClusterwideNetworkPolicyDataSource {
    pub fn new(client: SharedClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiliumClusterwideNetworkPoliciesState {
    pub label_selector: Value<String>,
    pub field_selector: Value<String>,
    pub ciliumclusterwidenetworkpolicies: Value<Vec<PolicyModel>>,
}

#[async_trait]
impl DataSource for CiliumClusterwideNetworkPolicyDataSource {
    type State<'a> = CiliumClusterwideNetworkPoliciesState;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("List CiliumClusterwideNetworkPolicies"),
                attributes: map! {
                    "label_selector" => optional_string("Only return policies matching this label selector"),
                    "field_selector" => optional_string("Only return policies matching this field selector"),
                    "ciliumclusterwidenetworkpolicies" => computed_list(
                        PolicyModel::attribute_type(),
                        "CiliumClusterwideNetworkPolicies in the cluster",
                    ),
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, _diags: &mut Diagnostics, _config: Self::State<'a>) -> Option<()> {
        Some(())
    }

    async fn read<'a>(
        &self,
        diags: &mut Diagnostics,
        config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::State<'a>> {
        let client = configured_client(&self.client, diags).await?;
        let params = list_params(&config.label_selector, &config.field_selector);

        let list = match client.list_cilium_clusterwide_network_policies(&params).await {
            Ok(list) => list,
            Err(err) => {
                diags.root_error(
                    "Unable to list CiliumClusterwideNetworkPolicies",
                    err.to_string(),
                );
                return None;
            }
        };

        debug!(
            context = client.context(),
            "Read {} CiliumClusterwideNetworkPolicies",
            list.items.len()
        );
        Some(CiliumClusterwideNetworkPoliciesState {
            ciliumclusterwidenetworkpolicies: Value::Value(
                list.items.iter().map(PolicyModel::from).collect(),
            ),
            ..config
        })
    }
}
