//! `cilium_ciliumnode` resource
//!
//! Schema-only: the lifecycle stores the plan as state and never calls the
//! API server. Declared state can drift from the cluster without notice.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tf_provider::schema::{Attribute, AttributeConstraint, AttributeType, Block, Description, Schema};
use tf_provider::value::{Value, ValueEmpty};
use tf_provider::{map, AttributePath, Diagnostics, Resource};
use tracing::debug;

use crate::model::known;

#[derive(Debug, Default, Clone)]
pub struct CiliumNodeResource;

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiliumNodeResourceState {
    pub id: Value<String>,
    pub name: Value<String>,
    pub instance_id: Value<String>,
    pub labels: Value<BTreeMap<String, String>>,
    pub annotations: Value<BTreeMap<String, String>>,
}

impl CiliumNodeResourceState {
    /// `id` follows `name`
    fn with_id(self) -> Self {
        Self {
            id: self.name.clone(),
            ..self
        }
    }
}

#[async_trait]
impl Resource for CiliumNodeResource {
    type State<'a> = CiliumNodeResourceState;
    type PrivateState<'a> = ValueEmpty;
    type ProviderMetaState<'a> = ValueEmpty;

    fn schema(&self, _diags: &mut Diagnostics) -> Option<Schema> {
        let string_map = AttributeType::Map(Box::new(AttributeType::String));
        Some(Schema {
            version: 1,
            block: Block {
                description: Description::plain("CiliumNode declared in Terraform state only"),
                attributes: map! {
                    "id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Same as name"),
                        constraint: AttributeConstraint::Computed,
                        ..Default::default()
                    },
                    "name" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("Name of the CiliumNode"),
                        constraint: AttributeConstraint::Required,
                        ..Default::default()
                    },
                    "instance_id" => Attribute {
                        attr_type: AttributeType::String,
                        description: Description::plain("spec.instance-id of the CiliumNode"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "labels" => Attribute {
                        attr_type: string_map.clone(),
                        description: Description::plain("Labels of the CiliumNode"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                    "annotations" => Attribute {
                        attr_type: string_map,
                        description: Description::plain("Annotations of the CiliumNode"),
                        constraint: AttributeConstraint::Optional,
                        ..Default::default()
                    },
                },
                ..Default::default()
            },
        })
    }

    async fn validate<'a>(&self, diags: &mut Diagnostics, config: Self::State<'a>) -> Option<()> {
        if matches!(known(&config.name), Some(name) if name.is_empty()) {
            diags.error_short("name must not be empty", AttributePath::new("name"));
            return None;
        }
        Some(())
    }

    async fn read<'a>(
        &self,
        _diags: &mut Diagnostics,
        state: Self::State<'a>,
        private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        Some((state, private_state))
    }

    async fn plan_create<'a>(
        &self,
        _diags: &mut Diagnostics,
        proposed_state: Self::State<'a>,
        _config: Self::State<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        Some((proposed_state.with_id(), ValueEmpty::default()))
    }

    async fn plan_update<'a>(
        &self,
        _diags: &mut Diagnostics,
        prior_state: Self::State<'a>,
        proposed_state: Self::State<'a>,
        _config: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(
        Self::State<'a>,
        Self::PrivateState<'a>,
        Vec<AttributePath>,
    )> {
        let mut trigger_replace = Vec::new();
        if proposed_state.name != prior_state.name {
            trigger_replace.push(AttributePath::new("name"));
        }
        Some((proposed_state.with_id(), prior_private_state, trigger_replace))
    }

    async fn plan_destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        prior_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<Self::PrivateState<'a>> {
        Some(prior_private_state)
    }

    async fn create<'a>(
        &self,
        _diags: &mut Diagnostics,
        planned_state: Self::State<'a>,
        _config: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        debug!(name = ?planned_state.name, "Storing planned CiliumNode as state");
        Some((planned_state.with_id(), planned_private_state))
    }

    async fn update<'a>(
        &self,
        _diags: &mut Diagnostics,
        _prior_state: Self::State<'a>,
        planned_state: Self::State<'a>,
        _config: Self::State<'a>,
        planned_private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        debug!(name = ?planned_state.name, "Storing updated CiliumNode as state");
        Some((planned_state.with_id(), planned_private_state))
    }

    async fn destroy<'a>(
        &self,
        _diags: &mut Diagnostics,
        _state: Self::State<'a>,
        _private_state: Self::PrivateState<'a>,
        _provider_meta_state: Self::ProviderMetaState<'a>,
    ) -> Option<()> {
        Some(())
    }

    async fn import<'a>(
        &self,
        _diags: &mut Diagnostics,
        id: String,
    ) -> Option<(Self::State<'a>, Self::PrivateState<'a>)> {
        let state = CiliumNodeResourceState {
            id: Value::Value(id.clone()),
            name: Value::Value(id),
            ..Default::default()
        };
        Some((state, ValueEmpty::default()))
    }
}
