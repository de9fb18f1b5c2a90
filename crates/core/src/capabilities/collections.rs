//! Collections

use assetgate_common::Params;
use assetgate_domain::{Collection, Result};
use tracing::{info, instrument};

use super::{created_ref, ensure_acknowledged};
use crate::batch::enforce_batch_limit;
use crate::client::{Attach, Capability, Caps, Client, On, Slot};
use crate::response::decode_list;
use crate::validation::{non_empty, positive_id, positive_ids};

const GET_USER_COLLECTIONS: &str = "get_user_collections";
const CREATE_COLLECTION: &str = "create_collection";
const ADD_RESOURCE: &str = "add_resource_to_collection";
const REMOVE_RESOURCE: &str = "remove_resource_from_collection";

/// Collections capability marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Collections;

impl Capability for Collections {
    const NAME: &'static str = "collections";
}

impl<Sr: Slot, Rs: Slot, Co, Us: Slot> Attach<Caps<Sr, Rs, Co, Us>> for Collections {
    type Output = Caps<Sr, Rs, On, Us>;
}

impl<Sr, Rs, Us> Client<Caps<Sr, Rs, On, Us>> {
    /// Collections owned by or shared with the configured user
    #[instrument(skip(self))]
    pub async fn get_user_collections(&self) -> Result<Vec<Collection>> {
        let raw = self.request(GET_USER_COLLECTIONS, Params::new()).await?;
        decode_list(raw, GET_USER_COLLECTIONS)
    }

    /// Create a collection and return its reference
    #[instrument(skip(self))]
    pub async fn create_collection(&self, name: &str) -> Result<u64> {
        let name = non_empty("collection name", name)?;
        let raw = self.request(CREATE_COLLECTION, Params::new().with("name", name)).await?;
        let reference = created_ref(&raw, CREATE_COLLECTION)?;
        info!(collection = reference, "created collection");
        Ok(reference)
    }

    /// Add each resource to `collection`, one call per resource
    #[instrument(skip(self, resources), fields(count = resources.len()))]
    pub async fn add_resources_to_collection(&self, collection: u64, resources: &[u64]) -> Result<()> {
        self.update_membership(ADD_RESOURCE, collection, resources).await
    }

    /// Remove each resource from `collection`, one call per resource
    #[instrument(skip(self, resources), fields(count = resources.len()))]
    pub async fn remove_resources_from_collection(
        &self,
        collection: u64,
        resources: &[u64],
    ) -> Result<()> {
        self.update_membership(REMOVE_RESOURCE, collection, resources).await
    }

    async fn update_membership(&self, function: &str, collection: u64, resources: &[u64]) -> Result<()> {
        enforce_batch_limit(resources, self.config().max_batch_size())?;
        positive_id("collection", collection)?;
        positive_ids("resource", resources)?;

        for &resource in resources {
            let params = Params::new().with("resource", resource).with("collection", collection);
            let raw = self.request(function, params).await?;
            ensure_acknowledged(&raw, function)?;
        }
        Ok(())
    }
}
