//! Resource records, files and metadata

use assetgate_common::Params;
use assetgate_domain::{AssetgateError, FieldDefinition, Node, Resource, Result};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::ensure_acknowledged;
use crate::batch::enforce_batch_limit;
use crate::client::{Attach, Capability, Caps, Client, On, Slot};
use crate::response::{decode, decode_list};
use crate::validation::{positive_id, positive_ids};

const GET_RESOURCE_DATA: &str = "get_resource_data";
const GET_RESOURCE_PATH: &str = "get_resource_path";
const GET_RESOURCE_FIELD_DATA: &str = "get_resource_field_data";
const GET_NODES: &str = "get_nodes";
const DELETE_RESOURCE: &str = "delete_resource";

/// Resources capability marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Resources;

impl Capability for Resources {
    const NAME: &'static str = "resources";
}

impl<Sr: Slot, Rs, Co: Slot, Us: Slot> Attach<Caps<Sr, Rs, Co, Us>> for Resources {
    type Output = Caps<Sr, On, Co, Us>;
}

impl<Sr, Co, Us> Client<Caps<Sr, On, Co, Us>> {
    /// Core record for one resource; `None` when the service has no such
    /// resource.
    #[instrument(skip(self))]
    pub async fn get_resource_data(&self, resource: u64) -> Result<Option<Resource>> {
        positive_id("resource", resource)?;
        let params = Params::new().with("resource", resource);
        match self.request(GET_RESOURCE_DATA, params).await? {
            Value::Null | Value::Bool(false) => Ok(None),
            raw => decode(raw, GET_RESOURCE_DATA).map(Some),
        }
    }

    /// Download URL for a resource file.
    ///
    /// `size` is a preview size code (`""` for the original file). The
    /// returned URL has already been rewritten for the internal network when
    /// one is configured.
    #[instrument(skip(self))]
    pub async fn get_resource_path(
        &self,
        resource: u64,
        size: &str,
        extension: Option<&str>,
    ) -> Result<String> {
        positive_id("resource", resource)?;
        let params = Params::new()
            .with("ref", resource)
            .with("getfilepath", 0)
            .with("size", size)
            .with("generate", 1)
            .with("extension", extension);

        match self.request(GET_RESOURCE_PATH, params).await? {
            Value::String(url) if !url.is_empty() => Ok(self.rewrite_url(&url)),
            other => Err(AssetgateError::api(
                GET_RESOURCE_PATH,
                format!("expected a URL, got {other}"),
            )),
        }
    }

    /// Metadata fields with the values held for `resource`
    #[instrument(skip(self))]
    pub async fn get_resource_field_data(&self, resource: u64) -> Result<Vec<FieldDefinition>> {
        positive_id("resource", resource)?;
        let params = Params::new().with("resource", resource);
        let raw = self.request(GET_RESOURCE_FIELD_DATA, params).await?;
        decode_list(raw, GET_RESOURCE_FIELD_DATA)
    }

    /// Options of a fixed-list field
    #[instrument(skip(self))]
    pub async fn get_nodes(&self, field: u64) -> Result<Vec<Node>> {
        positive_id("field", field)?;
        let params = Params::new().with("ref", field);
        let raw = self.request(GET_NODES, params).await?;
        let nodes: Vec<Node> = decode_list(raw, GET_NODES)?;
        debug!(count = nodes.len(), "fetched field nodes");
        Ok(nodes)
    }

    /// Delete every resource in `resources`, one call each, stopping at the
    /// first failure.
    ///
    /// Batches over the configured maximum are rejected before any call.
    #[instrument(skip(self, resources), fields(count = resources.len()))]
    pub async fn delete_resources(&self, resources: &[u64]) -> Result<()> {
        enforce_batch_limit(resources, self.config().max_batch_size())?;
        positive_ids("resource", resources)?;

        for &resource in resources {
            let raw = self.request(DELETE_RESOURCE, Params::new().with("resource", resource)).await?;
            ensure_acknowledged(&raw, DELETE_RESOURCE)?;
        }
        info!(count = resources.len(), "deleted resources");
        Ok(())
    }
}
