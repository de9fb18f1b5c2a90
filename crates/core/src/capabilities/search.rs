//! Resource search

use std::fmt;

use assetgate_common::Params;
use assetgate_domain::{Resource, Result};
use tracing::{debug, instrument};

use crate::client::{Attach, Capability, Caps, Client, On, Slot};
use crate::response::decode_list;

const DO_SEARCH: &str = "do_search";
const DEFAULT_ORDER_BY: &str = "relevance";

/// Search capability marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Search;

impl Capability for Search {
    const NAME: &'static str = "search";
}

impl<Sr, Rs: Slot, Co: Slot, Us: Slot> Attach<Caps<Sr, Rs, Co, Us>> for Search {
    type Output = Caps<On, Rs, Co, Us>;
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("ASC"),
            Self::Desc => f.write_str("DESC"),
        }
    }
}

/// Paging and filtering for [`Client::search`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchOptions {
    /// Maximum rows returned; sent as `fetchrows`
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// Defaults to `relevance`
    pub order_by: Option<String>,
    pub sort: Option<SortOrder>,
    /// Restrict to these resource types
    pub resource_types: Vec<u64>,
    /// Archive state filter
    pub archive: Option<i32>,
}

impl SearchOptions {
    fn to_params(&self, query: &str) -> Params {
        let restypes = (!self.resource_types.is_empty()).then(|| {
            self.resource_types.iter().map(u64::to_string).collect::<Vec<_>>().join(",")
        });

        Params::new()
            .with("search", query)
            .with("restypes", restypes)
            .with("order_by", self.order_by.as_deref().unwrap_or(DEFAULT_ORDER_BY))
            .with("archive", self.archive)
            .with("fetchrows", self.limit)
            .with("sort", self.sort.map(|s| s.to_string()))
            .with("offset", self.offset)
    }
}

impl<Rs, Co, Us> Client<Caps<On, Rs, Co, Us>> {
    /// Search resources. An empty result is an empty list, never an error.
    #[instrument(skip(self, options), fields(limit = ?options.limit, offset = ?options.offset))]
    pub async fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<Resource>> {
        let raw = self.request(DO_SEARCH, options.to_params(query)).await?;
        let resources: Vec<Resource> = decode_list(raw, DO_SEARCH)?;
        debug!(count = resources.len(), "search completed");
        Ok(resources)
    }
}
