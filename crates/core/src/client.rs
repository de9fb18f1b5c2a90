//! Capability-composed client
//!
//! A [`Client`] starts bare and gains operation groups through
//! [`Client::with`]. Which groups are attached is tracked in the type
//! parameter, so calling an operation from an unattached group is a compile
//! error rather than a runtime failure:
//!
//! ```compile_fail
//! use assetgate_common::Params;
//! use assetgate_core::{Caps, Client, On};
//!
//! // Search only: no user provisioning methods exist on this type.
//! async fn provision(client: Client<Caps<On>>) {
//!     let _ = client.create_user("jdoe", &Params::new()).await;
//! }
//! ```
//!
//! ```no_run
//! use assetgate_common::Params;
//! use assetgate_core::{Caps, Client, Off, On};
//!
//! async fn provision(client: Client<Caps<Off, Off, Off, On>>) {
//!     let _ = client.create_user("jdoe", &Params::new()).await;
//! }
//! ```
//!
//! Each group owns one slot of [`Caps`], so attaching is order independent
//! and attaching the same group twice is a no-op.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use assetgate_common::Params;
use assetgate_domain::{ClientConfig, Result};
use serde_json::Value;

use crate::capabilities::{Collections, Resources, Search, Users};
use crate::ports::ApiTransport;

/// Slot marker: capability not attached
#[derive(Debug, Clone, Copy, Default)]
pub struct Off;

/// Slot marker: capability attached
#[derive(Debug, Clone, Copy, Default)]
pub struct On;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Off {}
    impl Sealed for super::On {}
}

/// One capability slot, either [`On`] or [`Off`]
pub trait Slot: sealed::Sealed {
    const ATTACHED: bool;
}

impl Slot for Off {
    const ATTACHED: bool = false;
}

impl Slot for On {
    const ATTACHED: bool = true;
}

/// Attached-capability set: search, resources, collections, users
pub struct Caps<Sr = Off, Rs = Off, Co = Off, Us = Off>(PhantomData<fn() -> (Sr, Rs, Co, Us)>);

/// Runtime view of a capability set
pub trait CapabilitySet {
    /// Names of the attached capabilities in a fixed order
    fn names() -> Vec<&'static str>;
}

impl<Sr: Slot, Rs: Slot, Co: Slot, Us: Slot> CapabilitySet for Caps<Sr, Rs, Co, Us> {
    fn names() -> Vec<&'static str> {
        [
            (Sr::ATTACHED, Search::NAME),
            (Rs::ATTACHED, Resources::NAME),
            (Co::ATTACHED, Collections::NAME),
            (Us::ATTACHED, Users::NAME),
        ]
        .into_iter()
        .filter_map(|(attached, name)| attached.then_some(name))
        .collect()
    }
}

/// A named group of remote operations
pub trait Capability {
    const NAME: &'static str;
}

/// Type-level attachment of a capability onto a set `S`
pub trait Attach<S>: Capability {
    type Output: CapabilitySet;
}

/// Client with no capabilities attached
pub type BareClient = Client<Caps>;

/// Client with every capability attached
pub type FullClient = Client<Caps<On, On, On, On>>;

/// Handle to the remote service.
///
/// Cheap to clone; clones share the transport and configuration.
pub struct Client<S = Caps> {
    transport: Arc<dyn ApiTransport>,
    config: Arc<ClientConfig>,
    caps: PhantomData<fn() -> S>,
}

impl Client<Caps> {
    /// Bare client over `transport`. Attach capabilities with [`Client::with`].
    pub fn new(transport: Arc<dyn ApiTransport>, config: Arc<ClientConfig>) -> Self {
        Self { transport, config, caps: PhantomData }
    }
}

impl<S: CapabilitySet> Client<S> {
    /// Attach a capability, returning a client that also exposes its methods.
    #[must_use]
    pub fn with<C: Attach<S>>(self, _capability: C) -> Client<C::Output> {
        Client { transport: self.transport, config: self.config, caps: PhantomData }
    }

    /// Names of the attached capabilities
    pub fn capabilities(&self) -> Vec<&'static str> {
        S::names()
    }

    /// Whether the named capability is attached
    pub fn has_capability(&self, name: &str) -> bool {
        S::names().contains(&name)
    }
}

impl<S> Client<S> {
    /// Validated configuration this client was built from
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) async fn request(&self, function: &str, params: Params) -> Result<Value> {
        self.transport.request(function, params).await
    }

    pub(crate) fn rewrite_url(&self, url: &str) -> String {
        self.transport.rewrite_url(url)
    }
}

impl<S> Clone for Client<S> {
    fn clone(&self) -> Self {
        Self { transport: Arc::clone(&self.transport), config: Arc::clone(&self.config), caps: PhantomData }
    }
}

impl<S: CapabilitySet> fmt::Debug for Client<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.config.base_url())
            .field("user", &self.config.user())
            .field("capabilities", &S::names())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_set_is_empty() {
        assert!(<Caps as CapabilitySet>::names().is_empty());
    }

    #[test]
    fn test_names_follow_slot_order() {
        assert_eq!(
            <Caps<On, Off, On, Off> as CapabilitySet>::names(),
            vec!["search", "collections"]
        );
        assert_eq!(
            <Caps<On, On, On, On> as CapabilitySet>::names(),
            vec!["search", "resources", "collections", "users"]
        );
    }
}
