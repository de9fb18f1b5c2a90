//! User provisioning and profile updates
//!
//! The remote service auto-approves accounts created through its signup
//! primitive and lets the profile primitive write any column, group and
//! approval state included. Both operations here keep those two surfaces
//! closed:
//!
//! - [`create_user`](Client::create_user) provisions with only a username
//!   and the configured signup group, then immediately writes
//!   `approved = 0`. If that lock-down cannot be confirmed after retries the
//!   call fails with a security error naming the new account.
//! - [`save_user`](Client::save_user) forwards only
//!   [`ALLOWED_USER_FIELDS`] and refuses to call out when nothing is left.

use std::time::Duration;

use assetgate_common::{Params, RedactedParams};
use assetgate_domain::{AssetgateError, Result, User};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use super::{created_ref, ensure_acknowledged};
use crate::client::{Attach, Capability, Caps, Client, On, Slot};
use crate::response::decode;
use crate::validation::{non_empty, positive_id};

const NEW_USER: &str = "new_user";
const SAVE_USER: &str = "save_user";
const GET_USER: &str = "get_user";

/// Profile fields a caller may write
pub const ALLOWED_USER_FIELDS: [&str; 4] = ["fullname", "email", "password", "comments"];

/// Lock-down attempts before escalating
pub const LOCKDOWN_ATTEMPTS: u32 = 3;

/// Backoff after attempt `n` is `n` steps
pub const LOCKDOWN_BACKOFF_STEP: Duration = Duration::from_millis(200);

/// Users capability marker
#[derive(Debug, Clone, Copy, Default)]
pub struct Users;

impl Capability for Users {
    const NAME: &'static str = "users";
}

impl<Sr: Slot, Rs: Slot, Co: Slot, Us> Attach<Caps<Sr, Rs, Co, Us>> for Users {
    type Output = Caps<Sr, Rs, Co, On>;
}

/// The allowed, non-null subset of `fields`, in caller order.
pub fn filter_user_fields(fields: &Params) -> Params {
    fields
        .iter()
        .filter(|(key, value)| ALLOWED_USER_FIELDS.contains(key) && !value.is_null())
        .map(|(key, value)| (key, value.clone()))
        .collect()
}

impl<Sr, Rs, Co> Client<Caps<Sr, Rs, Co, On>> {
    /// Provision an account and lock it down pending manual approval.
    ///
    /// Only `username` and the configured signup group travel in the
    /// provisioning call. Allowed entries of `fields` are written in the
    /// lock-down call; everything else is dropped.
    ///
    /// # Errors
    /// [`AssetgateError::Security`] carrying the new reference when the
    /// account exists but could not be locked down.
    #[instrument(skip(self, fields))]
    pub async fn create_user(&self, username: &str, fields: &Params) -> Result<u64> {
        let username = non_empty("username", username)?;

        let provision = Params::new()
            .with("username", username)
            .with("usergroup", self.config().signup_usergroup());
        let raw = self.request(NEW_USER, provision).await?;
        let user_ref = created_ref(&raw, NEW_USER)?;

        let mut lockdown = Params::new().with("ref", user_ref).with("approved", 0);
        for (key, value) in filter_user_fields(fields).iter() {
            lockdown.set(key, value.clone());
        }
        self.lock_down(user_ref, lockdown).await?;

        info!(user_ref, "provisioned user pending approval");
        Ok(user_ref)
    }

    async fn lock_down(&self, user_ref: u64, params: Params) -> Result<()> {
        let mut last_error = None;

        for attempt in 1..=LOCKDOWN_ATTEMPTS {
            let outcome = self
                .request(SAVE_USER, params.clone())
                .await
                .and_then(|raw| ensure_acknowledged(&raw, SAVE_USER));

            match outcome {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(user_ref, attempt, error = %err, "lock-down of new user failed");
                    last_error = Some(err);
                    if attempt < LOCKDOWN_ATTEMPTS {
                        tokio::time::sleep(LOCKDOWN_BACKOFF_STEP * attempt).await;
                    }
                }
            }
        }

        let cause = last_error.map(|e| e.to_string()).unwrap_or_default();
        error!(
            user_ref,
            attempts = LOCKDOWN_ATTEMPTS,
            cause = %cause,
            "user was created but could not be locked down; it may be active without approval"
        );
        Err(AssetgateError::Security {
            message: format!(
                "user {user_ref} was created but could not be set to unapproved after \
                 {LOCKDOWN_ATTEMPTS} attempts and needs manual review ({cause})"
            ),
            function: Some(SAVE_USER.to_string()),
            user_ref: Some(user_ref),
        })
    }

    /// Update profile fields of an existing account.
    ///
    /// Keys outside [`ALLOWED_USER_FIELDS`] are dropped.
    ///
    /// # Errors
    /// [`AssetgateError::Security`] without any remote call when no allowed
    /// field remains.
    #[instrument(skip(self, fields))]
    pub async fn save_user(&self, user_ref: u64, fields: &Params) -> Result<()> {
        positive_id("user", user_ref)?;

        let allowed = filter_user_fields(fields);
        if allowed.is_empty() {
            warn!(user_ref, fields = %RedactedParams(fields), "no permitted user fields to save");
            return Err(AssetgateError::Security {
                message: format!(
                    "no permitted fields to save; allowed fields are {}",
                    ALLOWED_USER_FIELDS.join(", ")
                ),
                function: Some(SAVE_USER.to_string()),
                user_ref: Some(user_ref),
            });
        }

        let mut params = Params::new().with("ref", user_ref);
        for (key, value) in allowed.iter() {
            params.set(key, value.clone());
        }
        let raw = self.request(SAVE_USER, params).await?;
        ensure_acknowledged(&raw, SAVE_USER)
    }

    /// Account record; `None` when the service has no such user.
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_ref: u64) -> Result<Option<User>> {
        positive_id("user", user_ref)?;
        match self.request(GET_USER, Params::new().with("ref", user_ref)).await? {
            Value::Null | Value::Bool(false) => Ok(None),
            raw => decode(raw, GET_USER).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use assetgate_common::ParamValue;

    use super::*;

    #[test]
    fn test_filter_keeps_allowed_in_order() {
        let fields = Params::new()
            .with("usergroup", 3)
            .with("email", "a@b.c")
            .with("approved", 1)
            .with("fullname", "X")
            .with("comments", Option::<String>::None);

        let filtered = filter_user_fields(&fields);

        assert_eq!(filtered.keys().collect::<Vec<_>>(), vec!["email", "fullname"]);
        assert_eq!(filtered.get("fullname"), Some(&ParamValue::Text("X".into())));
    }

    #[test]
    fn test_filter_of_only_forbidden_is_empty() {
        let fields = Params::new().with("usergroup", 3).with("approved", 1);
        assert!(filter_user_fields(&fields).is_empty());
    }
}
