//! Domain types returned by the remote service
//!
//! Every type is built fresh from a normalized response on each call. None
//! of them are cached and none carry identity beyond the remote reference
//! number. Fields the client does not model are kept in `extra`.

pub mod collection;
pub mod field;
pub mod resource;
pub mod user;

pub use collection::Collection;
pub use field::{FieldDefinition, Node};
pub use resource::Resource;
pub use user::User;
