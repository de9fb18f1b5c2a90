//! Secret handling

pub mod secret;

pub use secret::Secret;
