//! Domain utilities

pub mod lenient;

pub use lenient::{coerce_number, coerce_u64};
