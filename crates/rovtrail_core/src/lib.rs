//! ROVTRAIL Core Types
//!
//! This crate contains the shared error taxonomy and timestamp type.
//! No I/O happens here; the loader and archive crates map their own
//! failures into these types.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod time;

// Re-exports
pub use error::{CoreError, CoreResult};
pub use time::Timestamp;
