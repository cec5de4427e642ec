//! Foundation types for Vexis.
//!
//! Every other Vexis crate depends on `vexis-types` for the digest type that
//! names stored objects.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (BLAKE3 digest)
//! - [`TypeError`] -- Parse failures for identifiers

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
