//! Content hashing for Vexis.
//!
//! Blob and commit identities are both BLAKE3 digests of the stored bytes.
//! The hasher wraps an established library; there is no custom cryptography.

pub mod hasher;

pub use hasher::{ContentHasher, HasherError};
