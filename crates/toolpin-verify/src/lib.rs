//! Streaming integrity verification for downloaded assets.
//!
//! Bytes are hashed as they pass through the install pipeline, so an asset is
//! read exactly once whether or not it turns out to be intact.
//!
//! # Example
//!
//! ```
//! use toolpin_verify::{Sha256Hasher, Verifier};
//!
//! let expected = hex::encode(Sha256Hasher::digest(b"hello world"));
//! let mut verifier = Verifier::new(&expected);
//! verifier.update(b"hello ");
//! verifier.update(b"world");
//! assert_eq!(verifier.finish().unwrap(), expected);
//! ```

pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::verifier::Verifier;

mod error;
mod hasher;
mod verifier;
