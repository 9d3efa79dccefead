//! Digest collaborators for the HyperLogLog estimator.
//!
//! The estimator never hashes items itself. It asks a [`Digester`] for a
//! fixed-width digest and derives everything else (bucket index, trailing
//! zero run) from those bytes. Any deterministic, uniformly distributed
//! hash works; two implementations are provided:
//!
//! - [`Sha256Digester`]: SHA-256 truncated to the requested width. This is
//!   the reference collaborator.
//! - [`Murmur3Digester`]: seeded MurmurHash3 x64-128. Much faster, not
//!   cryptographic.

mod murmur3;
mod sha256;

pub use murmur3::Murmur3Digester;
pub use sha256::Sha256Digester;

use crate::error::{Error, ErrorKind};

/// Produces fixed-width digests from string items.
///
/// Implementations must be deterministic for a given `(input, digest_bits)`
/// pair and must return exactly `digest_bits / 8` bytes. The digest is read
/// most-significant-bit-first by the estimator, so implementations that
/// derive bytes from machine words must pack them big-endian.
///
/// A request for a width of zero, a width that is not a multiple of eight,
/// or a width above the implementation's native output width fails with
/// [`ErrorKind::InvalidArgument`]. Any other failure surfaces as
/// [`ErrorKind::CollaboratorFailure`] and is propagated unchanged by the
/// estimator.
pub trait Digester {
    fn digest(&self, input: &str, digest_bits: u32) -> Result<Vec<u8>, Error>;
}

/// Validate a requested digest width against an implementation's native width.
pub(crate) fn check_digest_width(digest_bits: u32, native_bits: u32) -> Result<(), Error> {
    if digest_bits == 0 || digest_bits % 8 != 0 {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "digest width must be a non-zero multiple of 8 bits",
        )
        .with_context("digest_bits", digest_bits));
    }
    if digest_bits > native_bits {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "requested digest width exceeds the digester's native output width",
        )
        .with_context("digest_bits", digest_bits)
        .with_context("native_bits", native_bits));
    }
    Ok(())
}
