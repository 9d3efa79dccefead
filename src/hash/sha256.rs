use sha2::{Digest, Sha256};

use crate::error::Error;
use crate::hash::{Digester, check_digest_width};

/// SHA-256 bits available before truncation.
const NATIVE_BITS: u32 = 256;

/// Digester backed by SHA-256, truncated to the requested width.
///
/// Cryptographic strength is irrelevant here; what matters is that the
/// output is deterministic and uniformly distributed, which SHA-256
/// satisfies for any input mix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digester;

impl Digester for Sha256Digester {
    fn digest(&self, input: &str, digest_bits: u32) -> Result<Vec<u8>, Error> {
        check_digest_width(digest_bits, NATIVE_BITS)?;
        let full = Sha256::digest(input.as_bytes());
        Ok(full[..(digest_bits / 8) as usize].to_vec())
    }
}
