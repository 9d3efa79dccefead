use byteorder::{BigEndian, ByteOrder};

use crate::error::Error;
use crate::hash::{Digester, check_digest_width};

/// MurmurHash3 x64-128 output width.
const NATIVE_BITS: u32 = 128;

const DEFAULT_SEED: u32 = 9001;

/// Digester backed by seeded MurmurHash3 x64-128.
///
/// Two digesters with the same seed produce the same digests, so estimators
/// built on them see the same stream identically.
#[derive(Debug, Clone, Copy)]
pub struct Murmur3Digester {
    seed: u32,
}

impl Murmur3Digester {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }
}

impl Default for Murmur3Digester {
    fn default() -> Self {
        Self::new()
    }
}

impl Digester for Murmur3Digester {
    fn digest(&self, input: &str, digest_bits: u32) -> Result<Vec<u8>, Error> {
        check_digest_width(digest_bits, NATIVE_BITS)?;
        let (h1, h2) = mur3::murmurhash3_x64_128(input.as_bytes(), self.seed);
        // Big-endian packing so the digest reads MSB-first as one bit string.
        let mut buf = [0u8; 16];
        BigEndian::write_u64(&mut buf[..8], h1);
        BigEndian::write_u64(&mut buf[8..], h2);
        Ok(buf[..(digest_bits / 8) as usize].to_vec())
    }
}
