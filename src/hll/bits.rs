//! Bit extraction over raw digests.
//!
//! A digest is treated as one long bit string: bytes in order, each byte
//! MSB-first, so the tail of the bit string is the least-significant bit of
//! the last byte.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, ErrorKind};

/// Count trailing zero bits across the whole digest.
///
/// Scans from the last byte backward: every all-zero byte contributes 8,
/// the first non-zero byte contributes its own trailing zeros (0-7) and
/// stops the scan. An all-zero digest of `L` bytes yields `8 * L`; an empty
/// digest yields 0.
#[inline]
pub fn count_trailing_zero_bits(digest: &[u8]) -> u32 {
    let mut count = 0;
    for &byte in digest.iter().rev() {
        if byte == 0 {
            count += 8;
        } else {
            count += byte.trailing_zeros();
            break;
        }
    }
    count
}

/// Extract the first `bits` bits of the digest as an unsigned integer.
///
/// Bits are read MSB-first starting at the first byte; the first bit read
/// becomes the highest-order bit of the result. `bits` may span multiple
/// bytes but must not exceed the digest's bit length nor the 64-bit result
/// width.
#[inline]
pub fn extract_bucket_index(digest: &[u8], bits: u32) -> Result<u64, Error> {
    let available = 8 * digest.len() as u32;
    if bits > available || bits > u64::BITS {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "requested more bits than the digest can provide",
        )
        .with_context("requested_bits", bits)
        .with_context("available_bits", available.min(u64::BITS)));
    }
    if bits == 0 {
        return Ok(0);
    }

    let nbytes = bits.div_ceil(8) as usize;
    let word = BigEndian::read_uint(&digest[..nbytes], nbytes);
    Ok(word >> (8 * nbytes as u32 - bits))
}
