use std::fmt::{Debug, Formatter};
use std::sync::atomic::{AtomicU8, Ordering};

use crate::error::{Error, ErrorKind};
use crate::hash::{Digester, Sha256Digester};
use crate::hll::bits::{count_trailing_zero_bits, extract_bucket_index};

/// Digest width requested from the collaborator for every item, independent
/// of the bucket configuration.
pub const DIGEST_BITS: u32 = 64;

/// Smallest supported bucket count.
pub const MIN_BUCKET_COUNT: usize = 16;

/// Largest supported bucket count. 16 index bits leave most of the 64-bit
/// digest to the trailing-zero observable.
pub const MAX_BUCKET_COUNT: usize = 1 << 16;

/// HyperLogLog cardinality estimator over a stream of string items.
///
/// Each item is digested by the collaborator `D`, routed to one of
/// `bucket_count` buckets by the digest's leading bits, and recorded as the
/// running maximum trailing-zero run length for that bucket. Registers are
/// atomic, so `add` takes `&self` and items may be ingested from several
/// threads at once without losing updates; `estimate` may race with
/// in-flight adds and returns a best-effort read in that case.
///
/// # Example
///
/// ```
/// use approx_distinct::hll::Estimator;
///
/// let estimator = Estimator::new(64)?;
/// for item in ["a", "b", "c", "a"] {
///     estimator.add(item)?;
/// }
/// assert!(estimator.estimate() > 0.0);
/// # Ok::<(), approx_distinct::error::Error>(())
/// ```
pub struct Estimator<D = Sha256Digester> {
    registers: Box<[AtomicU8]>,
    index_bits: u32,
    digester: D,
}

impl Estimator<Sha256Digester> {
    /// Create an estimator with the reference SHA-256 collaborator.
    ///
    /// `bucket_count` must be a power of two in
    /// [`MIN_BUCKET_COUNT`]..=[`MAX_BUCKET_COUNT`].
    pub fn new(bucket_count: usize) -> Result<Self, Error> {
        Self::with_digester(bucket_count, Sha256Digester)
    }
}

impl<D: Digester> Estimator<D> {
    /// Create an estimator with an externally supplied digest collaborator.
    pub fn with_digester(bucket_count: usize, digester: D) -> Result<Self, Error> {
        let index_bits = bucket_count_to_bits(bucket_count)?;
        if !(MIN_BUCKET_COUNT..=MAX_BUCKET_COUNT).contains(&bucket_count) {
            return Err(Error::new(
                ErrorKind::InvalidArgument,
                "bucket count outside the supported range",
            )
            .with_context("bucket_count", bucket_count)
            .with_context("min", MIN_BUCKET_COUNT)
            .with_context("max", MAX_BUCKET_COUNT));
        }

        let registers = std::iter::repeat_with(|| AtomicU8::new(0))
            .take(bucket_count)
            .collect();

        Ok(Self {
            registers,
            index_bits,
            digester,
        })
    }

    /// Ingest one item.
    ///
    /// Obtains a digest from the collaborator, derives the bucket index and
    /// trailing-zero run length, and raises that bucket's register to the
    /// maximum of its current value and the observed run. A collaborator
    /// failure propagates unchanged and leaves every register untouched.
    pub fn add(&self, item: &str) -> Result<(), Error> {
        let digest = self.digester.digest(item, DIGEST_BITS)?;
        if digest.len() != (DIGEST_BITS / 8) as usize {
            return Err(Error::new(
                ErrorKind::CollaboratorFailure,
                "digester returned a digest of unexpected length",
            )
            .with_context("expected_bytes", DIGEST_BITS / 8)
            .with_context("actual_bytes", digest.len()));
        }

        // Run length of a 64-bit digest is at most 64, so the cast is exact.
        let run_length = count_trailing_zero_bits(&digest) as u8;
        let bucket = extract_bucket_index(&digest, self.index_bits)? as usize;
        self.registers[bucket].fetch_max(run_length, Ordering::Relaxed);
        Ok(())
    }

    /// Current cardinality estimate.
    ///
    /// Computes the harmonic-mean aggregate `alpha(m) * m^2 / sum(2^-reg)`.
    /// Pure read; callable any number of times. With no items ingested the
    /// result is the finite value `alpha(m) * m`. No small-range or
    /// large-range correction is applied, so expect the standard
    /// HyperLogLog relative error of roughly `1.04 / sqrt(m)` and a bias
    /// toward the raw estimator's behavior at very small cardinalities.
    pub fn estimate(&self) -> f64 {
        let raw_sum: f64 = self.iter().map(inv_pow2).sum();
        let m = self.registers.len() as f64;
        alpha(self.registers.len()) * m * m / raw_sum
    }

    /// Number of buckets (`m`).
    pub fn bucket_count(&self) -> usize {
        self.registers.len()
    }

    /// Number of leading digest bits consumed as the bucket index (`log2(m)`).
    pub fn index_bits(&self) -> u32 {
        self.index_bits
    }

    /// Point-in-time snapshot of the register values.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.registers.iter().map(|r| r.load(Ordering::Relaxed))
    }
}

impl<D> Debug for Estimator<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Estimator {{ bucket_count: {}, index_bits: {} }}",
            self.registers.len(),
            self.index_bits
        )
    }
}

/// Bias-correction constant for a given bucket count.
///
/// The three small bucket counts use empirically tuned constants; larger
/// counts fall back to the closed-form approximation.
pub fn alpha(bucket_count: usize) -> f64 {
    match bucket_count {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        m => 0.7213 / (1.0 + 1.079 / m as f64),
    }
}

/// Number of index bits for a bucket count, i.e. `log2(bucket_count)`.
///
/// Fails with `InvalidArgument` unless `bucket_count` is a positive power
/// of two. `bucket_count = 1` yields 0, the degenerate single-bucket
/// configuration; [`Estimator`] construction separately enforces the
/// supported range.
pub fn bucket_count_to_bits(bucket_count: usize) -> Result<u32, Error> {
    if bucket_count == 0 || !bucket_count.is_power_of_two() {
        return Err(Error::new(
            ErrorKind::InvalidArgument,
            "bucket count must be a positive power of two",
        )
        .with_context("bucket_count", bucket_count));
    }
    Ok(bucket_count.trailing_zeros())
}

/// Compute 1 / 2^value (inverse power of 2)
#[inline]
fn inv_pow2(value: u8) -> f64 {
    if value == 0 {
        1.0
    } else if value <= 63 {
        1.0 / (1u64 << value) as f64
    } else {
        f64::exp2(-f64::from(value))
    }
}
