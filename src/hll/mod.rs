//! HyperLogLog estimator for cardinality estimation.
//!
//! This module provides a probabilistic data structure for estimating the
//! cardinality (number of distinct elements) of large string streams with
//! bounded memory.
//!
//! # Overview
//!
//! Every item is converted to a fixed-width digest by a pluggable
//! collaborator (see [`crate::hash`]). The digest's leading bits select one
//! of `m` buckets; its trailing-zero run length is recorded as the running
//! maximum for that bucket. Routing by hash prefix approximates uniform
//! random assignment, and the maximum zero run in a bucket approximates the
//! base-2 logarithm of how many distinct items landed there, so combining
//! all registers with a bias-corrected harmonic mean yields a cardinality
//! estimate with relative error around `1.04 / sqrt(m)`.
//!
//! Registers only ever grow; there is no reset short of constructing a new
//! estimator, and duplicate items never inflate the estimate.
//!
//! # Known limitation
//!
//! No small-range (linear counting) or large-range correction is applied to
//! the raw estimate.

mod bits;
mod estimator;

pub use bits::{count_trailing_zero_bits, extract_bucket_index};
pub use estimator::{
    DIGEST_BITS, Estimator, MAX_BUCKET_COUNT, MIN_BUCKET_COUNT, alpha, bucket_count_to_bits,
};
