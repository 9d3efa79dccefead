//! Bounded-memory distinct counting over string streams.
//!
//! `approx-distinct` estimates how many distinct items appear in a large,
//! possibly unbounded stream using the HyperLogLog algorithm: a fixed array
//! of small registers instead of a set of everything seen.
//!
//! ```
//! use approx_distinct::hll::Estimator;
//!
//! let estimator = Estimator::new(16)?;
//! for item in ["apple", "banana", "apple", "cherry"] {
//!     estimator.add(item)?;
//! }
//! // three distinct items, approximately
//! assert!(estimator.estimate() > 0.0);
//! # Ok::<(), approx_distinct::error::Error>(())
//! ```
//!
//! Hashing is delegated to a digest collaborator behind the
//! [`hash::Digester`] trait; SHA-256 (truncated) is the reference
//! implementation and seeded MurmurHash3 is provided as a faster
//! alternative.

pub mod error;
pub mod hash;
pub mod hll;
