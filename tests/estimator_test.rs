use approx_distinct::error::{Error, ErrorKind};
use approx_distinct::hash::{Digester, Murmur3Digester};
use approx_distinct::hll::{Estimator, alpha};
use googletest::assert_that;
use googletest::prelude::contains_substring;
use rand::Rng;

const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[test]
fn test_empty_estimator() {
    let estimator = Estimator::new(16).unwrap();

    assert_eq!(estimator.bucket_count(), 16);
    assert!(estimator.iter().all(|r| r == 0));

    // all registers at zero: raw_sum = m, so the estimate is alpha(m) * m
    let estimate = estimator.estimate();
    assert!(estimate.is_finite());
    assert!((estimate - alpha(16) * 16.0).abs() < 1e-9);

    let estimator = Estimator::new(128).unwrap();
    assert!((estimator.estimate() - alpha(128) * 128.0).abs() < 1e-9);
}

#[test]
fn test_low_cardinality_alphabet_draws() {
    let estimator = Estimator::new(16).unwrap();

    // many draws from a 52-symbol alphabet: true cardinality stays at 52
    let symbols: Vec<String> = ALPHABET.chars().map(String::from).collect();
    for symbol in &symbols {
        estimator.add(symbol).unwrap();
    }
    let mut rng = rand::thread_rng();
    for _ in 0..50_000 {
        let symbol = &symbols[rng.gen_range(0..symbols.len())];
        estimator.add(symbol).unwrap();
    }

    assert_eq!(estimator.iter().count(), 16);

    // with m = 16 the variance is large; expect the right order of
    // magnitude rather than a tight band
    let estimate = estimator.estimate();
    assert!(
        estimate > 10.0 && estimate < 150.0,
        "estimate should be the same order of magnitude as 52, got {}",
        estimate
    );
}

#[test]
fn test_high_cardinality_numbers() {
    let estimator = Estimator::new(16).unwrap();

    for i in 0..200_000 {
        estimator.add(&i.to_string()).unwrap();
    }

    let estimate = estimator.estimate();
    assert!(
        estimate > 1_000.0,
        "estimate should be in the thousands for 200k distinct items, got {}",
        estimate
    );
    assert!(
        estimate > 50_000.0 && estimate < 500_000.0,
        "estimate should be within HyperLogLog error of 200k, got {}",
        estimate
    );
}

#[test]
fn test_duplicates_do_not_inflate() {
    let once = Estimator::new(16).unwrap();
    let repeated = Estimator::new(16).unwrap();

    for symbol in ALPHABET.chars() {
        once.add(&symbol.to_string()).unwrap();
    }
    for _ in 0..5 {
        for symbol in ALPHABET.chars() {
            repeated.add(&symbol.to_string()).unwrap();
        }
    }

    let once_registers: Vec<u8> = once.iter().collect();
    let repeated_registers: Vec<u8> = repeated.iter().collect();
    assert_eq!(once_registers, repeated_registers);
    assert_eq!(once.estimate(), repeated.estimate());
}

#[test]
fn test_registers_are_monotonic() {
    let estimator = Estimator::new(16).unwrap();
    let mut previous: Vec<u8> = estimator.iter().collect();

    for i in 0..500 {
        estimator.add(&format!("item-{i}")).unwrap();
        let current: Vec<u8> = estimator.iter().collect();
        for (bucket, (p, c)) in previous.iter().zip(&current).enumerate() {
            assert!(c >= p, "register {bucket} decreased: {p} -> {c}");
        }
        previous = current;
    }
}

#[test]
fn test_identical_streams_produce_identical_state() {
    let a = Estimator::new(64).unwrap();
    let b = Estimator::new(64).unwrap();

    for i in 0..1_000 {
        let item = format!("round-trip-{i}");
        a.add(&item).unwrap();
        b.add(&item).unwrap();
    }

    let a_registers: Vec<u8> = a.iter().collect();
    let b_registers: Vec<u8> = b.iter().collect();
    assert_eq!(a_registers, b_registers);
    assert_eq!(a.estimate().to_bits(), b.estimate().to_bits());
}

#[test]
fn test_concurrent_adds_match_sequential() {
    let concurrent = Estimator::new(16).unwrap();

    // four threads ingest the same overlapping range, contending on the
    // same buckets; max is commutative so the outcome must be exact
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for i in 0..2_000 {
                    concurrent.add(&i.to_string()).unwrap();
                }
            });
        }
    });

    let sequential = Estimator::new(16).unwrap();
    for i in 0..2_000 {
        sequential.add(&i.to_string()).unwrap();
    }

    let concurrent_registers: Vec<u8> = concurrent.iter().collect();
    let sequential_registers: Vec<u8> = sequential.iter().collect();
    assert_eq!(concurrent_registers, sequential_registers);
}

#[test]
fn test_murmur3_collaborator() {
    let a = Estimator::with_digester(16, Murmur3Digester::new()).unwrap();
    let b = Estimator::with_digester(16, Murmur3Digester::new()).unwrap();

    for i in 0..1_000 {
        let item = format!("murmur-{i}");
        a.add(&item).unwrap();
        b.add(&item).unwrap();
    }

    let a_registers: Vec<u8> = a.iter().collect();
    let b_registers: Vec<u8> = b.iter().collect();
    assert_eq!(a_registers, b_registers);
    assert!(a.estimate() > 0.0);
}

struct FailingDigester;

impl Digester for FailingDigester {
    fn digest(&self, _input: &str, _digest_bits: u32) -> Result<Vec<u8>, Error> {
        Err(Error::new(
            ErrorKind::CollaboratorFailure,
            "hash backend unavailable",
        ))
    }
}

#[test]
fn test_collaborator_failure_propagates_without_mutation() {
    let estimator = Estimator::with_digester(16, FailingDigester).unwrap();

    let err = estimator.add("item").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CollaboratorFailure);
    assert_that!(err.message(), contains_substring("hash backend unavailable"));

    assert!(estimator.iter().all(|r| r == 0));
    assert!((estimator.estimate() - alpha(16) * 16.0).abs() < 1e-9);
}

#[test]
fn test_invalid_bucket_counts_are_rejected() {
    let err = Estimator::new(12).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("power of two"));

    let err = Estimator::new(8).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_that!(err.message(), contains_substring("supported range"));

    for bad in [0, 1] {
        let err = Estimator::new(bad).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument, "m = {bad}");
    }
}
