//! Determinism verification utilities for pricing runs.
//!
//! Every run over the same input must produce the exact same ordered
//! result sequence, whatever the worker count. The `result_root` is a hash
//! over that sequence that enables quick comparison without diffing output.

use auctionmatch_types::EquilibriumResult;
use sha2::{Digest, Sha256};

/// Compute the result root hash over an ordered result sequence.
///
/// This is a deterministic hash that depends on:
/// - Instrument IDs (in order)
/// - Prices, or a marker for "no match"
/// - Decimal scales
///
/// The same results in the same order always produce the same root.
#[must_use]
pub fn compute_result_root(results: &[EquilibriumResult]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"auctionmatch:result_root:v1:");
    hasher.update((results.len() as u64).to_le_bytes());

    for result in results {
        hasher.update((result.instrument.len() as u64).to_le_bytes());
        hasher.update(result.instrument.as_bytes());
        match result.price {
            Some(price) => {
                hasher.update([1u8]);
                hasher.update(price.normalize().to_string().as_bytes());
            }
            None => hasher.update([0u8]),
        }
        hasher.update(result.decimal_scale.to_le_bytes());
    }

    let result = hasher.finalize();
    let mut root = [0u8; 32];
    root.copy_from_slice(&result);
    root
}

/// Hex rendering of [`compute_result_root`], for logs.
#[must_use]
pub fn result_root_hex(results: &[EquilibriumResult]) -> String {
    hex::encode(compute_result_root(results))
}

/// Verify that a given result root matches the expected hash.
#[must_use]
pub fn verify_result_root(results: &[EquilibriumResult], expected_root: &[u8; 32]) -> bool {
    compute_result_root(results) == *expected_root
}
