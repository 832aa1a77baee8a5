//! Fresh test data for stateful applications.
//!
//! Signup is not idempotent, so every run needs identifiers that have never
//! been registered before.

use rand::Rng;

/// Alphabet for random suffixes: lowercase ASCII letters and digits
pub const SUFFIX_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default random suffix length
pub const DEFAULT_SUFFIX_LEN: usize = 8;

/// Random `[a-z0-9]` string of `len` characters
#[must_use]
pub fn random_suffix(len: usize) -> String {
    random_suffix_with(&mut rand::thread_rng(), len)
}

/// Random suffix drawn from a caller-supplied generator
pub fn random_suffix_with<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(SUFFIX_ALPHABET[rng.gen_range(0..SUFFIX_ALPHABET.len())]))
        .collect()
}

/// `prefix` followed by a fresh `len`-character suffix, e.g. `testuser_k3v9q0ab`
#[must_use]
pub fn unique_name(prefix: &str, len: usize) -> String {
    format!("{prefix}{}", random_suffix(len))
}
