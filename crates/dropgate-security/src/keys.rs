//! Constant-time key comparison

use subtle::{Choice, ConstantTimeEq};

/// Compare a presented key with an expected one without an early exit on the
/// first differing byte.
pub fn key_matches(presented: &str, expected: &str) -> bool {
    presented.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// True if `presented` equals any of `keys`. Every key is compared, even after a match.
pub fn matches_any_key<S: AsRef<str>>(presented: &str, keys: &[S]) -> bool {
    let mut found = Choice::from(0);
    for key in keys {
        found |= presented.as_bytes().ct_eq(key.as_ref().as_bytes());
    }
    found.into()
}
