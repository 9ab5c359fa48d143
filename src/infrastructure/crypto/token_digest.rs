//! Session token digests
//!
//! The valid-token set stores SHA-256 digests instead of raw bearer tokens.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of a bearer token
pub fn digest_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_stable_and_distinct() {
        assert_eq!(digest_token("abc"), digest_token("abc"));
        assert_ne!(digest_token("abc"), digest_token("abd"));
        assert_eq!(digest_token("abc").len(), 64);
    }
}
