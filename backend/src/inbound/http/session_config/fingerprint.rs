//! Session key fingerprint logged at startup.
//!
//! Operators compare fingerprints across replicas to confirm they share a
//! signing key without the key itself reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Bytes of the SHA-256 digest kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// First 8 bytes of the SHA-256 of the signing key, hex encoded.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use admissions::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(&digest[..FINGERPRINT_BYTES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn same_material_gives_same_fingerprint() {
        let a = Key::derive_from(&[b'a'; 64]);
        let b = Key::derive_from(&[b'a'; 64]);
        assert_eq!(key_fingerprint(&a), key_fingerprint(&b));
    }

    #[rstest]
    fn different_material_gives_different_fingerprint() {
        let a = Key::derive_from(&[b'a'; 64]);
        let b = Key::derive_from(&[b'b'; 64]);
        assert_ne!(key_fingerprint(&a), key_fingerprint(&b));
    }

    #[rstest]
    fn fingerprint_is_lowercase_hex() {
        let fp = key_fingerprint(&Key::generate());
        assert_eq!(fp.len(), FINGERPRINT_BYTES * 2);
        assert!(fp.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
