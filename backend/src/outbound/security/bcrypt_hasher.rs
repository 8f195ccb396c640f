//! bcrypt password hashing.
//!
//! Hashes use the modular crypt format (`$2b$<cost>$<salt+digest>`), so the
//! cost travels with each stored hash and can be raised without invalidating
//! existing rows.

use crate::domain::ports::{PasswordHashError, PasswordHasher};

/// Work factor for new hashes.
pub const DEFAULT_COST: u32 = 10;
const MIN_COST: u32 = 4;
const MAX_COST: u32 = 31;

/// [`PasswordHasher`] backed by the `bcrypt` crate.
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self { cost: DEFAULT_COST }
    }
}

impl BcryptPasswordHasher {
    /// Override the work factor, clamped to the range bcrypt accepts.
    pub fn with_cost(cost: u32) -> Self {
        Self {
            cost: cost.clamp(MIN_COST, MAX_COST),
        }
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        bcrypt::hash(password, self.cost)
            .map_err(|err| PasswordHashError::hashing(err.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password, hash)
            .map_err(|err| PasswordHashError::malformed(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn hasher() -> BcryptPasswordHasher {
        BcryptPasswordHasher::with_cost(MIN_COST)
    }

    #[rstest]
    fn verifies_the_original_password(hasher: BcryptPasswordHasher) {
        let hash = hasher.hash("correct horse").expect("hash");

        assert!(hash.starts_with("$2b$04$"));
        assert_eq!(hasher.verify("correct horse", &hash), Ok(true));
        assert_eq!(hasher.verify("Correct horse", &hash), Ok(false));
    }

    #[rstest]
    fn salts_differ_between_hashes(hasher: BcryptPasswordHasher) {
        assert_ne!(
            hasher.hash("same password").expect("first"),
            hasher.hash("same password").expect("second")
        );
    }

    #[rstest]
    fn cost_comes_from_the_stored_hash(hasher: BcryptPasswordHasher) {
        let stored = BcryptPasswordHasher::with_cost(5)
            .hash("correct horse")
            .expect("hash");

        assert!(stored.starts_with("$2b$05$"));
        assert_eq!(hasher.verify("correct horse", &stored), Ok(true));
    }

    #[rstest]
    #[case(0, MIN_COST)]
    #[case(DEFAULT_COST, DEFAULT_COST)]
    #[case(99, MAX_COST)]
    fn cost_is_clamped(#[case] requested: u32, #[case] expected: u32) {
        assert_eq!(BcryptPasswordHasher::with_cost(requested).cost, expected);
    }

    #[rstest]
    #[case("plaintext")]
    #[case("$2b$04$tooshort")]
    #[case("")]
    fn rejects_malformed_hashes(hasher: BcryptPasswordHasher, #[case] stored: &str) {
        assert!(matches!(
            hasher.verify("anything", stored),
            Err(PasswordHashError::Malformed { .. })
        ));
    }
}
