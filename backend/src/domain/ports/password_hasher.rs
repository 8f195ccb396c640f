//! Port for password hashing.

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The stored hash could not be parsed.
        Malformed { message: String } => "stored password hash is malformed: {message}",
        /// A new hash could not be produced.
        Hashing { message: String } => "password hashing failed: {message}",
    }
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` into a self-describing string for storage.
    fn hash(&self, password: &str) -> Result<String, PasswordHashError>;

    /// Check `password` against a hash produced by [`PasswordHasher::hash`].
    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordHashError>;
}
