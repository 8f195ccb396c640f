//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: mutex-guarded in-memory repositories
//! - **security**: password hashing
//! - **mail**: outgoing mail transport
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod mail;
pub mod memory;
pub mod persistence;
pub mod security;
