//! Cryptographic helpers: JWT, password hashing, token digests

pub mod jwt;
pub mod password;
pub mod token_digest;
