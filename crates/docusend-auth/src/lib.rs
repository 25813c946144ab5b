//! # docusend-auth
//!
//! Authentication primitives for DocuSend.
//!
//! - `jwt`: owner bearer tokens (HS256). Tokens come from the hosted
//!   identity provider; the encoder exists for tooling and tests.
//! - `password`: Argon2id hashing for link passwords.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
