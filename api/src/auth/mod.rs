//! Token issuance, password hashing and the two request guards.

pub mod guard;
pub mod password;
pub mod token;

pub use guard::{AdminAuth, AdminIdentity, UserAuth, UserIdentity};
pub use token::{AdminClaims, TokenClaims, TokenIssuer, UserClaims};
