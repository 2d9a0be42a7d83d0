//! Identity verification.
//!
//! Registration, password storage, and token minting belong to the identity
//! collaborator service, out of scope here. This module only verifies a
//! bearer token the collaborator already issued and recovers the user id.

pub mod jwt;
pub mod models;

pub use jwt::{JwtConfig, JwtVerifier};
pub use models::Claims;
