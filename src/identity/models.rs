//! Claims carried by the bearer token the identity collaborator hands us.

use serde::{Deserialize, Serialize};

/// JWT claims the engine trusts once signature verification passes.
///
/// `sub` is the textual form of the user's positive integer id; AI actors
/// never carry a token and never appear here.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub exp: usize,
    pub iat: usize,
}
