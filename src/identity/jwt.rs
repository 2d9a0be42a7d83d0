//! Bearer token verification.
//!
//! Token issuance lives in the identity collaborator, out of scope here. The
//! engine only ever verifies a token handed to it on an observer connect or
//! an action submission, and reads the `user_id` out the other side.

use jsonwebtoken::{decode, DecodingKey, Validation};

use super::models::Claims;

pub struct JwtConfig {
    secret: String,
}

impl JwtConfig {
    pub fn new(secret: String) -> Self {
        Self { secret }
    }

    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").unwrap_or_else(|_| "default-secret-change-me".to_string());
        Self::new(secret)
    }
}

#[derive(Clone)]
pub struct JwtVerifier {
    secret: String,
}

impl JwtVerifier {
    pub fn new(config: JwtConfig) -> Self {
        Self { secret: config.secret }
    }

    /// Verify `token` and return the signed-in user's positive integer id.
    pub fn verify(&self, token: &str) -> Result<i64, jsonwebtoken::errors::Error> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;
        data.claims.sub.parse().map_err(|_| {
            jsonwebtoken::errors::Error::from(jsonwebtoken::errors::ErrorKind::InvalidSubject)
        })
    }
}
