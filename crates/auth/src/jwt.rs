//! HS256 bearer tokens.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use leaguehub_core::league::Role;
use serde::{Deserialize, Serialize};

use crate::{AuthConfig, AuthError};

/// Subject claim carried by every token this crate issues.
pub const TOKEN_SUBJECT: &str = "auth";

/// Claims embedded in an auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub uid: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub sub: String,
}

impl Claims {
    /// Builds claims issued at `now` (unix seconds) that expire after `ttl_secs`.
    pub fn new(uid: i64, role: Role, now: i64, ttl_secs: i64) -> Self {
        Self {
            uid,
            role,
            iat: now,
            exp: now + ttl_secs,
            sub: TOKEN_SUBJECT.to_string(),
        }
    }
}

fn encode_claims(config: &AuthConfig, claims: &Claims) -> Result<String, AuthError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AuthError::Token(e.to_string()))
}

/// Issues a signed token for a user.
pub fn issue_token(config: &AuthConfig, uid: i64, role: Role) -> Result<String, AuthError> {
    let claims = Claims::new(
        uid,
        role,
        Utc::now().timestamp(),
        config.token_ttl.as_secs() as i64,
    );
    encode_claims(config, &claims)
}

/// Verifies signature, expiry and subject, returning the embedded claims.
pub fn validate_token(config: &AuthConfig, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation.sub = Some(TOKEN_SUBJECT.to_string());

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| AuthError::InvalidToken(e.to_string()))
}
