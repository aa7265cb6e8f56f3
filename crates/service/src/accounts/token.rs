//! HS256 session tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use models::RecordId;
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    /// Id of the authenticated user.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: impl Into<String>, ttl_hours: i64) -> Self {
        Self { secret: secret.into(), ttl: Duration::hours(ttl_hours) }
    }

    pub fn issue(&self, user_id: &RecordId) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims { sub: user_id.to_string(), iat: now.timestamp(), exp: (now + self.ttl).timestamp() };
        encode(&Header::default(), &claims, &EncodingKey::from_secret(self.secret.as_bytes()))
            .map_err(|e| AuthError::Token(e.to_string()))
    }

    /// Decode and check signature plus expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &DecodingKey::from_secret(self.secret.as_bytes()), &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let issuer = TokenIssuer::new("secret", 1);
        let token = issuer.issue(&RecordId::from("u-1")).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn foreign_or_expired_tokens_are_rejected() {
        let token = TokenIssuer::new("secret", 1).issue(&RecordId::from("u-1")).unwrap();
        assert!(matches!(TokenIssuer::new("other", 1).verify(&token), Err(AuthError::InvalidToken(_))));

        let stale = TokenIssuer::new("secret", -2).issue(&RecordId::from("u-1")).unwrap();
        assert!(matches!(TokenIssuer::new("secret", 1).verify(&stale), Err(AuthError::InvalidToken(_))));
        assert!(TokenIssuer::new("secret", 1).verify("garbage").is_err());
    }
}
