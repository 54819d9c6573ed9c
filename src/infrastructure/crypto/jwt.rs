//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// JWT configuration
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            expiration_hours: 24,
            issuer: "fixsync".to_string(),
        }
    }
}

/// JWT claims carried by every staff token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// Role string as stored on the user (`ADMIN`, `TECHNICIAN`, ...)
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: &str, email: &str, role: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(config.expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Create a JWT token for a user
pub fn create_token(
    user_id: &str,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, email, role, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify and decode a JWT token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "fixsync-test".to_string(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let cfg = config();
        let token = create_token("u-1", "tech@shop.test", "TECHNICIAN", &cfg).unwrap();
        let claims = verify_token(&token, &cfg).unwrap();

        assert_eq!(claims.sub, "u-1");
        assert_eq!(claims.email, "tech@shop.test");
        assert_eq!(claims.role, "TECHNICIAN");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let cfg = config();
        let token = create_token("u-1", "a@b.c", "ADMIN", &cfg).unwrap();

        let other = JwtConfig {
            secret: "another".to_string(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn token_from_other_issuer_is_rejected() {
        let token = create_token("u-1", "a@b.c", "ADMIN", &config()).unwrap();
        let other = JwtConfig {
            issuer: "someone-else".to_string(),
            ..config()
        };
        assert!(verify_token(&token, &other).is_err());
    }
}
