//! JWT Token handling

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration time in hours
    pub expiration_hours: i64,
    /// Issuer claim
    pub issuer: String,
}

impl From<&SecurityConfig> for JwtConfig {
    fn from(cfg: &SecurityConfig) -> Self {
        Self {
            secret: cfg.jwt_secret.clone(),
            expiration_hours: cfg.jwt_expiration_hours,
            issuer: cfg.jwt_issuer.clone(),
        }
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// JWT TokenClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub email: String,
    /// User role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Issuer
    pub iss: String,
    /// Unique token id, so two logins in the same second yield distinct tokens
    pub jti: String,
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
            jti: uuid::Uuid::new_v4().to_string(),
        }
    }
}

/// Sign a set of claims
pub fn encode_claims(
    claims: &TokenClaims,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Create a JWT token for a user, returning the token and its claims
pub fn create_token(
    user_id: &str,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<(String, TokenClaims), jsonwebtoken::errors::Error> {
    let claims = TokenClaims::new(user_id, email, role, config);
    let token = encode_claims(&claims, config)?;
    Ok((token, claims))
}

/// Verify signature, issuer and expiry, and decode the claims
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
            issuer: "staffdesk".to_string(),
        }
    }

    #[test]
    fn token_round_trips_claims() {
        let (token, issued) = create_token("u1", "ann@example.com", "Manager", &config()).unwrap();
        let claims = verify_token(&token, &config()).unwrap();
        assert_eq!(claims.sub, "u1");
        assert_eq!(claims.role, "Manager");
        assert_eq!(claims.jti, issued.jti);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn two_tokens_for_same_user_differ() {
        let (a, _) = create_token("u1", "a@example.com", "Employee", &config()).unwrap();
        let (b, _) = create_token("u1", "a@example.com", "Employee", &config()).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let (token, _) = create_token("u1", "a@example.com", "Employee", &config()).unwrap();
        let mut other = config();
        other.secret = "another-secret".to_string();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn wrong_issuer_is_rejected() {
        let (token, _) = create_token("u1", "a@example.com", "Employee", &config()).unwrap();
        let mut other = config();
        other.issuer = "someone-else".to_string();
        assert!(verify_token(&token, &other).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = TokenClaims::new("u1", "a@example.com", "Employee", &config());
        claims.exp = Utc::now().timestamp() - 3600;
        let token = encode_claims(&claims, &config()).unwrap();
        let err = verify_token(&token, &config()).unwrap_err();
        assert!(matches!(
            err.kind(),
            jsonwebtoken::errors::ErrorKind::ExpiredSignature
        ));
    }
}
