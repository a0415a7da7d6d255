use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::models::{Role, User};

/// Errors that can occur while issuing or checking bearer tokens
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    MissingToken,

    #[error("Invalid or expired token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Admin access required")]
    Forbidden,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

/// Signs and verifies HS256 bearer tokens
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_secs: i64,
}

impl AuthService {
    pub fn new(secret: &str, token_ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_ttl_secs: token_ttl_secs.min(i64::MAX as u64) as i64,
        }
    }

    /// Issue a token for a signed-in user
    pub fn issue(&self, user: &User) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.clone(),
            username: user.username.clone(),
            role: user.role,
            iat: now,
            exp: now.saturating_add(self.token_ttl_secs),
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Verify a raw token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(data.claims)
    }

    /// Verify an `Authorization` header value of the form `Bearer <token>`
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = header
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        self.verify(token)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "2".to_string(),
            username: "admin".to_string(),
            password: "admin123".to_string(),
            role,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let auth = AuthService::new("test-secret", 3600);
        let token = auth.issue(&user(Role::Admin)).unwrap();

        let claims = auth.verify(&token).unwrap();
        assert_eq!(claims.sub, "2");
        assert_eq!(claims.username, "admin");
        assert!(claims.is_admin());
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = AuthService::new("one", 3600).issue(&user(Role::User)).unwrap();
        let err = AuthService::new("two", 3600).verify(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken(_)));
    }

    #[test]
    fn test_header_parsing() {
        let auth = AuthService::new("test-secret", 3600);
        let token = auth.issue(&user(Role::User)).unwrap();

        assert!(auth.verify_header(Some(&format!("Bearer {}", token))).is_ok());
        assert!(matches!(auth.verify_header(None), Err(AuthError::MissingToken)));
        assert!(matches!(auth.verify_header(Some("Bearer ")), Err(AuthError::MissingToken)));
        assert!(matches!(auth.verify_header(Some(&token)), Err(AuthError::MissingToken)));
        assert!(matches!(
            auth.verify_header(Some("Bearer garbage")),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_require_admin() {
        let auth = AuthService::new("test-secret", 3600);
        let user_claims = auth.verify(&auth.issue(&user(Role::User)).unwrap()).unwrap();
        assert!(matches!(user_claims.require_admin(), Err(AuthError::Forbidden)));
    }
}
