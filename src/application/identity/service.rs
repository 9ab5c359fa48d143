//! User service: credential store orchestration
//!
//! Every issued bearer token is recorded (as a digest) in the owner's
//! valid-token set; authentication requires both a valid signature and a
//! live entry in that set, so logging out revokes a token immediately.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::domain::{
    CreateUserDto, DepartmentRepositoryInterface, DomainError, DomainResult, NewSessionToken,
    User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password_with_cost, verify_password};
use crate::infrastructure::crypto::token_digest::digest_token;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Authentication result returned after a successful signup or login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: User,
}

/// Generic over `R: UserRepositoryInterface` so it stays decoupled from
/// the concrete persistence layer.
pub struct UserService<R: UserRepositoryInterface> {
    repo: Arc<R>,
    departments: Arc<dyn DepartmentRepositoryInterface>,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn unauthenticated() -> DomainError {
    DomainError::Unauthenticated("Please authenticate".into())
}

impl<R: UserRepositoryInterface> UserService<R> {
    pub fn new(
        repo: Arc<R>,
        departments: Arc<dyn DepartmentRepositoryInterface>,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            repo,
            departments,
            jwt_config,
            bcrypt_cost,
        }
    }

    // ── Registration & login ────────────────────────────────────

    /// Create an account and log it in.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> DomainResult<AuthResult> {
        let email = normalize_email(email);
        if email.is_empty() || !email.contains('@') {
            return Err(DomainError::Validation("Invalid email address".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.repo.get_user_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict("Email already registered".into()));
        }

        let password_hash = hash_password_with_cost(password, self.bcrypt_cost)
            .map_err(|e| DomainError::Internal(format!("Failed to hash password: {}", e)))?;

        let user = self
            .repo
            .create_user(CreateUserDto {
                email,
                password_hash,
                role,
            })
            .await?;

        info!(user_id = %user.id, role = %user.role, "New user registered");
        self.issue_session(user).await
    }

    /// Check credentials and issue a new session token.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let email = normalize_email(email);

        let Some(user) = self.repo.get_user_by_email(&email).await? else {
            debug!("Login attempt for unknown email");
            return Err(DomainError::Unauthenticated("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(DomainError::Unauthenticated("Invalid credentials".into()));
        }

        info!(user_id = %user.id, "User logged in");
        self.issue_session(user).await
    }

    async fn issue_session(&self, user: User) -> DomainResult<AuthResult> {
        let (token, claims) =
            create_token(&user.id, &user.email, user.role.as_str(), &self.jwt_config)
                .map_err(|e| DomainError::Internal(format!("Failed to create token: {}", e)))?;

        let expires_at = DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| DomainError::Internal("Token expiry out of range".into()))?;

        self.repo
            .add_token(NewSessionToken {
                user_id: user.id.clone(),
                token_hash: digest_token(&token),
                expires_at,
            })
            .await?;

        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            user,
        })
    }

    // ── Authentication gate ─────────────────────────────────────

    /// Resolve a bearer token to its user.
    ///
    /// Fails with `Unauthenticated` when the signature, issuer or expiry is
    /// invalid, or when the token is not in the subject's valid-token set.
    pub async fn authenticate(&self, token: &str) -> DomainResult<User> {
        if token.is_empty() {
            return Err(unauthenticated());
        }

        let claims = verify_token(token, &self.jwt_config).map_err(|e| {
            debug!(error = %e, "Token verification failed");
            unauthenticated()
        })?;

        let user = self
            .repo
            .find_user_by_token(&claims.sub, &digest_token(token), Utc::now())
            .await?;

        user.ok_or_else(|| {
            debug!(user_id = %claims.sub, "Token not in valid-token set");
            unauthenticated()
        })
    }

    // ── Sessions ────────────────────────────────────────────────

    /// Revoke the presented token.
    pub async fn logout(&self, user_id: &str, token: &str) -> DomainResult<()> {
        let removed = self.repo.remove_token(user_id, &digest_token(token)).await?;
        if !removed {
            return Err(unauthenticated());
        }
        info!(user_id, "User logged out");
        Ok(())
    }

    /// Revoke every session of the user. Returns how many were removed.
    pub async fn logout_all(&self, user_id: &str) -> DomainResult<u64> {
        let removed = self.repo.remove_all_tokens(user_id).await?;
        info!(user_id, sessions = removed, "All sessions revoked");
        Ok(removed)
    }

    // ── Account ─────────────────────────────────────────────────

    /// Remove the account. Refused while the user still manages departments;
    /// employee records linked to the account are detached.
    pub async fn delete_account(&self, user_id: &str) -> DomainResult<()> {
        let managed = self.departments.count_managed_by(user_id).await?;
        if managed > 0 {
            return Err(DomainError::Conflict(format!(
                "User still manages {} department(s)",
                managed
            )));
        }

        if !self.repo.delete_user(user_id).await? {
            return Err(DomainError::not_found("User", user_id));
        }

        info!(user_id, "Account deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::TestContext;
    use crate::infrastructure::crypto::jwt::{encode_claims, TokenClaims};

    #[tokio::test]
    async fn signup_logs_the_user_in() {
        let ctx = TestContext::new().await;
        let auth = ctx
            .users
            .signup("Ann@Example.com ", "secret1", UserRole::Manager)
            .await
            .unwrap();

        assert_eq!(auth.user.email, "ann@example.com");
        assert_eq!(auth.token_type, "Bearer");
        let resolved = ctx.users.authenticate(&auth.token).await.unwrap();
        assert_eq!(resolved.id, auth.user.id);
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let ctx = TestContext::new().await;
        ctx.users
            .signup("ann@example.com", "secret1", UserRole::Employee)
            .await
            .unwrap();
        let err = ctx
            .users
            .signup("ANN@example.com", "secret2", UserRole::Employee)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let ctx = TestContext::new().await;
        let err = ctx
            .users
            .signup("ann@example.com", "123", UserRole::Employee)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn login_checks_the_password() {
        let ctx = TestContext::new().await;
        ctx.users
            .signup("ann@example.com", "secret1", UserRole::Employee)
            .await
            .unwrap();

        assert!(ctx.users.login("ann@example.com", "secret1").await.is_ok());
        assert!(matches!(
            ctx.users.login("ann@example.com", "nope").await,
            Err(DomainError::Unauthenticated(_))
        ));
        assert!(matches!(
            ctx.users.login("ghost@example.com", "secret1").await,
            Err(DomainError::Unauthenticated(_))
        ));
    }

    #[tokio::test]
    async fn logout_revokes_only_the_presented_token() {
        let ctx = TestContext::new().await;
        let first = ctx
            .users
            .signup("ann@example.com", "secret1", UserRole::Employee)
            .await
            .unwrap();
        let second = ctx.users.login("ann@example.com", "secret1").await.unwrap();

        ctx.users.logout(&first.user.id, &first.token).await.unwrap();

        assert!(matches!(
            ctx.users.authenticate(&first.token).await,
            Err(DomainError::Unauthenticated(_))
        ));
        assert!(ctx.users.authenticate(&second.token).await.is_ok());

        assert_eq!(ctx.users.logout_all(&first.user.id).await.unwrap(), 1);
        assert!(ctx.users.authenticate(&second.token).await.is_err());
    }

    #[tokio::test]
    async fn well_signed_token_outside_the_set_is_rejected() {
        let ctx = TestContext::new().await;
        let auth = ctx
            .users
            .signup("ann@example.com", "secret1", UserRole::Manager)
            .await
            .unwrap();

        // Same subject and secret, but never recorded as a session
        let claims = TokenClaims::new(&auth.user.id, "ann@example.com", "Manager", &ctx.jwt);
        let forged = encode_claims(&claims, &ctx.jwt).unwrap();

        assert!(matches!(
            ctx.users.authenticate(&forged).await,
            Err(DomainError::Unauthenticated(_))
        ));
        assert!(ctx.users.authenticate("not-a-jwt").await.is_err());
        assert!(ctx.users.authenticate("").await.is_err());
    }

    #[tokio::test]
    async fn account_deletion_is_restricted_while_managing() {
        let ctx = TestContext::new().await;
        let boss = ctx
            .users
            .signup("boss@example.com", "secret1", UserRole::Manager)
            .await
            .unwrap();
        let department = ctx
            .departments
            .create_department(&boss.user, "Eng")
            .await
            .unwrap();

        let err = ctx.users.delete_account(&boss.user.id).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        ctx.departments
            .delete_department(&department.id)
            .await
            .unwrap();
        ctx.users.delete_account(&boss.user.id).await.unwrap();

        assert!(ctx.users.authenticate(&boss.token).await.is_err());
        assert!(matches!(
            ctx.users.delete_account(&boss.user.id).await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
