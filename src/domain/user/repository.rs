use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CreateUserDto, NewSessionToken, User};
use crate::domain::DomainResult;

/// Credential store: users plus each user's valid-token set.
#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;
    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    /// Remove the user, detaching any employee record linked to it.
    async fn delete_user(&self, id: &str) -> DomainResult<bool>;

    async fn add_token(&self, token: NewSessionToken) -> DomainResult<()>;

    /// The user with `user_id` whose valid-token set holds `token_hash`
    /// (and whose entry has not expired at `now`).
    async fn find_user_by_token(
        &self,
        user_id: &str,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>>;

    async fn remove_token(&self, user_id: &str, token_hash: &str) -> DomainResult<bool>;
    async fn remove_all_tokens(&self, user_id: &str) -> DomainResult<u64>;
}
