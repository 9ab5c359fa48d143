use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    CreateUserDto, DomainResult, NewSessionToken, User, UserRepositoryInterface, UserRole,
};
use crate::infrastructure::database::entities::{employee, user, user_token};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

pub(crate) fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Manager => UserRole::Manager,
        user::UserRole::Employee => UserRole::Employee,
    }
}

pub(crate) fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Manager => user::UserRole::Manager,
        UserRole::Employee => user::UserRole::Employee,
    }
}

pub(crate) fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        role: entity_role_to_domain(model.role),
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();

        let new_user = user::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            role: Set(domain_role_to_entity(dto.role)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let model = new_user.insert(&self.db).await?;
        Ok(user_model_to_domain(model))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;

        Ok(model.map(user_model_to_domain))
    }

    async fn delete_user(&self, id: &str) -> DomainResult<bool> {
        let txn = self.db.begin().await?;

        employee::Entity::update_many()
            .col_expr(employee::Column::UserId, Expr::value(Option::<String>::None))
            .filter(employee::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        user_token::Entity::delete_many()
            .filter(user_token::Column::UserId.eq(id))
            .exec(&txn)
            .await?;

        let result = user::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }

    /// Store a new session and drop the user's expired ones.
    async fn add_token(&self, token: NewSessionToken) -> DomainResult<()> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let pruned = user_token::Entity::delete_many()
            .filter(user_token::Column::UserId.eq(token.user_id.as_str()))
            .filter(user_token::Column::ExpiresAt.lte(now))
            .exec(&txn)
            .await?;
        if pruned.rows_affected > 0 {
            debug!(
                user_id = %token.user_id,
                pruned = pruned.rows_affected,
                "Expired sessions removed"
            );
        }

        let row = user_token::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            user_id: Set(token.user_id),
            token_hash: Set(token.token_hash),
            created_at: Set(now),
            expires_at: Set(token.expires_at),
        };
        row.insert(&txn).await?;

        txn.commit().await?;
        Ok(())
    }

    async fn find_user_by_token(
        &self,
        user_id: &str,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Option<User>> {
        let found = user_token::Entity::find()
            .filter(user_token::Column::UserId.eq(user_id))
            .filter(user_token::Column::TokenHash.eq(token_hash))
            .find_also_related(user::Entity)
            .one(&self.db)
            .await?;

        Ok(match found {
            Some((token, Some(user))) if token.expires_at > now => {
                Some(user_model_to_domain(user))
            }
            _ => None,
        })
    }

    async fn remove_token(&self, user_id: &str, token_hash: &str) -> DomainResult<bool> {
        let result = user_token::Entity::delete_many()
            .filter(user_token::Column::UserId.eq(user_id))
            .filter(user_token::Column::TokenHash.eq(token_hash))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn remove_all_tokens(&self, user_id: &str) -> DomainResult<u64> {
        let result = user_token::Entity::delete_many()
            .filter(user_token::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
