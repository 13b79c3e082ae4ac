use std::time::Duration;

use crate::db::service::DbService;
use crate::types::error::AppError;
use crate::utils::token::TokenGenerator;
use chrono::{DateTime, Utc};
use entity::auth_token::{ActiveModel as TokenActive, Entity as AuthToken, Model as TokenModel};
use entity::user::Model as UserModel;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, SqlErr};
use tracing::debug;
use uuid::Uuid;

/// `true` once `ttl` has elapsed since `created_at`. No ttl means no expiry.
pub fn is_expired(created_at: DateTime<Utc>, ttl: Option<Duration>, now: DateTime<Utc>) -> bool {
    let Some(ttl) = ttl else { return false };
    match chrono::Duration::from_std(ttl) {
        Ok(ttl) => now.signed_duration_since(created_at) >= ttl,
        // larger than chrono can represent, effectively forever
        Err(_) => false,
    }
}

impl DbService {
    pub async fn get_token_for_user(&self, user_id: Uuid) -> Result<Option<TokenModel>, AppError> {
        Ok(AuthToken::find()
            .filter(entity::auth_token::Column::UserId.eq(user_id))
            .one(&self.database_connection)
            .await?)
    }

    /// Returns the user's live token, minting one if there is none (or the old
    /// one has expired). A user never holds more than one token.
    pub async fn get_or_create_token(
        &self,
        user_id: Uuid,
        generator: &dyn TokenGenerator,
        ttl: Option<Duration>,
    ) -> Result<String, AppError> {
        if let Some(existing) = self.get_token_for_user(user_id).await? {
            if !is_expired(existing.created_at, ttl, Utc::now()) {
                return Ok(existing.key);
            }
            debug!(%user_id, "replacing expired token");
            AuthToken::delete_by_id(existing.key).exec(&self.database_connection).await?;
        }

        let inserted = TokenActive {
            key: Set(generator.generate()),
            user_id: Set(user_id),
            created_at: Set(Utc::now()),
        }
        .insert(&self.database_connection)
        .await;

        match inserted {
            Ok(token) => Ok(token.key),
            // lost a race with a concurrent login for the same user; theirs wins
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => self
                .get_token_for_user(user_id)
                .await?
                .map(|t| t.key)
                .ok_or_else(|| AppError::Internal("token vanished after conflict".to_string())),
            Err(err) => Err(err.into()),
        }
    }

    /// Maps a presented bearer key to its active owner.
    pub async fn resolve_token(&self, key: &str, ttl: Option<Duration>) -> Result<UserModel, AppError> {
        let token = AuthToken::find_by_id(key.to_string())
            .one(&self.database_connection)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if is_expired(token.created_at, ttl, Utc::now()) {
            return Err(AppError::Unauthorized);
        }

        match self.get_user_by_id(&token.user_id).await {
            Ok(user) if user.is_active => Ok(user),
            Ok(_) | Err(AppError::NotFound) => Err(AppError::Unauthorized),
            Err(e) => Err(e),
        }
    }

    pub async fn revoke_token(&self, key: &str) -> Result<(), AppError> {
        AuthToken::delete_by_id(key.to_string())
            .exec(&self.database_connection)
            .await?;
        Ok(())
    }
}
