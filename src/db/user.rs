use crate::accounts::IdentityStore;
use crate::db::service::DbService;
use crate::types::{error::AppError, user::DBUserCreate};
use async_trait::async_trait;
use chrono::Utc;
use entity::auth_token::{self, Entity as AuthToken};
use entity::hospital::{self, Entity as Hospital};
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

const DUPLICATE_EMAIL: &str = "user with this email already exists.";

impl DbService {
    pub async fn user_exists_by_email(&self, email: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        Ok(User::find_by_id(*id)
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<UserModel, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(&self.database_connection)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound("User does not exist".into()))?)
    }

    /// Insert a fully prepared record. The unique index on `email` is what
    /// settles concurrent signups; the pre-check only gives a nicer error early.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<UserModel, AppError> {
        if self.user_exists_by_email(&payload.email).await? {
            return Err(AppError::validation("email", DUPLICATE_EMAIL));
        }
        let now = Utc::now();
        let insert = UserActive {
            id: Set(Uuid::new_v4()),
            email: Set(payload.email),
            name: Set(payload.name),
            password: Set(payload.password_hash),
            is_active: Set(payload.is_active),
            is_staff: Set(payload.is_staff),
            is_superuser: Set(payload.is_superuser),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await;

        match insert {
            Ok(user) => Ok(user),
            Err(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    Err(AppError::validation("email", DUPLICATE_EMAIL))
                }
                _ => Err(err.into()),
            },
        }
    }

    /// Every account, oldest first.
    pub async fn list_users(&self) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .order_by_asc(entity::user::Column::CreatedAt)
            .order_by_asc(entity::user::Column::Email)
            .all(&self.database_connection)
            .await?)
    }

    /// Profile self-service: only `name` and the password hash are writable here.
    pub async fn update_user_profile(
        &self,
        user_id: Uuid,
        name: Option<String>,
        password_hash: Option<String>,
    ) -> Result<UserModel, AppError> {
        let user = self.get_user_by_id(&user_id).await?;
        if name.is_none() && password_hash.is_none() {
            return Ok(user);
        }
        let mut am: UserActive = user.into();
        if let Some(name) = name {
            am.name = Set(name);
        }
        if let Some(hash) = password_hash {
            am.password = Set(hash);
        }
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    pub async fn set_user_active(&self, user_id: Uuid, active: bool) -> Result<UserModel, AppError> {
        let mut am: UserActive = self.get_user_by_id(&user_id).await?.into();
        am.is_active = Set(active);
        am.updated_at = Set(Utc::now());
        Ok(am.update(&self.database_connection).await?)
    }

    /// Removes the user along with their hospitals and token in one transaction.
    /// The schema cascades as well; doing it here keeps the rule independent of
    /// whether the backend enforces foreign keys.
    pub async fn delete_user(&self, user_id: Uuid) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;

        Hospital::delete_many()
            .filter(hospital::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        AuthToken::delete_many()
            .filter(auth_token::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;
        let res = User::delete_by_id(user_id).exec(&txn).await?;
        if res.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        txn.commit().await?;
        Ok(())
    }
}

#[async_trait]
impl IdentityStore for DbService {
    async fn insert_user(&self, user: DBUserCreate) -> Result<UserModel, AppError> {
        self.create_user(user).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
        match self.get_user_by_email(email).await {
            Ok(user) => Ok(Some(user)),
            Err(AppError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
