use crate::db::service::DbService;
use crate::types::error::AppError;
use chrono::Utc;
use entity::hospital::{ActiveModel as HospitalActive, Entity as Hospital, Model as HospitalModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use uuid::Uuid;

impl DbService {
    pub async fn hospital_exists(&self, owner: Uuid, name: &str) -> Result<bool, AppError> {
        Ok(Hospital::find()
            .filter(entity::hospital::Column::UserId.eq(owner))
            .filter(entity::hospital::Column::Name.eq(name))
            .count(&self.database_connection).await? > 0)
    }

    /// Names are not unique per owner: two creates with the same name give two rows.
    pub async fn create_hospital(
        &self,
        owner: Uuid,
        name: String,
        image: Option<String>,
    ) -> Result<HospitalModel, AppError> {
        let now = Utc::now();
        let inserted = HospitalActive {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            image: Set(image),
            user_id: Set(owner),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.database_connection)
        .await;

        match inserted {
            Ok(h) => Ok(h),
            Err(err) => match err.sql_err() {
                Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                    Err(AppError::BadRequest("owner does not exist".to_string()))
                }
                _ => Err(err.into()),
            },
        }
    }

    pub async fn get_hospital(&self, id: Uuid) -> Result<HospitalModel, AppError> {
        Ok(Hospital::find_by_id(id).one(&self.database_connection).await?
            .ok_or(DbErr::RecordNotFound("Hospital not found".to_string()))?)
    }

    /// The owner's hospitals, oldest first, optionally narrowed to an exact name.
    pub async fn list_hospitals_for_owner(
        &self,
        owner: Uuid,
        name: Option<&str>,
    ) -> Result<Vec<HospitalModel>, AppError> {
        let mut finder = Hospital::find().filter(entity::hospital::Column::UserId.eq(owner));
        if let Some(name) = name {
            finder = finder.filter(entity::hospital::Column::Name.eq(name));
        }
        Ok(finder
            .order_by_asc(entity::hospital::Column::CreatedAt)
            .all(&self.database_connection)
            .await?)
    }
}
