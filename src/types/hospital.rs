use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RImageUpload {
    /// Original client-side filename; only its extension is kept.
    pub filename: String,
    pub content_base64: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RHospitalCreate {
    pub name: String,
    #[serde(default)]
    pub image: Option<RImageUpload>,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct HospitalQuery {
    pub name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct HospitalRes {
    pub id: Uuid,
    pub name: String,
    pub image: Option<String>,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<entity::hospital::Model> for HospitalRes {
    fn from(h: entity::hospital::Model) -> Self {
        Self {
            id: h.id,
            name: h.name,
            image: h.image,
            user_id: h.user_id,
            created_at: h.created_at,
        }
    }
}
