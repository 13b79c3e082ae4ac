use serde::{Deserialize, Serialize};

/// Registration payload. `name` may be omitted.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RUserCreate {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Partial profile update; absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct RUserUpdate {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct UserRes {
    pub email: String,
    pub name: String,
}

impl From<entity::user::Model> for UserRes {
    fn from(user: entity::user::Model) -> Self {
        Self { email: user.email, name: user.name }
    }
}

/// A validated account ready for insertion; the password is already hashed.
#[derive(Debug, Clone)]
pub struct DBUserCreate {
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}
