//! Account manager: validated creation of regular and privileged users.
//!
//! Both factories take their collaborators explicitly. `store` persists the
//! record and owns email uniqueness; `hasher` turns the plaintext password into
//! a one-way hash before anything is written.

use async_trait::async_trait;
use entity::user::Model as UserModel;
use tracing::{info, warn};

use crate::types::{error::AppError, user::DBUserCreate};
use crate::utils::password::{hash_blocking, verify_blocking, PasswordHasher};

/// Column width of `user.email` and `user.name`.
pub const MAX_FIELD_LENGTH: usize = 255;

/// Persistence seam for accounts.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Must reject a duplicate email with a validation error on `email`.
    async fn insert_user(&self, user: DBUserCreate) -> Result<UserModel, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError>;
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: String::new(),
            is_active: true,
            is_staff: false,
            is_superuser: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Trims the address and lowercases its domain; the local part is kept as typed.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("email", "Users must have an email address."));
    }
    if email.chars().count() > MAX_FIELD_LENGTH {
        return Err(AppError::validation(
            "email",
            format!("Ensure this field has no more than {MAX_FIELD_LENGTH} characters."),
        ));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(AppError::validation("email", "Enter a valid email address."));
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(format!("{local}@{}", domain.to_lowercase()))
        }
        _ => Err(AppError::validation("email", "Enter a valid email address.")),
    }
}

/// Display names may be empty but must fit the column.
pub fn validate_user_name(name: &str) -> Result<(), AppError> {
    if name.chars().count() > MAX_FIELD_LENGTH {
        return Err(AppError::validation(
            "name",
            format!("Ensure this field has no more than {MAX_FIELD_LENGTH} characters."),
        ));
    }
    Ok(())
}

/// Length policy applied wherever a client chooses a password.
pub fn validate_password(password: &str, min_length: usize) -> Result<(), AppError> {
    if password.chars().count() < min_length {
        return Err(AppError::validation(
            "password",
            format!("Ensure this field has at least {min_length} characters."),
        ));
    }
    Ok(())
}

pub async fn create_user<S, H>(store: &S, hasher: &H, new_user: NewUser) -> Result<UserModel, AppError>
where
    S: IdentityStore + ?Sized,
    H: PasswordHasher + Clone + 'static,
{
    let email = normalize_email(&new_user.email)?;
    validate_user_name(&new_user.name)?;
    let password_hash = hash_blocking(hasher, &new_user.password).await?;

    let user = store
        .insert_user(DBUserCreate {
            email,
            name: new_user.name,
            password_hash,
            is_active: new_user.is_active,
            is_staff: new_user.is_staff,
            is_superuser: new_user.is_superuser,
        })
        .await?;

    info!(user_id = %user.id, "user created");
    Ok(user)
}

/// Same as [`create_user`], with the staff and superuser flags forced on.
pub async fn create_superuser<S, H>(
    store: &S,
    hasher: &H,
    email: &str,
    password: &str,
    name: &str,
) -> Result<UserModel, AppError>
where
    S: IdentityStore + ?Sized,
    H: PasswordHasher + Clone + 'static,
{
    let new_user = NewUser {
        is_staff: true,
        is_superuser: true,
        ..NewUser::new(email, password).with_name(name)
    };
    create_user(store, hasher, new_user).await
}

pub fn check_password<H: PasswordHasher + ?Sized>(hasher: &H, user: &UserModel, candidate: &str) -> bool {
    !candidate.is_empty() && hasher.verify(candidate, &user.password)
}

/// Credential check behind the token endpoint. Every failure collapses into
/// the same [`AppError::InvalidCredentials`] so callers cannot probe for accounts.
pub async fn authenticate<S, H>(store: &S, hasher: &H, email: &str, password: &str) -> Result<UserModel, AppError>
where
    S: IdentityStore + ?Sized,
    H: PasswordHasher + Clone + 'static,
{
    if password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }
    let Ok(email) = normalize_email(email) else {
        return Err(AppError::InvalidCredentials);
    };

    if let Some(user) = store.find_user_by_email(&email).await? {
        if user.is_active && verify_blocking(hasher, password, &user.password).await {
            return Ok(user);
        }
    }
    warn!("rejected login attempt");
    Err(AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    /// Records inserts in memory and hashes by reversing, so tests stay fast.
    #[derive(Default)]
    struct MemoryStore {
        users: Mutex<Vec<UserModel>>,
    }

    #[async_trait]
    impl IdentityStore for MemoryStore {
        async fn insert_user(&self, user: DBUserCreate) -> Result<UserModel, AppError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(AppError::validation("email", "duplicate"));
            }
            let now = Utc::now();
            let model = UserModel {
                id: Uuid::new_v4(),
                email: user.email,
                name: user.name,
                password: user.password_hash,
                is_active: user.is_active,
                is_staff: user.is_staff,
                is_superuser: user.is_superuser,
                created_at: now,
                updated_at: now,
            };
            users.push(model.clone());
            Ok(model)
        }

        async fn find_user_by_email(&self, email: &str) -> Result<Option<UserModel>, AppError> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }
    }

    #[derive(Clone)]
    struct ReverseHasher;

    impl PasswordHasher for ReverseHasher {
        fn hash(&self, plaintext: &str) -> Result<String, AppError> {
            Ok(format!("rev${}", plaintext.chars().rev().collect::<String>()))
        }

        fn verify(&self, plaintext: &str, hash: &str) -> bool {
            self.hash(plaintext).map(|h| h == hash).unwrap_or(false)
        }
    }

    #[tokio::test]
    async fn create_user_hashes_password() {
        let store = MemoryStore::default();
        let user = create_user(&store, &ReverseHasher, NewUser::new("test@example.com", "mystringpassword"))
            .await
            .unwrap();

        assert_eq!(user.email, "test@example.com");
        assert_ne!(user.password, "mystringpassword");
        assert!(check_password(&ReverseHasher, &user, "mystringpassword"));
        assert!(user.is_active);
        assert!(!user.is_staff && !user.is_superuser);
    }

    #[tokio::test]
    async fn empty_email_is_rejected_before_persistence() {
        let store = MemoryStore::default();
        for email in ["", "   "] {
            let err = create_user(&store, &ReverseHasher, NewUser::new(email, "passwrod"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::Validation { field: "email", .. }));
        }
        assert!(store.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn superuser_flags_are_forced() {
        let store = MemoryStore::default();
        let user = create_superuser(&store, &ReverseHasher, "test@example.com", "test2244", "")
            .await
            .unwrap();
        assert!(user.is_superuser);
        assert!(user.is_staff);
    }

    #[tokio::test]
    async fn authenticate_uses_one_error_for_every_failure() {
        let store = MemoryStore::default();
        create_user(&store, &ReverseHasher, NewUser::new("test@example.com", "superpass"))
            .await
            .unwrap();

        for (email, password) in [
            ("test@example.com", "badpass"),
            ("test@example.com", ""),
            ("nobody@example.com", "superpass"),
            ("", "superpass"),
        ] {
            let err = authenticate(&store, &ReverseHasher, email, password).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidCredentials), "{email}/{password}");
        }

        let user = authenticate(&store, &ReverseHasher, "test@EXAMPLE.com", "superpass")
            .await
            .unwrap();
        assert_eq!(user.email, "test@example.com");
    }

    #[test]
    fn normalize_lowercases_domain_only() {
        assert_eq!(normalize_email("  John.Doe@Example.COM ").unwrap(), "John.Doe@example.com");
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("user@").is_err());
    }

    #[test]
    fn normalize_rejects_malformed_addresses() {
        for email in ["a@b@c", "john doe@example.com", "john@exa mple.com", "john\t@example.com"] {
            assert!(
                matches!(normalize_email(email), Err(AppError::Validation { field: "email", .. })),
                "{email:?}"
            );
        }
    }

    #[test]
    fn email_and_name_fit_their_columns() {
        let domain = "@example.com";
        let fits = format!("{}{domain}", "a".repeat(MAX_FIELD_LENGTH - domain.len()));
        assert!(normalize_email(&fits).is_ok());
        let too_long = format!("a{fits}");
        assert!(normalize_email(&too_long).is_err());

        assert!(validate_user_name("").is_ok());
        assert!(validate_user_name(&"n".repeat(MAX_FIELD_LENGTH)).is_ok());
        assert!(matches!(
            validate_user_name(&"n".repeat(MAX_FIELD_LENGTH + 1)),
            Err(AppError::Validation { field: "name", .. })
        ));
    }

    #[tokio::test]
    async fn long_name_is_rejected_before_persistence() {
        let store = MemoryStore::default();
        let new_user = NewUser::new("test@example.com", "passwrod").with_name("n".repeat(1000));
        let err = create_user(&store, &ReverseHasher, new_user).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { field: "name", .. }));
        assert!(store.users.lock().unwrap().is_empty());
    }

    #[test]
    fn password_length_counts_characters() {
        assert!(validate_password("123", 5).is_err());
        assert!(validate_password("12345", 5).is_ok());
        assert!(validate_password("ééééé", 5).is_ok());
    }
}
