use std::sync::Arc;

use actix_web::web;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;

use crate::types::error::AppError;

/// One-way password hashing seam used by the account manager.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, AppError>;
    /// Must return `false` rather than erroring on a malformed stored hash.
    fn verify(&self, plaintext: &str, hash: &str) -> bool;
}

impl<T: PasswordHasher + ?Sized> PasswordHasher for Arc<T> {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        (**self).hash(plaintext)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        (**self).verify(plaintext, hash)
    }
}

/// Runs [`PasswordHasher::hash`] on the blocking pool; argon2 is CPU bound.
pub async fn hash_blocking<H>(hasher: &H, plaintext: &str) -> Result<String, AppError>
where
    H: PasswordHasher + Clone + 'static,
{
    let hasher = hasher.clone();
    let plaintext = plaintext.to_owned();
    web::block(move || hasher.hash(&plaintext))
        .await
        .map_err(|e| AppError::Internal(format!("password worker failed: {e}")))?
}

/// Runs [`PasswordHasher::verify`] on the blocking pool. A failed worker counts as a mismatch.
pub async fn verify_blocking<H>(hasher: &H, plaintext: &str, hash: &str) -> bool
where
    H: PasswordHasher + Clone + 'static,
{
    let hasher = hasher.clone();
    let plaintext = plaintext.to_owned();
    let hash = hash.to_owned();
    match web::block(move || hasher.verify(&plaintext, &hash)).await {
        Ok(matched) => matched,
        Err(e) => {
            tracing::error!(error = %e, "password worker failed");
            false
        }
    }
}

#[derive(Clone, Default)]
pub struct Argon2Hasher {
    argon2: Argon2<'static>,
}

impl Argon2Hasher {
    /// Argon2id with explicit cost parameters instead of the crate defaults.
    pub fn new(params: Params) -> Self {
        Self { argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) }
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, plaintext: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        Ok(hash.to_string())
    }

    fn verify(&self, plaintext: &str, hash: &str) -> bool {
        match PasswordHash::new(hash) {
            Ok(parsed) => self.argon2.verify_password(plaintext.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        }
    }
}
