use std::sync::Arc;

use crate::utils::password::{Argon2Hasher, PasswordHasher};
use crate::utils::token::{RandomTokenGenerator, TokenGenerator};

/// Credential collaborators shared by the account and token handlers.
#[derive(Clone)]
pub struct AuthServices {
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<dyn TokenGenerator>,
}

impl Default for AuthServices {
    fn default() -> Self {
        Self {
            hasher: Arc::new(Argon2Hasher::default()),
            tokens: Arc::new(RandomTokenGenerator),
        }
    }
}
