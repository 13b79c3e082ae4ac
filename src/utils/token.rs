use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

/// Source of opaque bearer keys. Swapped for a fixed sequence in tests.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// 256 bits from the OS RNG, URL-safe base64 with a `tok_` prefix.
#[derive(Clone, Copy, Default)]
pub struct RandomTokenGenerator;

impl TokenGenerator for RandomTokenGenerator {
    fn generate(&self) -> String {
        new_token()
    }
}

pub fn new_token() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("tok_{}", URL_SAFE_NO_PAD.encode(buf))
}
