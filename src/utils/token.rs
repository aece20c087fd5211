use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, prelude::BASE64_STANDARD, Engine as _};
use nanoid::nanoid;
use rand_core::{OsRng, RngCore};
use uuid::Uuid;

pub fn new_id() -> Uuid {
    Uuid::new_v4()
}

pub fn new_nanoid(len: usize) -> String {
    nanoid!(len)
}

/// Fresh security value: 32 random bytes, URL-safe, collision odds negligible.
/// Storage still enforces uniqueness on token ids as a safety net.
pub fn new_secret() -> String {
    let mut buf = [0u8; 32];
    let mut rng = OsRng;
    rng.fill_bytes(&mut buf);
    format!("sec_{}", URL_SAFE_NO_PAD.encode(buf))
}

/// Secrets sit in client-readable storage, so only their argon2 hash hits disk.
/// Token ids are stored as-is; there is nothing to learn from them.
pub fn encrypt(secret: &str) -> Result<String, argon2::password_hash::Error> {
    let mut rng = OsRng;
    let salt = SaltString::generate(&mut rng);
    let hash = Argon2::default().hash_password(secret.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

pub fn verify(secret: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(secret.as_bytes(), &parsed)
        .is_ok())
}

/// The single opaque string a client holds: base64 of "{token_id}.{secret}".
pub fn construct_client_token(token_id: &str, secret: &str) -> String {
    BASE64_STANDARD.encode(format!("{token_id}.{secret}"))
}

pub fn extract_client_token(token: &str) -> Option<(String, String)> {
    let decoded = BASE64_STANDARD.decode(token).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (id, secret) = decoded.split_once('.')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some((id.to_string(), secret.to_string()))
}
