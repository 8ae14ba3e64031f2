use rand::RngCore;

use crate::services::AuthError;

/// Hash a password with bcrypt at the given cost.
///
/// bcrypt is deliberately slow, so the work runs on the blocking pool
/// instead of stalling a runtime worker.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost)).await??;
    Ok(hash)
}

/// Check a password against a stored bcrypt hash
pub async fn verify_password(password: String, hash: String) -> Result<bool, AuthError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash)).await??;
    Ok(matches)
}

/// Random opaque bearer token, hex encoded (`len` bytes of entropy)
pub fn generate_token(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Basic email validation for registration
pub fn validate_email_format(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("email cannot be empty".to_string());
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err("invalid email format".to_string());
    };

    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err("invalid email format".to_string());
    }

    if email.chars().any(char::is_whitespace) {
        return Err("email cannot contain whitespace".to_string());
    }

    Ok(())
}
