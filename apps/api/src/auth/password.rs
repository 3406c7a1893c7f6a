use anyhow::Context;
use tokio::sync::OnceCell;

use crate::errors::AppError;

/// Hash checked when a login names no registered user, so both failure paths
/// pay for one bcrypt verification. Computed once at the configured cost.
static DUMMY_HASH: OnceCell<String> = OnceCell::const_new();

/// Hashes `password` with bcrypt on the blocking pool.
pub async fn hash_password(password: String, cost: u32) -> Result<String, AppError> {
    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .context("password hashing task failed")?
        .context("bcrypt hashing failed")?;
    Ok(hash)
}

/// Checks `password` against a stored bcrypt hash on the blocking pool.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .context("password verification task failed")?
        .context("stored password hash is malformed")?;
    Ok(matches)
}

/// Computes the dummy hash if it is not ready yet.
pub async fn dummy_hash(cost: u32) -> Result<&'static str, AppError> {
    let hash = DUMMY_HASH
        .get_or_try_init(|| hash_password("vitae-dummy-password".to_string(), cost))
        .await?;
    Ok(hash.as_str())
}

/// Runs a verification against the dummy hash and discards the outcome.
pub async fn verify_against_dummy(password: String, cost: u32) -> Result<(), AppError> {
    let hash = dummy_hash(cost).await?.to_string();
    verify_password(password, hash).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn dummy_hash_ready() -> bool {
    DUMMY_HASH.initialized()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter22".into(), 4).await.unwrap();
        assert_ne!(hash, "hunter22", "hash must not be the plaintext");
        assert!(verify_password("hunter22".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".into(), 4).await.unwrap();
        let b = hash_password("same".into(), 4).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_dummy_verification_primes_hash_and_rejects() {
        verify_against_dummy("anything".into(), 4).await.unwrap();
        assert!(dummy_hash_ready());
        let hash = dummy_hash(4).await.unwrap().to_string();
        assert!(hash.starts_with("$2"), "expected a bcrypt hash, got {hash}");
        assert!(!verify_password("anything".into(), hash).await.unwrap());
    }
}
