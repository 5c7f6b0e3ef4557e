// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Password hashing for registration and login.
//!
//! bcrypt is CPU-bound, so both operations run on tokio's blocking pool.

use bcrypt::{hash, verify};
use tokio::task;

use super::AuthError;

pub async fn hash_password(password: String, cost: u32) -> Result<String, AuthError> {
    task::spawn_blocking(move || hash(password, cost))
        .await
        .map_err(|e| AuthError::Provider(format!("password hashing task failed: {e}")))?
        .map_err(|e| AuthError::Provider(format!("failed to hash password: {e}")))
}

/// Compare `password` against a stored bcrypt hash.
///
/// A stored hash that cannot be parsed counts as a mismatch.
pub async fn verify_password(password: String, password_hash: String) -> bool {
    match task::spawn_blocking(move || verify(password, &password_hash)).await {
        Ok(Ok(matches)) => matches,
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Password verification task failed");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn hash_then_verify() {
        let hashed = hash_password("correct horse".into(), TEST_COST).await.unwrap();
        assert_ne!(hashed, "correct horse");
        assert!(verify_password("correct horse".into(), hashed.clone()).await);
        assert!(!verify_password("battery staple".into(), hashed).await);
    }

    #[tokio::test]
    async fn invalid_cost_is_a_provider_error() {
        let err = hash_password("secret".into(), 2).await.unwrap_err();
        assert!(matches!(err, AuthError::Provider(_)));
    }

    #[tokio::test]
    async fn corrupt_hash_never_matches() {
        assert!(!verify_password("anything".into(), "not-a-bcrypt-hash".into()).await);
    }
}
