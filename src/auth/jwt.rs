// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! HMAC-signed JWT implementation of [`TokenProvider`].
//!
//! ## Token Format
//!
//! - Algorithm: HS512 with a shared secret (`JWT_SECRET`)
//! - `sub`: user email
//! - `iss`: configured issuer, checked on every decode
//! - `authorities`: role name followed by its permissions
//!
//! Clock skew tolerance is 60 seconds.

use std::collections::BTreeSet;

use async_trait::async_trait;
use axum::http::request::Parts;
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::{claims::Claims, AuthError, TokenProvider};
use crate::config::JwtSettings;

/// Clock skew tolerance (60 seconds).
const CLOCK_SKEW_LEEWAY: u64 = 60;

const ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtTokenProvider {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    access_ttl_secs: u64,
}

impl JwtTokenProvider {
    pub fn new(settings: &JwtSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            issuer: settings.issuer.clone(),
            access_ttl_secs: settings.access_ttl_secs,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = CLOCK_SKEW_LEEWAY;
        validation.set_issuer(&[&self.issuer]);
        validation.validate_aud = false;
        validation
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenInvalid("token has expired".into()),
                ErrorKind::ImmatureSignature => {
                    AuthError::TokenInvalid("token is not yet valid".into())
                }
                ErrorKind::InvalidSignature => {
                    AuthError::TokenInvalid("signature does not verify".into())
                }
                ErrorKind::InvalidIssuer => AuthError::TokenInvalid("unexpected issuer".into()),
                _ => AuthError::TokenMalformed,
            })
    }

    /// Sign an arbitrary claim set. Used to issue access tokens and by tests
    /// that need expired or foreign-issuer tokens.
    pub(crate) fn sign(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| AuthError::Provider(format!("failed to sign token: {e}")))
    }
}

#[async_trait]
impl TokenProvider for JwtTokenProvider {
    async fn create_access_token(
        &self,
        subject: &str,
        authorities: &[String],
    ) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.access_ttl_secs)
            .map_err(|_| AuthError::Provider("access token lifetime out of range".into()))?;

        self.sign(&Claims {
            sub: subject.to_string(),
            iss: self.issuer.clone(),
            iat: now,
            exp: now + ttl,
            authorities: authorities.to_vec(),
        })
    }

    async fn get_subject(&self, token: &str, _request: &Parts) -> Result<String, AuthError> {
        let claims = self.decode_claims(token)?;
        if claims.sub.trim().is_empty() {
            return Err(AuthError::TokenMalformed);
        }
        Ok(claims.sub)
    }

    async fn is_token_valid(&self, subject: &str, token: &str) -> bool {
        if subject.is_empty() {
            return false;
        }
        match self.decode_claims(token) {
            Ok(claims) => claims.sub == subject,
            Err(_) => false,
        }
    }

    async fn get_authorities(&self, token: &str) -> Result<BTreeSet<String>, AuthError> {
        self.decode_claims(token)
            .map(|claims| claims.authorities.into_iter().collect())
            .map_err(|e| AuthError::AuthorityLookupFailed(e.to_string()))
    }

    fn access_token_ttl_secs(&self) -> u64 {
        self.access_ttl_secs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn settings(secret: &str) -> JwtSettings {
        JwtSettings {
            secret: secret.to_string(),
            issuer: "secure-invoices-test".to_string(),
            access_ttl_secs: 600,
        }
    }

    fn provider() -> JwtTokenProvider {
        JwtTokenProvider::new(&settings("an-exceedingly-long-test-secret-value-0123"))
    }

    fn parts() -> Parts {
        Request::builder().uri("/invoice").body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn issued_token_round_trips_subject_and_authorities() {
        let provider = provider();
        let token = provider
            .create_access_token("a@b.com", &["ROLE_USER".into(), "READ:USER".into()])
            .await
            .unwrap();

        let subject = provider.get_subject(&token, &parts()).await.unwrap();
        assert_eq!(subject, "a@b.com");
        assert!(provider.is_token_valid("a@b.com", &token).await);

        let authorities = provider.get_authorities(&token).await.unwrap();
        assert!(authorities.contains("ROLE_USER"));
        assert!(authorities.contains("READ:USER"));
    }

    #[tokio::test]
    async fn token_is_invalid_for_another_subject() {
        let provider = provider();
        let token = provider.create_access_token("a@b.com", &[]).await.unwrap();
        assert!(!provider.is_token_valid("c@d.com", &token).await);
        assert!(!provider.is_token_valid("", &token).await);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let provider = provider();
        let now = Utc::now().timestamp();
        let token = provider
            .sign(&Claims {
                sub: "a@b.com".into(),
                iss: "secure-invoices-test".into(),
                iat: now - 7200,
                exp: now - 3600,
                authorities: vec!["ROLE_USER".into()],
            })
            .unwrap();

        let result = provider.get_subject(&token, &parts()).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
        assert!(!provider.is_token_valid("a@b.com", &token).await);
    }

    #[tokio::test]
    async fn token_from_other_secret_is_rejected() {
        let other = JwtTokenProvider::new(&settings("a-completely-different-secret-value-4567"));
        let token = other.create_access_token("a@b.com", &[]).await.unwrap();

        let result = provider().get_subject(&token, &parts()).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
    }

    #[tokio::test]
    async fn garbage_token_is_malformed() {
        let provider = provider();
        let result = provider.get_subject("not-a-jwt", &parts()).await;
        assert_eq!(result, Err(AuthError::TokenMalformed));

        let result = provider.get_authorities("not-a-jwt").await;
        assert!(matches!(result, Err(AuthError::AuthorityLookupFailed(_))));
    }

    #[tokio::test]
    async fn empty_subject_is_malformed() {
        let provider = provider();
        let token = provider.create_access_token("", &[]).await.unwrap();
        let result = provider.get_subject(&token, &parts()).await;
        assert_eq!(result, Err(AuthError::TokenMalformed));
    }
}
