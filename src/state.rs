// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::{password, AuthenticationGate, Role, TokenProvider};
use crate::config::SeedAdmin;
use crate::error::ApiError;
use crate::models::RegisterRequest;
use crate::store::InMemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryStore>>,
    pub tokens: Arc<dyn TokenProvider>,
    /// bcrypt work factor for newly hashed passwords
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(store: InMemoryStore, tokens: Arc<dyn TokenProvider>, bcrypt_cost: u32) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            tokens,
            bcrypt_cost,
        }
    }

    /// Gate sharing this state's token provider.
    pub fn authentication_gate(&self) -> AuthenticationGate {
        AuthenticationGate::new(self.tokens.clone())
    }

    /// Create the configured sysadmin account unless it already exists.
    pub async fn seed_admin(&self, seed: &SeedAdmin) -> Result<(), ApiError> {
        if self.store.read().await.user_by_email(&seed.email).is_some() {
            return Ok(());
        }

        let password_hash =
            password::hash_password(seed.password.clone(), self.bcrypt_cost).await?;
        let request = RegisterRequest {
            first_name: "System".into(),
            last_name: "Administrator".into(),
            email: seed.email.clone(),
            password: String::new(),
            address: None,
            phone: None,
            title: None,
            bio: None,
        };
        let user = self
            .store
            .write()
            .await
            .insert_user(request, password_hash, Role::SysAdmin)?;
        tracing::info!(user_id = user.id, email = %user.email, "Seeded sysadmin account");
        Ok(())
    }
}
