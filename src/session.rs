// ABOUTME: Authenticated session owning the gateway, persisted credentials, and product cache
// ABOUTME: Login, token refresh persistence, engine construction, and logout with cache reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Diary Session
//!
//! One session per logged-in user. Every [`DiaryEngine`] handed out by the
//! session shares the same product cache; logging out swaps in an empty one.

use crate::cache::ProductCache;
use crate::config::{GatewayConfig, SessionStore, StoredSession};
use crate::diary::DiaryEngine;
use crate::errors::{AppError, AppResult};
use crate::gateway::remote::RefreshCallback;
use crate::gateway::{HttpGateway, TokenPair};
use std::sync::Arc;
use tracing::{info, warn};

/// Logged-in (or not yet logged-in) user session
#[derive(Debug)]
pub struct DiarySession {
    config: GatewayConfig,
    store: SessionStore,
    email: String,
    gateway: Arc<HttpGateway>,
    cache: Arc<ProductCache>,
}

impl DiarySession {
    /// Resume the session saved in `store`, if any
    ///
    /// # Errors
    ///
    /// Returns an error if the session file exists but cannot be read
    pub fn open(config: GatewayConfig, store: SessionStore) -> AppResult<Self> {
        let stored = store.load()?;
        let gateway = if stored.is_logged_in() {
            info!(email = %stored.email, "resuming stored session");
            let tokens = TokenPair {
                access_token: stored.token.clone(),
                refresh_token: stored.refresh_token.clone(),
            };
            Self::authenticated_gateway(&config, &store, &stored.email, tokens)
        } else {
            HttpGateway::new(config.clone())
        };

        Ok(Self {
            config,
            store,
            email: stored.email,
            gateway: Arc::new(gateway),
            cache: Arc::new(ProductCache::new()),
        })
    }

    fn authenticated_gateway(
        config: &GatewayConfig,
        store: &SessionStore,
        email: &str,
        tokens: TokenPair,
    ) -> HttpGateway {
        HttpGateway::with_tokens(config.clone(), tokens)
            .on_refresh(persist_on_refresh(store.clone(), email.to_owned()))
    }

    /// Whether credentials are present
    pub async fn is_logged_in(&self) -> bool {
        self.gateway.tokens().await.is_some()
    }

    /// Email of the logged-in account
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Session file store
    #[must_use]
    pub const fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Gateway used by this session
    #[must_use]
    pub const fn gateway(&self) -> &Arc<HttpGateway> {
        &self.gateway
    }

    /// Product cache shared by this session's engines
    #[must_use]
    pub const fn cache(&self) -> &Arc<ProductCache> {
        &self.cache
    }

    /// Engine sharing this session's gateway and cache
    #[must_use]
    pub fn engine(&self) -> DiaryEngine {
        DiaryEngine::new(self.gateway.clone(), self.cache.clone())
    }

    /// Log in, persist the issued tokens and start a fresh product cache
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank email or password, otherwise the
    /// gateway or storage error
    pub async fn login(&mut self, email: &str, password: &str) -> AppResult<()> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::invalid_input("email and password are required"));
        }

        let tokens = self.gateway.login(email, password).await?;
        self.store.save(&StoredSession {
            token: tokens.access_token.clone(),
            email: email.to_owned(),
            refresh_token: tokens.refresh_token.clone(),
        })?;

        self.gateway = Arc::new(Self::authenticated_gateway(
            &self.config,
            &self.store,
            email,
            tokens,
        ));
        self.cache = Arc::new(ProductCache::new());
        email.clone_into(&mut self.email);
        info!("logged in");
        Ok(())
    }

    /// Exchange the stored refresh token for new tokens and persist them
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` when not logged in, `AuthExpired` when there is
    /// no refresh token or the service rejects it
    pub async fn refresh(&mut self) -> AppResult<()> {
        let Some(current) = self.gateway.tokens().await else {
            return Err(AppError::auth_required());
        };
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            return Err(AppError::session_expired("no refresh token stored"));
        };

        let tokens = self
            .gateway
            .refresh_access_token(refresh_token)
            .await
            .map_err(|e| AppError::session_expired(e.message))?;
        self.store.save(&StoredSession {
            token: tokens.access_token.clone(),
            email: self.email.clone(),
            refresh_token: tokens.refresh_token.clone(),
        })?;
        self.gateway = Arc::new(Self::authenticated_gateway(
            &self.config,
            &self.store,
            &self.email,
            tokens,
        ));
        info!("session refreshed");
        Ok(())
    }

    /// Clear stored credentials and start over with an empty product cache
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session file cannot be removed
    pub async fn logout(&mut self) -> AppResult<()> {
        self.gateway.clear_tokens().await;
        self.store.clear()?;
        self.gateway = Arc::new(HttpGateway::new(self.config.clone()));
        self.cache = Arc::new(ProductCache::new());
        self.email.clear();
        info!("logged out");
        Ok(())
    }
}

/// Callback that writes refreshed tokens back to the session file
fn persist_on_refresh(store: SessionStore, email: String) -> RefreshCallback {
    Arc::new(move |tokens: &TokenPair| {
        let session = StoredSession {
            token: tokens.access_token.clone(),
            email: email.clone(),
            refresh_token: tokens.refresh_token.clone(),
        };
        if let Err(e) = store.save(&session) {
            warn!(error = %e, "could not persist refreshed tokens");
        }
    })
}
