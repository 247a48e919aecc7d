// ABOUTME: HTTP implementation of the diary gateway against the remote nutrition API
// ABOUTME: Bearer authentication, one-shot token refresh on 401, and JSON decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::http_client::build_client;
use super::wire::{
    format_date, goals_from_map, totals_from_daily, AddConsumedEnvelope, ConsumedItemsResponse,
    DailyNutrientDto, ProductResponse, ProfileResponse, SearchResponse, TokenRequest,
    TokenResponse,
};
use super::DiaryGateway;
use crate::config::environment::GatewayConfig;
use crate::constants::endpoints::{
    CONSUMED_ITEMS, GOALS, NUTRIENTS_DAILY, OAUTH_TOKEN, PRODUCTS, PROFILE, RECIPES,
};
use crate::constants::http::MAX_ERROR_BODY_CHARS;
use crate::errors::{AppError, AppResult, GatewayError};
use crate::models::{
    ConsumedItemsPayload, DailyTotals, GoalsSnapshot, NewConsumedItem, ProductDefinition,
    UserProfile,
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

/// Access and refresh token issued by the token endpoint
#[derive(Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Bearer token for API calls
    pub access_token: String,
    /// Refresh token, if the service issued one
    pub refresh_token: Option<String>,
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"[REDACTED]")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .finish()
    }
}

/// Called with the new tokens after every successful refresh
pub type RefreshCallback = Arc<dyn Fn(&TokenPair) + Send + Sync>;

/// One request, kept around so it can be replayed after a refresh
struct RequestSpec<'a> {
    method: Method,
    path: &'a str,
    query: Vec<(&'static str, String)>,
    body: Option<Value>,
}

impl<'a> RequestSpec<'a> {
    fn get(path: &'a str) -> Self {
        Self {
            method: Method::GET,
            path,
            query: Vec::new(),
            body: None,
        }
    }

    fn query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query.push((key, value.into()));
        self
    }
}

/// Gateway talking to the remote service over HTTPS
pub struct HttpGateway {
    config: GatewayConfig,
    client: Client,
    tokens: RwLock<Option<TokenPair>>,
    refresh_lock: Mutex<()>,
    on_refresh: Option<RefreshCallback>,
}

impl fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGateway")
            .field("config", &self.config)
            .field("has_refresh_callback", &self.on_refresh.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpGateway {
    /// Gateway without credentials; call [`login`](Self::login) before diary calls
    #[must_use]
    pub fn new(config: GatewayConfig) -> Self {
        let client = build_client(&config);
        Self {
            config,
            client,
            tokens: RwLock::new(None),
            refresh_lock: Mutex::new(()),
            on_refresh: None,
        }
    }

    /// Gateway resuming a stored session
    #[must_use]
    pub fn with_tokens(config: GatewayConfig, tokens: TokenPair) -> Self {
        let gateway = Self::new(config);
        Self {
            tokens: RwLock::new(Some(tokens)),
            ..gateway
        }
    }

    /// Register a callback invoked with the new tokens after each refresh
    #[must_use]
    pub fn on_refresh(mut self, callback: RefreshCallback) -> Self {
        self.on_refresh = Some(callback);
        self
    }

    /// Current tokens, if any
    pub async fn tokens(&self) -> Option<TokenPair> {
        self.tokens.read().await.clone()
    }

    /// Forget the current tokens
    pub async fn clear_tokens(&self) {
        *self.tokens.write().await = None;
    }

    /// Authenticate with email and password and keep the issued tokens
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without client credentials, a network error if
    /// the token endpoint is unreachable, or an external-service error when
    /// the credentials are rejected
    #[instrument(skip(self, password), fields(api_call = "login"))]
    pub async fn login(&self, email: &str, password: &str) -> AppResult<TokenPair> {
        let (client_id, client_secret) = self.config.client_credentials()?;
        let request = TokenRequest::password(client_id, client_secret, email, password);
        let pair = self.request_token(&request).await?;
        *self.tokens.write().await = Some(pair.clone());
        info!("logged in");
        Ok(pair)
    }

    /// Exchange a refresh token for new tokens without storing them
    ///
    /// A response without a new refresh token keeps the old one.
    ///
    /// # Errors
    ///
    /// Returns `ConfigMissing` without client credentials, or the gateway
    /// error produced by the token endpoint
    #[instrument(skip_all, fields(api_call = "refresh_access_token"))]
    pub async fn refresh_access_token(&self, refresh_token: &str) -> AppResult<TokenPair> {
        let (client_id, client_secret) = self.config.client_credentials()?;
        let request = TokenRequest::refresh(client_id, client_secret, refresh_token);
        let mut pair = self.request_token(&request).await?;
        if pair.refresh_token.is_none() {
            pair.refresh_token = Some(refresh_token.to_owned());
        }
        Ok(pair)
    }

    async fn request_token(&self, request: &TokenRequest<'_>) -> AppResult<TokenPair> {
        let response = self
            .client
            .post(self.config.url(OAUTH_TOKEN))
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error(OAUTH_TOKEN, &e, self.config.timeout_secs))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(OAUTH_TOKEN, &e, self.config.timeout_secs))?;
        if !status.is_success() {
            return Err(status_error(OAUTH_TOKEN, status, &text).into());
        }

        let token: TokenResponse = decode(OAUTH_TOKEN, &text)?;
        if token.access_token.is_empty() {
            return Err(GatewayError::MissingAccessToken.into());
        }
        Ok(TokenPair {
            access_token: token.access_token,
            refresh_token: token.refresh_token.filter(|t| !t.is_empty()),
        })
    }

    /// Refresh after a 401 unless another request already did
    async fn refresh_after_rejection(&self, rejected_token: &str) -> AppResult<()> {
        let _guard = self.refresh_lock.lock().await;

        let current = self.tokens().await;
        let Some(current) = current else {
            return Err(GatewayError::session_expired("not logged in").into());
        };
        if current.access_token != rejected_token {
            debug!("token already refreshed by a concurrent request");
            return Ok(());
        }
        let Some(refresh_token) = current.refresh_token.as_deref() else {
            return Err(
                GatewayError::session_expired("access token rejected, no refresh token").into(),
            );
        };

        info!("access token rejected, refreshing");
        let pair = match self.refresh_access_token(refresh_token).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "token refresh failed");
                return Err(GatewayError::session_expired(e.message).into());
            }
        };

        *self.tokens.write().await = Some(pair.clone());
        if let Some(callback) = &self.on_refresh {
            callback(&pair);
        }
        Ok(())
    }

    async fn send_once(
        &self,
        spec: &RequestSpec<'_>,
        access_token: &str,
    ) -> Result<(StatusCode, String), GatewayError> {
        let mut builder = self
            .client
            .request(spec.method.clone(), self.config.url(spec.path))
            .bearer_auth(access_token);
        if !spec.query.is_empty() {
            builder = builder.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| transport_error(spec.path, &e, self.config.timeout_secs))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(spec.path, &e, self.config.timeout_secs))?;
        debug!(path = spec.path, status = status.as_u16(), "response");
        Ok((status, text))
    }

    /// Send an authenticated request, refreshing and replaying once on 401
    async fn send(&self, spec: &RequestSpec<'_>) -> AppResult<String> {
        let access_token = self
            .tokens()
            .await
            .map(|t| t.access_token)
            .filter(|t| !t.is_empty())
            .ok_or_else(AppError::auth_required)?;

        let (mut status, mut text) = self.send_once(spec, &access_token).await?;

        if status == StatusCode::UNAUTHORIZED {
            self.refresh_after_rejection(&access_token).await?;
            let refreshed = self
                .tokens()
                .await
                .map(|t| t.access_token)
                .ok_or_else(AppError::auth_required)?;
            (status, text) = self.send_once(spec, &refreshed).await?;
            if status == StatusCode::UNAUTHORIZED {
                return Err(
                    GatewayError::session_expired("access token rejected after refresh").into(),
                );
            }
        }

        if !status.is_success() {
            return Err(status_error(spec.path, status, &text).into());
        }
        Ok(text)
    }

    async fn get_json<T: DeserializeOwned>(&self, spec: &RequestSpec<'_>) -> AppResult<T> {
        let text = self.send(spec).await?;
        decode(spec.path, &text)
    }
}

fn transport_error(endpoint: &str, error: &reqwest::Error, timeout_secs: u64) -> GatewayError {
    let details = if error.is_timeout() {
        format!("timed out after {timeout_secs}s")
    } else {
        error.to_string()
    };
    GatewayError::transport(endpoint, details)
}

fn status_error(endpoint: &str, status: StatusCode, body: &str) -> GatewayError {
    GatewayError::Status {
        endpoint: endpoint.to_owned(),
        status: status.as_u16(),
        body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
    }
}

fn decode<T: DeserializeOwned>(endpoint: &str, text: &str) -> AppResult<T> {
    serde_json::from_str(text).map_err(|e| GatewayError::decode(endpoint, e.to_string()).into())
}

#[async_trait]
impl DiaryGateway for HttpGateway {
    #[instrument(skip(self), fields(api_call = "fetch_consumed_items"))]
    async fn fetch_consumed_items(&self, date: NaiveDate) -> AppResult<ConsumedItemsPayload> {
        let spec = RequestSpec::get(CONSUMED_ITEMS).query("date", format_date(date));
        let response: ConsumedItemsResponse = self.get_json(&spec).await?;
        Ok(response.into_payload(date))
    }

    #[instrument(skip(self), fields(api_call = "fetch_goals"))]
    async fn fetch_goals(&self, date: NaiveDate) -> AppResult<GoalsSnapshot> {
        let spec = RequestSpec::get(GOALS).query("date", format_date(date));
        let raw: HashMap<String, Value> = self.get_json(&spec).await?;
        Ok(goals_from_map(&raw))
    }

    #[instrument(skip(self), fields(api_call = "fetch_daily_nutrients"))]
    async fn fetch_daily_nutrients(&self, date: NaiveDate) -> AppResult<DailyTotals> {
        let day = format_date(date);
        let spec = RequestSpec::get(NUTRIENTS_DAILY)
            .query("start", day.clone())
            .query("end", day);
        let entries: Vec<DailyNutrientDto> = self.get_json(&spec).await?;
        Ok(totals_from_daily(entries, date))
    }

    #[instrument(skip(self), fields(api_call = "fetch_product"))]
    async fn fetch_product(&self, id: &str) -> AppResult<ProductDefinition> {
        let path = format!("{PRODUCTS}/{}", urlencoding::encode(id));
        let response: ProductResponse = self.get_json(&RequestSpec::get(&path)).await?;
        Ok(response.into_definition(id))
    }

    #[instrument(skip(self), fields(api_call = "fetch_recipe"))]
    async fn fetch_recipe(&self, id: &str) -> AppResult<ProductDefinition> {
        let path = format!("{RECIPES}/{}", urlencoding::encode(id));
        let response: ProductResponse = self.get_json(&RequestSpec::get(&path)).await?;
        Ok(response.into_definition(id))
    }

    #[instrument(skip(self, item), fields(api_call = "add_consumed_item", consumed_id = %item.id))]
    async fn add_consumed_item(&self, item: &NewConsumedItem) -> AppResult<()> {
        let body = serde_json::to_value(AddConsumedEnvelope::from(item))?;
        let spec = RequestSpec {
            method: Method::POST,
            path: CONSUMED_ITEMS,
            query: Vec::new(),
            body: Some(body),
        };
        self.send(&spec).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(api_call = "delete_consumed_item"))]
    async fn delete_consumed_item(&self, consumed_id: &str) -> AppResult<()> {
        let spec = RequestSpec {
            method: Method::DELETE,
            path: CONSUMED_ITEMS,
            query: Vec::new(),
            body: Some(Value::Array(vec![Value::String(consumed_id.to_owned())])),
        };
        self.send(&spec).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(api_call = "search_products"))]
    async fn search_products(
        &self,
        query: &str,
        country: &str,
        sex: &str,
    ) -> AppResult<Vec<ProductDefinition>> {
        let path = format!("{PRODUCTS}/search");
        let spec = RequestSpec::get(&path)
            .query("query", query)
            .query("language", "en")
            .query("countries", country)
            .query("sex", sex);
        let response: SearchResponse = self.get_json(&spec).await?;
        Ok(response.into_definitions())
    }

    #[instrument(skip(self), fields(api_call = "fetch_profile"))]
    async fn fetch_profile(&self) -> AppResult<UserProfile> {
        let response: ProfileResponse = self.get_json(&RequestSpec::get(PROFILE)).await?;
        Ok(response.into())
    }
}
