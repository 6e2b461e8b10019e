// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Session gate over the backend's identity endpoints. The rest of the
//! crate trusts this state unconditionally; row-level authorization stays
//! a server concern.

use log::debug;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::store::RemoteConfig;
use crate::utils::{self, http_client};

const SESSION_KEY: &str = "session";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("could not reach the identity provider: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("sign-in rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
}

type SessionListener = Box<dyn Fn(Option<&AuthSession>)>;

pub struct SessionGate {
    config: RemoteConfig,
    client: reqwest::blocking::Client,
    current: Option<AuthSession>,
    listeners: Vec<SessionListener>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    user: TokenUser,
}

#[derive(Deserialize)]
struct TokenUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SessionGate {
    pub fn new(config: RemoteConfig) -> Result<Self, AuthError> {
        Ok(SessionGate {
            client: http_client()?,
            config,
            current: None,
            listeners: Vec::new(),
        })
    }

    /// Rebuild the gate from the session persisted in the settings store,
    /// so separate invocations share one sign-in.
    pub fn restore(config: RemoteConfig, conn: &Connection) -> anyhow::Result<Self> {
        let mut gate = SessionGate::new(config)?;
        if let Some(raw) = utils::get_setting(conn, SESSION_KEY)? {
            match serde_json::from_str::<AuthSession>(&raw) {
                Ok(session) => gate.current = Some(session),
                Err(err) => debug!("discarding unreadable persisted session: {err}"),
            }
        }
        Ok(gate)
    }

    pub fn current(&self) -> Option<&AuthSession> {
        self.current.as_ref()
    }

    /// Register a session-changed callback, invoked on sign-in and sign-out.
    pub fn subscribe(&mut self, listener: impl Fn(Option<&AuthSession>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(self.current.as_ref());
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, path)
    }

    fn auth_post(
        &self,
        url: String,
        email: &str,
        password: &str,
    ) -> Result<serde_json::Value, AuthError> {
        let resp = self
            .client
            .post(url)
            .header("apikey", &self.config.anon_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp
                .json::<serde_json::Value>()
                .ok()
                .and_then(|v| {
                    ["error_description", "msg", "message"]
                        .iter()
                        .find_map(|k| v.get(k).and_then(|m| m.as_str()).map(String::from))
                })
                .unwrap_or_else(|| status.to_string());
            return Err(AuthError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp.json()?)
    }

    fn session_from_token(&self, body: serde_json::Value, email: &str) -> Option<AuthSession> {
        let token: TokenResponse = serde_json::from_value(body).ok()?;
        Some(AuthSession {
            user_id: token.user.id,
            email: token.user.email.unwrap_or_else(|| email.to_string()),
            access_token: token.access_token,
        })
    }

    pub fn sign_in_with_password(
        &mut self,
        conn: &Connection,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let body = self.auth_post(self.auth_url("token?grant_type=password"), email, password)?;
        let session = self
            .session_from_token(body, email)
            .ok_or(AuthError::Rejected {
                status: 200,
                message: "token response missing access_token".into(),
            })?;
        self.persist(conn, &session);
        self.current = Some(session.clone());
        self.notify();
        Ok(session)
    }

    /// Create an account. Depending on server policy the response may carry
    /// a usable session (auto-confirm) or require email confirmation first.
    pub fn sign_up(
        &mut self,
        conn: &Connection,
        email: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        let body = self.auth_post(self.auth_url("signup"), email, password)?;
        // Without auto-confirm the signup response has no access_token yet.
        match self.session_from_token(body, email) {
            Some(session) => {
                self.persist(conn, &session);
                self.current = Some(session);
                self.notify();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// OAuth happens in the browser; we only construct the authorize URL.
    pub fn oauth_url(&self, provider: &str) -> String {
        format!(
            "{}?provider={}",
            self.auth_url("authorize"),
            provider.to_lowercase()
        )
    }

    /// Best-effort server-side sign-out, then drop all local session state.
    /// The expense cache is discarded with the session (it lives only as
    /// long as an authenticated session does).
    pub fn sign_out(&mut self, conn: &Connection) {
        if let Some(session) = &self.current {
            let result = self
                .client
                .post(self.auth_url("logout"))
                .header("apikey", &self.config.anon_key)
                .bearer_auth(&session.access_token)
                .send();
            if let Err(err) = result {
                debug!("remote logout failed (ignored): {err}");
            }
        }
        self.current = None;
        if let Err(err) = utils::clear_setting(conn, SESSION_KEY) {
            debug!("could not clear persisted session: {err}");
        }
        self.notify();
    }

    fn persist(&self, conn: &Connection, session: &AuthSession) {
        match serde_json::to_string(session) {
            Ok(raw) => {
                if let Err(err) = utils::set_setting(conn, SESSION_KEY, &raw) {
                    debug!("could not persist session: {err}");
                }
            }
            Err(err) => debug!("could not serialize session: {err}"),
        }
    }
}
