//! Process-wide authentication state.
//!
//! A [`SessionStore`] is constructed once by the application root and cloned
//! into every view that needs to know who is signed in. It is the only
//! writer of the session: `login`, `register` and `logout` replace it, and
//! every change is published to subscribers through a `tokio::sync::watch`
//! channel so dependent views can re-render.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{ApiClient, AuthResponse};
use crate::app::{AksharError, Result};
use crate::domain::{Credentials, Registration, Session};
use crate::store::{Store, SESSION_KEY};

#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

struct Inner {
    state: watch::Sender<Session>,
    storage: Arc<dyn Store + Send + Sync>,
}

impl SessionStore {
    /// Restore the persisted session, starting anonymous if there is none
    /// or it cannot be read. A corrupt record is removed.
    pub fn load(storage: Arc<dyn Store + Send + Sync>) -> Self {
        let session = match storage.get(SESSION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Session>(&raw) {
                Ok(session) if session.is_authenticated() => {
                    tracing::debug!(user = ?session.user_id(), "Restored session");
                    session
                }
                Ok(_) | Err(_) => {
                    tracing::warn!("Discarding unreadable persisted session");
                    if let Err(e) = storage.remove(SESSION_KEY) {
                        tracing::error!("Failed to clear persisted session: {}", e);
                    }
                    Session::anonymous()
                }
            },
            Ok(None) => Session::anonymous(),
            Err(e) => {
                tracing::error!("Failed to read persisted session: {}", e);
                Session::anonymous()
            }
        };

        let (state, _) = watch::channel(session);
        Self {
            inner: Arc::new(Inner { state, storage }),
        }
    }

    pub fn current(&self) -> Session {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner.state.borrow().token().map(String::from)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    /// Receive every subsequent session change.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.inner.state.subscribe()
    }

    /// Fail with `Auth` unless someone is signed in.
    pub fn require_auth(&self) -> Result<Session> {
        let session = self.current();
        if session.is_authenticated() {
            Ok(session)
        } else {
            Err(AksharError::Auth("Sign in to continue".into()))
        }
    }

    #[tracing::instrument(skip(self, api, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, api: &ApiClient, credentials: &Credentials) -> Result<Session> {
        let response: AuthResponse = api
            .post("/auth/login", credentials)
            .await
            .map_err(|e| match e {
                // The backend reports bad credentials as a 400 as well as a 401
                AksharError::Validation(m) | AksharError::NotFound(m) => AksharError::Auth(m),
                other => other,
            })?;

        let session = self.establish(response)?;
        tracing::info!(user = ?session.user_id(), "Logged in");
        Ok(session)
    }

    #[tracing::instrument(skip(self, api, registration), fields(username = %registration.username))]
    pub async fn register(&self, api: &ApiClient, registration: Registration) -> Result<Session> {
        let registration = registration.validated()?;
        let response: AuthResponse = api.post("/auth/register", &registration).await?;

        let session = self.establish(response)?;
        tracing::info!(user = ?session.user_id(), "Registered");
        Ok(session)
    }

    /// Clear the session in memory and in storage. Never fails.
    pub fn logout(&self) {
        if let Err(e) = self.inner.storage.remove(SESSION_KEY) {
            tracing::error!("Failed to clear persisted session: {}", e);
        }
        self.inner.state.send_if_modified(|current| {
            let changed = current.is_authenticated();
            *current = Session::anonymous();
            changed
        });
        tracing::info!("Logged out");
    }

    fn establish(&self, response: AuthResponse) -> Result<Session> {
        if !response.success {
            return Err(AksharError::Auth(
                response
                    .message
                    .unwrap_or_else(|| "Authentication failed".into()),
            ));
        }
        let session = Session::authenticated(response.token, response.user);
        self.replace(session.clone());
        Ok(session)
    }

    /// Persist and publish `session`. Subscribers are only woken when the
    /// session actually changes.
    pub(crate) fn replace(&self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(e) = self.inner.storage.set(SESSION_KEY, &raw) {
                    tracing::error!("Failed to persist session: {}", e);
                }
            }
            Err(e) => tracing::error!("Failed to encode session: {}", e),
        }

        self.inner.state.send_if_modified(|current| {
            if *current == session {
                false
            } else {
                *current = session;
                true
            }
        });
    }
}
