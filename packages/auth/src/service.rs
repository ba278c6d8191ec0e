// ABOUTME: Login, session check, logout and password change for the admin account
// ABOUTME: Holds at most one live session; tokens are random nanoid strings

use chrono::Utc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::error::{AuthError, AuthResult};
use crate::types::{Admin, AdminCredentials, Session};

pub const MIN_PASSWORD_LENGTH: usize = 6;

const ADMIN_ID: u64 = 1;
const ADMIN_DISPLAY_NAME: &str = "Admin User";
const TOKEN_LENGTH: usize = 32;

pub struct AuthService {
    credentials: RwLock<AdminCredentials>,
    session: RwLock<Option<Session>>,
    latency: Duration,
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(AdminCredentials::default())
    }
}

impl AuthService {
    pub fn new(credentials: AdminCredentials) -> Self {
        Self {
            credentials: RwLock::new(credentials),
            session: RwLock::new(None),
            latency: Duration::ZERO,
        }
    }

    /// Delay applied to login, standing in for a round trip
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Checks the credentials and starts a fresh session, replacing any
    /// previous one
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<Session> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let credentials = self.credentials.read().await;
        if username != credentials.username || password != credentials.password {
            warn!("Failed login attempt for user: {}", username);
            return Err(AuthError::InvalidCredentials);
        }

        let session = Session {
            token: nanoid::nanoid!(TOKEN_LENGTH),
            admin: Admin {
                id: ADMIN_ID,
                username: credentials.username.clone(),
                name: ADMIN_DISPLAY_NAME.to_string(),
            },
            created_at: Utc::now(),
        };
        drop(credentials);

        *self.session.write().await = Some(session.clone());
        info!("Admin {} logged in", session.admin.username);
        Ok(session)
    }

    /// The admin of the live session
    pub async fn check_auth(&self) -> AuthResult<Admin> {
        let session = self.session.read().await;
        match session.as_ref() {
            Some(session) => Ok(session.admin.clone()),
            None => {
                debug!("No active admin session");
                Err(AuthError::Unauthenticated)
            }
        }
    }

    /// Resolves a bearer token to its admin
    pub async fn verify_token(&self, token: &str) -> AuthResult<Admin> {
        let session = self.session.read().await;
        session
            .as_ref()
            .filter(|s| s.token == token)
            .map(|s| s.admin.clone())
            .ok_or(AuthError::Unauthenticated)
    }

    /// Ends the session. Logging out with no session is not an error.
    pub async fn logout(&self) {
        if let Some(session) = self.session.write().await.take() {
            info!("Admin {} logged out", session.admin.username);
        }
    }

    /// Replaces the admin password. Requires a live session and the
    /// current password.
    pub async fn change_password(&self, current: &str, new_password: &str) -> AuthResult<()> {
        self.check_auth().await?;

        let mut credentials = self.credentials.write().await;
        if current != credentials.password {
            warn!("Password change rejected: current password mismatch");
            return Err(AuthError::InvalidCredentials);
        }
        if new_password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::WeakPassword {
                min: MIN_PASSWORD_LENGTH,
            });
        }

        credentials.password = new_password.to_string();
        info!("Admin password changed");
        Ok(())
    }
}
