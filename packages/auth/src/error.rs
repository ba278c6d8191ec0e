// ABOUTME: Error types for admin authentication
// ABOUTME: Distinguishes bad credentials from a missing session

use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Password must be at least {min} characters")]
    WeakPassword { min: usize },
}
