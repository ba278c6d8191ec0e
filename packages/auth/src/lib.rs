// ABOUTME: ShopX admin authentication
// ABOUTME: Single fixed admin account with an in-memory session

pub mod error;
pub mod service;
pub mod types;

// Re-export main types
pub use error::{AuthError, AuthResult};
pub use service::{AuthService, MIN_PASSWORD_LENGTH};
pub use types::{Admin, AdminCredentials, Session};
