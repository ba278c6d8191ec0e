use shopx_auth::AuthError;
use shopx_config::ConfigError;
use shopx_forms::FormError;
use shopx_settings::SettingsError;
use shopx_storage::StorageError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type CliResult<T> = Result<T, CliError>;
