pub mod categories;
pub mod dashboard;
pub mod messages;
pub mod output;
pub mod products;
pub mod settings;

use colored::*;
use shopx_auth::Admin;
use shopx_cli::AppContext;
use shopx_forms::FormError;
use tokio_util::sync::CancellationToken;

/// Credentials given on the command line, if any
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Credentials {
    pub async fn sign_in(&self, ctx: &AppContext) -> anyhow::Result<Admin> {
        let admin = ctx
            .sign_in(self.username.as_deref(), self.password.as_deref())
            .await?;
        Ok(admin)
    }
}

/// Token that fires on Ctrl-C, so a slow submission can be abandoned
pub fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            trigger.cancel();
        }
    });
    token
}

/// Prints field errors from a rejected form, then hands the error back
pub fn report_form_error(error: FormError) -> anyhow::Error {
    match &error {
        FormError::Validation(errors) => {
            eprintln!("{}", "Please fix the following:".red().bold());
            for field_error in errors.iter() {
                eprintln!("  {} {}", format!("{}:", field_error.field).yellow(), field_error.message);
            }
        }
        FormError::Cancelled => {
            eprintln!("{}", "Submission cancelled; nothing was saved".yellow());
        }
        _ => {}
    }
    error.into()
}
