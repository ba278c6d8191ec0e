use clap::Subcommand;
use colored::*;
use shopx_cli::AppContext;
use shopx_settings::{BulkSettingUpdate, SettingUpdateItem};

use super::output::new_table;
use super::Credentials;

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show every setting
    Show,
    /// Change one or more settings, all or nothing
    Set {
        /// key=value pairs, e.g. currency=EUR
        #[arg(required = true)]
        pairs: Vec<String>,
    },
    /// Change the admin password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
    },
}

pub async fn handle_settings_command(
    ctx: &AppContext,
    credentials: &Credentials,
    command: SettingsCommands,
) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => show_settings(ctx).await,
        SettingsCommands::Set { pairs } => {
            credentials.sign_in(ctx).await?;
            let settings = pairs
                .iter()
                .map(|pair| parse_pair(pair))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let count = settings.len();
            ctx.update_settings(BulkSettingUpdate { settings }).await?;
            println!("{}", format!("Updated {} settings", count).green());
            show_settings(ctx).await
        }
        SettingsCommands::Password { current, new } => {
            credentials.sign_in(ctx).await?;
            ctx.auth.change_password(&current, &new).await?;
            println!("{}", "Password changed".green());
            Ok(())
        }
    }
}

fn parse_pair(pair: &str) -> anyhow::Result<SettingUpdateItem> {
    let (key, value) = pair
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Expected key=value, got '{}'", pair))?;
    Ok(SettingUpdateItem {
        key: key.trim().to_string(),
        value: value.trim().to_string(),
    })
}

async fn show_settings(ctx: &AppContext) -> anyhow::Result<()> {
    let settings = ctx.settings.get().await;

    println!("{}", "Site Settings".blue().bold());
    println!();

    let mut table = new_table(vec!["Category", "Key", "Value"]);
    for entry in settings.entries() {
        let value = if entry.value.is_empty() {
            "—".dimmed().to_string()
        } else {
            entry.value
        };
        table.add_row(vec![entry.category.as_str().to_string(), entry.key, value]);
    }
    println!("{}", table);
    Ok(())
}
