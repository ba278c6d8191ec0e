use clap::{Parser, Subcommand};
use colored::*;
use std::process;

mod cli;

use cli::categories::CategoriesCommands;
use cli::messages::MessagesCommands;
use cli::products::ProductsCommands;
use cli::settings::SettingsCommands;
use shopx_cli::{init_tracing, AppContext};

#[derive(Parser)]
#[command(name = "shopx")]
#[command(about = "ShopX CLI - beauty store catalog administration")]
#[command(version)]
struct Cli {
    /// Log at info level when RUST_LOG is unset
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Admin username for commands that change data
    #[arg(long, global = true)]
    username: Option<String>,

    /// Admin password for commands that change data
    #[arg(long, global = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show store statistics and recent products
    Dashboard {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse and manage products
    #[command(subcommand)]
    Products(ProductsCommands),
    /// Browse and manage categories
    #[command(subcommand)]
    Categories(CategoriesCommands),
    /// Read and answer contact messages
    #[command(subcommand)]
    Messages(MessagesCommands),
    /// View and change site settings
    #[command(subcommand)]
    Settings(SettingsCommands),
}

#[tokio::main]
async fn main() {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let credentials = cli::Credentials {
        username: cli.username,
        password: cli.password,
    };

    if let Err(e) = handle_command(cli.command, credentials).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands, credentials: cli::Credentials) -> anyhow::Result<()> {
    let ctx = AppContext::from_env()?;

    match command {
        Commands::Dashboard { json } => cli::dashboard::show_dashboard(&ctx, json).await,
        Commands::Products(cmd) => cli::products::handle_products_command(&ctx, &credentials, cmd).await,
        Commands::Categories(cmd) => {
            cli::categories::handle_categories_command(&ctx, &credentials, cmd).await
        }
        Commands::Messages(cmd) => cli::messages::handle_messages_command(&ctx, &credentials, cmd).await,
        Commands::Settings(cmd) => cli::settings::handle_settings_command(&ctx, &credentials, cmd).await,
    }
}
