use clap::Subcommand;
use colored::*;
use inquire::Confirm;
use shopx_catalog::PaginationParams;
use shopx_cli::AppContext;
use shopx_core::{truncate, Message, MessageInput, ReplyInput};
use shopx_storage::MessageRepository;

use super::output::{format_date, new_table, print_pagination};
use super::Credentials;

#[derive(Subcommand)]
pub enum MessagesCommands {
    /// List messages, newest first
    List {
        #[arg(long, default_value = "1")]
        page: i64,
        #[arg(long)]
        limit: Option<i64>,
    },
    /// Show a message and its reply
    Show {
        /// Message ID to show
        id: u64,
    },
    /// Submit a message as a storefront visitor would
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        subject: Option<String>,
        #[arg(long)]
        message: String,
    },
    /// Reply to a message
    Reply {
        /// Message ID to answer
        id: u64,
        /// Reply text
        #[arg(short, long)]
        message: String,
    },
    /// Delete a message
    Delete {
        /// Message ID to delete
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

pub async fn handle_messages_command(
    ctx: &AppContext,
    credentials: &Credentials,
    command: MessagesCommands,
) -> anyhow::Result<()> {
    match command {
        MessagesCommands::List { page, limit } => {
            credentials.sign_in(ctx).await?;
            let limit = limit.unwrap_or(i64::from(ctx.config.page_size));
            list_messages(ctx, PaginationParams::with_page_and_limit(page, limit)).await
        }
        MessagesCommands::Show { id } => {
            credentials.sign_in(ctx).await?;
            let message = ctx.store.get_message(id).await?;
            print_message(&message);
            Ok(())
        }
        MessagesCommands::Send {
            name,
            email,
            phone,
            subject,
            message,
        } => {
            let input = MessageInput {
                name,
                email,
                phone,
                subject,
                message,
            };
            let created = ctx.store.create_message(input).await?;
            println!("{}", "Thank you! Your message has been sent.".green());
            println!("ID: {}", created.id.to_string().cyan());
            Ok(())
        }
        MessagesCommands::Reply { id, message } => {
            credentials.sign_in(ctx).await?;
            let replied = ctx
                .store
                .reply_to_message(id, ReplyInput { reply_content: message })
                .await?;
            println!("{}", format!("Reply sent to {}", replied.email).green());
            Ok(())
        }
        MessagesCommands::Delete { id, yes } => {
            credentials.sign_in(ctx).await?;
            delete_message(ctx, id, yes).await
        }
    }
}

async fn list_messages(ctx: &AppContext, params: PaginationParams) -> anyhow::Result<()> {
    let page = ctx.store.list_messages(&params).await?;

    if page.items.is_empty() {
        println!("{}", "No messages yet".yellow());
        return Ok(());
    }

    println!("{}", "Contact Messages".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "From", "Subject", "Message", "Status", "Received"]);
    for message in &page.items {
        let status = if message.replied {
            "Replied".green()
        } else {
            "New".yellow().bold()
        };
        table.add_row(vec![
            message.id.to_string(),
            format!("{} <{}>", message.name, message.email),
            message.subject.clone().unwrap_or_else(|| "—".to_string()),
            truncate(&message.message, 40),
            status.to_string(),
            format_date(&message.created_at),
        ]);
    }

    println!("{}", table);
    print_pagination(&page.pagination, "messages");
    Ok(())
}

fn print_message(message: &Message) {
    println!("{:<12} {}", "ID:".cyan(), message.id);
    println!("{:<12} {} <{}>", "From:".cyan(), message.name, message.email);
    if let Some(phone) = &message.phone {
        println!("{:<12} {}", "Phone:".cyan(), phone);
    }
    if let Some(subject) = &message.subject {
        println!("{:<12} {}", "Subject:".cyan(), subject);
    }
    println!("{:<12} {}", "Received:".cyan(), format_date(&message.created_at));
    println!();
    println!("{}", message.message);

    if let Some(reply) = &message.reply {
        println!();
        let when = message
            .replied_at
            .as_ref()
            .map(format_date)
            .unwrap_or_default();
        println!("{} {}", "Reply".green().bold(), when.dimmed());
        println!("{}", reply);
    }
}

async fn delete_message(ctx: &AppContext, id: u64, skip_confirmation: bool) -> anyhow::Result<()> {
    let message = ctx.store.get_message(id).await?;

    let confirmed = skip_confirmation
        || Confirm::new(&format!("Delete the message from {}?", message.name))
            .with_default(false)
            .prompt()?;

    if !confirmed {
        println!("{}", "Operation cancelled".yellow());
        return Ok(());
    }

    ctx.store.delete_message(id).await?;
    println!("{}", "Message deleted".green());
    Ok(())
}
