use clap::{Args, Subcommand};
use colored::*;
use inquire::Confirm;
use shopx_cli::AppContext;
use shopx_core::{truncate, Category, CategoryStatus};
use shopx_forms::{available_parents, CategoryDraft, CategoryForm};
use shopx_storage::CategoryRepository;

use super::output::{format_date, new_table};
use super::{cancel_on_ctrl_c, report_form_error, Credentials};

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List all categories
    List,
    /// Add a new category
    Add(CategoryFields),
    /// Edit an existing category; omitted fields keep their value
    Edit {
        /// Category ID to edit
        id: u64,
        #[command(flatten)]
        fields: CategoryFields,
    },
    /// Delete a category
    Delete {
        /// Category ID to delete
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct CategoryFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
    /// Parent category ID
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    status: Option<CategoryStatus>,
    #[arg(long)]
    seo_title: Option<String>,
    #[arg(long)]
    seo_description: Option<String>,
}

impl CategoryFields {
    fn apply(self, draft: &mut CategoryDraft) {
        if let Some(name) = self.name {
            draft.set_name(&name);
        }
        if let Some(slug) = self.slug {
            draft.set_slug(&slug);
        }
        let text_fields = [
            (self.description, &mut draft.description),
            (self.image, &mut draft.image),
            (self.parent, &mut draft.parent_id),
            (self.seo_title, &mut draft.seo_title),
            (self.seo_description, &mut draft.seo_description),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
    }
}

pub async fn handle_categories_command(
    ctx: &AppContext,
    credentials: &Credentials,
    command: CategoriesCommands,
) -> anyhow::Result<()> {
    match command {
        CategoriesCommands::List => list_categories(ctx).await,
        CategoriesCommands::Add(fields) => {
            credentials.sign_in(ctx).await?;
            let categories = ctx.store.list_categories().await?;
            let mut form = ctx.category_form();
            form.open_new(categories);
            save(ctx, form, fields, "created").await
        }
        CategoriesCommands::Edit { id, fields } => {
            credentials.sign_in(ctx).await?;
            let category = ctx.store.get_category(id).await?;
            let categories = ctx.store.list_categories().await?;
            let mut form = ctx.category_form();
            form.open_existing(&category, categories);
            save(ctx, form, fields, "updated").await
        }
        CategoriesCommands::Delete { id, yes } => {
            credentials.sign_in(ctx).await?;
            delete_category(ctx, id, yes).await
        }
    }
}

async fn list_categories(ctx: &AppContext) -> anyhow::Result<()> {
    let snapshot = ctx.store.snapshot().await;
    let categories = &snapshot.categories;

    if categories.is_empty() {
        println!("{}", "No categories found".yellow());
        println!("{}", "Use 'shopx categories add' to create your first category".dimmed());
        return Ok(());
    }

    println!("{}", "ShopX Categories".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Slug", "Parent", "Products", "Status", "Created"]);
    for category in categories {
        let parent = category
            .parent_id
            .and_then(|pid| categories.iter().find(|c| c.id == pid))
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "—".to_string());
        let products = snapshot
            .products
            .iter()
            .filter(|p| p.category_id == category.id)
            .count();
        let status = match category.status {
            CategoryStatus::Active => "Active".green(),
            CategoryStatus::Inactive => "Inactive".dimmed(),
        };

        table.add_row(vec![
            category.id.to_string(),
            truncate(&category.name, 25),
            category.slug.clone(),
            parent,
            products.to_string(),
            status.to_string(),
            format_date(&category.created_at),
        ]);
    }

    println!("{}", table);
    println!("Total: {} categories", categories.len().to_string().cyan());
    Ok(())
}

async fn save(
    ctx: &AppContext,
    mut form: CategoryForm,
    fields: CategoryFields,
    verb: &str,
) -> anyhow::Result<()> {
    if let Some(draft) = form.draft_mut() {
        fields.apply(draft);
    }

    let cancel = cancel_on_ctrl_c();
    let result = form.submit_with_cancel(&*ctx.store, &cancel).await;
    if result.is_err() && form.errors().has("parentId") {
        print_available_parents(ctx, form.editing_id()).await;
    }
    let category = result.map_err(report_form_error)?;

    println!();
    println!("{}", format!("Category '{}' {} successfully!", category.name, verb).green());
    println!("ID: {}", category.id.to_string().cyan());
    Ok(())
}

async fn print_available_parents(ctx: &AppContext, editing: Option<u64>) {
    let Ok(categories) = ctx.store.list_categories().await else {
        return;
    };
    let parents: Vec<&Category> = available_parents(&categories, editing);
    if parents.is_empty() {
        return;
    }
    let names: Vec<String> = parents
        .iter()
        .map(|c| format!("{} ({})", c.name, c.id))
        .collect();
    eprintln!("{} {}", "Possible parents:".dimmed(), names.join(", "));
}

async fn delete_category(ctx: &AppContext, id: u64, skip_confirmation: bool) -> anyhow::Result<()> {
    let category = ctx.store.get_category(id).await?;

    let confirmed = skip_confirmation
        || Confirm::new(&format!("Are you sure you want to delete '{}'?", category.name))
            .with_default(false)
            .prompt()?;

    if !confirmed {
        println!("{}", "Operation cancelled".yellow());
        return Ok(());
    }

    ctx.store.delete_category(id).await?;
    println!("{}", format!("Category '{}' deleted successfully!", category.name).green());
    Ok(())
}
