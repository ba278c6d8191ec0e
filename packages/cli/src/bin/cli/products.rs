use clap::{Args, Subcommand};
use colored::*;
use inquire::Confirm;
use shopx_catalog::{CategoryFilter, ProductQuery, SortKey};
use shopx_cli::{parse_ids, AppContext};
use shopx_core::{truncate, Product, ProductStatus};
use shopx_forms::{ProductDraft, ProductForm};
use shopx_storage::{BulkAction, CategoryRepository, ProductRepository};

use super::output::{
    format_date, money, new_table, price_text, print_pagination, status_colored, stock_text,
};
use super::{cancel_on_ctrl_c, report_form_error, Credentials};

#[derive(Subcommand)]
pub enum ProductsCommands {
    /// List products with optional filters
    List(ListArgs),
    /// Show product details
    Show {
        /// Product ID to show
        id: u64,
        /// Print the product as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a new product
    Add(ProductFields),
    /// Edit an existing product; omitted fields keep their value
    Edit {
        /// Product ID to edit
        id: u64,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Delete a product
    Delete {
        /// Product ID to delete
        id: u64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Apply one action to several products
    Bulk {
        /// activate, deactivate, feature, unfeature or delete
        action: BulkAction,
        /// Comma separated product IDs
        ids: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct ListArgs {
    /// Category id, name or slug
    #[arg(short, long)]
    category: Option<String>,
    /// Matches name, description and short description
    #[arg(short, long)]
    search: Option<String>,
    #[arg(long)]
    status: Option<ProductStatus>,
    #[arg(long)]
    min_price: Option<f64>,
    #[arg(long)]
    max_price: Option<f64>,
    /// Only featured products
    #[arg(long)]
    featured: bool,
    /// Only products at or below their low stock threshold
    #[arg(long)]
    low_stock: bool,
    /// newest, oldest, name_asc, name_desc, price_asc, price_desc, stock_asc, stock_desc
    #[arg(long, default_value = "newest")]
    sort: String,
    #[arg(long, default_value = "1")]
    page: i64,
    /// Page size; defaults to SHOPX_PAGE_SIZE
    #[arg(long)]
    limit: Option<i64>,
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    name: Option<String>,
    /// Leave unset to derive it from the name
    #[arg(long)]
    slug: Option<String>,
    #[arg(long)]
    price: Option<String>,
    #[arg(long)]
    discount_price: Option<String>,
    #[arg(long)]
    stock: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    short_description: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    sku: Option<String>,
    /// Repeat for several tags
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Repeat for several images; the first becomes the main image
    #[arg(long = "image")]
    images: Vec<String>,
    #[arg(long)]
    status: Option<ProductStatus>,
    #[arg(long)]
    featured: Option<bool>,
    #[arg(long)]
    low_stock_alert: Option<String>,
}

impl ProductFields {
    fn apply(self, draft: &mut ProductDraft) {
        if let Some(name) = self.name {
            draft.set_name(&name);
        }
        if let Some(slug) = self.slug {
            draft.set_slug(&slug);
        }
        let text_fields = [
            (self.price, &mut draft.price),
            (self.discount_price, &mut draft.discount_price),
            (self.stock, &mut draft.stock),
            (self.category, &mut draft.category_id),
            (self.short_description, &mut draft.short_description),
            (self.description, &mut draft.description),
            (self.brand, &mut draft.brand),
            (self.sku, &mut draft.sku),
            (self.low_stock_alert, &mut draft.low_stock_alert),
        ];
        for (value, field) in text_fields {
            if let Some(value) = value {
                *field = value;
            }
        }
        for tag in &self.tags {
            draft.add_tag(tag);
        }
        if !self.images.is_empty() {
            let added = draft.add_images(self.images);
            if added == 0 {
                eprintln!("{}", "Image limit reached; no images were added".yellow());
            }
        }
        if let Some(status) = self.status {
            draft.status = status;
        }
        if let Some(featured) = self.featured {
            draft.featured = featured;
        }
    }
}

pub async fn handle_products_command(
    ctx: &AppContext,
    credentials: &Credentials,
    command: ProductsCommands,
) -> anyhow::Result<()> {
    match command {
        ProductsCommands::List(args) => list_products(ctx, args).await,
        ProductsCommands::Show { id, json } => show_product(ctx, id, json).await,
        ProductsCommands::Add(fields) => {
            credentials.sign_in(ctx).await?;
            add_product(ctx, fields).await
        }
        ProductsCommands::Edit { id, fields } => {
            credentials.sign_in(ctx).await?;
            edit_product(ctx, id, fields).await
        }
        ProductsCommands::Delete { id, yes } => {
            credentials.sign_in(ctx).await?;
            delete_product(ctx, id, yes).await
        }
        ProductsCommands::Bulk { action, ids, yes } => {
            credentials.sign_in(ctx).await?;
            bulk_action(ctx, action, &ids, yes).await
        }
    }
}

async fn list_products(ctx: &AppContext, args: ListArgs) -> anyhow::Result<()> {
    let mut query = ProductQuery::new()
        .sorted_by(SortKey::parse_lossy(&args.sort))
        .with_price_range(args.min_price, args.max_price)
        .page(args.page, args.limit.unwrap_or(i64::from(ctx.config.page_size)));

    if let Some(category) = args.category.as_deref().and_then(CategoryFilter::parse) {
        query = query.with_category(category);
    }
    if let Some(search) = args.search {
        query = query.with_search(search);
    }
    if let Some(status) = args.status {
        query = query.with_status(status);
    }
    if args.featured {
        query = query.featured_only();
    }
    if args.low_stock {
        query = query.low_stock_only();
    }

    let page = ctx.store.list_products(&query).await?;

    if page.items.is_empty() {
        println!("{}", "No products found".yellow());
        println!("{}", "Try different filters or 'shopx products add'".dimmed());
        return Ok(());
    }

    let categories = ctx.store.list_categories().await?;
    let threshold = ctx.store.low_stock_threshold();

    println!("{}", "ShopX Products".blue().bold());
    println!();

    let mut table = new_table(vec!["ID", "Name", "Category", "Price", "Stock", "Status", "Featured"]);
    for product in &page.items {
        let category = categories
            .iter()
            .find(|c| c.id == product.category_id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            product.id.to_string(),
            truncate(&product.name, 30),
            category,
            price_text(product),
            stock_text(product, threshold),
            status_colored(product.status).to_string(),
            if product.featured { "★".to_string() } else { String::new() },
        ]);
    }

    println!("{}", table);
    print_pagination(&page.pagination, "products");
    Ok(())
}

async fn show_product(ctx: &AppContext, id: u64, json: bool) -> anyhow::Result<()> {
    let product = ctx.store.get_product(id).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&product)?);
        return Ok(());
    }
    println!("{}", format!("Product Details - {}", product.name).blue().bold());
    println!();
    print_product_details(ctx, &product).await;
    Ok(())
}

async fn add_product(ctx: &AppContext, fields: ProductFields) -> anyhow::Result<()> {
    let mut form = ctx.product_form();
    if let Some(draft) = form.draft_mut() {
        fields.apply(draft);
    }
    let product = submit(ctx, &mut form).await?;

    println!();
    println!("{}", format!("Product '{}' created successfully!", product.name).green());
    println!("ID: {}", product.id.to_string().cyan());
    println!("Slug: {}", product.slug.cyan());
    Ok(())
}

async fn edit_product(ctx: &AppContext, id: u64, fields: ProductFields) -> anyhow::Result<()> {
    let product = ctx.store.get_product(id).await?;

    let mut form = ctx.edit_product_form(&product);
    if let Some(draft) = form.draft_mut() {
        fields.apply(draft);
    }
    let product = submit(ctx, &mut form).await?;

    println!();
    println!("{}", format!("Product '{}' updated successfully!", product.name).green());
    Ok(())
}

async fn submit(ctx: &AppContext, form: &mut ProductForm) -> anyhow::Result<Product> {
    let cancel = cancel_on_ctrl_c();
    form.submit_with_cancel(&*ctx.store, &cancel)
        .await
        .map_err(report_form_error)
}

async fn delete_product(ctx: &AppContext, id: u64, skip_confirmation: bool) -> anyhow::Result<()> {
    let product = ctx.store.get_product(id).await?;

    println!("{}", format!("Delete Product - {}", product.name).red().bold());
    println!();
    print_product_details(ctx, &product).await;
    println!();

    let confirmed = skip_confirmation
        || Confirm::new(&format!("Are you sure you want to delete '{}'?", product.name))
            .with_default(false)
            .prompt()?;

    if !confirmed {
        println!("{}", "Operation cancelled".yellow());
        return Ok(());
    }

    ctx.store.delete_product(id).await?;
    println!("{}", format!("Product '{}' deleted successfully!", product.name).green());
    Ok(())
}

async fn bulk_action(
    ctx: &AppContext,
    action: BulkAction,
    raw_ids: &str,
    skip_confirmation: bool,
) -> anyhow::Result<()> {
    let ids = parse_ids(raw_ids)?;

    if action.requires_confirmation() && !skip_confirmation {
        let confirmed = Confirm::new(&format!("Delete {} products?", ids.len()))
            .with_default(false)
            .prompt()?;
        if !confirmed {
            println!("{}", "Operation cancelled".yellow());
            return Ok(());
        }
    }

    let affected = ctx.store.bulk_action(&ids, action).await?;
    println!(
        "{}",
        format!("Applied '{}' to {} of {} products", action, affected, ids.len()).green()
    );
    Ok(())
}

async fn print_product_details(ctx: &AppContext, product: &Product) {
    let category = ctx
        .store
        .get_category(product.category_id)
        .await
        .map(|c| c.name)
        .unwrap_or_else(|_| format!("#{}", product.category_id));
    let threshold = ctx.store.low_stock_threshold();

    println!("{:<18} {}", "ID:".cyan(), product.id);
    println!("{:<18} {}", "Name:".cyan(), product.name);
    println!("{:<18} {}", "Slug:".cyan(), product.slug);
    println!("{:<18} {}", "Category:".cyan(), category);
    println!("{:<18} {}", "Price:".cyan(), money(product.price));
    if let Some(discount) = product.discount_price {
        println!("{:<18} {}", "Discount Price:".cyan(), money(discount));
    }
    println!("{:<18} {}", "Stock:".cyan(), stock_text(product, threshold));
    println!("{:<18} {}", "Status:".cyan(), status_colored(product.status));
    println!("{:<18} {}", "Featured:".cyan(), if product.featured { "Yes" } else { "No" });

    if let Some(brand) = &product.brand {
        println!("{:<18} {}", "Brand:".cyan(), brand);
    }
    if let Some(sku) = &product.sku {
        println!("{:<18} {}", "SKU:".cyan(), sku);
    }
    if !product.tags.is_empty() {
        println!("{:<18} {}", "Tags:".cyan(), product.tags.join(", "));
    }
    if !product.short_description.trim().is_empty() {
        println!("{:<18} {}", "Summary:".cyan(), product.short_description);
    }
    if let Some(main_image) = &product.main_image {
        println!("{:<18} {}", "Main Image:".cyan(), main_image);
    }
    if product.images.len() > 1 {
        println!("{:<18} {} images", "Gallery:".cyan(), product.images.len());
    }

    println!("{:<18} {}", "Created:".cyan(), format_date(&product.created_at));
}
