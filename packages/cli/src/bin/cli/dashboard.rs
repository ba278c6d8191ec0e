use colored::*;
use shopx_cli::AppContext;
use shopx_core::truncate;

use super::output::{format_date, new_table, price_text, status_colored, stock_text};

pub async fn show_dashboard(ctx: &AppContext, json: bool) -> anyhow::Result<()> {
    let summary = ctx.store.dashboard().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    let inventory = &summary.inventory;

    println!("{}", "ShopX Dashboard".blue().bold());
    println!();

    let mut stats = new_table(vec!["Products", "Categories", "Messages", "Unread", "Low Stock", "Out of Stock"]);
    stats.add_row(vec![
        summary.total_products.to_string(),
        summary.total_categories.to_string(),
        summary.total_messages.to_string(),
        summary.unread_messages.to_string(),
        inventory.low_stock.to_string(),
        inventory.out_of_stock.to_string(),
    ]);
    println!("{}", stats);
    println!(
        "{} active, {} featured",
        inventory.active.to_string().green(),
        inventory.featured.to_string().cyan()
    );

    if summary.recent_products.is_empty() {
        return Ok(());
    }

    let threshold = ctx.store.low_stock_threshold();
    println!();
    println!("{}", "Recent Products".bold());

    let mut recent = new_table(vec!["ID", "Name", "Price", "Stock", "Status", "Created"]);
    for product in &summary.recent_products {
        recent.add_row(vec![
            product.id.to_string(),
            truncate(&product.name, 30),
            price_text(product),
            stock_text(product, threshold),
            status_colored(product.status).to_string(),
            format_date(&product.created_at),
        ]);
    }
    println!("{}", recent);
    Ok(())
}
