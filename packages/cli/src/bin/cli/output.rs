// ABOUTME: Table and formatting helpers shared by the subcommands
// ABOUTME: Keeps every listing on the same comfy-table preset

use chrono::{DateTime, Utc};
use colored::*;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, ContentArrangement, Table};
use shopx_catalog::PaginationMeta;
use shopx_core::{Product, ProductStatus};

pub fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

pub fn price_text(product: &Product) -> String {
    match product.discount_price {
        Some(discount) if discount < product.price => {
            format!("{} (was {})", money(discount), money(product.price))
        }
        _ => money(product.price),
    }
}

pub fn status_colored(status: ProductStatus) -> ColoredString {
    match status {
        ProductStatus::Active => "Active".green(),
        ProductStatus::Draft => "Draft".yellow(),
        ProductStatus::Inactive => "Inactive".dimmed(),
    }
}

pub fn stock_text(product: &Product, default_threshold: u32) -> String {
    if product.is_out_of_stock() {
        "Out of stock".red().to_string()
    } else if product.is_low_stock(default_threshold) {
        format!("{} (low)", product.stock).yellow().to_string()
    } else {
        product.stock.to_string()
    }
}

pub fn print_pagination(meta: &PaginationMeta, noun: &str) {
    if meta.total_pages == 0 {
        return;
    }
    println!(
        "Page {} of {} ({} {})",
        meta.current_page.to_string().cyan(),
        meta.total_pages,
        meta.total_items,
        noun
    );
}
