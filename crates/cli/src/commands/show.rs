//! Cart and checkout summary rendering.

use std::fmt::Write as _;

use rust_decimal::Decimal;
use serde::Serialize;

use carecart_core::{CartRepository, CartStore, CartSummary, LineItem, Price};
use carecart_storage::StorageConfig;

/// JSON shape of `show --json`.
#[derive(Serialize)]
struct CartReport<'a> {
    items: &'a [LineItem],
    summary: CartSummary,
}

/// Render the cart as a table or as JSON.
///
/// # Errors
///
/// Returns `serde_json::Error` if JSON encoding fails.
pub fn render<R: CartRepository>(
    store: &CartStore<R>,
    config: &StorageConfig,
    json: bool,
) -> Result<String, serde_json::Error> {
    let summary = CartSummary::new(store, config.tax_rate, config.currency);

    if json {
        return serde_json::to_string_pretty(&CartReport {
            items: store.items(),
            summary,
        });
    }

    Ok(render_table(store.items(), &summary))
}

fn render_table(items: &[LineItem], summary: &CartSummary) -> String {
    if items.is_empty() {
        return "Your cart is empty".to_string();
    }

    let currency = summary.subtotal.currency_code;
    let name_width = items
        .iter()
        .map(|item| item.name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for item in items {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "#{:<5} {:<name_width$}  {:>3} x {:>12}  {:>12}",
            item.id.as_i32(),
            item.name,
            item.quantity,
            Price::new(item.unit_price, currency).display(),
            // Every line total fits: the store rejects carts whose total overflows
            Price::new(item.line_total().unwrap_or(Decimal::MAX), currency).display(),
        );
    }
    let _ = writeln!(out, "Items:    {}", summary.item_count);
    let _ = writeln!(out, "Subtotal: {}", summary.subtotal);
    let _ = writeln!(out, "Tax ({}): {}", summary.tax_rate, summary.tax);
    let _ = write!(out, "Total:    {}", summary.total);
    out
}
