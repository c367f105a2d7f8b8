//! Cart commands.

use shopfront_core::{ProductId, Size};
use shopfront_storefront::Session;

use super::CliError;

/// Print cart lines priced from the catalog, then the totals.
#[allow(clippy::print_stdout)]
pub async fn show(session: &mut Session) -> Result<(), CliError> {
    // Prices come from the catalog; without it lines show as unpriced.
    session.load_products().await;

    let lines = session.cart_lines();
    if lines.is_empty() {
        println!("Your cart is empty");
        return Ok(());
    }

    for line in &lines {
        let catalog = session.catalog();
        match catalog.find(&line.product_id) {
            Some(product) => println!(
                "{:<26} {:<4} x{:<3} {:>9}  {}",
                line.product_id.to_string(),
                line.size.as_str(),
                line.quantity,
                product.price.times(line.quantity).to_string(),
                product.name
            ),
            None => println!(
                "{:<26} {:<4} x{:<3} {:>9}  (no longer available)",
                line.product_id.to_string(),
                line.size.as_str(),
                line.quantity,
                "-"
            ),
        }
    }

    let totals = session.cart_totals();
    println!();
    println!("Items:     {}", session.cart_count());
    println!("Subtotal:  {}", totals.subtotal);
    println!("Shipping:  {}", totals.delivery_fee);
    println!("Total:     {}", totals.total);
    Ok(())
}

/// Add one unit of a product.
#[allow(clippy::print_stdout)]
pub async fn add(session: &mut Session, id: &str, size: Option<&str>) -> Result<(), CliError> {
    if session.add_to_cart(&ProductId::new(id), size).await {
        println!("Cart: {} item(s)", session.cart_count());
    }
    Ok(())
}

/// Set a line's quantity; zero removes it.
#[allow(clippy::print_stdout)]
pub async fn update(
    session: &mut Session,
    id: &str,
    size: &str,
    quantity: u32,
) -> Result<(), CliError> {
    let size = Size::parse(size).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if session
        .update_quantity(&ProductId::new(id), &size, quantity)
        .await
    {
        println!("Cart: {} item(s)", session.cart_count());
    }
    Ok(())
}
