//! Catalog browsing commands.

use std::collections::BTreeSet;

use clap::Args;
use shopfront_core::{Product, ProductId, Size};
use shopfront_storefront::{ProductFilter, Session, SortOrder};

use super::CliError;

const RELATED_LIMIT: usize = 5;
const LATEST_LIMIT: usize = 10;
const BESTSELLER_LIMIT: usize = 5;

/// Filters for `shop products`.
#[derive(Debug, Args)]
pub struct ProductsArgs {
    /// Case-insensitive name search
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only these categories (repeatable)
    #[arg(short, long = "category")]
    pub categories: Vec<String>,

    /// Only these sub-categories (repeatable)
    #[arg(long = "sub-category")]
    pub sub_categories: Vec<String>,

    /// relevant, low-high or high-low
    #[arg(long, default_value = "relevant")]
    pub sort: SortOrder,

    /// Bypass the cached product list
    #[arg(long)]
    pub refresh: bool,
}

impl ProductsArgs {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            search: self.search.clone(),
            categories: self.categories.iter().cloned().collect::<BTreeSet<_>>(),
            sub_categories: self.sub_categories.iter().cloned().collect(),
            sort: self.sort,
        }
    }
}

/// List products matching the filters.
pub async fn list(session: &mut Session, args: &ProductsArgs) -> Result<(), CliError> {
    let loaded = if args.refresh {
        session.refresh_products().await
    } else {
        session.load_products().await
    };
    if !loaded {
        return Ok(());
    }

    let products = session.catalog().browse(&args.filter());
    if products.is_empty() {
        #[allow(clippy::print_stdout)]
        {
            println!("No products found");
        }
    }
    for product in products {
        print_row(product);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_row(product: &Product) {
    let marker = if product.bestseller { " *" } else { "" };
    println!(
        "{:<26} {:>9}  {} / {}  {}{marker}",
        product.id.to_string(),
        product.price.to_string(),
        product.category,
        product.sub_category,
        product.name
    );
}

/// Show the landing page: newest arrivals and bestsellers.
#[allow(clippy::print_stdout)]
pub async fn home(session: &mut Session) -> Result<(), CliError> {
    if !session.load_products().await {
        return Ok(());
    }

    let catalog = session.catalog();
    println!("Latest collection");
    for product in catalog.latest(LATEST_LIMIT) {
        print_row(product);
    }
    println!();
    println!("Best sellers");
    for product in catalog.bestsellers(BESTSELLER_LIMIT) {
        print_row(product);
    }
    Ok(())
}

/// Show one product with its sizes and related products.
#[allow(clippy::print_stdout)]
pub async fn show(session: &mut Session, id: &str) -> Result<(), CliError> {
    if !session.load_products().await {
        return Ok(());
    }

    let catalog = session.catalog();
    let Some(product) = catalog.find(&ProductId::new(id)) else {
        return Err(CliError::InvalidInput(format!("no product with id {id}")));
    };

    println!("{}  {}", product.name, product.price);
    if !product.description.is_empty() {
        println!("{}", product.description);
    }
    let sizes: Vec<&str> = product.sizes.iter().map(Size::as_str).collect();
    println!("Sizes: {}", sizes.join(" "));
    if let Some(image) = product.primary_image() {
        println!("Image: {image}");
    }

    let related = catalog.related(product, RELATED_LIMIT);
    if !related.is_empty() {
        println!();
        println!("Related:");
        for other in related {
            println!(
                "  {:<26} {:>9}  {}",
                other.id.to_string(),
                other.price.to_string(),
                other.name
            );
        }
    }
    Ok(())
}
