//! Checkout, payment verification and order history.

use clap::{Args, ValueEnum};
use shopfront_core::{Address, Email, OrderStatus, PaymentMethod};
use shopfront_storefront::{PaymentCallback, Route, Session};
use url::Url;

use super::CliError;

/// Payment methods this client can complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CheckoutMethod {
    /// Cash on delivery
    Cod,
    /// Hosted Stripe checkout
    Stripe,
}

impl From<CheckoutMethod> for PaymentMethod {
    fn from(method: CheckoutMethod) -> Self {
        match method {
            CheckoutMethod::Cod => Self::Cod,
            CheckoutMethod::Stripe => Self::Stripe,
        }
    }
}

/// Delivery address flags.
#[derive(Debug, Args)]
pub struct AddressArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub street: String,
    #[arg(long)]
    pub city: String,
    #[arg(long)]
    pub state: String,
    #[arg(long)]
    pub zipcode: String,
    #[arg(long)]
    pub country: String,
    #[arg(long)]
    pub phone: String,
}

impl TryFrom<AddressArgs> for Address {
    type Error = CliError;

    fn try_from(args: AddressArgs) -> Result<Self, Self::Error> {
        let email =
            Email::parse(&args.email).map_err(|e| CliError::InvalidInput(e.to_string()))?;
        Ok(Self {
            first_name: args.first_name,
            last_name: args.last_name,
            email: email.into(),
            street: args.street,
            city: args.city,
            state: args.state,
            zipcode: args.zipcode,
            country: args.country,
            phone: args.phone,
        })
    }
}

#[allow(clippy::print_stdout)]
fn print_route(route: &Route) {
    match route {
        Route::External(url) => println!("Complete payment at: {url}"),
        other => println!("Next: {other}"),
    }
}

/// Place an order for the current cart.
pub async fn place(
    session: &mut Session,
    method: CheckoutMethod,
    address: AddressArgs,
) -> Result<(), CliError> {
    let address = Address::try_from(address)?;
    // Order items snapshot catalog data.
    if !session.load_products().await {
        return Ok(());
    }
    if let Some(route) = session.place_order(&address, &method.into()).await {
        print_route(&route);
    }
    Ok(())
}

/// Confirm a payment from the provider's redirect URL.
#[allow(clippy::print_stdout)]
pub async fn verify(session: &mut Session, url: &Url) -> Result<(), CliError> {
    let callback = PaymentCallback::from_url(url)?;
    if !session.is_authenticated() {
        println!("Sign in first, then run verify again");
        return Ok(());
    }
    match session.verify_payment(&callback).await {
        Some(Route::Orders) => println!("Payment received; see `shop orders`"),
        Some(Route::Cart) => println!("Payment was not completed; your cart is unchanged"),
        Some(other) => print_route(&other),
        None => {}
    }
    Ok(())
}

/// Print purchased items, most recent first.
#[allow(clippy::print_stdout)]
pub async fn orders(session: &mut Session) -> Result<(), CliError> {
    if !session.is_authenticated() {
        println!("Sign in to see your orders");
        return Ok(());
    }

    let history = session.order_history().await;
    if history.is_empty() {
        println!("No orders yet");
    }
    for entry in history {
        let paid = if entry.payment { "paid" } else { "pending" };
        println!(
            "{}  {:<24} {:<4} x{:<3} {:>9}  {:<16} {:>5}  {} ({paid})",
            entry.date.format("%Y-%m-%d"),
            entry.item.product.name,
            entry.item.size.as_str(),
            entry.item.quantity,
            entry.item.product.price.to_string(),
            entry.status.label(),
            progress(&entry.status),
            entry.payment_method,
        );
    }
    Ok(())
}

/// Fulfillment progress as `[n/total]`, `[?]` for unknown statuses.
fn progress(status: &OrderStatus) -> String {
    status.stage().map_or_else(
        || "[?]".to_string(),
        |stage| format!("[{}/{}]", stage + 1, OrderStatus::STAGES),
    )
}
