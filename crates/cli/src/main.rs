//! Shopfront CLI - browse the catalog, manage the cart and check out from a
//! terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! shop home
//! shop products --category Men --sort low-high
//!
//! # Sign in (password is read from stdin), then fill the cart
//! shop login -e ada@example.com
//! shop cart add 66a1f0 --size M
//!
//! # Pay on delivery
//! shop checkout --method cod --first-name Ada --last-name Lovelace ...
//!
//! # Keep one session open (guest carts only live this long)
//! shop shell
//! ```
//!
//! # Environment Variables
//!
//! - `SHOPFRONT_BACKEND_URL` - Backend base URL (required)
//! - `SHOPFRONT_TOKEN_PATH` - Where the session token is saved
//! - `SHOPFRONT_HTTP_TIMEOUT_SECS` - Request timeout, default 10
//! - `SENTRY_DSN` / `SENTRY_ENVIRONMENT` - Error tracking

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use shopfront_storefront::{ApiClient, FileTokenStore, Session, StorefrontConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{
    CliError, account, cart, catalog, checkout,
    checkout::{AddressArgs, CheckoutMethod},
    shell,
};

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the newest arrivals and bestsellers
    Home,
    /// List products in the catalog
    Products(catalog::ProductsArgs),
    /// Show one product and related products
    Product {
        /// Product id
        id: String,
    },
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in (password is read from stdin)
    Login {
        #[arg(short, long)]
        email: String,

        /// Sign in to the admin console instead
        #[arg(long)]
        admin: bool,
    },
    /// Create a customer account (password is read from stdin)
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,
    },
    /// Sign out and forget the saved token
    Logout,
    /// Place an order for the current cart
    Checkout {
        #[arg(short, long, value_enum, default_value = "cod")]
        method: CheckoutMethod,

        #[command(flatten)]
        address: AddressArgs,
    },
    /// Confirm a Stripe payment from the redirect URL
    Verify {
        /// The URL the payment page redirected to
        url: url::Url,
    },
    /// Show order history
    Orders,
    /// Run commands against one long-lived session
    Shell,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,

        #[arg(short, long)]
        size: Option<String>,
    },
    /// Set the quantity of a cart line (0 removes it)
    Update {
        id: String,
        size: String,
        quantity: u32,
    },
    /// Remove a cart line
    Remove { id: String, size: String },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("Configuration error: {e}");
            }
            std::process::exit(2);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so command output stays clean
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_storefront=info,shopfront_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), CliError> = run(cli, &config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> Result<(), CliError> {
    let api = ApiClient::new(config)?;
    let tokens = Arc::new(FileTokenStore::new(&config.token_path));
    let mut session = Session::restore(api, tokens).await;

    match cli.command {
        Commands::Shell => shell::run(&mut session).await?,
        command => {
            let outcome = execute(command, &mut session).await;
            commands::print_notifications(&mut session);
            outcome?;
        }
    }
    Ok(())
}

/// Run one non-shell command against `session`.
async fn execute(command: Commands, session: &mut Session) -> Result<(), CliError> {
    match command {
        Commands::Home => catalog::home(session).await,
        Commands::Products(args) => catalog::list(session, &args).await,
        Commands::Product { id } => catalog::show(session, &id).await,
        Commands::Cart { action } => match action {
            CartAction::Show => cart::show(session).await,
            CartAction::Add { id, size } => cart::add(session, &id, size.as_deref()).await,
            CartAction::Update { id, size, quantity } => {
                cart::update(session, &id, &size, quantity).await
            }
            CartAction::Remove { id, size } => cart::update(session, &id, &size, 0).await,
        },
        Commands::Login { email, admin } => account::login(session, &email, admin).await,
        Commands::Register { name, email } => account::register(session, &name, &email).await,
        Commands::Logout => {
            account::logout(session);
            Ok(())
        }
        Commands::Checkout { method, address } => {
            checkout::place(session, method, address).await
        }
        Commands::Verify { url } => checkout::verify(session, &url).await,
        Commands::Orders => checkout::orders(session).await,
        Commands::Shell => Err(CliError::InvalidInput(
            "already inside a shell".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_cart_update() {
        let cli = Cli::try_parse_from(["shop", "cart", "update", "p1", "M", "3"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Cart {
                action: CartAction::Update { quantity: 3, .. }
            })
        ));
    }

    #[test]
    fn test_parse_home() {
        let cli = Cli::try_parse_from(["shop", "home"]);
        assert!(matches!(cli.map(|c| c.command), Ok(Commands::Home)));
    }
}
