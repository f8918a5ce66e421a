//! Shopfront CLI - Storefront account, cart and navigation from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Log in (the session is kept in $SHOPFRONT_DATA_DIR/storage.json)
//! shopfront login -e ada@example.com -p hunter22
//!
//! # Who am I, and am I an admin?
//! shopfront whoami
//!
//! # Show the cart
//! shopfront cart
//!
//! # Ask the router where a path would land
//! shopfront navigate /orders
//!
//! # Log out
//! shopfront logout
//! ```
//!
//! # Commands
//!
//! - `login`, `register`, `logout`, `whoami`, `profile` - Account management
//! - `cart` - Fetch and list cart lines
//! - `navigate`, `routes` - Route table and navigation guard

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopfront_client::config::ClientConfig;
use shopfront_client::state::AppContext;
use shopfront_client::storage::FileStorage;

mod commands;
mod telemetry;

#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about = "Shopfront storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        mobile_no: String,

        #[arg(short, long, env = "SHOPFRONT_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Update profile fields (the cached identity refreshes on next login)
    Profile {
        #[arg(long)]
        first_name: Option<String>,

        #[arg(long)]
        last_name: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(short, long)]
        mobile_no: Option<String>,
    },
    /// Fetch and list the cart
    Cart,
    /// Show where navigating to a path would land
    Navigate {
        /// Destination path, e.g. /orders
        path: String,
    },
    /// List the route table
    Routes,
}

/// Initialize tracing with `EnvFilter` and, when configured, Sentry.
fn init_tracing(sentry_enabled: bool) {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_client=info,shopfront_cli=info".into());

    let sentry_layer = sentry_enabled
        .then(|| sentry_tracing::layer().event_filter(telemetry::sentry_event_filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_layer)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(false);
            tracing::error!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = telemetry::init_sentry(&config);
    init_tracing(sentry_guard.is_some());

    let storage = Arc::new(FileStorage::open(config.storage_path()));
    let mut ctx = AppContext::new(config, storage);

    if let Err(e) = run(cli, &mut ctx).await {
        tracing::error!("Command failed: {e}");
        if e.is_unauthorized() {
            tracing::info!("Try `shopfront login` again");
        }
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, ctx: &mut AppContext) -> shopfront_client::error::Result<()> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::account::login(ctx, &email, password).await?;
        }
        Commands::Register {
            first_name,
            last_name,
            email,
            mobile_no,
            password,
        } => {
            let form = commands::account::RegisterForm {
                first_name,
                last_name,
                email,
                mobile_no,
                password,
            };
            commands::account::register(ctx, form).await?;
        }
        Commands::Logout => commands::account::logout(ctx),
        Commands::Whoami => commands::account::whoami(ctx),
        Commands::Profile {
            first_name,
            last_name,
            email,
            mobile_no,
        } => {
            commands::account::update_profile(ctx, first_name, last_name, email, mobile_no)
                .await?;
        }
        Commands::Cart => commands::cart::show(ctx).await,
        Commands::Navigate { path } => commands::navigate::navigate(ctx, &path)?,
        Commands::Routes => commands::navigate::routes(),
    }
    Ok(())
}
