//! Oleh's Garden CLI - catalog browsing, a persistent cart and ordering.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! garden-cli catalog list --category хурма
//! garden-cli catalog show 1
//!
//! # Work with the cart kept under --data-dir
//! garden-cli cart add 1 --height 1м --qty 2
//! garden-cli cart inc 1
//! garden-cli cart show
//!
//! # Send the cart to a running storefront
//! garden-cli order submit --name Олег --surname Коваль --phone "067 123 45 67" \
//!     --city-ref <ref> --warehouse-ref <ref>
//! ```
//!
//! # Commands
//!
//! - `catalog` - List and inspect products
//! - `cart` - Show and change the cart
//! - `order` - Preview or submit the cart as an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use oleh_garden_core::ProductId;

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(name = "garden-cli")]
#[command(author, version, about = "Oleh's Garden CLI tools")]
struct Cli {
    /// Directory holding the persisted cart
    #[arg(long, env = "GARDEN_DATA_DIR", default_value = ".garden", global = true)]
    data_dir: PathBuf,

    /// JSON catalog to use instead of the built-in one
    #[arg(long, env = "CATALOG_PATH", global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the cart into an order
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    List {
        /// Category, e.g. `хурма`
        #[arg(long)]
        category: Option<String>,

        /// Rootstock
        #[arg(long)]
        rootstock: Option<String>,
    },
    /// Show one product with its price tiers
    Show { id: ProductId },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Add a product
    Add {
        id: ProductId,

        /// Seedling height tier, e.g. `1м`
        #[arg(long)]
        height: Option<String>,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Remove a product
    Remove { id: ProductId },
    /// Increase a quantity by one
    Inc { id: ProductId },
    /// Decrease a quantity by one (never below one)
    Dec { id: ProductId },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Print the message the shop would receive
    Preview(CustomerArgs),
    /// Send the order to a storefront and empty the cart
    Submit {
        #[command(flatten)]
        customer: CustomerArgs,

        /// Storefront base URL
        #[arg(long, env = "STOREFRONT_URL", default_value = "http://127.0.0.1:3000")]
        storefront_url: url::Url,
    },
}

/// Customer and delivery details of an order.
#[derive(Args)]
struct CustomerArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    surname: String,

    #[arg(long)]
    phone: String,

    #[arg(long)]
    email: Option<String>,

    #[arg(long)]
    address: Option<String>,

    #[arg(long)]
    comments: Option<String>,

    /// Nova Poshta city name, for display
    #[arg(long)]
    city_name: Option<String>,

    /// Nova Poshta city ref (`DeliveryCity`)
    #[arg(long)]
    city_ref: String,

    /// Nova Poshta warehouse ref
    #[arg(long)]
    warehouse_ref: String,

    #[arg(long)]
    warehouse_number: Option<String>,

    #[arg(long)]
    warehouse_address: Option<String>,
}

impl From<CustomerArgs> for oleh_garden_storefront::order::CustomerInfo {
    fn from(args: CustomerArgs) -> Self {
        Self {
            name: args.name,
            surname: args.surname,
            phone: args.phone,
            email: args.email,
            address: args.address,
            comments: args.comments,
            np_city_name: args.city_name,
            np_city_ref: Some(args.city_ref),
            np_warehouse_ref: Some(args.warehouse_ref),
            np_warehouse_number: args.warehouse_number,
            np_warehouse_address: args.warehouse_address,
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(cli.data_dir, cli.catalog.as_deref())?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::List {
                category,
                rootstock,
            } => commands::catalog::list(&session, category, rootstock),
            CatalogAction::Show { id } => commands::catalog::show(&session, id)?,
        },
        Commands::Cart { action } => {
            let mut cart = session.cart();
            match action {
                CartAction::Show => {}
                CartAction::Add { id, height, qty } => {
                    commands::cart::add(&mut cart, id, height.as_deref(), qty)?;
                }
                CartAction::Remove { id } => cart.remove(id),
                CartAction::Inc { id } => cart.inc(id),
                CartAction::Dec { id } => cart.dec(id),
                CartAction::Clear => cart.clear(),
            }
            commands::cart::show(&cart);
        }
        Commands::Order { action } => match action {
            OrderAction::Preview(customer) => {
                commands::order::preview(&session, customer.into())?;
            }
            OrderAction::Submit {
                customer,
                storefront_url,
            } => commands::order::submit(&session, customer.into(), &storefront_url).await?,
        },
    }
    Ok(())
}
