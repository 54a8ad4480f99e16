mod render;
mod stock;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Storefront catalog command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Render one catalog page from the list endpoint as HTML
    Render {
        /// Page to render (1-based)
        #[arg(long, default_value = "1")]
        page: u32,

        /// Products per page requested from the endpoint
        #[arg(long, default_value = "12")]
        per_page: u32,

        /// Product list endpoint of a running storefront server
        #[arg(
            long,
            env = "STOREFRONT_ENDPOINT",
            default_value = "http://127.0.0.1:3000/api/products"
        )]
        endpoint: String,

        /// Write the rendered markup here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,

        /// Request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout_secs: u64,
    },
    /// Print the live stock badge for one product
    Stock {
        #[arg(long)]
        product_id: i64,

        /// Inventory endpoint of a running storefront server
        #[arg(
            long,
            env = "STOREFRONT_INVENTORY_ENDPOINT",
            default_value = "http://127.0.0.1:3000/api/inventory-fragment"
        )]
        endpoint: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Render {
            page,
            per_page,
            endpoint,
            out,
            timeout_secs,
        }) => {
            render::run_render(&endpoint, page, per_page, timeout_secs, out.as_deref()).await?;
        }
        Some(Commands::Stock {
            product_id,
            endpoint,
        }) => {
            let html = stock::fetch_stock_html(&endpoint, product_id).await?;
            println!("{html}");
        }
        None => println!("storefront-cli: use `render` or `stock`; see --help"),
    }

    Ok(())
}
