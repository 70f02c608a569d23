use clap::{Parser, Subcommand};
use heladeria_pos::application::session::PosSession;
use heladeria_pos::config::{
    CatalogConsistency, DEFAULT_API_URL, DEFAULT_IMAGE_PATTERN, PosConfig, RemotePattern,
};
use heladeria_pos::domain::checkout::PaymentMethod;
use heladeria_pos::domain::draft::{ImageUpload, NewProductDraft};
use heladeria_pos::domain::product::Category;
use heladeria_pos::infrastructure::http::HttpCatalog;
use heladeria_pos::interfaces::csv::cart_writer::CartWriter;
use heladeria_pos::interfaces::csv::catalog_writer::CatalogWriter;
use heladeria_pos::interfaces::csv::order_reader::{OrderAction, OrderReader};
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the catalog service
    #[arg(long, env = "POS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Allowed location for product images, e.g. https://host/bucket/**
    #[arg(long, env = "POS_IMAGE_PATTERN", default_value = DEFAULT_IMAGE_PATTERN)]
    image_pattern: RemotePattern,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the product catalog as CSV
    Catalog {
        /// Only print one tab of the grid
        #[arg(long)]
        category: Option<Category>,
    },
    /// Ring up an order script and optionally take payment
    Sell {
        /// CSV with `action,id,quantity` rows
        order: PathBuf,

        /// Payment method: yape or efectivo
        #[arg(long)]
        pay: Option<PaymentMethod>,
    },
    /// Submit a new product to the catalog
    AddProduct {
        #[arg(long)]
        nombre: String,

        /// Price as typed; the catalog service parses it
        #[arg(long)]
        precio: String,

        #[arg(long, default_value = "paletas")]
        categoria: Category,

        /// Image file to upload with the product
        #[arg(long)]
        imagen: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PosConfig {
        api_url: cli.api_url,
        images: cli.image_pattern,
        consistency: CatalogConsistency::default(),
    };

    let gateway = HttpCatalog::new(&config.api_url).into_diagnostic()?;
    let mut session = PosSession::new(Box::new(gateway), &config);
    session.load_catalog().await;

    let stdout = io::stdout();
    match cli.command {
        Command::Catalog { category } => {
            let mut writer = CatalogWriter::new(stdout.lock());
            writer
                .write_catalog(session.catalog(), category)
                .into_diagnostic()?;
        }
        Command::Sell { order, pay } => {
            let file = File::open(order).into_diagnostic()?;
            for line in OrderReader::new(file).lines() {
                let result = line.and_then(|line| match line.action {
                    OrderAction::Add => session.ring_up(line.id, line.quantity()?),
                    OrderAction::Remove => {
                        session.remove_from_cart(line.id);
                        Ok(())
                    }
                });
                if let Err(e) = result {
                    error!(error = %e, "Error reading order line");
                }
            }

            let mut out = stdout.lock();
            CartWriter::new(&mut out)
                .write_cart(session.cart())
                .into_diagnostic()?;
            writeln!(out, "Total: S/ {}", session.total_price()).into_diagnostic()?;

            if let Some(method) = pay {
                match session.open_payment() {
                    Ok(()) => {
                        session.pay(method).into_diagnostic()?;
                    }
                    Err(e) => warn!(error = %e, "nothing to pay"),
                }
            }
        }
        Command::AddProduct {
            nombre,
            precio,
            categoria,
            imagen,
        } => {
            let mut draft = NewProductDraft::new(nombre, precio, categoria);
            let ready = match &imagen {
                Some(path) => match ImageUpload::from_path(path).await {
                    Ok(image) => {
                        draft.imagen = Some(image);
                        true
                    }
                    Err(e) => {
                        error!(error = %e, path = %path.display(), "Error reading image");
                        false
                    }
                },
                None => true,
            };

            if ready {
                session.submit_draft(&mut draft).await;
            }

            let mut writer = CatalogWriter::new(stdout.lock());
            writer
                .write_catalog(session.catalog(), None)
                .into_diagnostic()?;
        }
    }

    Ok(())
}
