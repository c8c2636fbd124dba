// src/main.rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use pantry::server::{run_server, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about = "Recipe collection manager with XML snapshot export and import", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the pantry database
    Init {
        /// Database path (default: /var/lib/pantry/pantry.db)
        #[arg(short, long, default_value = "/var/lib/pantry/pantry.db")]
        db_path: String,
    },
    /// Run the web server
    Serve {
        /// Address to bind to
        #[arg(short, long, default_value = "0.0.0.0:8080")]
        bind: SocketAddr,
        /// Database path (default: /var/lib/pantry/pantry.db)
        #[arg(short, long, default_value = "/var/lib/pantry/pantry.db")]
        db_path: String,
        /// Directory holding the XML snapshot and staged uploads
        #[arg(long, default_value = "/var/lib/pantry/media")]
        media_root: PathBuf,
        /// Public URL prefix under which the media directory is served
        #[arg(long, default_value = "/media")]
        media_url: String,
    },
    /// Export the current table to an XML snapshot file
    Export {
        /// Output path for the snapshot
        output: PathBuf,
        /// Database path (default: /var/lib/pantry/pantry.db)
        #[arg(short, long, default_value = "/var/lib/pantry/pantry.db")]
        db_path: String,
    },
    /// Import recipes from an XML file
    Import {
        /// Path to the XML document to import
        file: PathBuf,
        /// Database path (default: /var/lib/pantry/pantry.db)
        #[arg(short, long, default_value = "/var/lib/pantry/pantry.db")]
        db_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Init { db_path }) => {
            info!("Initializing pantry database at: {}", db_path);
            pantry::db::init(&db_path)?;
            println!("Database initialized successfully at: {}", db_path);
            Ok(())
        }
        Some(Commands::Serve {
            bind,
            db_path,
            media_root,
            media_url,
        }) => {
            let config = ServerConfig {
                bind_addr: bind,
                db_path,
                media_root,
                media_url,
            };
            run_server(config).await
        }
        Some(Commands::Export { output, db_path }) => {
            let conn = pantry::db::open(&db_path)?;
            pantry::export_snapshot(&conn, &output)?;
            let count = pantry::Recipe::count(&conn)?;
            println!("Exported {} recipes to {}", count, output.display());
            Ok(())
        }
        Some(Commands::Import { file, db_path }) => {
            info!("Importing recipes from: {}", file.display());
            let conn = pantry::db::open(&db_path)?;
            match pantry::import_snapshot(&conn, &file) {
                Ok(imported) => {
                    println!("Imported {} recipes.", imported);
                    Ok(())
                }
                Err(e) => Err(anyhow::anyhow!("Import failed: {}", e)),
            }
        }
        None => {
            // No command provided, show help
            println!("Pantry Recipe Manager v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'pantry --help' for usage information");
            Ok(())
        }
    }
}
