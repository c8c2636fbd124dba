// src/server/mod.rs
//! Pantry web server
//!
//! This module provides an HTTP server that:
//! - Renders the recipe table with a manual-add form and an XML upload form
//! - Inserts rows from either form action and rewrites the XML snapshot
//! - Serves the media tree so the snapshot is publicly downloadable
//!
//! There is no cross-request locking around the snapshot file or the table:
//! two simultaneous submissions can interleave, and the last snapshot writer
//! wins.

pub mod handlers;
mod render;
mod routes;

pub use routes::create_router;

use crate::db;
use anyhow::Result;
use rusqlite::Connection;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// Filename of the canonical snapshot inside the snapshot directory
pub const SNAPSHOT_FILE: &str = "recipes.xml";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind_addr: SocketAddr,
    /// Path to the pantry database
    pub db_path: String,
    /// Root of the media tree holding the snapshot and staged uploads
    pub media_root: PathBuf,
    /// Public URL prefix under which the media tree is served
    pub media_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".parse().unwrap(),
            db_path: "/var/lib/pantry/pantry.db".to_string(),
            media_root: PathBuf::from("/var/lib/pantry/media"),
            media_url: "/media".to_string(),
        }
    }
}

impl ServerConfig {
    /// Directory holding the snapshot and temporary upload files
    pub fn snapshot_dir(&self) -> PathBuf {
        self.media_root.join("recipes")
    }

    /// Canonical snapshot path
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot_dir().join(SNAPSHOT_FILE)
    }

    /// Public URL of the snapshot (media root prefix replaced by media URL)
    pub fn snapshot_url(&self) -> String {
        format!(
            "{}/recipes/{}",
            self.media_url.trim_end_matches('/'),
            SNAPSHOT_FILE
        )
    }

    /// A fresh randomized staging path for one uploaded document.
    ///
    /// Randomized so concurrent uploads cannot collide with each other or
    /// with the canonical snapshot file.
    pub fn temp_upload_path(&self) -> PathBuf {
        self.snapshot_dir()
            .join(format!("upload_{}.xml", Uuid::new_v4().simple()))
    }
}

/// Shared server state
pub struct ServerState {
    pub config: ServerConfig,
}

impl ServerState {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Open a database connection for one request
    pub fn open_db(&self) -> crate::Result<Connection> {
        db::open(&self.config.db_path)
    }
}

/// Start the pantry server
pub async fn run_server(config: ServerConfig) -> Result<()> {
    tracing::info!("Starting pantry server on {}", config.bind_addr);
    tracing::info!("Database: {}", config.db_path);
    tracing::info!("Media root: {:?}", config.media_root);

    db::init(&config.db_path)?;
    std::fs::create_dir_all(config.snapshot_dir())?;

    let state = Arc::new(ServerState::new(config.clone()));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("pantry is ready to serve");

    axum::serve(listener, app).await?;
    Ok(())
}
