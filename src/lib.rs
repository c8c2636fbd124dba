// src/lib.rs

//! Pantry recipe manager
//!
//! A small web view over a SQLite table of recipes that mirrors the full
//! table to a single XML snapshot file on every change, with a companion
//! import path that validates and re-inserts recipes from an uploaded
//! XML document.
//!
//! # Architecture
//!
//! - Database-first: all recipe rows live in SQLite
//! - Single source of truth: the field set is declared once ([`FIELDS`]) and
//!   drives the schema DDL, the exporter, the importer, and the web forms
//! - Snapshot: the XML file is a full rewrite of the table, never a delta

pub mod db;
mod error;
pub mod server;
pub mod xml;

pub use db::models::{Recipe, FIELDS};
pub use error::{Error, Result};
pub use xml::{export_snapshot, import_snapshot, ImportError, RECIPE_TAG, ROOT_TAG};
