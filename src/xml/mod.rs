// src/xml/mod.rs

//! XML snapshot serialization and import
//!
//! The snapshot is a full rewrite of the recipes table:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <recipes>
//!   <recipe>
//!     <title>...</title>
//!     <ingredients>...</ingredients>
//!     <instructions>...</instructions>
//!   </recipe>
//! </recipes>
//! ```
//!
//! Import validates the same shape field-by-field and inserts one row per
//! validated `<recipe>` element.

pub mod export;
pub mod import;

pub use export::export_snapshot;
pub use import::{import_snapshot, ImportError};

/// Root element tag of the snapshot document
pub const ROOT_TAG: &str = "recipes";

/// Per-row element tag inside the root
pub const RECIPE_TAG: &str = "recipe";
