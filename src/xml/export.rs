// src/xml/export.rs

//! Snapshot exporter
//!
//! Serializes every recipe row into a single XML document and overwrites the
//! snapshot path wholesale. There is no atomic rename: a crash mid-write can
//! leave a truncated file, which the importer will reject as malformed.

use crate::db::models::{Recipe, FIELDS};
use crate::error::Result;
use crate::xml::{RECIPE_TAG, ROOT_TAG};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Write a full snapshot of the recipes table to `path`.
///
/// The target directory is created if absent. Any previous snapshot at the
/// path is replaced.
pub fn export_snapshot(conn: &Connection, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let recipes = Recipe::list_all(conn)?;

    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;

    for recipe in &recipes {
        writer.write_event(Event::Start(BytesStart::new(RECIPE_TAG)))?;
        for (field, value) in FIELDS.iter().zip(&recipe.values) {
            writer.write_event(Event::Start(BytesStart::new(*field)))?;
            writer.write_event(Event::Text(BytesText::new(value)))?;
            writer.write_event(Event::End(BytesEnd::new(*field)))?;
        }
        writer.write_event(Event::End(BytesEnd::new(RECIPE_TAG)))?;
    }

    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;
    fs::write(path, writer.into_inner())?;

    debug!("Exported {} recipes to {}", recipes.len(), path.display());
    Ok(())
}
