// src/xml/import.rs

//! Snapshot importer
//!
//! Parses an XML document, validates its shape field-by-field, and inserts
//! one recipe row per validated `<recipe>` element.
//!
//! Validation short-circuits on the first failure, but each element that
//! validates is inserted before the next one is examined. A failure partway
//! through therefore leaves rows from earlier elements in place; imports are
//! not transactional.

use crate::db::models::{Recipe, FIELDS};
use crate::xml::{RECIPE_TAG, ROOT_TAG};
use quick_xml::events::Event;
use quick_xml::Reader;
use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during a snapshot import
#[derive(Error, Debug)]
pub enum ImportError {
    /// The document could not be parsed at all
    #[error("malformed XML: {0}")]
    Parse(#[from] quick_xml::Error),

    /// The root element is not the recognized root tag
    #[error("invalid root element (expected <recipes>)")]
    InvalidRoot,

    /// A recipe element lacks a required field element
    #[error("recipe #{position}: missing element <{field}>")]
    MissingField { position: usize, field: String },

    /// A recipe element has a required field element with blank text
    #[error("recipe #{position}: element <{field}> is empty")]
    EmptyField { position: usize, field: String },

    /// Inserting a validated recipe failed
    #[error("database error: {0}")]
    Database(#[from] crate::Error),
}

/// A parsed XML element: tag name, direct text content, child elements.
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

/// Parse a whole document into an element tree.
///
/// Parsing the full document up front keeps the error ordering stable: a
/// malformed document always fails here, before any structural validation
/// or row insertion happens.
fn parse_file(path: &Path) -> Result<Element, quick_xml::Error> {
    let mut reader = Reader::from_file(path)?;
    let mut buf = Vec::new();
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                stack.push(Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    text: String::new(),
                    children: Vec::new(),
                });
            }
            Event::Empty(e) => {
                let element = Element {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    text: String::new(),
                    children: Vec::new(),
                };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(element),
                    None => {
                        root.get_or_insert(element);
                    }
                }
            }
            Event::Text(t) => {
                if let Some(element) = stack.last_mut() {
                    element.text.push_str(&t.unescape()?);
                }
            }
            Event::CData(t) => {
                if let Some(element) = stack.last_mut() {
                    element
                        .text
                        .push_str(&String::from_utf8_lossy(&t.into_inner()));
                }
            }
            Event::End(_) => {
                // Balanced by construction: the reader rejects stray end tags
                if let Some(element) = stack.pop() {
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(element),
                        None => {
                            root.get_or_insert(element);
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| quick_xml::Error::UnexpectedEof("no root element found".to_string()))
}

/// Import recipes from an XML document at `path`.
///
/// Returns the number of rows inserted. On failure the error identifies the
/// offending recipe's 1-based position and field tag where applicable; rows
/// inserted from earlier elements in the same document are not rolled back.
pub fn import_snapshot(conn: &Connection, path: &Path) -> Result<usize, ImportError> {
    let root = parse_file(path)?;

    if root.name != ROOT_TAG {
        return Err(ImportError::InvalidRoot);
    }

    let mut imported = 0;
    let recipe_elements = root.children.iter().filter(|c| c.name == RECIPE_TAG);

    for (idx, element) in recipe_elements.enumerate() {
        let position = idx + 1;
        let mut values = Vec::with_capacity(FIELDS.len());

        for field in FIELDS {
            let child = element.children.iter().find(|c| c.name == *field);
            match child {
                None => {
                    return Err(ImportError::MissingField {
                        position,
                        field: (*field).to_string(),
                    });
                }
                Some(child) => {
                    let text = child.text.trim();
                    if text.is_empty() {
                        return Err(ImportError::EmptyField {
                            position,
                            field: (*field).to_string(),
                        });
                    }
                    values.push(text.to_string());
                }
            }
        }

        // Insert as soon as the element validates; later failures do not
        // undo this row.
        Recipe::new(values).insert(conn)?;
        imported += 1;
    }

    debug!("Imported {} recipes from {}", imported, path.display());
    Ok(imported)
}
