// src/db/models.rs

//! Recipe model
//!
//! The field set is declared once here, as an ordered list of field names,
//! and every SQL statement in this module is generated from it. The exporter,
//! importer, and web forms iterate the same list, so adding a field means
//! adding one entry (plus a schema migration).

use crate::error::Result;
use rusqlite::{Connection, Row};
use std::collections::HashMap;

/// Ordered non-identifier fields of a recipe row.
///
/// The order here is the column order in the table, the sub-element order in
/// the XML snapshot, and the input order on the web form.
pub const FIELDS: &[&str] = &["title", "ingredients", "instructions"];

/// One recipe row: a system-assigned id plus one text value per entry in
/// [`FIELDS`], in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    pub id: Option<i64>,
    pub values: Vec<String>,
}

impl Recipe {
    /// Create a new recipe from an ordered value vector.
    ///
    /// `values` must have one entry per [`FIELDS`] entry.
    pub fn new(values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), FIELDS.len());
        Self { id: None, values }
    }

    /// Create a new recipe from a submitted form map.
    ///
    /// Fields absent from the map default to the empty string; no validation
    /// is applied beyond that.
    pub fn from_form(form: &HashMap<String, String>) -> Self {
        let values = FIELDS
            .iter()
            .map(|field| form.get(*field).cloned().unwrap_or_default())
            .collect();
        Self { id: None, values }
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&str> {
        FIELDS
            .iter()
            .position(|f| *f == name)
            .map(|i| self.values[i].as_str())
    }

    /// Insert this recipe into the database
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        let placeholders: Vec<String> = (1..=FIELDS.len()).map(|i| format!("?{i}")).collect();
        let sql = format!(
            "INSERT INTO recipes ({}) VALUES ({})",
            FIELDS.join(", "),
            placeholders.join(", ")
        );
        conn.execute(&sql, rusqlite::params_from_iter(self.values.iter()))?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// List all recipes in insertion order
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let sql = format!("SELECT id, {} FROM recipes ORDER BY id", FIELDS.join(", "));
        let mut stmt = conn.prepare(&sql)?;

        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Count stored recipes
    pub fn count(conn: &Connection) -> Result<i64> {
        let count = conn.query_row("SELECT COUNT(*) FROM recipes", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Convert a database row to a Recipe
    pub(crate) fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let id = row.get(0)?;
        let mut values = Vec::with_capacity(FIELDS.len());
        for i in 0..FIELDS.len() {
            values.push(row.get(i + 1)?);
        }
        Ok(Self {
            id: Some(id),
            values,
        })
    }
}
