// src/server/render.rs
//! HTML rendering for the recipe index page
//!
//! The page is small enough that a string builder beats a template engine:
//! one table, two forms, one status line. Field inputs and table columns are
//! generated from the declared field list.

use quick_xml::escape::escape;
use serde::Serialize;

/// Everything one render of the index page needs.
#[derive(Debug, Serialize)]
pub struct IndexContext {
    /// Field names, in declaration order
    pub fields: Vec<&'static str>,
    /// One ordered value vector per stored recipe, identifier excluded
    pub recipes: Vec<Vec<String>>,
    /// Whether the canonical snapshot file currently exists
    pub xml_exists: bool,
    /// Public URL of the snapshot
    pub xml_url: String,
    /// Status message from the last form action, empty if none
    pub message: String,
}

/// Render the index page for the given context
pub fn index_page(ctx: &IndexContext) -> String {
    let mut page = String::from(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>Pantry</title></head>\n<body>\n<h1>Recipes</h1>\n",
    );

    if !ctx.message.is_empty() {
        page.push_str(&format!("<p class=\"message\">{}</p>\n", escape(&ctx.message)));
    }

    page.push_str("<table border=\"1\">\n<tr>");
    for field in &ctx.fields {
        page.push_str(&format!("<th>{}</th>", escape(*field)));
    }
    page.push_str("</tr>\n");
    for recipe in &ctx.recipes {
        page.push_str("<tr>");
        for value in recipe {
            page.push_str(&format!("<td>{}</td>", escape(value)));
        }
        page.push_str("</tr>\n");
    }
    page.push_str("</table>\n");

    if ctx.xml_exists {
        page.push_str(&format!(
            "<p><a href=\"{}\">Download XML snapshot</a></p>\n",
            escape(&ctx.xml_url)
        ));
    }

    page.push_str("<h2>Add recipe</h2>\n<form method=\"post\" enctype=\"multipart/form-data\">\n");
    for field in &ctx.fields {
        page.push_str(&format!(
            "<label>{0}: <input type=\"text\" name=\"{0}\"></label><br>\n",
            escape(*field)
        ));
    }
    page.push_str("<button type=\"submit\" name=\"add_recipe\" value=\"1\">Add</button>\n</form>\n");

    page.push_str(
        "<h2>Upload XML</h2>\n<form method=\"post\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"xml_file\">\n\
         <button type=\"submit\" name=\"upload_xml\" value=\"1\">Upload</button>\n</form>\n",
    );

    page.push_str("</body>\n</html>\n");
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FIELDS;

    fn context() -> IndexContext {
        IndexContext {
            fields: FIELDS.to_vec(),
            recipes: vec![vec![
                "Tea".to_string(),
                "water & leaves".to_string(),
                "steep".to_string(),
            ]],
            xml_exists: true,
            xml_url: "/media/recipes/recipes.xml".to_string(),
            message: "Imported 1 recipes.".to_string(),
        }
    }

    #[test]
    fn test_page_shows_rows_message_and_snapshot_link() {
        let page = index_page(&context());
        assert!(page.contains("<td>Tea</td>"));
        assert!(page.contains("Imported 1 recipes."));
        assert!(page.contains("href=\"/media/recipes/recipes.xml\""));
    }

    #[test]
    fn test_page_escapes_stored_values() {
        let page = index_page(&context());
        assert!(page.contains("water &amp; leaves"));
        assert!(!page.contains("water & leaves"));
    }

    #[test]
    fn test_page_hides_snapshot_link_when_absent() {
        let ctx = IndexContext {
            xml_exists: false,
            ..context()
        };
        let page = index_page(&ctx);
        assert!(!page.contains("Download XML snapshot"));
    }

    #[test]
    fn test_page_has_one_input_per_field() {
        let page = index_page(&context());
        for field in FIELDS {
            assert!(page.contains(&format!("name=\"{field}\"")));
        }
    }
}
