// src/server/handlers/recipes.rs
//! Recipe index view and form actions
//!
//! One endpoint carries both mutations. Which path runs is decided by which
//! action field is present in the submitted form, not by anything in the URL:
//! `add_recipe` inserts one row from the text inputs, `upload_xml` stages the
//! attached file, runs the importer on it, and deletes the staging file
//! whether or not the import succeeded.

use crate::db::models::{Recipe, FIELDS};
use crate::server::render::{self, IndexContext};
use crate::server::ServerState;
use crate::xml::{export_snapshot, import_snapshot};
use axum::extract::multipart::Field;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, error, warn};

/// Form action field for the manual-add path
const ADD_ACTION: &str = "add_recipe";
/// Form action field for the upload path
const UPLOAD_ACTION: &str = "upload_xml";
/// Name of the file part on the upload form
const UPLOAD_FILE_FIELD: &str = "xml_file";

const NO_FILE_MESSAGE: &str = "No file selected.";

/// Render the recipe table
///
/// GET /
pub async fn index(State(state): State<Arc<ServerState>>) -> Response {
    render_index(&state, String::new())
}

/// Handle both form actions
///
/// POST /
pub async fn submit(State(state): State<Arc<ServerState>>, mut multipart: Multipart) -> Response {
    let mut form: HashMap<String, String> = HashMap::new();
    let mut upload: Option<PathBuf> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_form", &e),
        };

        let name = field.name().unwrap_or_default().to_string();
        if name == UPLOAD_FILE_FIELD {
            // An empty filename means the picker was left blank
            if field.file_name().map_or(true, str::is_empty) {
                continue;
            }
            match stage_upload(&state, field).await {
                Ok(path) => upload = Some(path),
                Err(e) => {
                    error!("Failed to stage upload: {}", e);
                    return error_response(StatusCode::INTERNAL_SERVER_ERROR, "upload_failed", &e);
                }
            }
        } else {
            match field.text().await {
                Ok(value) => {
                    form.insert(name, value);
                }
                Err(e) => return error_response(StatusCode::BAD_REQUEST, "invalid_form", &e),
            }
        }
    }

    if form.contains_key(ADD_ACTION) {
        add_recipe(&state, &form)
    } else if form.contains_key(UPLOAD_ACTION) {
        let message = upload_xml(&state, upload).await;
        render_index(&state, message)
    } else {
        render_index(&state, String::new())
    }
}

/// Stream an uploaded file part into a randomized staging path
async fn stage_upload(state: &ServerState, mut field: Field<'_>) -> anyhow::Result<PathBuf> {
    let path = state.config.temp_upload_path();
    tokio::fs::create_dir_all(state.config.snapshot_dir()).await?;

    let mut file = tokio::fs::File::create(&path).await?;
    while let Some(chunk) = field.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    debug!("Staged upload at {}", path.display());
    Ok(path)
}

/// Manual-add path: insert one row from the form map, rewrite the snapshot,
/// redirect back to the view so a refresh does not resubmit.
fn add_recipe(state: &ServerState, form: &HashMap<String, String>) -> Response {
    let result = (|| -> crate::Result<i64> {
        let conn = state.open_db()?;
        let mut recipe = Recipe::from_form(form);
        let id = recipe.insert(&conn)?;
        export_snapshot(&conn, &state.config.snapshot_path())?;
        Ok(id)
    })();

    match result {
        Ok(id) => {
            debug!("Added recipe id={}", id);
            Redirect::to("/").into_response()
        }
        Err(e) => {
            error!("Manual add failed: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "add_failed", &e)
        }
    }
}

/// Upload path: import from the staged file, delete it unconditionally, and
/// rewrite the snapshot if the import succeeded. Returns the status message.
async fn upload_xml(state: &ServerState, upload: Option<PathBuf>) -> String {
    let path = match upload {
        Some(path) => path,
        None => return NO_FILE_MESSAGE.to_string(),
    };

    let conn = match state.open_db() {
        Ok(conn) => conn,
        Err(e) => {
            error!("Failed to open database for import: {}", e);
            remove_staged(&path).await;
            return format!("Import failed: {e}");
        }
    };

    let result = import_snapshot(&conn, &path);
    remove_staged(&path).await;

    match result {
        Ok(imported) => {
            if let Err(e) = export_snapshot(&conn, &state.config.snapshot_path()) {
                error!("Snapshot rewrite after import failed: {}", e);
                return format!("Imported {imported} recipes, but snapshot export failed: {e}");
            }
            format!("Imported {imported} recipes.")
        }
        Err(e) => format!("Import failed: {e}"),
    }
}

async fn remove_staged(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        warn!("Failed to remove staged upload {}: {}", path.display(), e);
    }
}

fn render_index(state: &ServerState, message: String) -> Response {
    match build_context(state, message) {
        Ok(ctx) => Html(render::index_page(&ctx)).into_response(),
        Err(e) => {
            error!("Failed to render recipe index: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "render_failed", &e)
        }
    }
}

fn error_response(status: StatusCode, code: &str, err: &dyn std::fmt::Display) -> Response {
    let body = serde_json::json!({
        "error": code,
        "message": format!("{}", err),
    });
    (status, Json(body)).into_response()
}

fn build_context(state: &ServerState, message: String) -> crate::Result<IndexContext> {
    let conn = state.open_db()?;
    let recipes = Recipe::list_all(&conn)?
        .into_iter()
        .map(|recipe| recipe.values)
        .collect();

    Ok(IndexContext {
        fields: FIELDS.to_vec(),
        recipes,
        xml_exists: state.config.snapshot_path().exists(),
        xml_url: state.config.snapshot_url(),
        message,
    })
}
