use axum::extract::{Multipart, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use bytes::Bytes;

use crate::application::ports::{Classifier, LabelDecoder};
use crate::application::services::CategorizationError;
use crate::domain::{OutputFormat, SourceFormat};
use crate::infrastructure::tabular::CodecFactory;
use crate::presentation::state::AppState;

/// Response header carrying non-fatal warnings on a successful download
/// (a file attachment has no page to flash on).
pub const WARNING_HEADER: &str = "x-categorizer-warning";

/// Handle a categorization upload: validate the multipart form, parse
/// the file, run predictions when the model is available, and return
/// the augmented table as a download.
///
/// Every rejection redirects back to the form with a flash message;
/// a missing model degrades to returning the file unchanged.
#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler<C, D>(
    State(state): State<AppState<C, D>>,
    mut multipart: Multipart,
) -> Response
where
    C: Classifier + 'static,
    D: LabelDecoder + 'static,
{
    let mut datafile: Option<(Option<String>, Bytes)> = None;
    let mut supplier_column = String::new();
    let mut description_column = String::new();
    let mut categorization_column = String::new();
    let mut output_token = String::new();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart body");
                return flash_redirect("error", &format!("Failed to read upload: {}", e));
            }
        };

        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "datafile" {
            let filename = field.file_name().map(str::to_string);
            let data = match field.bytes().await {
                Ok(d) => d,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read file bytes");
                    return flash_redirect("error", &format!("Failed to read file: {}", e));
                }
            };
            datafile = Some((filename, data));
        } else {
            let value = match field.text().await {
                Ok(t) => t.trim().to_string(),
                Err(e) => {
                    tracing::error!(field = %name, error = %e, "Failed to read form field");
                    return flash_redirect("error", &format!("Failed to read upload: {}", e));
                }
            };
            match name.as_str() {
                "variable1" => supplier_column = value,
                "variable2" => description_column = value,
                "variable3" => categorization_column = value,
                "output_format" => output_token = value,
                _ => {}
            }
        }
    }

    let Some((filename, data)) = datafile else {
        return flash_redirect("error", "No file selected");
    };
    let filename = filename.unwrap_or_default();
    if filename.is_empty() {
        return flash_redirect("error", "No file selected");
    }
    let Some(source_format) = SourceFormat::from_filename(&filename) else {
        tracing::warn!(filename = %filename, "Unsupported upload extension");
        return flash_redirect(
            "error",
            "Invalid file type. Please upload CSV, Excel, JSON, or TXT files.",
        );
    };
    if description_column.is_empty() {
        return flash_redirect("error", "Description column name is required");
    }

    tracing::debug!(
        filename = %filename,
        bytes = data.len(),
        description_column = %description_column,
        "Processing upload"
    );

    let mut table = match CodecFactory::reader_for(source_format)
        .read_table(&data)
        .await
    {
        Ok(t) => t,
        Err(e) => {
            tracing::error!(error = %e, "Failed to parse upload");
            return flash_redirect("error", &format!("Failed to read file: {}", e));
        }
    };
    tracing::debug!(
        rows = table.n_rows(),
        columns = table.n_columns(),
        "File parsed"
    );

    if !table.has_column(&description_column) {
        let available = table.columns().join(", ");
        return flash_redirect(
            "error",
            &format!(
                "Column \"{}\" not found. Available columns: {}",
                description_column, available
            ),
        );
    }

    let mut warnings = Vec::new();
    for (role, column) in [
        ("supplier", &supplier_column),
        ("categorization", &categorization_column),
    ] {
        if !column.is_empty() && !table.has_column(column) {
            tracing::warn!(role, column = %column, "Optional column not present in upload");
            warnings.push(format!("Optional {} column \"{}\" not found", role, column));
        }
    }

    if state.categorization_service.is_ready() {
        match state
            .categorization_service
            .categorize(&mut table, &description_column)
            .await
        {
            Ok(()) => {}
            Err(CategorizationError::ModelNotReady) => {
                warnings.push("Classification model not available - returning original data".to_string());
            }
            Err(e) => {
                tracing::error!(error = %e, "Categorization failed");
                return flash_redirect("error", &format!("Data processing failed: {}", e));
            }
        }
    } else {
        tracing::warn!("Classification model not available, returning data unchanged");
        warnings.push("Classification model not available - returning original data".to_string());
    }

    let output_format = OutputFormat::from_token(&output_token);
    let body = match CodecFactory::writer_for(output_format)
        .write_table(&table)
        .await
    {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize output");
            return flash_redirect(
                "error",
                &format!("Failed to generate {} file: {}", output_format.extension(), e),
            );
        }
    };

    let download_name = format!(
        "categorized_data_{}.{}",
        chrono::Local::now().format("%Y%m%d_%H%M%S"),
        output_format.extension()
    );
    tracing::info!(
        filename = %download_name,
        bytes = body.len(),
        warnings = warnings.len(),
        "Returning categorized file"
    );

    let mut response = (
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                output_format.content_type().to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download_name),
            ),
        ],
        body,
    )
        .into_response();

    if !warnings.is_empty()
        && let Ok(value) = HeaderValue::from_str(&warnings.join("; "))
    {
        response.headers_mut().insert(WARNING_HEADER, value);
    }
    response
}

fn flash_redirect(level: &str, message: &str) -> Response {
    let target = format!(
        "/data-categorizer?level={}&flash={}",
        level,
        urlencoding::encode(message)
    );
    Redirect::to(&target).into_response()
}
