//! Common utilities for file upload handlers

use axum::extract::Multipart;
use cassette_core::AppError;

/// Extract file data, filename, and content type from a multipart form.
/// Only one field with the given name is accepted; duplicates are rejected.
/// Fields with other names are skipped.
pub async fn extract_multipart_field(
    mut multipart: Multipart,
    field_name: &str,
    missing_message: &str,
) -> Result<(Vec<u8>, String, String), AppError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string()).unwrap_or_default();

        if name == field_name {
            if file_data.is_some() {
                return Err(AppError::InvalidInput(format!(
                    "Multiple '{}' fields are not allowed; send exactly one",
                    field_name
                )));
            }
            filename = field.file_name().map(|s: &str| s.to_string());
            content_type = field.content_type().map(|s: &str| s.to_string());

            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidInput(format!("Failed to read file data: {}", e)))?;

            file_data = Some(data.to_vec());
        }
    }

    let file_data =
        file_data.ok_or_else(|| AppError::InvalidInput(missing_message.to_string()))?;

    let original_filename = filename.unwrap_or_else(|| "unknown".to_string());
    let content_type = content_type.unwrap_or_else(|| "application/octet-stream".to_string());

    Ok((file_data, original_filename, content_type))
}
