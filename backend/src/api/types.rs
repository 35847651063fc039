//! REST API request/response types.

use axum::extract::Multipart;
use serde::{Deserialize, Serialize};

use crate::error::ServerError;
use crate::models::Identity;

/// Multipart field carrying the spreadsheet.
pub const FILE_FIELD: &str = "file";

/// Fields of a `POST /api/candidates` multipart request.
#[derive(Debug, Clone, Default)]
pub struct CandidateUpload {
    pub identity: Identity,
    pub file: Option<Vec<u8>>,
    pub file_name: Option<String>,
}

impl CandidateUpload {
    /// Drain a multipart body. Unknown fields are ignored; absent text fields
    /// stay empty and are caught by identity validation.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, ServerError> {
        let mut upload = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ServerError::bad_request(format!("Multipart error: {}", e)))?
        {
            let name = field.name().unwrap_or("").to_string();

            match name.as_str() {
                "name" => upload.identity.name = read_text(field).await?,
                "surname" => upload.identity.surname = read_text(field).await?,
                FILE_FIELD => {
                    upload.file_name = field.file_name().map(|s| s.to_string());
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| ServerError::bad_request(format!("Read error: {}", e)))?;
                    upload.file = Some(bytes.to_vec());
                }
                _ => {}
            }
        }

        Ok(upload)
    }
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ServerError> {
    field
        .text()
        .await
        .map_err(|e| ServerError::bad_request(format!("Read error: {}", e)))
}

/// Response of `DELETE /api/candidates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeleteAllResponse {
    pub deleted: u64,
}
