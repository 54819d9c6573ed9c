//! Media DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Media;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub id: i32,
    pub original_filename: String,
    pub stored_filename: String,
    pub file_size: i64,
    pub content_type: String,
    /// IMAGE, DOCUMENT or OTHER
    pub media_type: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub uploaded_by: String,
    pub description: Option<String>,
    pub is_active: bool,
    /// Where the stored bytes can be fetched
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MediaDto {
    pub fn new(media: Media, url: String) -> Self {
        Self {
            id: media.id,
            original_filename: media.original_filename,
            stored_filename: media.stored_filename,
            file_size: media.file_size,
            content_type: media.content_type,
            media_type: media.media_type.to_string(),
            entity_type: media.entity_type.map(|t| t.to_string()),
            entity_id: media.entity_id,
            uploaded_by: media.uploaded_by,
            description: media.description,
            is_active: media.is_active,
            url,
            created_at: media.created_at,
            updated_at: media.updated_at,
        }
    }
}

/// Multipart form accepted by the upload endpoint
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UploadMediaForm {
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    pub media_type: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(rename_all = "camelCase")]
pub struct MediaTypeParams {
    /// IMAGE, DOCUMENT or OTHER
    pub media_type: Option<String>,
}
