//! Media API handlers
//!
//! Upload is multipart; download and file routes answer with raw bytes.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::dto::{MediaDto, MediaTypeParams, UploadMediaForm};
use crate::application::services::UploadMedia;
use crate::domain::{DomainError, EntityType, Media, MediaType};
use crate::interfaces::http::common::{
    error_response, ok, ApiError, ApiResponse, ApiResult, PaginatedResponse, PaginationParams,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::interfaces::http::router::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/media", get(list_media))
        .route("/media/upload", post(upload_media))
        .route("/media/my-uploads", get(my_uploads))
        .route("/media/{id}", get(get_media).delete(delete_media))
        .route("/media/{id}/download", get(download_media))
        .route(
            "/media/entity/{entity_type}/{entity_id}",
            get(list_media_by_entity),
        )
        .route("/media/files/{*key}", get(serve_file))
}

fn to_dto(state: &AppState, media: Media) -> MediaDto {
    let url = state.media.url_for(&media);
    MediaDto::new(media, url)
}

fn bad_multipart(err: impl std::fmt::Display) -> ApiError {
    error_response(DomainError::Validation(format!("Invalid multipart body: {}", err)))
}

fn parse_optional<T>(value: Option<String>) -> Result<Option<T>, ApiError>
where
    T: std::str::FromStr<Err = DomainError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(error_response)
}

fn file_response(content_type: &str, filename: &str, bytes: Vec<u8>) -> Response {
    let safe: String = filename
        .chars()
        .filter(|c| *c != '"' && !c.is_control())
        .collect();
    let disposition = format!("inline; filename=\"{}\"", safe);
    (
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

#[utoipa::path(
    post,
    path = "/api/v1/media/upload",
    tag = "Media",
    security(("bearer_auth" = [])),
    request_body(content = UploadMediaForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "File stored", body = ApiResponse<MediaDto>),
        (status = 400, description = "Empty, oversized or unsupported file")
    )
)]
pub async fn upload_media(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<MediaDto>>), ApiError> {
    let mut upload = UploadMedia::default();
    let mut media_type = None;
    let mut entity_type = None;
    let mut has_file = false;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                upload.original_filename = field.file_name().unwrap_or_default().to_string();
                upload.content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                upload.bytes = field.bytes().await.map_err(bad_multipart)?.to_vec();
                has_file = true;
            }
            "mediaType" => media_type = Some(field.text().await.map_err(bad_multipart)?),
            "entityType" => entity_type = Some(field.text().await.map_err(bad_multipart)?),
            "entityId" => upload.entity_id = Some(field.text().await.map_err(bad_multipart)?),
            "description" => {
                upload.description = Some(field.text().await.map_err(bad_multipart)?)
            }
            other => tracing::debug!(field = other, "Ignoring unknown multipart field"),
        }
    }

    if !has_file {
        return Err(error_response(DomainError::Validation(
            "Missing 'file' field".into(),
        )));
    }
    upload.media_type = parse_optional::<MediaType>(media_type)?;
    upload.entity_type = parse_optional::<EntityType>(entity_type)?;

    let media = state
        .media
        .upload(&user.user_id, upload)
        .await
        .map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(to_dto(&state, media))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media metadata", body = ApiResponse<MediaDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_media(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<MediaDto> {
    let media = state.media.get(id).await.map_err(error_response)?;
    ok(to_dto(&state, media))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/{id}/download",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "File bytes with the stored content type"),
        (status = 400, description = "Media was deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn download_media(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let download = state.media.download(id).await.map_err(error_response)?;
    Ok(file_response(
        &download.content_type,
        &download.media.original_filename,
        download.bytes,
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/files/{key}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("key" = String, Path, description = "Storage key")),
    responses(
        (status = 200, description = "File bytes"),
        (status = 404, description = "No object under this key")
    )
)]
pub async fn serve_file(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Response, ApiError> {
    let object = state.media.fetch_object(&key).await.map_err(error_response)?;
    let filename = key.rsplit('/').next().unwrap_or(key.as_str());
    Ok(file_response(&object.content_type, filename, object.bytes))
}

#[utoipa::path(
    get,
    path = "/api/v1/media/entity/{entity_type}/{entity_id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(
        ("entity_type" = String, Path, description = "DEVICE, CUSTOMER, REPAIR_SESSION, ..."),
        ("entity_id" = String, Path, description = "ID of the owning record"),
        MediaTypeParams
    ),
    responses((status = 200, description = "Active files attached to the record", body = ApiResponse<Vec<MediaDto>>))
)]
pub async fn list_media_by_entity(
    State(state): State<AppState>,
    Path((entity_type, entity_id)): Path<(String, String)>,
    Query(params): Query<MediaTypeParams>,
) -> ApiResult<Vec<MediaDto>> {
    let entity_type = entity_type
        .parse::<EntityType>()
        .map_err(error_response)?;
    let media_type = parse_optional::<MediaType>(params.media_type)?;
    let media = state
        .media
        .list_by_entity(entity_type, &entity_id, media_type)
        .await
        .map_err(error_response)?;
    ok(media.into_iter().map(|m| to_dto(&state, m)).collect())
}

#[utoipa::path(
    get,
    path = "/api/v1/media/my-uploads",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Files uploaded by the caller", body = ApiResponse<PaginatedResponse<MediaDto>>))
)]
pub async fn my_uploads(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<MediaDto>> {
    let result = state
        .media
        .my_uploads(&user.user_id, params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, |m| to_dto(&state, m)))
}

#[utoipa::path(
    get,
    path = "/api/v1/media",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(PaginationParams),
    responses((status = 200, description = "Active files", body = ApiResponse<PaginatedResponse<MediaDto>>))
)]
pub async fn list_media(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> ApiResult<PaginatedResponse<MediaDto>> {
    let result = state
        .media
        .list_active(params.into())
        .await
        .map_err(error_response)?;
    ok(PaginatedResponse::from_result(result, |m| to_dto(&state, m)))
}

#[utoipa::path(
    delete,
    path = "/api/v1/media/{id}",
    tag = "Media",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Media ID")),
    responses(
        (status = 200, description = "Media deactivated and bytes removed"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_media(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<()> {
    state.media.delete(id).await.map_err(error_response)?;
    ok(())
}
