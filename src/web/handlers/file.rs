//! File and folder handlers.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::AppState;
use crate::file::{NodeType, ParentId, UploadRequest};
use crate::web::dto::{FileDataQuery, FileResponse, ListFilesQuery, UploadFileRequest};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, OptionalAuthUser};

/// POST /files - Create a folder or upload a file.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    body: Result<Json<UploadFileRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<FileResponse>), ApiError> {
    let req = upload_body(body)?;

    // Data is only decoded for named file and image nodes; folders ignore it.
    let name = req.name.unwrap_or_default();
    let node_type = req.node_type.unwrap_or_default();
    let carries_content = !name.is_empty()
        && node_type
            .parse::<NodeType>()
            .is_ok_and(|t| t.has_content());

    let content = match req.data.as_deref() {
        Some(data) if carries_content && !data.is_empty() => Some(
            STANDARD
                .decode(data.trim())
                .map_err(|_| ApiError::bad_request("Invalid data"))?,
        ),
        _ => None,
    };

    let request = UploadRequest {
        name,
        node_type,
        parent_id: req.parent_id.map(ParentId::from).unwrap_or_default(),
        is_public: req.is_public.unwrap_or(false),
        content,
    };

    let node = state.files.create_node(&user.user_id, request).await?;
    Ok((StatusCode::CREATED, Json(node.into())))
}

/// GET /files/:id - Get an owned file record.
pub async fn get_file(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let node = state.files.get_node(&user.user_id, &id).await?;
    Ok(Json(node.into()))
}

/// GET /files - List one page of owned records under a parent.
pub async fn list_files(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<FileResponse>>, ApiError> {
    let nodes = state
        .files
        .list_children(&user.user_id, &query.parent(), query.page())
        .await?;
    Ok(Json(nodes.into_iter().map(FileResponse::from).collect()))
}

/// PUT /files/:id/publish
pub async fn publish_file(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let node = state.files.set_public(&user.user_id, &id, true).await?;
    Ok(Json(node.into()))
}

/// PUT /files/:id/unpublish
pub async fn unpublish_file(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FileResponse>, ApiError> {
    let node = state.files.set_public(&user.user_id, &id, false).await?;
    Ok(Json(node.into()))
}

/// GET /files/:id/data - Raw file content, or a thumbnail with `?size=N`.
///
/// Public files are readable without a token.
pub async fn get_file_data(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(requester): OptionalAuthUser,
    Path(id): Path<String>,
    Query(query): Query<FileDataQuery>,
) -> Result<Response<Body>, ApiError> {
    let requester = requester.as_deref();

    let content = match query.size.as_deref() {
        None => state.files.read_content(requester, &id).await?,
        Some(size) => {
            let width: u32 = size
                .trim()
                .parse()
                .map_err(|_| ApiError::bad_request("Invalid size"))?;
            state.files.read_thumbnail(requester, &id, width).await?
        }
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content.mime_type)
        .header(header::CONTENT_LENGTH, content.bytes.len())
        .body(Body::from(content.bytes))
        .map_err(|e| {
            tracing::error!("Failed to build response: {}", e);
            ApiError::internal()
        })
}

/// Unpack an upload body.
///
/// A request without a JSON body is treated as an empty upload so the usual
/// field errors apply. A body over the size limit is reported as a too large
/// file.
fn upload_body(
    body: Result<Json<UploadFileRequest>, JsonRejection>,
) -> Result<UploadFileRequest, ApiError> {
    match body {
        Ok(Json(req)) => Ok(req),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(ApiError::bad_request("File too large"))
        }
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(UploadFileRequest::default()),
        Err(rejection) => {
            tracing::debug!("Rejected upload body: {}", rejection.body_text());
            Err(ApiError::bad_request("Invalid request body"))
        }
    }
}
