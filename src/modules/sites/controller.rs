use axum::http::StatusCode;
use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use uuid::Uuid;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorEnvelope};
use crate::validator::ValidatedJson;

use super::model::{CreateSiteDto, PaginatedSitesResponse, Site, SiteFilterParams, UpdateSiteDto};
use super::service::SiteService;

#[utoipa::path(
    post,
    path = "/api/sites",
    request_body = CreateSiteDto,
    responses(
        (status = 201, description = "Site created", body = Site),
        (status = 400, description = "Slug already exists", body = ErrorEnvelope),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn create_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateSiteDto>,
) -> Result<(StatusCode, Json<Site>), AppError> {
    let site = SiteService::create_site(&state.db, auth_user.user_id()?, dto).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

#[utoipa::path(
    get,
    path = "/api/sites",
    params(SiteFilterParams),
    responses(
        (status = 200, description = "Paginated list of the caller's sites", body = PaginatedSitesResponse),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn get_sites(
    State(state): State<AppState>,
    auth_user: AuthUser,
    filters: Result<Query<SiteFilterParams>, QueryRejection>,
) -> Result<Json<PaginatedSitesResponse>, AppError> {
    let Query(filters) = filters
        .map_err(|e| AppError::bad_request(anyhow::anyhow!("Invalid query parameters: {}", e)))?;

    let sites = SiteService::get_sites(&state.db, auth_user.user_id()?, filters).await?;
    Ok(Json(sites))
}

#[utoipa::path(
    get,
    path = "/api/sites/{id}",
    params(("id" = Uuid, Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site details", body = Site),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 404, description = "Site not found", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn get_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Site>, AppError> {
    let site = SiteService::get_site(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(site))
}

#[utoipa::path(
    patch,
    path = "/api/sites/{id}",
    params(("id" = Uuid, Path, description = "Site ID")),
    request_body = UpdateSiteDto,
    responses(
        (status = 200, description = "Site updated", body = Site),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 404, description = "Site not found", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn update_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSiteDto>,
) -> Result<Json<Site>, AppError> {
    let site = SiteService::update_site(&state.db, auth_user.user_id()?, id, dto).await?;
    Ok(Json(site))
}

#[utoipa::path(
    delete,
    path = "/api/sites/{id}",
    params(("id" = Uuid, Path, description = "Site ID")),
    responses(
        (status = 204, description = "Site deleted"),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 404, description = "Site not found", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn delete_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    SiteService::delete_site(&state.db, auth_user.user_id()?, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/sites/{id}/publish",
    params(("id" = Uuid, Path, description = "Site ID")),
    responses(
        (status = 200, description = "Site published", body = Site),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 404, description = "Site not found", body = ErrorEnvelope)
    ),
    tag = "Sites",
    security(("bearer_auth" = []))
)]
pub async fn publish_site(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Site>, AppError> {
    let site = SiteService::publish_site(&state.db, auth_user.user_id()?, id).await?;
    Ok(Json(site))
}
