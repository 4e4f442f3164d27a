use axum::Json;
use axum::extract::State;

use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::{AppError, ErrorEnvelope};
use crate::validator::ValidatedJson;

use super::model::{GenerateSiteRequest, GenerateSiteResponse};

/// Generate a draft site from the wizard's answers
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body = GenerateSiteRequest,
    responses(
        (status = 200, description = "Draft site generated", body = GenerateSiteResponse),
        (status = 401, description = "Unauthorized", body = ErrorEnvelope),
        (status = 422, description = "Validation error", body = ErrorEnvelope),
        (status = 502, description = "AI provider failure", body = ErrorEnvelope)
    ),
    tag = "Generation",
    security(("bearer_auth" = []))
)]
pub async fn generate_site(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<GenerateSiteRequest>,
) -> Result<Json<GenerateSiteResponse>, AppError> {
    let draft = state.ai.generate_site(&dto).await?;
    Ok(Json(draft))
}
