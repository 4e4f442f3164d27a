use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::utils::pagination::{PaginationMeta, PaginationParams};

/// A generated marketing site owned by one account. `content` holds the
/// wizard/AI output (sections, palette, copy) as one JSON document.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub slug: String,
    pub business_type: String,
    #[schema(value_type = Object)]
    pub content: Value,
    pub published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateSiteDto {
    #[validate(length(min = 1, message = "اسم الموقع مطلوب"))]
    pub name: String,
    #[validate(length(min = 1, message = "المعرّف مطلوب"))]
    pub slug: String,
    #[validate(length(min = 1, message = "نوع النشاط مطلوب"))]
    pub business_type: String,
    #[schema(value_type = Object)]
    pub content: Value,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSiteDto {
    #[validate(length(min = 1, message = "اسم الموقع مطلوب"))]
    pub name: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub content: Option<Value>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SiteFilterParams {
    /// Partial, case-insensitive match on the site name.
    pub name: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl SiteFilterParams {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedSitesResponse {
    pub data: Vec<Site>,
    pub meta: PaginationMeta,
}
