use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::PaginationMeta;

use super::model::{CreateSiteDto, PaginatedSitesResponse, Site, SiteFilterParams, UpdateSiteDto};

const SITE_COLUMNS: &str =
    "id, owner_id, name, slug, business_type, content, published, created_at, updated_at";

pub struct SiteService;

impl SiteService {
    pub async fn create_site(
        db: &PgPool,
        owner_id: Uuid,
        dto: CreateSiteDto,
    ) -> Result<Site, AppError> {
        let site = sqlx::query_as::<_, Site>(&format!(
            "INSERT INTO sites (owner_id, name, slug, business_type, content)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {SITE_COLUMNS}"
        ))
        .bind(owner_id)
        .bind(&dto.name)
        .bind(&dto.slug)
        .bind(&dto.business_type)
        .bind(&dto.content)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                warn!(owner.id = %owner_id, slug = %dto.slug, "Duplicate site slug");
                return AppError::bad_request(anyhow::anyhow!("Slug already exists"));
            }
            AppError::from(e)
        })?;

        info!(site.id = %site.id, owner.id = %owner_id, "Site created");

        Ok(site)
    }

    pub async fn get_sites(
        db: &PgPool,
        owner_id: Uuid,
        filters: SiteFilterParams,
    ) -> Result<PaginatedSitesResponse, AppError> {
        let pagination = filters.pagination();
        let limit = pagination.limit();
        let offset = pagination.offset();

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM sites
             WHERE owner_id = $1
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')",
        )
        .bind(owner_id)
        .bind(&filters.name)
        .fetch_one(db)
        .await?;

        let data = sqlx::query_as::<_, Site>(&format!(
            "SELECT {SITE_COLUMNS} FROM sites
             WHERE owner_id = $1
               AND ($2::text IS NULL OR name ILIKE '%' || $2 || '%')
             ORDER BY updated_at DESC
             LIMIT $3 OFFSET $4"
        ))
        .bind(owner_id)
        .bind(&filters.name)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await?;

        Ok(PaginatedSitesResponse {
            data,
            meta: PaginationMeta {
                total,
                limit,
                offset,
            },
        })
    }

    pub async fn get_site(db: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Site, AppError> {
        sqlx::query_as::<_, Site>(&format!(
            "SELECT {SITE_COLUMNS} FROM sites WHERE id = $1 AND owner_id = $2"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Site not found")))
    }

    pub async fn update_site(
        db: &PgPool,
        owner_id: Uuid,
        id: Uuid,
        dto: UpdateSiteDto,
    ) -> Result<Site, AppError> {
        sqlx::query_as::<_, Site>(&format!(
            "UPDATE sites
             SET name = COALESCE($3, name),
                 content = COALESCE($4, content),
                 updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {SITE_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .bind(&dto.name)
        .bind(&dto.content)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Site not found")))
    }

    pub async fn delete_site(db: &PgPool, owner_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM sites WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Site not found")));
        }

        info!(site.id = %id, owner.id = %owner_id, "Site deleted");

        Ok(())
    }

    pub async fn publish_site(db: &PgPool, owner_id: Uuid, id: Uuid) -> Result<Site, AppError> {
        sqlx::query_as::<_, Site>(&format!(
            "UPDATE sites SET published = TRUE, updated_at = NOW()
             WHERE id = $1 AND owner_id = $2
             RETURNING {SITE_COLUMNS}"
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Site not found")))
    }
}
