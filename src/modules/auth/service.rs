use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::password::{hash_password, verify_password};

use super::model::{LoginRequest, RegisterRequestDto, User};

pub struct AuthService;

impl AuthService {
    pub async fn register_user(db: &PgPool, dto: RegisterRequestDto) -> Result<User, AppError> {
        let existing_user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?;

        if existing_user.is_some() {
            warn!(email = %dto.email, "Registration attempt with existing email");
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Email already exists"
            )));
        }

        let hashed_password = hash_password(&dto.password)?;

        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (name, email, password)
             VALUES ($1, $2, $3)
             RETURNING id, name, email, created_at",
        )
        .bind(&dto.name)
        .bind(&dto.email)
        .bind(&hashed_password)
        .fetch_one(db)
        .await?;

        info!(user.id = %user.id, "User registered");

        Ok(user)
    }

    pub async fn login_user(db: &PgPool, dto: LoginRequest) -> Result<User, AppError> {
        #[derive(sqlx::FromRow)]
        struct UserWithPassword {
            id: Uuid,
            name: String,
            email: String,
            password: String,
            created_at: chrono::DateTime<chrono::Utc>,
        }

        let user_with_password = sqlx::query_as::<_, UserWithPassword>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(&dto.email)
        .fetch_optional(db)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password".to_string()))?;

        let is_valid = verify_password(&dto.password, &user_with_password.password)?;

        if !is_valid {
            return Err(AppError::unauthorized(
                "Invalid email or password".to_string(),
            ));
        }

        Ok(User {
            id: user_with_password.id,
            name: user_with_password.name,
            email: user_with_password.email,
            created_at: user_with_password.created_at,
        })
    }

    pub async fn find_by_id(db: &PgPool, user_id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, created_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;

        Ok(user)
    }
}
