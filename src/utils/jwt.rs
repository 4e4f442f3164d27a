use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::JwtConfig;
use crate::modules::auth::model::{Claims, TokenKind};
use crate::utils::errors::AppError;

pub fn create_access_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(user_id, email, TokenKind::Access, jwt_config.access_token_expiry, jwt_config)
}

pub fn create_refresh_token(
    user_id: Uuid,
    email: &str,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    create_token(user_id, email, TokenKind::Refresh, jwt_config.refresh_token_expiry, jwt_config)
}

fn create_token(
    user_id: Uuid,
    email: &str,
    kind: TokenKind,
    expiry_secs: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + expiry_secs as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        kind,
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Decodes and verifies a token, additionally checking that it is of the
/// expected kind so a refresh token can never stand in for an access token.
pub fn verify_token(
    token: &str,
    jwt_config: &JwtConfig,
    expected_kind: TokenKind,
) -> Result<Claims, AppError> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Invalid or expired token".to_string()))?;

    if claims.kind != expected_kind {
        return Err(AppError::unauthorized("Invalid or expired token".to_string()));
    }

    Ok(claims)
}
