use sqlx::PgPool;

use crate::config::ai::AiConfig;
use crate::config::cors::CorsConfig;
use crate::config::database::init_db_pool;
use crate::config::environment::Environment;
use crate::config::jwt::JwtConfig;
use crate::modules::generate::provider::AiProvider;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub environment: Environment,
    pub ai: AiProvider,
}

pub async fn init_app_state() -> AppState {
    AppState {
        db: init_db_pool().await,
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        environment: Environment::from_env(),
        ai: AiProvider::new(AiConfig::from_env()),
    }
}
