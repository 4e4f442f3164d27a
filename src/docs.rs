use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::modules::auth::model::{AuthResponse, LoginRequest, RegisterRequestDto, User};
use crate::modules::generate::model::{GenerateSiteRequest, GenerateSiteResponse, SiteSection};
use crate::modules::sites::model::{
    CreateSiteDto, PaginatedSitesResponse, Site, UpdateSiteDto,
};
use crate::utils::errors::{ErrorEnvelope, ErrorMessage};
use crate::utils::pagination::{PaginationMeta, PaginationParams};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_session,
        crate::modules::auth::controller::logout_user,
        crate::modules::auth::controller::get_profile,
        crate::modules::sites::controller::create_site,
        crate::modules::sites::controller::get_sites,
        crate::modules::sites::controller::get_site,
        crate::modules::sites::controller::update_site,
        crate::modules::sites::controller::delete_site,
        crate::modules::sites::controller::publish_site,
        crate::modules::generate::controller::generate_site,
    ),
    components(
        schemas(
            User,
            RegisterRequestDto,
            LoginRequest,
            AuthResponse,
            Site,
            CreateSiteDto,
            UpdateSiteDto,
            PaginatedSitesResponse,
            GenerateSiteRequest,
            GenerateSiteResponse,
            SiteSection,
            ErrorEnvelope,
            ErrorMessage,
            PaginationMeta,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sessions: register, login, refresh, logout"),
        (name = "Sites", description = "Generated site persistence"),
        (name = "Generation", description = "AI draft generation")
    ),
    info(
        title = "PUIUX Click API",
        version = "0.1.0",
        description = "Backend for the PUIUX Click site builder: conversational wizard, AI generation, and site persistence.",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
