use utoipa::{Modify, OpenApi};

use crate::features::firs::{dtos as firs_dtos, handlers as firs_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // FIRs
        firs_handlers::register_fir,
        firs_handlers::list_firs_by_submitter,
        firs_handlers::list_all_firs,
        firs_handlers::list_priority_alerts,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // FIRs
            firs_dtos::RegisterFirDto,
            firs_dtos::FirRegisteredDto,
            firs_dtos::FirResponseDto,
            ApiResponse<firs_dtos::FirRegisteredDto>,
            ApiResponse<Vec<firs_dtos::FirResponseDto>>,
        )
    ),
    tags(
        (name = "firs", description = "First Information Report filing and triage"),
    ),
    info(
        title = "FIR Registry API",
        version = "0.1.0",
        description = "API documentation for the FIR registry",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
