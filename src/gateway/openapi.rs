//! OpenAPI documentation for the JSON API
//!
//! - OpenAPI JSON: `http://localhost:3000/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::core_types::MealCode;
use crate::gateway::handlers::HealthResponse;
use crate::gateway::types::{OrderRequest, SubmissionData, SubmissionStatus};
use crate::models::Order;

/// Main API Documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SPML Desk API",
        version = "1.0.0",
        description = "Special meal request intake: validates passenger meal orders against flight reference data.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health::health_check,
        crate::gateway::handlers::order::create_order,
    ),
    components(
        schemas(
            HealthResponse,
            OrderRequest,
            SubmissionData,
            SubmissionStatus,
            MealCode,
            Order,
        )
    ),
    tags(
        (name = "Orders", description = "Special meal order intake"),
        (name = "System", description = "Health checks and system info")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "SPML Desk API");
        assert_eq!(spec.info.version, "1.0.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let json = ApiDoc::openapi().to_json().unwrap();
        assert!(json.contains("SPML Desk API"));
    }

    #[test]
    fn test_endpoints_registered() {
        let paths = ApiDoc::openapi().paths;
        assert!(paths.paths.contains_key("/api/v1/health"));
        assert!(paths.paths.contains_key("/api/v1/orders"));
    }

    #[test]
    fn test_schemas_registered() {
        let components = ApiDoc::openapi().components.expect("should have components");
        assert!(components.schemas.contains_key("OrderRequest"));
        assert!(components.schemas.contains_key("MealCode"));
    }
}
