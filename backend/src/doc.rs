//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the four users operations and the health probes
//! - **Schemas**: request and response bodies, plus the [`UserPageSchema`]
//!   wrapper standing in for `pagination::Page<UserDto>`
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::error::ErrorDto;
use crate::inbound::http::schemas::UserPageSchema;
use crate::inbound::http::users_dto::{UserDto, UserRequest};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User registry API",
        description = "Create, update, delete and page through users, with birth-date filtering and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(UserRequest, UserDto, UserPageSchema, ErrorDto)),
    tags(
        (name = "users", description = "Operations on registered users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and schema fields.

    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn openapi_documents_every_users_route() {
        let doc = ApiDoc::openapi();
        let users = doc.paths.paths.get("/users").expect("/users path");
        assert!(users.post.is_some(), "POST /users");
        assert!(users.get.is_some(), "GET /users");
        assert!(
            doc.paths
                .paths
                .get("/users/{id}")
                .and_then(|item| item.put.as_ref())
                .is_some(),
            "PUT /users/{{id}}"
        );
        assert!(
            doc.paths
                .paths
                .get("/users/{userId}")
                .and_then(|item| item.delete.as_ref())
                .is_some(),
            "DELETE /users/{{userId}}"
        );
    }

    #[test]
    fn openapi_error_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("ErrorDto").expect("ErrorDto schema");

        assert_object_schema_has_field(error_schema, "localDateTime");
        assert_object_schema_has_field(error_schema, "errors");
    }

    #[test]
    fn openapi_user_schema_has_wire_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("UserDto").expect("UserDto schema");

        for field in ["id", "firstName", "lastName", "email", "birthDate"] {
            assert_object_schema_has_field(user_schema, field);
        }
    }
}
