//! Users API handlers.
//!
//! ```text
//! POST   /users            {"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","birthDate":"1990-01-01"}
//! PUT    /users/{id}       same body as POST
//! GET    /users?from=2022-01-01&to=2022-12-31&page=0&size=4&sort=birthDate,desc
//! DELETE /users/{userId}
//! ```

use actix_web::{HttpRequest, HttpResponse, delete, get, post, put, web};
use pagination::{Page, PageRequest, PaginationError, Sort};

use crate::domain::{Error, UserId, UserSortKey};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{
    ErrorDto, json_error_handler, path_error_handler, query_error_handler,
};
use crate::inbound::http::schemas::UserPageSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::users_dto::{ListUsersQuery, UserDto, UserRequest};

const SORT_PARAM: &str = "sort";

fn map_pagination_error(err: PaginationError) -> Error {
    Error::invalid_argument(err.to_string())
}

/// Collect every `sort` value in query-string order.
fn sort_specs(query_string: &str) -> Result<Vec<String>, Error> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map_err(|err| Error::invalid_argument(err.to_string()))?;
    Ok(pairs
        .into_inner()
        .into_iter()
        .filter(|(key, _)| key == SORT_PARAM)
        .map(|(_, value)| value)
        .collect())
}

fn page_request(query: &ListUsersQuery, query_string: &str) -> Result<PageRequest<UserSortKey>, Error> {
    let sort = Sort::parse(sort_specs(query_string)?).map_err(map_pagination_error)?;
    let request = PageRequest::try_new(query.page, query.size).map_err(map_pagination_error)?;
    Ok(request.with_sort(sort))
}

/// Create a user.
///
/// Any `id` in the body is ignored; the store assigns one.
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 503, description = "Backing store unavailable", body = ErrorDto)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserRequest>,
) -> ApiResult<HttpResponse> {
    let created = state
        .users_command
        .create_user(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(UserDto::from(created)))
}

/// Replace every mutable field of an existing user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "User updated", body = UserDto),
        (status = 400, description = "Validation failed or malformed body", body = ErrorDto),
        (status = 404, description = "No user with this identifier", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 503, description = "Backing store unavailable", body = ErrorDto)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
    payload: web::Json<UserRequest>,
) -> ApiResult<web::Json<UserDto>> {
    let id = UserId::new(path.into_inner());
    let updated = state
        .users_command
        .update_user_by_id(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(updated.into()))
}

/// List users one page at a time, optionally filtered by birth date.
///
/// The filter applies only when both `from` and `to` are given and
/// non-empty.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    params(
        ListUsersQuery,
        (
            "sort" = Option<Vec<String>>,
            Query,
            description = "`property[,asc|desc]`, repeatable. Properties: id, firstName, lastName, email, birthDate.",
            example = "birthDate,desc"
        )
    ),
    responses(
        (status = 200, description = "One page of users", body = UserPageSchema),
        (status = 400, description = "Invalid date range, paging or sort", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 503, description = "Backing store unavailable", body = ErrorDto)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Page<UserDto>>> {
    let query = query.into_inner();
    let page = page_request(&query, req.query_string())?;
    let users = state
        .users
        .list_users(query.from.as_deref(), query.to.as_deref(), page)
        .await?;
    Ok(web::Json(users.map(UserDto::from)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{userId}",
    params(("userId" = i64, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Identifier is not an integer", body = ErrorDto),
        (status = 404, description = "No user with this identifier", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto),
        (status = 503, description = "Backing store unavailable", body = ErrorDto)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{userId}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    state
        .users_command
        .delete_user_by_id(UserId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the users endpoints and the extractor error handlers that keep
/// their failures in the shared error body.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use user_registry::inbound::http::users::configure;
///
/// let app = App::new().configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(create_user)
        .service(update_user)
        .service(list_users)
        .service(delete_user);
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
