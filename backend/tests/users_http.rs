//! End-to-end HTTP tests for the users endpoints over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use user_registry::Trace;
use user_registry::domain::{DATE_ORDER_MESSAGE, TRACE_ID_HEADER, UserService};
use user_registry::domain::validation::DATE_FORMAT_MESSAGE;
use user_registry::inbound::http::state::HttpState;
use user_registry::inbound::http::users;
use user_registry::outbound::memory::InMemoryUserRepository;

#[fixture]
fn http_state() -> web::Data<HttpState> {
    let service = UserService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(DefaultClock),
        18,
    );
    web::Data::new(HttpState::from_service(Arc::new(service)))
}

fn user(first_name: &str, birth_date: &str) -> Value {
    json!({
        "firstName": first_name,
        "lastName": "Tester",
        "email": format!("{}@example.com", first_name.to_lowercase()),
        "birthDate": birth_date,
    })
}

async fn json_body(res: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(res).await;
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

async fn create<S>(app: &S, body: &Value) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(body)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    json_body(res).await
}

async fn get<S>(app: &S, uri: &str) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request())
        .await;
    let status = res.status();
    (status, json_body(res).await)
}

fn first_names(page: &Value) -> Vec<String> {
    page["content"]
        .as_array()
        .expect("content array")
        .iter()
        .filter_map(|u| u["firstName"].as_str().map(str::to_owned))
        .collect()
}

#[rstest]
#[actix_web::test]
async fn create_then_list_round_trips_fields(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .wrap(Trace)
            .configure(users::configure),
    )
    .await;

    let created = create(&app, &user("Ada", "1990-01-01")).await;
    assert_eq!(
        created,
        json!({
            "id": 1,
            "firstName": "Ada",
            "lastName": "Tester",
            "email": "ada@example.com",
            "birthDate": "1990-01-01",
        })
    );

    let (status, page) = get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"], json!([created]));
    assert_eq!(page["totalElements"], json!(1));
    assert_eq!(page["last"], json!(true));
}

#[rstest]
#[actix_web::test]
async fn invalid_user_reports_every_violation(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .configure(users::configure),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .set_json(json!({
                "firstName": " ",
                "lastName": "Tester",
                "email": "not-an-email",
                "birthDate": "2020-01-01",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    assert_eq!(
        body["errors"],
        json!([
            "Field name firstName must not be blank",
            "Field name email must be a well-formed email address",
            "Field name birthDate User must be older than 18 years old",
        ])
    );
}

#[rstest]
#[actix_web::test]
async fn malformed_json_is_a_bad_request(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .configure(users::configure),
    )
    .await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/users")
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"firstName\":")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = json_body(res).await;
    let errors = body["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert_ne!(errors[0], json!(DATE_FORMAT_MESSAGE));
}

#[rstest]
#[actix_web::test]
async fn listing_filters_sorts_and_pages(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .configure(users::configure),
    )
    .await;
    for (name, born) in [
        ("Cleo", "1980-05-05"),
        ("Ada", "1990-01-01"),
        ("Bea", "1995-06-30"),
        ("Dan", "2000-12-31"),
        ("Eve", "2001-01-01"),
    ] {
        create(&app, &user(name, born)).await;
    }

    let (status, page) = get(&app, "/users?from=1990-01-01&to=2000-12-31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first_names(&page), ["Ada", "Bea", "Dan"]);

    let (_, page) = get(&app, "/users?sort=birthDate,desc&size=2&page=1").await;
    assert_eq!(first_names(&page), ["Bea", "Ada"]);
    assert_eq!(page["totalPages"], json!(3));
    assert_eq!(page["number"], json!(1));

    let (_, page) = get(&app, "/users?from=&to=2000-12-31").await;
    assert_eq!(page["totalElements"], json!(5));
}

#[rstest]
#[case("/users?from=2022/01/01&to=2022-12-31", DATE_FORMAT_MESSAGE)]
#[case("/users?from=2022-12-31&to=2022-01-01", DATE_ORDER_MESSAGE)]
#[case("/users?from=2022-01-01&to=2022-01-01", DATE_ORDER_MESSAGE)]
#[case("/users?size=0", "Page size must not be less than one")]
#[case("/users?page=-1", "Page index must not be less than zero")]
#[case("/users?sort=password", "No sortable property 'password'")]
#[case(
    "/users?page=4294967295&size=4294967295",
    "Page offset must not exceed 9223372036854775807"
)]
#[actix_web::test]
async fn bad_listing_parameters_are_rejected(
    http_state: web::Data<HttpState>,
    #[case] uri: &str,
    #[case] message: &str,
) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .configure(users::configure),
    )
    .await;

    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!([message]));
    assert!(body["localDateTime"].is_string());
}

#[rstest]
#[actix_web::test]
async fn update_replaces_fields_or_reports_missing(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .configure(users::configure),
    )
    .await;
    create(&app, &user("Ada", "1990-01-01")).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/1")
            .set_json(user("Grace", "1985-12-09"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = json_body(res).await;
    assert_eq!(updated["id"], json!(1));
    assert_eq!(updated["firstName"], json!("Grace"));
    assert_eq!(updated["birthDate"], json!("1985-12-09"));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/users/99")
            .set_json(user("Grace", "1985-12-09"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["errors"], json!(["User not found with ID: 99"]));
}

#[rstest]
#[actix_web::test]
async fn delete_returns_no_content_then_not_found(http_state: web::Data<HttpState>) {
    let app = actix_test::init_service(
        App::new()
            .app_data(http_state)
            .wrap(Trace)
            .configure(users::configure),
    )
    .await;
    create(&app, &user("Ada", "1990-01-01")).await;

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/users/1").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    assert!(actix_test::read_body(res).await.is_empty());

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/users/1").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let body = json_body(res).await;
    assert_eq!(body["errors"], json!(["User with this id not found!"]));
}
