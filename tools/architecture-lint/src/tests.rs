//! Rule coverage for each zone.

use std::path::Path;

use rstest::rstest;

use super::*;

fn breaches_in(file: &str, contents: &str) -> Vec<Breach> {
    match lint_sources(&[LintSource::new(file, contents)]) {
        Ok(()) => Vec::new(),
        Err(LintError::Violations(violations)) => {
            violations.into_iter().map(|violation| violation.breach).collect()
        }
        Err(other) => panic!("expected violations, got {other}"),
    }
}

#[rstest]
#[case("backend/src/domain/user.rs", Some(Zone::Domain))]
#[case("backend/src/inbound/http/users.rs", Some(Zone::Inbound))]
#[case("backend/src/outbound/memory/mod.rs", Some(Zone::Outbound))]
#[case("backend/crates/pagination/src/lib.rs", Some(Zone::Pagination))]
#[case("backend/src/server/mod.rs", None)]
#[case("backend/src/domainish.rs", None)]
fn zones_follow_the_directory_layout(#[case] file: &str, #[case] zone: Option<Zone>) {
    assert_eq!(Zone::of(Path::new(file)), zone);
}

#[rstest]
#[case("backend/src/domain/user_service.rs", "use mockable::Clock; use tracing::warn; fn f(c: &dyn Clock) { warn!(\"x\"); let _ = c.local(); }")]
#[case("backend/src/domain/user_service_tests.rs", "use chrono::{DateTime, Local, Utc}; fn f(t: DateTime<Utc>) -> DateTime<Local> { t.with_timezone(&Local) }")]
#[case("backend/src/inbound/http/users.rs", "use crate::domain::ports::UsersQuery; use actix_web::web; fn f(_q: web::Data<dyn UsersQuery>) {}")]
#[case("backend/src/inbound/http/error.rs", "fn f() { let _ = chrono::Local::now(); }")]
#[case("backend/src/outbound/persistence/pool.rs", "use diesel_async::AsyncPgConnection; use user_registry::domain::UserRecord;")]
#[case("backend/crates/pagination/src/lib.rs", "use serde::Serialize; #[derive(thiserror::Error, Debug)] #[error(\"x\")] struct E;")]
#[case("backend/src/main.rs", "use user_registry::outbound::memory::InMemoryUserRepository; fn main() { let _ = std::time::Instant::now(); }")]
fn allowed_dependencies_pass(#[case] file: &str, #[case] contents: &str) {
    let breaches = breaches_in(file, contents);
    assert!(breaches.is_empty(), "{breaches:?}");
}

#[rstest]
#[case("backend/src/domain/user.rs", "use crate::inbound::http::ErrorDto;", Breach::Module { zone: Zone::Domain, module: "inbound" })]
#[case("backend/src/domain/user.rs", "use super::super::outbound::memory;", Breach::Module { zone: Zone::Domain, module: "outbound" })]
#[case("backend/src/inbound/http/users.rs", "use user_registry::outbound::persistence::DbPool;", Breach::Module { zone: Zone::Inbound, module: "outbound" })]
#[case("backend/src/outbound/memory/mod.rs", "fn f() -> crate::inbound::http::ApiResult<()> { Ok(()) }", Breach::Module { zone: Zone::Outbound, module: "inbound" })]
#[case("backend/src/domain/user.rs", "use utoipa::ToSchema; #[derive(ToSchema)] struct User;", Breach::Crate { zone: Zone::Domain, name: "utoipa" })]
#[case("backend/src/domain/user.rs", "use ortho_config::OrthoConfig;", Breach::Crate { zone: Zone::Domain, name: "ortho_config" })]
#[case("backend/src/inbound/http/users.rs", "use diesel::prelude::*;", Breach::Crate { zone: Zone::Inbound, name: "diesel" })]
#[case("backend/src/outbound/memory/mod.rs", "fn f() -> actix_web::HttpResponse { actix_web::HttpResponse::Ok().finish() }", Breach::Crate { zone: Zone::Outbound, name: "actix_web" })]
#[case("backend/crates/pagination/src/lib.rs", "use tokio::sync::Mutex;", Breach::Crate { zone: Zone::Pagination, name: "tokio" })]
#[case("backend/crates/pagination/src/lib.rs", "use user_registry::domain::UserSortKey;", Breach::Crate { zone: Zone::Pagination, name: "user_registry" })]
#[case("backend/src/domain/user_service.rs", "fn today() -> chrono::NaiveDate { chrono::Local::now().date_naive() }", Breach::WallClock { clock: "Local" })]
#[case("backend/src/domain/trace_id.rs", "use std::time::SystemTime; fn f() { let _ = SystemTime::now(); }", Breach::WallClock { clock: "SystemTime" })]
#[case("backend/src/inbound/http/state.rs", "use crate::domain::ports::UserRepository; struct S(std::sync::Arc<dyn UserRepository>);", Breach::DrivenPort { port: "UserRepository" })]
fn each_rule_is_reported(#[case] file: &str, #[case] contents: &str, #[case] expected: Breach) {
    assert_eq!(breaches_in(file, contents), [expected]);
}

#[rstest]
fn repeated_uses_of_one_crate_are_reported_once() {
    let breaches = breaches_in(
        "backend/src/domain/user.rs",
        "use actix_web::HttpResponse; fn f() -> actix_web::HttpResponse { HttpResponse::Ok().finish() }",
    );
    assert_eq!(breaches, [Breach::Crate { zone: Zone::Domain, name: "actix_web" }]);
}

#[rstest]
fn invalid_rust_in_a_zone_is_a_parse_error() {
    let result = lint_sources(&[LintSource::new("backend/src/domain/user.rs", "fn {")]);
    assert!(matches!(result, Err(LintError::Parse { .. })), "{result:?}");
}

#[rstest]
fn violation_display_names_file_and_rule() {
    let violation = Violation {
        file: "backend/src/domain/user.rs".into(),
        breach: Breach::WallClock { clock: "Utc" },
    };
    assert_eq!(
        violation.to_string(),
        "backend/src/domain/user.rs: domain must take the time from the injected clock, not `Utc::now`"
    );
}
