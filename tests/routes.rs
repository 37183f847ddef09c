use actix_identity::{Identity, IdentityMiddleware};
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::http::StatusCode;
use actix_web::{App, HttpMessage, HttpRequest, HttpResponse, test, web};
use dealboard::domain::auth::AuthenticatedUser;
use dealboard::models::config::ServerConfig;
use dealboard::repository::DieselRepository;
use dealboard::routes::auth::encode_token;
use serde_json::{Value, json};

mod common;

const SECRET: &str = "integration-secret";

fn server_config() -> ServerConfig {
    ServerConfig {
        domain: "localhost".to_string(),
        address: "127.0.0.1".to_string(),
        port: 8080,
        database_url: ":memory:".to_string(),
        secret: SECRET.to_string(),
        upload_limit_mb: 1,
    }
}

fn signed_token(roles: &[&str]) -> String {
    let user = AuthenticatedUser {
        sub: "7".to_string(),
        email: "ann@example.com".to_string(),
        hub_id: 1,
        name: "Ann".to_string(),
        roles: roles.iter().map(|role| role.to_string()).collect(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    encode_token(&user, SECRET).unwrap()
}

fn token(roles: &[&str]) -> String {
    format!("Bearer {}", signed_token(roles))
}

/// Stands in for the provider's sign-in: stores the posted token as the
/// session identity.
async fn sign_in(req: HttpRequest, token: String) -> HttpResponse {
    Identity::login(&req.extensions(), token).unwrap();
    HttpResponse::Ok().finish()
}

macro_rules! admin_app {
    ($test_db:expr) => {
        test::init_service(
            App::new()
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(
                        CookieSessionStore::default(),
                        Key::from(&[7u8; 64][..]),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .route("/sign-in", web::post().to(sign_in))
                .configure(|cfg| dealboard::configure_extractors(cfg, 1024 * 1024))
                .service(web::scope("/api/admin").configure(dealboard::routes::configure))
                .app_data(web::Data::new(DieselRepository::new($test_db.pool())))
                .app_data(web::Data::new(server_config())),
        )
        .await
    };
}

#[actix_web::test]
async fn requests_without_a_token_are_unauthorized() {
    let test_db = common::TestDb::new("routes_unauthorized.db");
    let app = admin_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/admin/deals/stats")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Unauthorized"}));
}

#[actix_web::test]
async fn identity_cookie_authenticates_without_a_header() {
    let test_db = common::TestDb::new("routes_cookie.db");
    let app = admin_app!(test_db);

    let req = test::TestRequest::post()
        .uri("/sign-in")
        .set_payload(signed_token(&["crm"]))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .next()
        .expect("session cookie")
        .into_owned();

    let req = test::TestRequest::get()
        .uri("/api/admin/todos")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn callers_without_the_access_role_are_forbidden() {
    let test_db = common::TestDb::new("routes_forbidden.db");
    let app = admin_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/admin/todos")
        .insert_header(("Authorization", token(&["sales"])))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn stats_on_an_empty_pipeline_are_zero() {
    let test_db = common::TestDb::new("routes_stats.db");
    let app = admin_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/admin/deals/stats?range=last_7_days&ownerId=")
        .insert_header(("Authorization", token(&["crm"])))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["range"], "last_7_days");
    assert_eq!(body["data"]["totalDeals"], 0);
    assert_eq!(body["data"]["conversionRate"], 0.0);
    assert_eq!(body["data"]["changes"]["newDealsChangePercent"], 0.0);
}

#[actix_web::test]
async fn malformed_stats_filter_is_a_bad_request() {
    let test_db = common::TestDb::new("routes_bad_filter.db");
    let app = admin_app!(test_db);

    let req = test::TestRequest::get()
        .uri("/api/admin/deals/stats?companyId=abc")
        .insert_header(("Authorization", token(&["crm"])))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].is_string());
}

#[actix_web::test]
async fn company_lifecycle_over_http() {
    let test_db = common::TestDb::new("routes_companies.db");
    let app = admin_app!(test_db);
    let auth = token(&["crm"]);

    let req = test::TestRequest::post()
        .uri("/api/admin/companies")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"fullName": "Acme Corp", "email": "sales@acme.test"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["industry"], "Unknown Industry");
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/api/admin/companies/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"status": "Inactive"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "Inactive");
    assert_eq!(updated["fullName"], "Acme Corp");

    let req = test::TestRequest::delete()
        .uri(&format!("/api/admin/companies/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/api/admin/companies/{id}"))
        .insert_header(("Authorization", auth.clone()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/admin/activity?limit=5")
        .insert_header(("Authorization", auth))
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    let entries = feed["data"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["performedBy"]["email"], "ann@example.com");
}

#[actix_web::test]
async fn bulk_delete_counts_missing_todos_as_failures() {
    let test_db = common::TestDb::new("routes_bulk.db");
    let app = admin_app!(test_db);
    let auth = token(&["crm"]);

    let req = test::TestRequest::post()
        .uri("/api/admin/todos")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"title": "Call Acme"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/admin/todos/bulk-delete")
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"ids": [id, 9999]}))
        .to_request();
    let outcome: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(outcome, json!({"requested": 2, "succeeded": 1, "failed": 1}));

    let req = test::TestRequest::get()
        .uri("/api/admin/todos")
        .insert_header(("Authorization", auth))
        .to_request();
    let remaining: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(remaining.as_array().unwrap().len(), 0);
}
