//! Admin backend of the sales dashboard.
//!
//! Layers follow the request path: `routes` extract the caller and payload,
//! `services` apply the rules, `repository` persists through Diesel. The
//! `client` module offers the same API to Rust callers.

#[cfg(any(feature = "server", feature = "client"))]
pub mod bulk;
#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod spreadsheet;

/// Role required for every admin endpoint.
pub const SERVICE_ACCESS_ROLE: &str = "crm";
/// Role additionally required for spreadsheet imports.
pub const SERVICE_ADMIN_ROLE: &str = "crm_admin";

#[cfg(feature = "server")]
pub use server::{configure_extractors, run};

#[cfg(feature = "server")]
mod server {
    use actix_cors::Cors;
    use actix_identity::IdentityMiddleware;
    use actix_multipart::form::MultipartFormConfig;
    use actix_session::{SessionMiddleware, storage::CookieSessionStore};
    use actix_web::cookie::Key;
    use actix_web::error::InternalError;
    use actix_web::{App, HttpResponse, HttpServer, middleware, web};

    use crate::db::establish_connection_pool;
    use crate::dto::ErrorBody;
    use crate::models::config::ServerConfig;
    use crate::repository::DieselRepository;

    fn bad_request(err: impl std::fmt::Display + std::fmt::Debug + 'static) -> actix_web::Error {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }

    /// Request extractor settings: malformed input becomes `400 {error}`.
    pub fn configure_extractors(cfg: &mut web::ServiceConfig, upload_limit: usize) {
        cfg.app_data(web::JsonConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::QueryConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(web::PathConfig::default().error_handler(|err, _| bad_request(err)))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(upload_limit)
                    .memory_limit(upload_limit)
                    .error_handler(|err, _| bad_request(err)),
            );
    }

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let pool = establish_connection_pool(&server_config.database_url).map_err(|e| {
            std::io::Error::other(format!("Failed to establish database connection: {e}"))
        })?;
        let repo = DieselRepository::new(pool);

        let secret_key = Key::try_from(server_config.secret.as_bytes()).map_err(|e| {
            std::io::Error::other(format!("Session secret must be at least 64 bytes: {e}"))
        })?;
        let bind_address = (server_config.address.clone(), server_config.port);
        let upload_limit = server_config.upload_limit_bytes();

        log::info!(
            "Starting dashboard API on {}:{}",
            bind_address.0,
            bind_address.1
        );

        HttpServer::new(move || {
            App::new()
                .wrap(Cors::permissive())
                .wrap(IdentityMiddleware::default())
                .wrap(
                    SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                        .cookie_secure(false)
                        .cookie_domain(Some(format!(".{}", server_config.domain)))
                        .build(),
                )
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .configure(|cfg| configure_extractors(cfg, upload_limit))
                .service(web::scope("/api/admin").configure(crate::routes::configure))
                .app_data(web::Data::new(repo.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
