//! JSON handlers of the admin API.
//!
//! Handlers extract the caller, hand the payload to a service and translate
//! the outcome into a response; they hold no business rules of their own.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentDisposition;
use actix_web::{HttpResponse, web};
use log::error;
use serde::Serialize;

use crate::dto::ErrorBody;
use crate::services::{ServiceError, ServiceResult};
use crate::spreadsheet::XLSX_CONTENT_TYPE;

pub mod activity;
pub mod auth;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod meetings;
pub mod prospects;
pub mod stats;
pub mod todos;

/// Registers every admin endpoint under the current scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(stats::deal_stats)
        .service(companies::list_companies)
        .service(companies::create_company)
        .service(companies::import_companies)
        .service(companies::export_companies)
        .service(companies::company_template)
        .service(companies::get_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(prospects::list_prospects)
        .service(prospects::create_prospect)
        .service(deals::list_deals)
        .service(deals::create_deal)
        .service(deals::import_deals)
        .service(deals::export_deals)
        .service(deals::deal_template)
        .service(deals::get_deal)
        .service(deals::update_deal)
        .service(deals::delete_deal)
        .service(todos::list_todos)
        .service(todos::create_todo)
        .service(todos::bulk_delete_todos)
        .service(todos::bulk_update_todos)
        .service(todos::get_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo)
        .service(meetings::list_meetings)
        .service(meetings::create_meeting)
        .service(meetings::get_meeting)
        .service(meetings::update_meeting)
        .service(meetings::delete_meeting)
        .service(activity::recent_activity);
}

/// Maps a service failure onto its status code and `{error}` body.
/// Internal details are logged and never sent to the caller.
pub fn error_response(err: ServiceError, context: &str) -> HttpResponse {
    let (status, message) = match err {
        ServiceError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        ServiceError::Forbidden => (StatusCode::FORBIDDEN, "Forbidden".to_string()),
        ServiceError::NotFound => (StatusCode::NOT_FOUND, "Not found".to_string()),
        ServiceError::Form(message) => (StatusCode::BAD_REQUEST, message),
        ServiceError::Conflict(message) => (StatusCode::CONFLICT, message),
        ServiceError::Internal(message) => {
            error!("{context}: {message}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_string(),
            )
        }
    };
    HttpResponse::build(status).json(ErrorBody::new(message))
}

/// `200 OK` with the JSON value, or the mapped error.
pub fn json_response<T: Serialize>(result: ServiceResult<T>, context: &str) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Ok().json(value),
        Err(err) => error_response(err, context),
    }
}

/// `201 Created` with the stored record, or the mapped error.
pub fn created_response<T: Serialize>(result: ServiceResult<T>, context: &str) -> HttpResponse {
    match result {
        Ok(value) => HttpResponse::Created().json(value),
        Err(err) => error_response(err, context),
    }
}

pub fn no_content_response(result: ServiceResult<()>, context: &str) -> HttpResponse {
    match result {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(err) => error_response(err, context),
    }
}

/// Workbook download named `file_name`.
pub fn xlsx_response(result: ServiceResult<Vec<u8>>, file_name: &str, context: &str) -> HttpResponse {
    match result {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(XLSX_CONTENT_TYPE)
            .insert_header(ContentDisposition::attachment(file_name))
            .body(bytes),
        Err(err) => error_response(err, context),
    }
}

/// Reads an uploaded temp file fully into memory.
pub(crate) fn read_upload_bytes(
    file: &actix_multipart::form::tempfile::TempFile,
) -> ServiceResult<Vec<u8>> {
    std::fs::read(file.file.path())
        .map_err(|e| ServiceError::Internal(format!("failed to read upload: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn internal_errors_hide_details() {
        let response = error_response(
            ServiceError::Internal("disk I/O error".to_string()),
            "Failed to load",
        );
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), br#"{"error":"Internal Server Error"}"#);
    }

    #[actix_web::test]
    async fn form_errors_keep_their_message() {
        let response = error_response(ServiceError::Form("invalid ownerId".to_string()), "x");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body()).await.unwrap();
        assert_eq!(body.as_ref(), br#"{"error":"invalid ownerId"}"#);
    }
}
