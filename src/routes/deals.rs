use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::deals::{CreateDealForm, DealListQueryForm, UpdateDealForm};
use crate::forms::upload::UploadSpreadsheetForm;
use crate::repository::DieselRepository;
use crate::routes::{
    created_response, error_response, json_response, no_content_response, read_upload_bytes,
    xlsx_response,
};
use crate::services::deals as service;
use crate::spreadsheet::deals::{EXPORT_FILE_NAME, TEMPLATE_FILE_NAME};

#[get("/deals")]
pub async fn list_deals(
    query: web::Query<DealListQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::list_deals(repo.get_ref(), &user, query.into_inner());
    json_response(result, "Failed to list deals")
}

#[post("/deals")]
pub async fn create_deal(
    form: web::Json<CreateDealForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_deal(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create deal")
}

#[get("/deals/{id:\\d+}")]
pub async fn get_deal(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        service::get_deal(repo.get_ref(), &user, id.into_inner()),
        "Failed to load deal",
    )
}

#[patch("/deals/{id:\\d+}")]
pub async fn update_deal(
    id: web::Path<i32>,
    form: web::Json<UpdateDealForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::update_deal(repo.get_ref(), &user, id.into_inner(), form.into_inner());
    json_response(result, "Failed to update deal")
}

#[delete("/deals/{id:\\d+}")]
pub async fn delete_deal(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    no_content_response(
        service::delete_deal(repo.get_ref(), &user, id.into_inner()),
        "Failed to delete deal",
    )
}

#[post("/deals/import")]
pub async fn import_deals(
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let bytes = match read_upload_bytes(&form.file) {
        Ok(bytes) => bytes,
        Err(err) => return error_response(err, "Failed to import deals"),
    };
    let result = service::import_deals(repo.get_ref(), &user, form.file_name(), &bytes);
    json_response(result, "Failed to import deals")
}

#[get("/deals/export")]
pub async fn export_deals(
    query: web::Query<DealListQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::export_deals(repo.get_ref(), &user, query.into_inner());
    xlsx_response(result, EXPORT_FILE_NAME, "Failed to export deals")
}

#[get("/deals/template")]
pub async fn deal_template(user: AuthenticatedUser) -> impl Responder {
    xlsx_response(
        service::deal_template(&user),
        TEMPLATE_FILE_NAME,
        "Failed to build deal template",
    )
}
