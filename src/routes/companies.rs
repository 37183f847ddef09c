use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::companies::{
    CompanyExportQueryForm, CompanyListQueryForm, CreateCompanyForm, UpdateCompanyForm,
};
use crate::forms::upload::UploadSpreadsheetForm;
use crate::repository::DieselRepository;
use crate::routes::{
    created_response, error_response, json_response, no_content_response, read_upload_bytes,
    xlsx_response,
};
use crate::services::companies as service;
use crate::spreadsheet::companies::{EXPORT_FILE_NAME, TEMPLATE_FILE_NAME};

#[get("/companies")]
pub async fn list_companies(
    query: web::Query<CompanyListQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::list_companies(repo.get_ref(), &user, query.into_inner());
    json_response(result, "Failed to list companies")
}

#[post("/companies")]
pub async fn create_company(
    form: web::Json<CreateCompanyForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_company(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create company")
}

#[get("/companies/{id:\\d+}")]
pub async fn get_company(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::get_company(repo.get_ref(), &user, id.into_inner());
    json_response(result, "Failed to load company")
}

#[patch("/companies/{id:\\d+}")]
pub async fn update_company(
    id: web::Path<i32>,
    form: web::Json<UpdateCompanyForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::update_company(repo.get_ref(), &user, id.into_inner(), form.into_inner());
    json_response(result, "Failed to update company")
}

#[delete("/companies/{id:\\d+}")]
pub async fn delete_company(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::delete_company(repo.get_ref(), &user, id.into_inner());
    no_content_response(result, "Failed to delete company")
}

#[post("/companies/import")]
pub async fn import_companies(
    MultipartForm(form): MultipartForm<UploadSpreadsheetForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let bytes = match read_upload_bytes(&form.file) {
        Ok(bytes) => bytes,
        Err(err) => return error_response(err, "Failed to import companies"),
    };
    let result = service::import_companies(repo.get_ref(), &user, form.file_name(), &bytes);
    json_response(result, "Failed to import companies")
}

#[get("/companies/export")]
pub async fn export_companies(
    query: web::Query<CompanyExportQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::export_companies(repo.get_ref(), &user, query.into_inner());
    xlsx_response(result, EXPORT_FILE_NAME, "Failed to export companies")
}

#[get("/companies/template")]
pub async fn company_template(user: AuthenticatedUser) -> impl Responder {
    xlsx_response(
        service::company_template(&user),
        TEMPLATE_FILE_NAME,
        "Failed to build company template",
    )
}
