use actix_web::{Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::prospects::CreateProspectForm;
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response};
use crate::services::prospects as service;

#[get("/prospects")]
pub async fn list_prospects(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        service::list_prospects(repo.get_ref(), &user),
        "Failed to list prospects",
    )
}

#[post("/prospects")]
pub async fn create_prospect(
    form: web::Json<CreateProspectForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_prospect(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create prospect")
}
