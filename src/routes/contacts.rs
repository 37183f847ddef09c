use actix_web::{Responder, get, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::contacts::{ContactListQueryForm, CreateContactForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response};
use crate::services::contacts as service;

#[get("/contacts")]
pub async fn list_contacts(
    query: web::Query<ContactListQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::list_contacts(repo.get_ref(), &user, query.into_inner());
    json_response(result, "Failed to list contacts")
}

#[post("/contacts")]
pub async fn create_contact(
    form: web::Json<CreateContactForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_contact(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create contact")
}
