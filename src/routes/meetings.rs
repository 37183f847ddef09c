use actix_web::{Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::meetings::{CreateMeetingForm, MeetingRangeQueryForm, UpdateMeetingForm};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::meetings as service;

#[get("/meetings")]
pub async fn list_meetings(
    query: web::Query<MeetingRangeQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::list_meetings(repo.get_ref(), &user, query.into_inner());
    json_response(result, "Failed to list meetings")
}

#[post("/meetings")]
pub async fn create_meeting(
    form: web::Json<CreateMeetingForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_meeting(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create meeting")
}

#[get("/meetings/{id:\\d+}")]
pub async fn get_meeting(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        service::get_meeting(repo.get_ref(), &user, id.into_inner()),
        "Failed to load meeting",
    )
}

#[patch("/meetings/{id:\\d+}")]
pub async fn update_meeting(
    id: web::Path<i32>,
    form: web::Json<UpdateMeetingForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::update_meeting(repo.get_ref(), &user, id.into_inner(), form.into_inner());
    json_response(result, "Failed to update meeting")
}

#[delete("/meetings/{id:\\d+}")]
pub async fn delete_meeting(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    no_content_response(
        service::delete_meeting(repo.get_ref(), &user, id.into_inner()),
        "Failed to delete meeting",
    )
}
