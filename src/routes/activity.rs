use actix_web::{Responder, get, web};

use crate::domain::auth::AuthenticatedUser;
use crate::dto::DataEnvelope;
use crate::forms::activity::ActivityQueryForm;
use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::activity as service;

#[get("/activity")]
pub async fn recent_activity(
    query: web::Query<ActivityQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::recent_activity(repo.get_ref(), &user, query.into_inner())
        .map(|data| DataEnvelope { data });
    json_response(result, "Failed to load activity feed")
}
