use actix_web::{Responder, get, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::stats::StatsQueryForm;
use crate::repository::DieselRepository;
use crate::routes::json_response;
use crate::services::stats as service;

#[get("/deals/stats")]
pub async fn deal_stats(
    query: web::Query<StatsQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::deal_stats(repo.into_inner(), &user, query.into_inner()).await;
    json_response(result, "GET /admin/deals/stats error")
}

