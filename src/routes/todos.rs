use actix_web::{Responder, delete, get, patch, post, web};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::todos::{
    BulkDeleteTodosForm, BulkUpdateTodosForm, CreateTodoForm, TodoListQueryForm, UpdateTodoForm,
};
use crate::repository::DieselRepository;
use crate::routes::{created_response, json_response, no_content_response};
use crate::services::todos as service;

#[get("/todos")]
pub async fn list_todos(
    query: web::Query<TodoListQueryForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::list_todos(repo.get_ref(), &user, query.into_inner());
    json_response(result, "Failed to list todos")
}

#[post("/todos")]
pub async fn create_todo(
    form: web::Json<CreateTodoForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::create_todo(repo.get_ref(), &user, form.into_inner());
    created_response(result, "Failed to create todo")
}

#[get("/todos/{id:\\d+}")]
pub async fn get_todo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    json_response(
        service::get_todo(repo.get_ref(), &user, id.into_inner()),
        "Failed to load todo",
    )
}

#[patch("/todos/{id:\\d+}")]
pub async fn update_todo(
    id: web::Path<i32>,
    form: web::Json<UpdateTodoForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::update_todo(repo.get_ref(), &user, id.into_inner(), form.into_inner());
    json_response(result, "Failed to update todo")
}

#[delete("/todos/{id:\\d+}")]
pub async fn delete_todo(
    id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    no_content_response(
        service::delete_todo(repo.get_ref(), &user, id.into_inner()),
        "Failed to delete todo",
    )
}

#[post("/todos/bulk-delete")]
pub async fn bulk_delete_todos(
    form: web::Json<BulkDeleteTodosForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::bulk_delete_todos(repo.into_inner(), &user, form.into_inner()).await;
    json_response(result, "Failed to bulk delete todos")
}

#[post("/todos/bulk-update")]
pub async fn bulk_update_todos(
    form: web::Json<BulkUpdateTodosForm>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let result = service::bulk_update_todos(repo.into_inner(), &user, form.into_inner()).await;
    json_response(result, "Failed to bulk update todos")
}
