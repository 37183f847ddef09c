use chrono::Utc;
use diesel::prelude::*;

use crate::{
    domain::{
        todo::{NewTodo, Todo, TodoUpdate},
        types::{HubId, TodoId},
    },
    models::todo::{NewTodo as DbNewTodo, Todo as DbTodo, UpdateTodo as DbUpdateTodo},
    repository::{
        DieselRepository, TodoListQuery, TodoReader, TodoWriter,
        errors::{RepositoryError, RepositoryResult},
    },
};

impl TodoReader for DieselRepository {
    fn get_todo_by_id(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<Option<Todo>> {
        use crate::schema::todos;

        let mut conn = self.conn()?;
        let db_todo = todos::table
            .filter(todos::id.eq(id.get()))
            .filter(todos::hub_id.eq(hub_id.get()))
            .first::<DbTodo>(&mut conn)
            .optional()?;

        db_todo
            .map(Todo::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_todos(&self, query: TodoListQuery) -> RepositoryResult<Vec<Todo>> {
        use crate::schema::todos;

        let mut conn = self.conn()?;
        let mut items = todos::table
            .filter(todos::hub_id.eq(query.hub_id.get()))
            .into_boxed();
        if let Some(owner_id) = query.owner_id {
            items = items.filter(todos::owner_id.eq(owner_id.get()));
        }

        items
            .order(todos::created_at.desc())
            .then_order_by(todos::id.desc())
            .load::<DbTodo>(&mut conn)?
            .into_iter()
            .map(|db_todo| Todo::try_from(db_todo).map_err(RepositoryError::from))
            .collect()
    }
}

impl TodoWriter for DieselRepository {
    fn create_todo(&self, new_todo: &NewTodo) -> RepositoryResult<Todo> {
        use crate::schema::todos;

        let mut conn = self.conn()?;
        let db_new_todo = DbNewTodo::from_domain(new_todo, Utc::now().naive_utc());

        let db_todo = diesel::insert_into(todos::table)
            .values(&db_new_todo)
            .get_result::<DbTodo>(&mut conn)?;

        Todo::try_from(db_todo).map_err(RepositoryError::from)
    }

    fn update_todo(
        &self,
        id: TodoId,
        hub_id: HubId,
        updates: &TodoUpdate,
    ) -> RepositoryResult<Todo> {
        use crate::schema::todos;

        let mut conn = self.conn()?;
        let changeset = DbUpdateTodo::from_domain(updates, Utc::now().naive_utc());

        let db_todo = diesel::update(
            todos::table
                .filter(todos::id.eq(id.get()))
                .filter(todos::hub_id.eq(hub_id.get())),
        )
        .set(&changeset)
        .get_result::<DbTodo>(&mut conn)?;

        Todo::try_from(db_todo).map_err(RepositoryError::from)
    }

    fn delete_todo(&self, id: TodoId, hub_id: HubId) -> RepositoryResult<()> {
        use crate::schema::todos;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            todos::table
                .filter(todos::id.eq(id.get()))
                .filter(todos::hub_id.eq(hub_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
