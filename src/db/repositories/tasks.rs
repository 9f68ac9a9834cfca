use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::task::{NewTask, Task, TaskChangeset, TaskRecord};
use crate::query::ResolvedQuery;

/// Entity-reference filters, resolved to internal ids by the service layer.
#[derive(Default, Clone, Debug)]
pub struct TaskFilters {
    pub sprint_id: Option<Uuid>,
    pub assigned_id: Option<Uuid>,
}

pub struct TasksRepo;

impl TasksRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_task: &NewTask,
    ) -> Result<Task, diesel::result::Error> {
        diesel::insert_into(crate::schema::tasks::table)
            .values(new_task)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Option<Task>, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        tasks.filter(id.eq(task_id)).first::<Task>(conn).optional()
    }

    /// A task plus its assignee's username in one round trip.
    pub fn find_record_by_id(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<Option<TaskRecord>, diesel::result::Error> {
        use crate::schema::{tasks, users};
        let row = tasks::table
            .left_join(users::table)
            .filter(tasks::id.eq(task_id))
            .select((Task::as_select(), users::username.nullable()))
            .first::<(Task, Option<String>)>(conn)
            .optional()?;
        Ok(row.map(TaskRecord::from))
    }

    pub fn update(
        conn: &mut PgConnection,
        task_id: Uuid,
        changes: &TaskChangeset,
    ) -> Result<Task, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::update(tasks.filter(id.eq(task_id)))
            .set(changes)
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        task_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(tasks.filter(id.eq(task_id))).execute(conn)
    }

    /// Sprint deletion takes its tasks with it, inside the caller's
    /// transaction.
    pub fn delete_by_sprint(
        conn: &mut PgConnection,
        target_sprint_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::tasks::dsl::*;
        diesel::delete(tasks.filter(sprint_id.eq(target_sprint_id))).execute(conn)
    }

    /// Filter/search/order/paginate the task collection. Default order is
    /// manual sort position, then name.
    pub fn search(
        conn: &mut PgConnection,
        filters: &TaskFilters,
        query: &ResolvedQuery,
    ) -> Result<(Vec<TaskRecord>, i64), diesel::result::Error> {
        use crate::schema::{tasks::dsl as t, users};

        let mut count_query = t::tasks.into_boxed();
        let mut page_query = t::tasks.left_join(users::table).into_boxed();

        if let Some(sprint) = filters.sprint_id {
            count_query = count_query.filter(t::sprint_id.eq(sprint));
            page_query = page_query.filter(t::sprint_id.eq(sprint));
        }
        if let Some(assignee) = filters.assigned_id {
            count_query = count_query.filter(t::assigned_id.eq(assignee));
            page_query = page_query.filter(t::assigned_id.eq(assignee));
        }
        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(
                t::name
                    .ilike(pattern.clone())
                    .or(t::description.ilike(pattern.clone())),
            );
            page_query =
                page_query.filter(t::name.ilike(pattern.clone()).or(t::description.ilike(pattern)));
        }

        let count = count_query.count().get_result::<i64>(conn)?;

        if query.ordering.is_empty() {
            page_query = page_query.order((t::sort_order.asc(), t::name.asc()));
        } else {
            for (i, order) in query.ordering.iter().enumerate() {
                page_query = match (order.field.as_str(), order.descending, i == 0) {
                    ("order", false, true) => page_query.order(t::sort_order.asc()),
                    ("order", true, true) => page_query.order(t::sort_order.desc()),
                    ("order", false, false) => page_query.then_order_by(t::sort_order.asc()),
                    ("order", true, false) => page_query.then_order_by(t::sort_order.desc()),
                    ("name", false, true) => page_query.order(t::name.asc()),
                    ("name", true, true) => page_query.order(t::name.desc()),
                    ("name", false, false) => page_query.then_order_by(t::name.asc()),
                    ("name", true, false) => page_query.then_order_by(t::name.desc()),
                    ("status", false, true) => page_query.order(t::status.asc()),
                    ("status", true, true) => page_query.order(t::status.desc()),
                    ("status", false, false) => page_query.then_order_by(t::status.asc()),
                    ("status", true, false) => page_query.then_order_by(t::status.desc()),
                    ("due", false, true) => page_query.order(t::due.asc()),
                    ("due", true, true) => page_query.order(t::due.desc()),
                    ("due", false, false) => page_query.then_order_by(t::due.asc()),
                    ("due", true, false) => page_query.then_order_by(t::due.desc()),
                    ("started", false, true) => page_query.order(t::started.asc()),
                    ("started", true, true) => page_query.order(t::started.desc()),
                    ("started", false, false) => page_query.then_order_by(t::started.asc()),
                    ("started", true, false) => page_query.then_order_by(t::started.desc()),
                    ("completed", false, true) => page_query.order(t::completed.asc()),
                    ("completed", true, true) => page_query.order(t::completed.desc()),
                    ("completed", false, false) => page_query.then_order_by(t::completed.asc()),
                    ("completed", true, false) => page_query.then_order_by(t::completed.desc()),
                    // resolve_query already rejected anything else
                    _ => page_query,
                };
            }
        }

        let rows = page_query
            .offset(query.offset())
            .limit(query.page_size)
            .select((Task::as_select(), users::username.nullable()))
            .load::<(Task, Option<String>)>(conn)?;

        Ok((rows.into_iter().map(TaskRecord::from).collect(), count))
    }
}
