use diesel::prelude::*;

use crate::db::models::sprint::{NewSprint, Sprint, SprintChangeset};
use crate::query::ResolvedQuery;

pub struct SprintsRepo;

impl SprintsRepo {
    pub fn insert(
        conn: &mut PgConnection,
        new_sprint: &NewSprint,
    ) -> Result<Sprint, diesel::result::Error> {
        diesel::insert_into(crate::schema::sprints::table)
            .values(new_sprint)
            .get_result(conn)
    }

    pub fn find_by_id(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
    ) -> Result<Option<Sprint>, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        sprints
            .filter(id.eq(sprint_id))
            .first::<Sprint>(conn)
            .optional()
    }

    /// Backstop lookup for the one-sprint-per-end-date constraint; the unique
    /// index still catches races.
    pub fn end_date_taken(
        conn: &mut PgConnection,
        end_date: chrono::NaiveDate,
        exclude_id: Option<uuid::Uuid>,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        match exclude_id {
            Some(excluded) => diesel::select(diesel::dsl::exists(
                sprints.filter(end.eq(end_date)).filter(id.ne(excluded)),
            ))
            .get_result(conn),
            None => diesel::select(diesel::dsl::exists(sprints.filter(end.eq(end_date))))
                .get_result(conn),
        }
    }

    pub fn update(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
        changes: &SprintChangeset,
    ) -> Result<Sprint, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        diesel::update(sprints.filter(id.eq(sprint_id)))
            .set(changes)
            .get_result(conn)
    }

    pub fn delete_by_id(
        conn: &mut PgConnection,
        sprint_id: uuid::Uuid,
    ) -> Result<usize, diesel::result::Error> {
        use crate::schema::sprints::dsl::*;
        diesel::delete(sprints.filter(id.eq(sprint_id))).execute(conn)
    }

    /// Search/order/paginate the sprint collection. Default order is
    /// ascending by end date.
    pub fn search(
        conn: &mut PgConnection,
        query: &ResolvedQuery,
    ) -> Result<(Vec<Sprint>, i64), diesel::result::Error> {
        use crate::schema::sprints::dsl as s;

        let mut count_query = s::sprints.into_boxed();
        let mut page_query = s::sprints.into_boxed();

        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(s::name.ilike(pattern.clone()));
            page_query = page_query.filter(s::name.ilike(pattern));
        }

        let count = count_query.count().get_result::<i64>(conn)?;

        if query.ordering.is_empty() {
            page_query = page_query.order(s::end.asc());
        } else {
            for (i, order) in query.ordering.iter().enumerate() {
                page_query = match (order.field.as_str(), order.descending, i == 0) {
                    ("end", false, true) => page_query.order(s::end.asc()),
                    ("end", true, true) => page_query.order(s::end.desc()),
                    ("end", false, false) => page_query.then_order_by(s::end.asc()),
                    ("end", true, false) => page_query.then_order_by(s::end.desc()),
                    ("name", false, true) => page_query.order(s::name.asc()),
                    ("name", true, true) => page_query.order(s::name.desc()),
                    ("name", false, false) => page_query.then_order_by(s::name.asc()),
                    ("name", true, false) => page_query.then_order_by(s::name.desc()),
                    // resolve_query already rejected anything else
                    _ => page_query,
                };
            }
        }

        let results = page_query
            .offset(query.offset())
            .limit(query.page_size)
            .load::<Sprint>(conn)?;

        Ok((results, count))
    }
}
