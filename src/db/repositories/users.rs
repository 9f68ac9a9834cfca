use diesel::prelude::*;
use uuid::Uuid;

use crate::db::models::user::{
    NewProfile, NewUser, Profile, ProfileChangeset, User, UserChangeset,
};
use crate::query::ResolvedQuery;

pub struct UsersRepo;

impl UsersRepo {
    pub fn find_by_id(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users.filter(id.eq(user_id)).first::<User>(conn).optional()
    }

    pub fn find_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        users
            .filter(username.eq(target_username))
            .first::<User>(conn)
            .optional()
    }

    pub fn exists_by_username(
        conn: &mut PgConnection,
        target_username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::select(diesel::dsl::exists(
            users.filter(username.eq(target_username)),
        ))
        .get_result(conn)
    }

    pub fn insert_user(
        conn: &mut PgConnection,
        new_user: &NewUser,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(crate::schema::users::table)
            .values(new_user)
            .get_result(conn)
    }

    pub fn insert_profile(
        conn: &mut PgConnection,
        new_profile: &NewProfile,
    ) -> Result<Profile, diesel::result::Error> {
        diesel::insert_into(crate::schema::profiles::table)
            .values(new_profile)
            .get_result(conn)
    }

    pub fn find_profile_by_user_id(
        conn: &mut PgConnection,
        target_user_id: Uuid,
    ) -> Result<Option<Profile>, diesel::result::Error> {
        use crate::schema::profiles::dsl::*;
        profiles
            .filter(user_id.eq(target_user_id))
            .first::<Profile>(conn)
            .optional()
    }

    pub fn update_user(
        conn: &mut PgConnection,
        user_id: Uuid,
        changes: &UserChangeset,
    ) -> Result<User, diesel::result::Error> {
        use crate::schema::users::dsl::*;
        diesel::update(users.filter(id.eq(user_id)))
            .set(changes)
            .get_result(conn)
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        target_user_id: Uuid,
        changes: &ProfileChangeset,
    ) -> Result<Profile, diesel::result::Error> {
        use crate::schema::profiles::dsl::*;
        diesel::update(profiles.filter(user_id.eq(target_user_id)))
            .set(changes)
            .get_result(conn)
    }

    /// Profile goes first; the FK also cascades, this keeps the pair atomic
    /// inside the caller's transaction.
    pub fn delete_user(
        conn: &mut PgConnection,
        target_user_id: Uuid,
    ) -> Result<usize, diesel::result::Error> {
        {
            use crate::schema::profiles::dsl as p;
            diesel::delete(p::profiles.filter(p::user_id.eq(target_user_id))).execute(conn)?;
        }
        use crate::schema::users::dsl as u;
        diesel::delete(u::users.filter(u::id.eq(target_user_id))).execute(conn)
    }

    /// Search/order/paginate users with their profiles. Username is the only
    /// searchable and orderable field.
    pub fn search(
        conn: &mut PgConnection,
        query: &ResolvedQuery,
    ) -> Result<(Vec<(User, Profile)>, i64), diesel::result::Error> {
        use crate::schema::{profiles, users::dsl as u};

        let mut count_query = u::users.into_boxed();
        let mut page_query = u::users.inner_join(profiles::table).into_boxed();

        if let Some(term) = &query.search {
            let pattern = format!("%{}%", term);
            count_query = count_query.filter(u::username.ilike(pattern.clone()));
            page_query = page_query.filter(u::username.ilike(pattern));
        }

        let count = count_query.count().get_result::<i64>(conn)?;

        let descending = query
            .ordering
            .first()
            .map_or(false, |order| order.descending);
        page_query = if descending {
            page_query.order(u::username.desc())
        } else {
            page_query.order(u::username.asc())
        };

        let rows = page_query
            .offset(query.offset())
            .limit(query.page_size)
            .select((User::as_select(), Profile::as_select()))
            .load::<(User, Profile)>(conn)?;

        Ok((rows, count))
    }
}
