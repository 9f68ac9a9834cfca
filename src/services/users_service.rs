use chrono::Utc;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;

use crate::{
    db::models::api::error_codes,
    db::models::user::{NewProfile, NewUser, Profile, ProfileChangeset, User, UserChangeset},
    db::repositories::UsersRepo,
    error::AppError,
    query::ResolvedQuery,
    validation::user::validate_username,
};

pub struct UsersService;

impl UsersService {
    pub fn list(
        conn: &mut PgConnection,
        query: &ResolvedQuery,
    ) -> Result<(Vec<(User, Profile)>, i64), AppError> {
        Ok(UsersRepo::search(conn, query)?)
    }

    pub fn get_by_username(
        conn: &mut PgConnection,
        username: &str,
    ) -> Result<(User, Profile), AppError> {
        let user = UsersRepo::find_by_username(conn, username)?
            .ok_or_else(|| AppError::not_found("user"))?;
        let profile = UsersRepo::find_profile_by_user_id(conn, user.id)?
            .ok_or_else(|| AppError::internal("user has no profile"))?;
        Ok((user, profile))
    }

    /// User and Profile are created in one transaction; a user without a
    /// profile never becomes visible.
    pub fn create(
        conn: &mut PgConnection,
        req: &crate::routes::users::CreateUserRequest,
        bcrypt_cost: u32,
    ) -> Result<(User, Profile), AppError> {
        validate_username(&req.username).map_err(AppError::validation_errors)?;
        let password_hash = bcrypt::hash(&req.password, bcrypt_cost)?;

        conn.transaction::<(User, Profile), AppError, _>(|conn| {
            if UsersRepo::exists_by_username(conn, &req.username)? {
                return Err(username_conflict());
            }

            let new_user = NewUser {
                username: req.username.clone(),
                first_name: req.first_name.clone().unwrap_or_default(),
                last_name: req.last_name.clone().unwrap_or_default(),
                password_hash,
                is_active: req.is_active.unwrap_or(true),
            };
            let user = UsersRepo::insert_user(conn, &new_user).map_err(map_unique_username)?;
            let profile = UsersRepo::insert_profile(conn, &NewProfile::for_user(&user))?;
            Ok((user, profile))
        })
    }

    /// Applies user fields and re-syncs the profile's mirrored name fields in
    /// the same transaction.
    pub fn update(
        conn: &mut PgConnection,
        username: &str,
        req: &crate::routes::users::UpdateUserRequest,
        bcrypt_cost: u32,
    ) -> Result<(User, Profile), AppError> {
        let password_hash = match &req.password {
            Some(password) => Some(bcrypt::hash(password, bcrypt_cost)?),
            None => None,
        };

        conn.transaction::<(User, Profile), AppError, _>(|conn| {
            let user = UsersRepo::find_by_username(conn, username)?
                .ok_or_else(|| AppError::not_found("user"))?;

            let user_changes = UserChangeset {
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                password_hash: password_hash.clone(),
                is_active: req.is_active,
                updated_at: Utc::now(),
            };
            let user = UsersRepo::update_user(conn, user.id, &user_changes)?;

            let profile_req = req.profile.clone().unwrap_or_default();
            let profile_changes = ProfileChangeset {
                first_name: Some(user.first_name.clone()),
                last_name: Some(user.last_name.clone()),
                address_first: profile_req.address_first,
                address_second: profile_req.address_second,
                city: profile_req.city,
                state: profile_req.state,
                zip: profile_req.zip,
                country: profile_req.country,
            };
            let profile = UsersRepo::update_profile(conn, user.id, &profile_changes)?;
            Ok((user, profile))
        })
    }

    pub fn delete(conn: &mut PgConnection, username: &str) -> Result<(), AppError> {
        conn.transaction::<(), AppError, _>(|conn| {
            let user = UsersRepo::find_by_username(conn, username)?
                .ok_or_else(|| AppError::not_found("user"))?;
            UsersRepo::delete_user(conn, user.id)?;
            Ok(())
        })
    }
}

fn username_conflict() -> AppError {
    AppError::conflict(
        "Username is already taken",
        Some("username".to_string()),
        error_codes::USER_USERNAME_EXISTS,
    )
}

fn map_unique_username(e: diesel::result::Error) -> AppError {
    match e {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            username_conflict()
        }
        other => other.into(),
    }
}
