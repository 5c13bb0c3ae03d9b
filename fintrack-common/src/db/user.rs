use diesel::{dsl, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use std::time::SystemTime;
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::user::{NewUser, User};
use crate::schema::users as user_fields;
use crate::schema::users::dsl::users;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn get_user_by_id(&self, user_id: Uuid) -> Result<Option<User>, DaoError> {
        Ok(users
            .find(user_id)
            .get_result::<User>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    pub fn get_user_by_email(&self, user_email: &str) -> Result<Option<User>, DaoError> {
        Ok(users
            .filter(user_fields::email.eq(user_email))
            .first::<User>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, DaoError> {
        let new_user = NewUser {
            id: Uuid::now_v7(),
            name,
            email,
            password_hash,
            created_timestamp: SystemTime::now(),
        };

        Ok(dsl::insert_into(users)
            .values(&new_user)
            .get_result::<User>(&mut self.db_thread_pool.get()?)?)
    }
}
