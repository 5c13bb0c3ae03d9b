use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::budgets;

#[derive(
    Clone, Debug, Serialize, Deserialize, Associations, Identifiable, Queryable, QueryableByName,
)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = budgets)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount_cents: i64,
    pub date: String,
    pub created_timestamp: SystemTime,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = budgets)]
pub struct NewBudget<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub amount_cents: i64,
    pub date: &'a str,
    pub created_timestamp: SystemTime,
}
