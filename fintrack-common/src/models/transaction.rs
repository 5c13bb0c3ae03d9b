use diesel::{Insertable, Queryable, QueryableByName};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use uuid::Uuid;

use crate::models::user::User;
use crate::schema::transactions;

pub const TRANSACTION_TYPE_INCOME: &str = "income";
pub const TRANSACTION_TYPE_EXPENSE: &str = "expense";

#[derive(
    Clone, Debug, Serialize, Deserialize, Associations, Identifiable, Queryable, QueryableByName,
)]
#[diesel(belongs_to(User, foreign_key = user_id))]
#[diesel(table_name = transactions)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub amount_cents: i64,
    // "type" is a reserved word in both Rust and Postgres
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub category: String,
    pub date: String,
    pub created_timestamp: SystemTime,
}

#[derive(Clone, Debug, Insertable)]
#[diesel(table_name = transactions)]
pub struct NewTransaction<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: &'a str,
    pub amount_cents: i64,
    pub transaction_type: &'a str,
    pub category: &'a str,
    pub date: &'a str,
    pub created_timestamp: SystemTime,
}
