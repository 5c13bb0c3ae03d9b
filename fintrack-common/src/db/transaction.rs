use diesel::{dsl, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use std::time::SystemTime;
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::transaction::{NewTransaction, Transaction};
use crate::schema::transactions as transaction_fields;
use crate::schema::transactions::dsl::transactions;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn get_transaction_by_id(
        &self,
        transaction_id: Uuid,
    ) -> Result<Option<Transaction>, DaoError> {
        Ok(transactions
            .find(transaction_id)
            .get_result::<Transaction>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    /// Looks up a transaction by the tuple that is unique within one owner:
    /// (type, category, month key).
    pub fn get_transaction_by_unique_key(
        &self,
        user_id: Uuid,
        transaction_type: &str,
        category: &str,
        date: &str,
    ) -> Result<Option<Transaction>, DaoError> {
        Ok(transactions
            .filter(transaction_fields::user_id.eq(user_id))
            .filter(transaction_fields::transaction_type.eq(transaction_type))
            .filter(transaction_fields::category.eq(category))
            .filter(transaction_fields::date.eq(date))
            .first::<Transaction>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    pub fn get_transactions_for_user(&self, user_id: Uuid) -> Result<Vec<Transaction>, DaoError> {
        Ok(transactions
            .filter(transaction_fields::user_id.eq(user_id))
            .order(transaction_fields::created_timestamp.desc())
            .get_results::<Transaction>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_transactions_for_month(
        &self,
        user_id: Uuid,
        date: &str,
    ) -> Result<Vec<Transaction>, DaoError> {
        Ok(transactions
            .filter(transaction_fields::user_id.eq(user_id))
            .filter(transaction_fields::date.eq(date))
            .get_results::<Transaction>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn create_transaction(
        &self,
        user_id: Uuid,
        title: &str,
        amount_cents: i64,
        transaction_type: &str,
        category: &str,
        date: &str,
    ) -> Result<Transaction, DaoError> {
        let new_transaction = NewTransaction {
            id: Uuid::now_v7(),
            user_id,
            title,
            amount_cents,
            transaction_type,
            category,
            date,
            created_timestamp: SystemTime::now(),
        };

        Ok(dsl::insert_into(transactions)
            .values(&new_transaction)
            .get_result::<Transaction>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_transaction(&self, transaction: &Transaction) -> Result<Transaction, DaoError> {
        Ok(diesel::update(transactions.find(transaction.id))
            .set((
                transaction_fields::title.eq(&transaction.title),
                transaction_fields::amount_cents.eq(transaction.amount_cents),
                transaction_fields::transaction_type.eq(&transaction.transaction_type),
                transaction_fields::category.eq(&transaction.category),
                transaction_fields::date.eq(&transaction.date),
            ))
            .get_result::<Transaction>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn delete_transaction(&self, transaction_id: Uuid) -> Result<(), DaoError> {
        diesel::delete(transactions.find(transaction_id))
            .execute(&mut self.db_thread_pool.get()?)?;

        Ok(())
    }
}
