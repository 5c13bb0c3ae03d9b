use diesel::{dsl, ExpressionMethods, OptionalExtension, QueryDsl, RunQueryDsl};
use std::time::SystemTime;
use uuid::Uuid;

use crate::db::{DaoError, DbThreadPool};
use crate::models::budget::{Budget, NewBudget};
use crate::schema::budgets as budget_fields;
use crate::schema::budgets::dsl::budgets;

pub struct Dao {
    db_thread_pool: DbThreadPool,
}

impl Dao {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            db_thread_pool: db_thread_pool.clone(),
        }
    }

    pub fn get_budget_by_id(&self, budget_id: Uuid) -> Result<Option<Budget>, DaoError> {
        Ok(budgets
            .find(budget_id)
            .get_result::<Budget>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    /// A budget's unique key within one owner is the month key alone.
    pub fn get_budget_by_unique_key(
        &self,
        user_id: Uuid,
        date: &str,
    ) -> Result<Option<Budget>, DaoError> {
        Ok(budgets
            .filter(budget_fields::user_id.eq(user_id))
            .filter(budget_fields::date.eq(date))
            .first::<Budget>(&mut self.db_thread_pool.get()?)
            .optional()?)
    }

    pub fn get_budgets_for_user(&self, user_id: Uuid) -> Result<Vec<Budget>, DaoError> {
        Ok(budgets
            .filter(budget_fields::user_id.eq(user_id))
            .order(budget_fields::created_timestamp.desc())
            .get_results::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn get_budgets_for_month(
        &self,
        user_id: Uuid,
        date: &str,
    ) -> Result<Vec<Budget>, DaoError> {
        Ok(budgets
            .filter(budget_fields::user_id.eq(user_id))
            .filter(budget_fields::date.eq(date))
            .get_results::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn create_budget(
        &self,
        user_id: Uuid,
        title: &str,
        amount_cents: i64,
        date: &str,
    ) -> Result<Budget, DaoError> {
        let new_budget = NewBudget {
            id: Uuid::now_v7(),
            user_id,
            title,
            amount_cents,
            date,
            created_timestamp: SystemTime::now(),
        };

        Ok(dsl::insert_into(budgets)
            .values(&new_budget)
            .get_result::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn update_budget(&self, budget: &Budget) -> Result<Budget, DaoError> {
        Ok(diesel::update(budgets.find(budget.id))
            .set((
                budget_fields::title.eq(&budget.title),
                budget_fields::amount_cents.eq(budget.amount_cents),
                budget_fields::date.eq(&budget.date),
            ))
            .get_result::<Budget>(&mut self.db_thread_pool.get()?)?)
    }

    pub fn delete_budget(&self, budget_id: Uuid) -> Result<(), DaoError> {
        diesel::delete(budgets.find(budget_id)).execute(&mut self.db_thread_pool.get()?)?;

        Ok(())
    }
}
