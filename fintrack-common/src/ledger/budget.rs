use uuid::Uuid;

use crate::db::{self, DbThreadPool};
use crate::ledger::{CreateOutcome, LedgerError};
use crate::models::budget::Budget;
use crate::request_io::InputBudget;
use crate::validators::{self, Validity};

const ALL_FIELDS_REQUIRED_MSG: &str = "All fields are required";
const NOT_FOUND_MSG: &str = "Budget not found";
const NOT_OWNER_MSG: &str = "Budget belongs to another user";

/// Budget operations. Same ownership discipline as transactions; the unique
/// key within one owner is the month key alone (one budget per month).
pub struct Service {
    dao: db::budget::Dao,
}

impl Service {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            dao: db::budget::Dao::new(db_thread_pool),
        }
    }

    /// Check-then-insert, non-atomic, like transaction creation (DESIGN.md).
    pub fn create(
        &self,
        owner_id: Uuid,
        input: &InputBudget,
    ) -> Result<CreateOutcome<Budget>, LedgerError> {
        let fields = validate_new_budget(input)?;

        if let Some(existing) = self.dao.get_budget_by_unique_key(owner_id, fields.date)? {
            return Ok(CreateOutcome::AlreadyExists(existing));
        }

        let budget = self.dao.create_budget(
            owner_id,
            fields.title,
            fields.amount_cents,
            fields.date,
        )?;

        Ok(CreateOutcome::Created(budget))
    }

    pub fn get(&self, owner_id: Uuid, budget_id: Uuid) -> Result<Budget, LedgerError> {
        let Some(budget) = self.dao.get_budget_by_id(budget_id)? else {
            return Err(LedgerError::NotFound(String::from(NOT_FOUND_MSG)));
        };

        if budget.user_id != owner_id {
            return Err(LedgerError::Forbidden(String::from(NOT_OWNER_MSG)));
        }

        Ok(budget)
    }

    pub fn list(&self, owner_id: Uuid) -> Result<Vec<Budget>, LedgerError> {
        Ok(self.dao.get_budgets_for_user(owner_id)?)
    }

    /// Returns a sequence rather than a single record: create enforces
    /// one-budget-per-month, but the schema does not, so a duplicate that
    /// reached the store through another path (or the documented create
    /// race) surfaces here instead of being hidden.
    pub fn list_for_month(&self, owner_id: Uuid, date: &str) -> Result<Vec<Budget>, LedgerError> {
        check_month_key(date)?;

        Ok(self.dao.get_budgets_for_month(owner_id, date)?)
    }

    pub fn update(
        &self,
        owner_id: Uuid,
        budget_id: Uuid,
        edits: &InputBudget,
    ) -> Result<Budget, LedgerError> {
        let mut budget = self.get(owner_id, budget_id)?;
        apply_edits(&mut budget, edits);

        Ok(self.dao.update_budget(&budget)?)
    }

    pub fn delete(&self, owner_id: Uuid, budget_id: Uuid) -> Result<(), LedgerError> {
        let budget = self.get(owner_id, budget_id)?;
        self.dao.delete_budget(budget.id)?;

        Ok(())
    }
}

struct ValidatedBudget<'a> {
    title: &'a str,
    amount_cents: i64,
    date: &'a str,
}

fn validate_new_budget(input: &InputBudget) -> Result<ValidatedBudget, LedgerError> {
    let title = input.title.as_deref().unwrap_or("");
    let date = input.date.as_deref().unwrap_or("");
    let amount_cents = input.amount_cents.unwrap_or(0);

    if title.is_empty() || date.is_empty() || amount_cents == 0 {
        return Err(LedgerError::InvalidInput(String::from(
            ALL_FIELDS_REQUIRED_MSG,
        )));
    }

    Ok(ValidatedBudget {
        title,
        amount_cents,
        date,
    })
}

// Unlike transaction edits, any provided field is applied as-is: an explicit
// zero amount or empty title overwrites the stored value
fn apply_edits(budget: &mut Budget, edits: &InputBudget) {
    if let Some(title) = edits.title.as_deref() {
        budget.title = String::from(title);
    }

    if let Some(amount_cents) = edits.amount_cents {
        budget.amount_cents = amount_cents;
    }

    if let Some(date) = edits.date.as_deref() {
        budget.date = String::from(date);
    }
}

fn check_month_key(date: &str) -> Result<(), LedgerError> {
    match validators::validate_month_key(date) {
        Validity::Valid => Ok(()),
        Validity::Invalid(msg) => Err(LedgerError::InvalidInput(msg)),
    }
}
