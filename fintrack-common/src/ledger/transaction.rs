use uuid::Uuid;

use crate::db::{self, DbThreadPool};
use crate::ledger::{CreateOutcome, LedgerError};
use crate::models::transaction::{
    Transaction, TRANSACTION_TYPE_EXPENSE, TRANSACTION_TYPE_INCOME,
};
use crate::request_io::{InputTransaction, MonthlyDetails, MonthlySummary};
use crate::validators::{self, Validity};

const ALL_FIELDS_REQUIRED_MSG: &str = "All fields are required";
const BAD_TYPE_MSG: &str = "Transaction type must be either income or expense";
const NOT_FOUND_MSG: &str = "Transaction not found";
const NOT_OWNER_MSG: &str = "Transaction belongs to another user";

/// Transaction operations, scoped to the owner the caller resolved from the
/// request's identity token. Every method takes the owner ID explicitly;
/// nothing here reads ambient request state.
pub struct Service {
    dao: db::transaction::Dao,
}

impl Service {
    pub fn new(db_thread_pool: &DbThreadPool) -> Self {
        Self {
            dao: db::transaction::Dao::new(db_thread_pool),
        }
    }

    /// The duplicate check and the insert are two separate store round
    /// trips, not an atomic conditional insert. Two identical concurrent
    /// creates can therefore both insert (see DESIGN.md).
    pub fn create(
        &self,
        owner_id: Uuid,
        input: &InputTransaction,
    ) -> Result<CreateOutcome<Transaction>, LedgerError> {
        let fields = validate_new_transaction(input)?;

        if let Some(existing) = self.dao.get_transaction_by_unique_key(
            owner_id,
            fields.transaction_type,
            fields.category,
            fields.date,
        )? {
            return Ok(CreateOutcome::AlreadyExists(existing));
        }

        let transaction = self.dao.create_transaction(
            owner_id,
            fields.title,
            fields.amount_cents,
            fields.transaction_type,
            fields.category,
            fields.date,
        )?;

        Ok(CreateOutcome::Created(transaction))
    }

    pub fn get(&self, owner_id: Uuid, transaction_id: Uuid) -> Result<Transaction, LedgerError> {
        let Some(transaction) = self.dao.get_transaction_by_id(transaction_id)? else {
            return Err(LedgerError::NotFound(String::from(NOT_FOUND_MSG)));
        };

        // Ownership is checked strictly after existence, so a requester can
        // distinguish "no such record" from "someone else's record"
        if transaction.user_id != owner_id {
            return Err(LedgerError::Forbidden(String::from(NOT_OWNER_MSG)));
        }

        Ok(transaction)
    }

    pub fn list(&self, owner_id: Uuid) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.dao.get_transactions_for_user(owner_id)?)
    }

    pub fn update(
        &self,
        owner_id: Uuid,
        transaction_id: Uuid,
        edits: &InputTransaction,
    ) -> Result<Transaction, LedgerError> {
        let mut transaction = self.get(owner_id, transaction_id)?;
        apply_edits(&mut transaction, edits)?;

        Ok(self.dao.update_transaction(&transaction)?)
    }

    pub fn delete(&self, owner_id: Uuid, transaction_id: Uuid) -> Result<(), LedgerError> {
        let transaction = self.get(owner_id, transaction_id)?;
        self.dao.delete_transaction(transaction.id)?;

        Ok(())
    }

    pub fn monthly_summary(
        &self,
        owner_id: Uuid,
        date: &str,
    ) -> Result<MonthlySummary, LedgerError> {
        check_month_key(date)?;

        let month_transactions = self.dao.get_transactions_for_month(owner_id, date)?;

        Ok(summarize(date, &month_transactions))
    }

    pub fn monthly_details(
        &self,
        owner_id: Uuid,
        date: &str,
    ) -> Result<MonthlyDetails, LedgerError> {
        check_month_key(date)?;

        let month_transactions = self.dao.get_transactions_for_month(owner_id, date)?;

        Ok(partition_by_type(date, month_transactions))
    }
}

struct ValidatedTransaction<'a> {
    title: &'a str,
    amount_cents: i64,
    transaction_type: &'a str,
    category: &'a str,
    date: &'a str,
}

fn validate_new_transaction(
    input: &InputTransaction,
) -> Result<ValidatedTransaction, LedgerError> {
    let title = input.title.as_deref().unwrap_or("");
    let transaction_type = input.transaction_type.as_deref().unwrap_or("");
    let category = input.category.as_deref().unwrap_or("");
    let date = input.date.as_deref().unwrap_or("");
    let amount_cents = input.amount_cents.unwrap_or(0);

    if title.is_empty()
        || transaction_type.is_empty()
        || category.is_empty()
        || date.is_empty()
        || amount_cents == 0
    {
        return Err(LedgerError::InvalidInput(String::from(
            ALL_FIELDS_REQUIRED_MSG,
        )));
    }

    if transaction_type != TRANSACTION_TYPE_INCOME
        && transaction_type != TRANSACTION_TYPE_EXPENSE
    {
        return Err(LedgerError::InvalidInput(String::from(BAD_TYPE_MSG)));
    }

    Ok(ValidatedTransaction {
        title,
        amount_cents,
        transaction_type,
        category,
        date,
    })
}

// Falsy values (an empty string, a zero amount) are indistinguishable from
// omitted fields and leave the stored value untouched
fn apply_edits(transaction: &mut Transaction, edits: &InputTransaction) -> Result<(), LedgerError> {
    if let Some(title) = edits.title.as_deref() {
        if !title.is_empty() {
            transaction.title = String::from(title);
        }
    }

    if let Some(amount_cents) = edits.amount_cents {
        if amount_cents != 0 {
            transaction.amount_cents = amount_cents;
        }
    }

    if let Some(transaction_type) = edits.transaction_type.as_deref() {
        if !transaction_type.is_empty() {
            if transaction_type != TRANSACTION_TYPE_INCOME
                && transaction_type != TRANSACTION_TYPE_EXPENSE
            {
                return Err(LedgerError::InvalidInput(String::from(BAD_TYPE_MSG)));
            }

            transaction.transaction_type = String::from(transaction_type);
        }
    }

    if let Some(category) = edits.category.as_deref() {
        if !category.is_empty() {
            transaction.category = String::from(category);
        }
    }

    if let Some(date) = edits.date.as_deref() {
        if !date.is_empty() {
            transaction.date = String::from(date);
        }
    }

    Ok(())
}

fn check_month_key(date: &str) -> Result<(), LedgerError> {
    match validators::validate_month_key(date) {
        Validity::Valid => Ok(()),
        Validity::Invalid(msg) => Err(LedgerError::InvalidInput(msg)),
    }
}

fn summarize(month: &str, transactions: &[Transaction]) -> MonthlySummary {
    let mut total_income = 0i64;
    let mut total_expense = 0i64;

    for transaction in transactions {
        if transaction.transaction_type == TRANSACTION_TYPE_INCOME {
            total_income += transaction.amount_cents;
        } else if transaction.transaction_type == TRANSACTION_TYPE_EXPENSE {
            total_expense += transaction.amount_cents;
        }
    }

    // A month where spending exceeds earnings reports a balance of zero, not
    // a negative number
    let balance = if total_income > total_expense {
        total_income - total_expense
    } else {
        0
    };

    MonthlySummary {
        month: String::from(month),
        total_income,
        total_expense,
        balance,
    }
}

fn partition_by_type(month: &str, transactions: Vec<Transaction>) -> MonthlyDetails {
    let mut income = Vec::new();
    let mut expense = Vec::new();

    for transaction in transactions {
        if transaction.transaction_type == TRANSACTION_TYPE_INCOME {
            income.push(transaction);
        } else if transaction.transaction_type == TRANSACTION_TYPE_EXPENSE {
            expense.push(transaction);
        }
    }

    MonthlyDetails {
        month: String::from(month),
        income,
        expense,
    }
}
