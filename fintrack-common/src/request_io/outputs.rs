use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::transaction::Transaction;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// The JSON envelope every endpoint answers with:
/// `{"status": "success"|"error", "message"?, "data"?}`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Envelope<T> {
    pub status: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            data: Some(data),
        }
    }

    pub fn data_with_message(message: String, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message),
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    pub fn message(message: String) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message),
            data: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message),
            data: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct IdentityMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user: IdentityMessage,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub month: String,
    #[serde(rename = "totalIncome")]
    pub total_income: i64,
    #[serde(rename = "totalExpense")]
    pub total_expense: i64,
    pub balance: i64,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MonthlyDetails {
    pub month: String,
    pub income: Vec<Transaction>,
    pub expense: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_serialization() {
        let envelope = Envelope::data_with_message(String::from("Transaction added"), 42);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], "success");
        assert_eq!(json["message"], "Transaction added");
        assert_eq!(json["data"], 42);

        let envelope = Envelope::error(String::from("Server error"));
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Server error");
        assert!(json.get("data").is_none());

        let envelope = Envelope::data(7);
        let json = serde_json::to_value(&envelope).unwrap();

        assert!(json.get("message").is_none());
        assert_eq!(json["data"], 7);
    }

    #[test]
    fn test_monthly_summary_key_names() {
        let summary = MonthlySummary {
            month: String::from("2024/5"),
            total_income: 700,
            total_expense: 300,
            balance: 400,
        };

        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["month"], "2024/5");
        assert_eq!(json["totalIncome"], 700);
        assert_eq!(json["totalExpense"], 300);
        assert_eq!(json["balance"], 400);
    }
}
