use serde::{Deserialize, Serialize};

// Fields the original API treats as "missing or empty → all fields are
// required" are deserialized as options so presence checks happen in the
// service layer rather than failing in the JSON extractor.

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CredentialPair {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Create and edit payloads share this shape; `create` requires every field,
/// `update` applies whichever fields carry a non-falsy value.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputTransaction {
    pub title: Option<String>,
    pub amount_cents: Option<i64>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputBudget {
    pub title: Option<String>,
    pub amount_cents: Option<i64>,
    pub date: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct InputMonth {
    pub date: Option<String>,
}
