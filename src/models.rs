use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Transaction kinds accepted by the API
pub const TRANSACTION_KINDS: &[&str] = &["credit", "expense"];

/// Transaction entry in the database
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Request to create a transaction
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTransactionRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be 1-120 characters"))]
    pub title: String,

    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,

    pub kind: String,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub date: NaiveDate,
}

/// Request to update a transaction; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTransactionRequest {
    #[validate(length(min = 1, max = 120, message = "Title must be 1-120 characters"))]
    pub title: Option<String>,

    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: Option<f64>,

    pub kind: Option<String>,

    #[validate(length(min = 1, max = 60, message = "Category must be 1-60 characters"))]
    pub category: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,

    pub date: Option<NaiveDate>,
}

/// Response for a single transaction
#[derive(Debug, Serialize)]
pub struct TransactionResponse {
    pub id: i64,
    pub title: String,
    pub amount: f64,
    pub kind: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(entry: Transaction) -> Self {
        TransactionResponse {
            id: entry.id,
            title: entry.title,
            amount: entry.amount,
            kind: entry.kind,
            category: entry.category,
            description: entry.description,
            date: entry.date,
            created_at: entry.created_at,
        }
    }
}

/// Paginated listing wrapper
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }
}

/// Validate a transaction kind string
pub fn is_valid_kind(kind: &str) -> bool {
    TRANSACTION_KINDS.contains(&kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_validation() {
        assert!(is_valid_kind("credit"));
        assert!(is_valid_kind("expense"));
        assert!(!is_valid_kind("transfer"));
        assert!(!is_valid_kind("CREDIT"));
        assert!(!is_valid_kind(""));
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateTransactionRequest {
            title: "Groceries".to_string(),
            amount: 42.50,
            kind: "expense".to_string(),
            category: "Food".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert!(validator::Validate::validate(&req).is_ok());

        let bad = CreateTransactionRequest {
            title: "".to_string(),
            amount: -5.0,
            kind: "expense".to_string(),
            category: "Food".to_string(),
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert!(validator::Validate::validate(&bad).is_err());
    }

    #[test]
    fn test_transaction_response_from_entry() {
        let entry = Transaction {
            id: 7,
            user_id: 1,
            title: "Salary".to_string(),
            amount: 3000.0,
            kind: "credit".to_string(),
            category: "Income".to_string(),
            description: Some("June".to_string()),
            date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
            created_at: Utc::now(),
        };

        let response = TransactionResponse::from(entry);
        assert_eq!(response.id, 7);
        assert_eq!(response.kind, "credit");
        assert_eq!(response.description.as_deref(), Some("June"));
    }
}
