use crate::error::{AppError, AppResult};
use crate::models::{CreateTransactionRequest, Transaction, UpdateTransactionRequest};
use chrono::NaiveDate;
use sqlx::{
    postgres::{PgConnectOptions, PgPoolOptions},
    ConnectOptions, PgPool,
};
use std::str::FromStr;
use std::time::Duration;

/// Database repository
pub struct Repository {
    pub(crate) pool: PgPool,
}

/// Filters for transaction listing
#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub kind: Option<String>,
    pub limit: i64,
    pub offset: i64,
}

impl Repository {
    /// Create a new repository with a connection pool.
    ///
    /// The connection is established eagerly; startup must not accept
    /// traffic until this has succeeded.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout_seconds: u64,
    ) -> AppResult<Self> {
        let options = PgConnectOptions::from_str(database_url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?
            .disable_statement_logging();

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(acquire_timeout_seconds))
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Create a repository whose pool connects on first use.
    ///
    /// Used by tests that exercise routing and middleware without a live
    /// database.
    pub fn connect_lazy(database_url: &str) -> AppResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            // short acquire deadline; lazy pools are used where no live
            // database is expected
            .acquire_timeout(Duration::from_secs(2))
            .connect_lazy(database_url)
            .map_err(|e| AppError::Configuration(format!("Invalid database URL: {}", e)))?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> AppResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Check database connectivity
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create a new transaction for a user
    pub async fn create_transaction(
        &self,
        user_id: i64,
        req: &CreateTransactionRequest,
    ) -> AppResult<Transaction> {
        let result = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (user_id, title, amount, kind, category, description, date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(&req.title)
        .bind(req.amount)
        .bind(&req.kind)
        .bind(&req.category)
        .bind(&req.description)
        .bind(req.date)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Get a transaction by id, scoped to its owner
    pub async fn get_transaction(&self, user_id: i64, id: i64) -> AppResult<Option<Transaction>> {
        let result = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// List a user's transactions, newest first, with optional filters
    pub async fn list_transactions(
        &self,
        user_id: i64,
        filter: &TransactionFilter,
    ) -> AppResult<Vec<Transaction>> {
        let results = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
              AND ($4::text IS NULL OR kind = $4)
            ORDER BY date DESC, id DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(user_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.kind)
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(results)
    }

    /// Count a user's transactions under the same filters as the listing
    pub async fn count_transactions(
        &self,
        user_id: i64,
        filter: &TransactionFilter,
    ) -> AppResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM transactions
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
              AND ($4::text IS NULL OR kind = $4)
            "#,
        )
        .bind(user_id)
        .bind(filter.start_date)
        .bind(filter.end_date)
        .bind(&filter.kind)
        .fetch_one(&self.pool)
        .await?;

        Ok(result)
    }

    /// Update a transaction in place; absent fields keep their values
    pub async fn update_transaction(
        &self,
        user_id: i64,
        id: i64,
        req: &UpdateTransactionRequest,
    ) -> AppResult<Option<Transaction>> {
        let result = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET title = COALESCE($3, title),
                amount = COALESCE($4, amount),
                kind = COALESCE($5, kind),
                category = COALESCE($6, category),
                description = COALESCE($7, description),
                date = COALESCE($8, date)
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(&req.title)
        .bind(req.amount)
        .bind(&req.kind)
        .bind(&req.category)
        .bind(&req.description)
        .bind(req.date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result)
    }

    /// Delete a transaction, scoped to its owner
    pub async fn delete_transaction(&self, user_id: i64, id: i64) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM transactions WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Get database-wide statistics
    pub async fn get_stats(&self) -> AppResult<Stats> {
        let users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        let row = sqlx::query_as::<_, (i64, f64, f64)>(
            r#"
            SELECT
                COUNT(*) as total_transactions,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'credit'), 0) as total_credit,
                COALESCE(SUM(amount) FILTER (WHERE kind = 'expense'), 0) as total_expense
            FROM transactions
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(Stats {
            total_users: users,
            total_transactions: row.0,
            total_credit: row.1,
            total_expense: row.2,
        })
    }
}

/// Statistics struct
#[derive(Debug)]
pub struct Stats {
    pub total_users: i64,
    pub total_transactions: i64,
    pub total_credit: f64,
    pub total_expense: f64,
}

impl Clone for Repository {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_defaults() {
        let filter = TransactionFilter::default();
        assert!(filter.start_date.is_none());
        assert!(filter.end_date.is_none());
        assert!(filter.kind.is_none());
        assert_eq!(filter.limit, 0);
        assert_eq!(filter.offset, 0);
    }

    #[test]
    fn test_stats_creation() {
        let stats = Stats {
            total_users: 3,
            total_transactions: 100,
            total_credit: 5000.0,
            total_expense: 3200.5,
        };

        assert_eq!(stats.total_users, 3);
        assert_eq!(stats.total_transactions, 100);
        assert!(stats.total_credit > stats.total_expense);
    }
}
