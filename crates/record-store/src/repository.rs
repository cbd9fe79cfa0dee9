use crate::RecordSource;
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::NaiveDate;
use core_types::{
    Category, ExpenseRecord, GoalRecord, RecordSet, RevenueRecord, Scope,
};
use rust_decimal::Decimal;
use sqlx::FromRow;
use sqlx::postgres::PgPool;
use uuid::Uuid;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the PostgreSQL record store. It encapsulates all SQL queries and data
/// access logic; the engine never sees SQL.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// Database-specific revenue row matching the `revenues` table schema.
///
/// Enum-ish columns are stored as text and parsed into the core enums during
/// conversion, so a corrupt row surfaces as a `StoreError` instead of
/// skewing a report.
#[derive(Debug, Clone, FromRow)]
struct DbRevenueRow {
    id: Uuid,
    company_id: i64,
    category_id: i64,
    transaction_code: String,
    description: String,
    gross_amount: Decimal,
    net_amount: Decimal,
    transaction_date: NaiveDate,
    settlement_date: Option<NaiveDate>,
    status: String,
    client: Option<String>,
    payment_method: String,
    installment: bool,
    installment_count: i32,
}

impl DbRevenueRow {
    fn into_record(self) -> Result<RevenueRecord, StoreError> {
        Ok(RevenueRecord {
            id: self.id,
            company_id: self.company_id,
            category_id: self.category_id,
            transaction_code: self.transaction_code,
            description: self.description,
            gross_amount: self.gross_amount,
            net_amount: self.net_amount,
            transaction_date: self.transaction_date,
            settlement_date: self.settlement_date,
            status: self.status.parse()?,
            client: self.client,
            payment_method: self.payment_method.parse()?,
            installment: self.installment,
            installment_count: self.installment_count.max(0) as u32,
        })
    }
}

/// Database-specific expense row matching the `expenses` table schema.
#[derive(Debug, Clone, FromRow)]
struct DbExpenseRow {
    id: Uuid,
    company_id: i64,
    category_id: i64,
    transaction_code: String,
    description: String,
    gross_amount: Decimal,
    net_amount: Decimal,
    transaction_date: NaiveDate,
    settlement_date: Option<NaiveDate>,
    status: String,
    supplier: Option<String>,
    payment_method: String,
    installment: bool,
    installment_count: i32,
}

impl DbExpenseRow {
    fn into_record(self) -> Result<ExpenseRecord, StoreError> {
        Ok(ExpenseRecord {
            id: self.id,
            company_id: self.company_id,
            category_id: self.category_id,
            transaction_code: self.transaction_code,
            description: self.description,
            gross_amount: self.gross_amount,
            net_amount: self.net_amount,
            transaction_date: self.transaction_date,
            settlement_date: self.settlement_date,
            status: self.status.parse()?,
            supplier: self.supplier,
            payment_method: self.payment_method.parse()?,
            installment: self.installment,
            installment_count: self.installment_count.max(0) as u32,
        })
    }
}

/// Row from the `monthly_goals` table.
#[derive(Debug, Clone, FromRow)]
struct DbGoalRow {
    company_id: i64,
    year: i32,
    month: i32,
    category_id: Option<i64>,
    revenue_goal: Decimal,
    expense_goal: Decimal,
    profit_goal: Option<Decimal>,
}

impl DbGoalRow {
    fn into_record(self) -> GoalRecord {
        GoalRecord {
            company_id: self.company_id,
            year: self.year,
            month: self.month.max(0) as u32,
            category_id: self.category_id,
            revenue_goal: self.revenue_goal,
            expense_goal: self.expense_goal,
            profit_goal: self.profit_goal,
        }
    }
}

/// Row from the `categories` reference table.
#[derive(Debug, Clone, FromRow)]
struct DbCategoryRow {
    id: i64,
    name: String,
    kind: String,
}

impl DbCategoryRow {
    fn into_record(self) -> Result<Category, StoreError> {
        Ok(Category {
            id: self.id,
            name: self.name,
            kind: self.kind.parse()?,
        })
    }
}

/// Inclusive calendar bounds covering the scope's year range.
fn scope_date_range(scope: &Scope) -> (NaiveDate, NaiveDate) {
    let start = NaiveDate::from_ymd_opt(scope.year_start, 1, 1).unwrap_or(NaiveDate::MIN);
    let end = NaiveDate::from_ymd_opt(scope.year_end, 12, 31).unwrap_or(NaiveDate::MAX);
    (start, end)
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fetches all revenue records for a company within the scope's years.
    pub async fn fetch_revenues(&self, scope: &Scope) -> Result<Vec<RevenueRecord>, StoreError> {
        let (start, end) = scope_date_range(scope);
        let rows = sqlx::query_as::<_, DbRevenueRow>(
            r#"
            SELECT id, company_id, category_id, transaction_code, description,
                   gross_amount, net_amount, transaction_date, settlement_date,
                   status, client, payment_method, installment, installment_count
            FROM revenues
            WHERE company_id = $1 AND transaction_date >= $2 AND transaction_date <= $3
            ORDER BY transaction_date ASC
            "#,
        )
        .bind(scope.company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DbRevenueRow::into_record).collect()
    }

    /// Fetches all expense records for a company within the scope's years.
    pub async fn fetch_expenses(&self, scope: &Scope) -> Result<Vec<ExpenseRecord>, StoreError> {
        let (start, end) = scope_date_range(scope);
        let rows = sqlx::query_as::<_, DbExpenseRow>(
            r#"
            SELECT id, company_id, category_id, transaction_code, description,
                   gross_amount, net_amount, transaction_date, settlement_date,
                   status, supplier, payment_method, installment, installment_count
            FROM expenses
            WHERE company_id = $1 AND transaction_date >= $2 AND transaction_date <= $3
            ORDER BY transaction_date ASC
            "#,
        )
        .bind(scope.company_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DbExpenseRow::into_record).collect()
    }

    /// Fetches all monthly goals for a company within the scope's years.
    pub async fn fetch_goals(&self, scope: &Scope) -> Result<Vec<GoalRecord>, StoreError> {
        let rows = sqlx::query_as::<_, DbGoalRow>(
            r#"
            SELECT company_id, year, month, category_id,
                   revenue_goal, expense_goal, profit_goal
            FROM monthly_goals
            WHERE company_id = $1 AND year >= $2 AND year <= $3
            ORDER BY year ASC, month ASC
            "#,
        )
        .bind(scope.company_id)
        .bind(scope.year_start)
        .bind(scope.year_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(DbGoalRow::into_record).collect())
    }

    /// Fetches the full category reference table.
    pub async fn fetch_categories(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, DbCategoryRow>(
            "SELECT id, name, kind FROM categories ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(DbCategoryRow::into_record).collect()
    }
}

#[async_trait]
impl RecordSource for DbRepository {
    /// Assembles one snapshot from three concurrent read-only fetches plus
    /// the reference categories.
    ///
    /// The fetches are not wrapped in a transaction: a sub-second skew
    /// between them is acceptable for a reporting system, and the engine
    /// treats whatever lands in the snapshot as the truth for this call.
    async fn fetch_snapshot(&self, scope: &Scope) -> Result<RecordSet, StoreError> {
        let (revenues, expenses, goals, categories) = tokio::join!(
            self.fetch_revenues(scope),
            self.fetch_expenses(scope),
            self.fetch_goals(scope),
            self.fetch_categories(),
        );

        let set = RecordSet {
            revenues: revenues?,
            expenses: expenses?,
            goals: goals?,
            categories: categories?,
        };

        tracing::debug!(
            revenues = set.revenues.len(),
            expenses = set.expenses.len(),
            goals = set.goals.len(),
            %scope,
            "fetched record snapshot"
        );

        // The date-range queries are a superset when a month filter is set;
        // narrow once here so every source hands the engine the same shape.
        Ok(set.scoped(scope))
    }
}
