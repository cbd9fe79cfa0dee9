//! Shared record constructors for the engine's unit tests.

use chrono::NaiveDate;
use core_types::{
    Category, CategoryKind, ExpenseRecord, GoalRecord, PaymentMethod, RecordSet, RecordStatus,
    RevenueRecord,
};
use rust_decimal::Decimal;
use uuid::Uuid;

pub(crate) fn revenue(
    code: &str,
    year: i32,
    month: u32,
    day: u32,
    gross: Decimal,
    net: Decimal,
) -> RevenueRecord {
    RevenueRecord {
        id: Uuid::new_v4(),
        company_id: 1,
        category_id: 1,
        transaction_code: code.to_string(),
        description: format!("test revenue {code}"),
        gross_amount: gross,
        net_amount: net,
        transaction_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        settlement_date: None,
        status: RecordStatus::Settled,
        client: Some("Acme Corp".to_string()),
        payment_method: PaymentMethod::BankTransfer,
        installment: false,
        installment_count: 1,
    }
}

pub(crate) fn expense(
    code: &str,
    year: i32,
    month: u32,
    day: u32,
    gross: Decimal,
    net: Decimal,
) -> ExpenseRecord {
    ExpenseRecord {
        id: Uuid::new_v4(),
        company_id: 1,
        category_id: 4,
        transaction_code: code.to_string(),
        description: format!("test expense {code}"),
        gross_amount: gross,
        net_amount: net,
        transaction_date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        settlement_date: None,
        status: RecordStatus::Settled,
        supplier: Some("Vendor Ltd".to_string()),
        payment_method: PaymentMethod::CreditCard,
        installment: false,
        installment_count: 1,
    }
}

pub(crate) fn goal(year: i32, month: u32, revenue_goal: Decimal) -> GoalRecord {
    GoalRecord {
        company_id: 1,
        year,
        month,
        category_id: None,
        revenue_goal,
        expense_goal: revenue_goal / Decimal::TWO,
        profit_goal: None,
    }
}

pub(crate) fn categories() -> Vec<Category> {
    vec![
        Category {
            id: 1,
            name: "Software Sales".to_string(),
            kind: CategoryKind::Revenue,
        },
        Category {
            id: 2,
            name: "Consulting".to_string(),
            kind: CategoryKind::Revenue,
        },
        Category {
            id: 4,
            name: "Salaries".to_string(),
            kind: CategoryKind::Expense,
        },
        Category {
            id: 5,
            name: "Infrastructure".to_string(),
            kind: CategoryKind::Expense,
        },
    ]
}

pub(crate) fn record_set(
    revenues: Vec<RevenueRecord>,
    expenses: Vec<ExpenseRecord>,
    goals: Vec<GoalRecord>,
) -> RecordSet {
    RecordSet {
        revenues,
        expenses,
        goals,
        categories: categories(),
    }
}
