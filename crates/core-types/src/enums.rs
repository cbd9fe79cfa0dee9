use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a category classifies revenue or expense transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Revenue,
    Expense,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Revenue => "revenue",
            CategoryKind::Expense => "expense",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue" => Ok(CategoryKind::Revenue),
            "expense" => Ok(CategoryKind::Expense),
            other => Err(CoreError::InvalidInput(
                "category kind".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// Settlement state of a transaction record.
///
/// Records are immutable once `Settled`; the engine treats every state as
/// read-only either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    Pending,
    Settled,
    Cancelled,
}

impl RecordStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Pending => "pending",
            RecordStatus::Settled => "settled",
            RecordStatus::Cancelled => "cancelled",
        }
    }
}

impl FromStr for RecordStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RecordStatus::Pending),
            "settled" => Ok(RecordStatus::Settled),
            "cancelled" => Ok(RecordStatus::Cancelled),
            other => Err(CoreError::InvalidInput(
                "record status".to_string(),
                other.to_string(),
            )),
        }
    }
}

/// How a transaction was paid or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    InstantTransfer,
    CreditCard,
    BankSlip,
    Cash,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::InstantTransfer => "instant_transfer",
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::BankSlip => "bank_slip",
            PaymentMethod::Cash => "cash",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "instant_transfer" => Ok(PaymentMethod::InstantTransfer),
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "bank_slip" => Ok(PaymentMethod::BankSlip),
            "cash" => Ok(PaymentMethod::Cash),
            other => Err(CoreError::InvalidInput(
                "payment method".to_string(),
                other.to_string(),
            )),
        }
    }
}
