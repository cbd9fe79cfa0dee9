pub mod enums;
pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{CategoryKind, PaymentMethod, RecordStatus};
pub use error::CoreError;
pub use structs::{
    Category, ExpenseRecord, GoalRecord, Period, RecordSet, RevenueRecord, Scope,
};
