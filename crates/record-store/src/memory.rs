use crate::RecordSource;
use crate::error::StoreError;
use async_trait::async_trait;
use core_types::{RecordSet, Scope};
use std::path::Path;

/// A record store backed by a snapshot already in memory.
///
/// Used by tests and by the CLI's offline mode, where the full ledger lives
/// in a JSON file. Scoping happens at fetch time, exactly like the database
/// store, so the two are interchangeable behind `RecordSource`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    set: RecordSet,
}

impl InMemoryStore {
    pub fn new(set: RecordSet) -> Self {
        Self { set }
    }

    /// Loads a snapshot from a JSON file shaped like `RecordSet`.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| StoreError::SnapshotIo {
            path: path.display().to_string(),
            source,
        })?;
        let set = serde_json::from_str(&raw).map_err(|source| StoreError::SnapshotFormat {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::new(set))
    }
}

#[async_trait]
impl RecordSource for InMemoryStore {
    async fn fetch_snapshot(&self, scope: &Scope) -> Result<RecordSet, StoreError> {
        Ok(self.set.scoped(scope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{PaymentMethod, RecordStatus, RevenueRecord};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_revenue(company_id: i64, year: i32) -> RevenueRecord {
        RevenueRecord {
            id: Uuid::new_v4(),
            company_id,
            category_id: 1,
            transaction_code: format!("REC-{company_id}-{year}"),
            description: "license".to_string(),
            gross_amount: dec!(1000),
            net_amount: dec!(950),
            transaction_date: NaiveDate::from_ymd_opt(year, 6, 15).unwrap(),
            settlement_date: None,
            status: RecordStatus::Settled,
            client: None,
            payment_method: PaymentMethod::BankTransfer,
            installment: false,
            installment_count: 1,
        }
    }

    #[tokio::test]
    async fn snapshot_is_scoped_at_fetch_time() {
        let set = RecordSet {
            revenues: vec![
                sample_revenue(1, 2023),
                sample_revenue(1, 2024),
                sample_revenue(2, 2024),
            ],
            ..Default::default()
        };
        let store = InMemoryStore::new(set);

        let scope = Scope::year(1, 2024);
        let snapshot = store.fetch_snapshot(&scope).await.unwrap();
        assert_eq!(snapshot.revenues.len(), 1);
        assert_eq!(snapshot.revenues[0].company_id, 1);
    }

    #[tokio::test]
    async fn json_snapshot_roundtrip() {
        let set = RecordSet {
            revenues: vec![sample_revenue(1, 2024)],
            ..Default::default()
        };
        let json = serde_json::to_string(&set).unwrap();
        let parsed: RecordSet = serde_json::from_str(&json).unwrap();
        let store = InMemoryStore::new(parsed);

        let snapshot = store.fetch_snapshot(&Scope::year(1, 2024)).await.unwrap();
        assert_eq!(snapshot.revenues.len(), 1);
        assert_eq!(snapshot.revenues[0].gross_amount, dec!(1000));
    }

    #[tokio::test]
    async fn missing_snapshot_file_is_reported() {
        let err = InMemoryStore::from_json_file("/does/not/exist.json").unwrap_err();
        assert!(matches!(err, StoreError::SnapshotIo { .. }));
    }
}
