//! # Finsight Record Store
//!
//! The injected storage capability behind the reporting engine. The engine
//! itself is pure; this crate owns every way raw records enter the system:
//! a PostgreSQL repository for live deployments and an in-memory store for
//! tests and offline snapshots.
//!
//! Whatever the backend, one call produces one immutable [`RecordSet`]
//! snapshot for one [`Scope`]; the engine never issues follow-up reads
//! within a query.

use async_trait::async_trait;
use core_types::{RecordSet, Scope};

pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::StoreError;
pub use memory::InMemoryStore;
pub use repository::DbRepository;

/// A source of immutable record snapshots.
///
/// This trait is the seam between the pure engine and whatever actually
/// stores the ledger. Implementations must treat the returned snapshot as
/// frozen: the engine relies on it never changing during a call. The
/// `Send + Sync` bounds allow a single source to serve concurrent report
/// queries without coordination.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetches every record the scope selects, already narrowed to the
    /// scope's company, years and optional month.
    async fn fetch_snapshot(&self, scope: &Scope) -> Result<RecordSet, StoreError>;
}
