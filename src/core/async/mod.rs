//! Asynchronous implementations of core components
//!
//! This module provides thread-safe, concurrent implementations of the
//! expense ingest components using DashMap for locking.
//!
//! # Architecture
//!
//! - **AsyncExpenseStore**: Thread-safe persisted-expense storage using
//!   DashMap
//! - **AsyncSettlementEngine**: Orchestrates concurrent expense ingest
//! - **BatchProcessor**: Payer-partitioned parallel batch ingest
//!
//! Balance aggregation itself runs per query over a snapshot of the
//! ingested set (balances are never persisted), so only ingest needs
//! concurrent data structures.

pub mod batch_processor;
pub mod engine;
pub mod expense_store;

pub use batch_processor::{BatchProcessor, IngestResult};
pub use engine::AsyncSettlementEngine;
pub use expense_store::AsyncExpenseStore;
